//! Modal messages the shell asks its renderer to present

use crate::machine::ShellEvent;

/// Which storage call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Load,
    Save,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    InvalidUrl,
    ConfirmReset,
    StorageFailure(StorageOp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
    Default,
    Cancel,
}

/// A button in an alert and the event it dispatches when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertButton {
    pub label: &'static str,
    pub role: ButtonRole,
    pub response: AlertResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertResponse {
    Dismiss,
    CancelReset,
    ConfirmReset,
}

impl AlertResponse {
    pub fn event(self) -> ShellEvent {
        match self {
            Self::Dismiss => ShellEvent::AlertDismissed,
            Self::CancelReset => ShellEvent::ResetCancelled,
            Self::ConfirmReset => ShellEvent::ResetConfirmed,
        }
    }
}

const OK_BUTTONS: [AlertButton; 1] = [AlertButton {
    label: "OK",
    role: ButtonRole::Default,
    response: AlertResponse::Dismiss,
}];

const CONFIRM_RESET_BUTTONS: [AlertButton; 2] = [
    AlertButton {
        label: "Cancel",
        role: ButtonRole::Cancel,
        response: AlertResponse::CancelReset,
    },
    AlertButton {
        label: "Yes",
        role: ButtonRole::Default,
        response: AlertResponse::ConfirmReset,
    },
];

impl Alert {
    pub fn title(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "Invalid URL",
            Self::ConfirmReset => "Change Link?",
            Self::StorageFailure(_) => "Storage Error",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "Please enter a valid website address.",
            Self::ConfirmReset => "Are you sure you want to change the voucher URL?",
            Self::StorageFailure(StorageOp::Load) => {
                "The saved link could not be read. Please enter it again."
            }
            Self::StorageFailure(StorageOp::Save) => {
                "The link could not be saved. Please try again."
            }
            Self::StorageFailure(StorageOp::Reset) => {
                "The saved link could not be removed. Please try again."
            }
        }
    }

    pub fn buttons(&self) -> &'static [AlertButton] {
        match self {
            Self::ConfirmReset => &CONFIRM_RESET_BUTTONS,
            Self::InvalidUrl | Self::StorageFailure(_) => &OK_BUTTONS,
        }
    }

    /// The response used when the alert is dismissed without pressing a button.
    pub fn dismiss_response(&self) -> AlertResponse {
        match self {
            Self::ConfirmReset => AlertResponse::CancelReset,
            _ => AlertResponse::Dismiss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_reset_offers_cancel_then_yes() {
        let buttons = Alert::ConfirmReset.buttons();
        let labels: Vec<_> = buttons.iter().map(|b| b.label).collect();
        assert_eq!(labels, ["Cancel", "Yes"]);
        assert!(matches!(buttons[0].response.event(), ShellEvent::ResetCancelled));
        assert!(matches!(buttons[1].response.event(), ShellEvent::ResetConfirmed));
        assert_eq!(Alert::ConfirmReset.dismiss_response(), AlertResponse::CancelReset);
    }

    #[test]
    fn informational_alerts_have_a_single_button() {
        for alert in [
            Alert::InvalidUrl,
            Alert::StorageFailure(StorageOp::Load),
            Alert::StorageFailure(StorageOp::Save),
            Alert::StorageFailure(StorageOp::Reset),
        ] {
            assert_eq!(alert.buttons(), &OK_BUTTONS);
            assert_eq!(alert.dismiss_response(), AlertResponse::Dismiss);
        }
    }
}
