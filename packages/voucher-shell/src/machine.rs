//! The app shell as an explicit state machine.
//!
//! [`Machine::handle`] consumes one [`ShellEvent`] and returns at most one
//! [`Command`] for the storage collaborator. The completion of that command is
//! fed back as another event. While a command is in flight no other command is
//! issued, so the persisted slot only ever has one writer.

use crate::address::VoucherUrl;
use crate::alert::{Alert, StorageOp};
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellState {
    /// The persisted address has not been read yet.
    Loading,
    /// No address is saved; the user is editing `input`.
    Unset { input: String },
    /// An address is saved and displayed.
    Active { url: VoucherUrl },
}

#[derive(Debug)]
pub enum ShellEvent {
    Started,
    InputChanged(String),
    SaveRequested,
    ResetRequested,
    ResetConfirmed,
    ResetCancelled,
    AlertDismissed,

    Loaded(Result<Option<String>, StoreError>),
    Stored(Result<VoucherUrl, StoreError>),
    Removed(Result<(), StoreError>),
}

/// A storage call the caller must perform and report back on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load,
    Store(VoucherUrl),
    Remove,
}

/// What the renderer should currently draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen<'a> {
    Loading,
    Setup { input: &'a str, can_save: bool },
    Viewer { url: &'a VoucherUrl },
}

#[derive(Debug)]
pub struct Machine {
    state: ShellState,
    alert: Option<Alert>,
    in_flight: Option<Pending>,
    started: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Load,
    Store,
    Remove,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Self {
            state: ShellState::Loading,
            alert: None,
            in_flight: None,
            started: false,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn alert(&self) -> Option<Alert> {
        self.alert
    }

    /// Whether a storage command is awaiting its completion event.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn saved_url(&self) -> Option<&VoucherUrl> {
        match &self.state {
            ShellState::Active { url } => Some(url),
            _ => None,
        }
    }

    pub fn screen(&self) -> Screen<'_> {
        match &self.state {
            ShellState::Loading => Screen::Loading,
            ShellState::Unset { input } => Screen::Setup {
                input,
                can_save: can_save(input) && !self.is_busy(),
            },
            ShellState::Active { url } => Screen::Viewer { url },
        }
    }

    pub fn handle(&mut self, event: ShellEvent) -> Option<Command> {
        match event {
            ShellEvent::Loaded(result) => {
                self.finish(Pending::Load);
                self.on_loaded(result);
                None
            }
            ShellEvent::Stored(result) => {
                self.finish(Pending::Store);
                self.on_stored(result);
                None
            }
            ShellEvent::Removed(result) => {
                self.finish(Pending::Remove);
                self.on_removed(result);
                None
            }
            event => self.on_intent(event),
        }
    }

    fn on_intent(&mut self, event: ShellEvent) -> Option<Command> {
        // Alerts are modal: only a response to the alert gets through.
        if let Some(alert) = self.alert {
            return self.on_alert_response(alert, event);
        }

        match event {
            ShellEvent::Started => {
                if self.started || !matches!(self.state, ShellState::Loading) {
                    tracing::debug!("Ignoring repeated start");
                    return None;
                }
                self.started = true;
                self.issue(Pending::Load, Command::Load)
            }
            ShellEvent::InputChanged(text) => {
                if let ShellState::Unset { input } = &mut self.state {
                    *input = text;
                }
                None
            }
            ShellEvent::SaveRequested => self.on_save_requested(),
            ShellEvent::ResetRequested => {
                if matches!(self.state, ShellState::Active { .. }) && self.in_flight.is_none() {
                    self.alert = Some(Alert::ConfirmReset);
                }
                None
            }
            event => {
                tracing::debug!("Ignoring {event:?} in {:?}", self.state);
                None
            }
        }
    }

    fn on_save_requested(&mut self) -> Option<Command> {
        let ShellState::Unset { input } = &self.state else {
            return None;
        };
        if !can_save(input) || self.in_flight.is_some() {
            return None;
        }
        match VoucherUrl::parse(input) {
            Ok(url) => {
                tracing::debug!("Saving {url}");
                self.issue(Pending::Store, Command::Store(url))
            }
            Err(err) => {
                tracing::debug!("Rejected input: {err}");
                self.alert = Some(Alert::InvalidUrl);
                None
            }
        }
    }

    fn on_alert_response(&mut self, alert: Alert, event: ShellEvent) -> Option<Command> {
        match (alert, event) {
            (Alert::ConfirmReset, ShellEvent::ResetConfirmed) => {
                self.alert = None;
                self.issue(Pending::Remove, Command::Remove)
            }
            (Alert::ConfirmReset, ShellEvent::ResetCancelled | ShellEvent::AlertDismissed) => {
                self.alert = None;
                None
            }
            (Alert::InvalidUrl | Alert::StorageFailure(_), ShellEvent::AlertDismissed) => {
                self.alert = None;
                None
            }
            (alert, event) => {
                tracing::debug!("Ignoring {event:?} while {alert:?} is shown");
                None
            }
        }
    }

    fn on_loaded(&mut self, result: Result<Option<String>, StoreError>) {
        if !matches!(self.state, ShellState::Loading) {
            return;
        }
        let saved = match result {
            Ok(saved) => saved,
            Err(err) => {
                tracing::warn!("Failed to read saved link: {err}");
                self.alert = Some(Alert::StorageFailure(StorageOp::Load));
                None
            }
        };

        self.state = match saved.filter(|value| !value.is_empty()) {
            Some(value) => match VoucherUrl::parse(&value) {
                Ok(url) => {
                    tracing::info!("Opening saved link {url}");
                    ShellState::Active { url }
                }
                Err(err) => {
                    tracing::warn!("Discarding saved link: {err}");
                    ShellState::Unset {
                        input: String::new(),
                    }
                }
            },
            None => ShellState::Unset {
                input: String::new(),
            },
        };
    }

    fn on_stored(&mut self, result: Result<VoucherUrl, StoreError>) {
        if !matches!(self.state, ShellState::Unset { .. }) {
            return;
        }
        match result {
            Ok(url) => {
                tracing::info!("Saved link {url}");
                self.state = ShellState::Active { url };
            }
            Err(err) => {
                tracing::warn!("Failed to save link: {err}");
                self.alert = Some(Alert::StorageFailure(StorageOp::Save));
            }
        }
    }

    fn on_removed(&mut self, result: Result<(), StoreError>) {
        if !matches!(self.state, ShellState::Active { .. }) {
            return;
        }
        match result {
            Ok(()) => {
                tracing::info!("Cleared saved link");
                self.state = ShellState::Unset {
                    input: String::new(),
                };
            }
            Err(err) => {
                tracing::warn!("Failed to clear saved link: {err}");
                self.alert = Some(Alert::StorageFailure(StorageOp::Reset));
            }
        }
    }

    fn issue(&mut self, pending: Pending, command: Command) -> Option<Command> {
        self.in_flight = Some(pending);
        Some(command)
    }

    fn finish(&mut self, completed: Pending) {
        match self.in_flight {
            Some(pending) if pending == completed => self.in_flight = None,
            other => tracing::debug!("Unexpected {completed:?} completion (in flight: {other:?})"),
        }
    }
}

fn can_save(input: &str) -> bool {
    !input.trim().is_empty()
}
