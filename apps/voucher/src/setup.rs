use dioxus_native::prelude::*;
use voucher_shell::ShellEvent;

const LABEL: &str = "Enter Voucher URL:";
const PLACEHOLDER: &str = "https://voucher.redeem.gov.sg/<your-voucher-code>";

/// First-run screen: one text field and a save button.
#[component]
pub fn SetupScreen(input: String, can_save: bool) -> Element {
    let events = use_coroutine_handle::<ShellEvent>();

    rsx!(
        div { class: "setup",
            div { class: "setup-label", "{LABEL}" }
            input {
                class: "setup-input",
                "type": "url",
                "inputmode": "url",
                "autocapitalize": "none",
                "autocorrect": "off",
                name: "voucher-url",
                placeholder: PLACEHOLDER,
                value: input,
                oninput: move |evt| events.send(ShellEvent::InputChanged(evt.value())),
                onkeydown: move |evt| {
                    if evt.key() == Key::Enter {
                        evt.prevent_default();
                        events.send(ShellEvent::SaveRequested);
                    }
                },
            }
            button {
                class: "setup-save",
                disabled: !can_save,
                onclick: move |_| events.send(ShellEvent::SaveRequested),
                "SAVE LINK"
            }
        }
    )
}
