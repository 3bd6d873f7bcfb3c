use dioxus_native::prelude::*;
use voucher_shell::{Alert, ButtonRole, ShellEvent};

/// A modal rendered over the current screen. Clicking the backdrop counts as
/// dismissing it.
#[component]
pub fn AlertDialog(alert: Alert) -> Element {
    let events = use_coroutine_handle::<ShellEvent>();
    let dismiss = alert.dismiss_response();
    let title = alert.title();
    let message = alert.message();

    let buttons = alert.buttons().iter().map(|choice| {
        let class = match choice.role {
            ButtonRole::Cancel => "alert-button alert-cancel",
            ButtonRole::Default => "alert-button",
        };
        let label = choice.label;
        let response = choice.response;
        rsx!(
            button {
                key: "{label}",
                class: class,
                onclick: move |evt| {
                    evt.stop_propagation();
                    events.send(response.event());
                },
                "{label}"
            }
        )
    });

    rsx!(
        div { class: "alert-backdrop",
            onclick: move |_| events.send(dismiss.event()),
            div { class: "alert",
                onclick: move |evt| evt.stop_propagation(),
                div { class: "alert-title", "{title}" }
                div { class: "alert-message", "{message}" }
                div { class: "alert-buttons", {buttons} }
            }
        }
    )
}
