use dioxus_native::prelude::*;
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;
use voucher_persistence::SqliteStore;
use voucher_shell::{Config, Machine, Screen, ShellEvent, execute};

use crate::WINDOW_TITLE;
use crate::dialog::AlertDialog;
use crate::setup::SetupScreen;
use crate::webview::Viewer;

const STYLES: &str = include_str!("../assets/voucher.css");

pub fn app() -> Element {
    let store = use_context::<SqliteStore>();
    let mut machine = use_signal(Machine::new);

    // Events are handled strictly in order: a storage call always completes
    // before the next event reaches the machine.
    let events = use_coroutine(move |mut rx: UnboundedReceiver<ShellEvent>| {
        let store = store.clone();
        async move {
            let config = Config::default();
            while let Some(event) = rx.next().await {
                let mut next = machine.write().handle(event);
                while let Some(command) = next {
                    let done = execute(&store, config.storage_key(), command).await;
                    next = machine.write().handle(done);
                }
            }
        }
    });

    use_effect(move || events.send(ShellEvent::Started));

    let machine = machine.read();
    let screen = match machine.screen() {
        Screen::Loading => rsx!(
            div { class: "centered",
                div { class: "spinner" }
            }
        ),
        Screen::Setup { input, can_save } => rsx!(SetupScreen {
            input: input.to_string(),
            can_save
        }),
        Screen::Viewer { url } => rsx!(Viewer { url: url.clone() }),
    };

    rsx!(
        title { "{WINDOW_TITLE}" }
        style { {STYLES} }
        {screen}
        if let Some(alert) = machine.alert() {
            AlertDialog { alert }
        }
    )
}
