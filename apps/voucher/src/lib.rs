//! Voucher View: a shell that remembers one web address and shows it full-screen.
//!
//! The UI is powered by Dioxus Native and the saved page is rendered by Blitz.
//! State lives in [`voucher_shell::Machine`]; the address is kept in SQLite.

mod app;
mod dialog;
mod setup;
mod webview;

use std::any::Any;
use std::path::PathBuf;

use voucher_persistence::{PersistenceError, SqliteStore};
use winit::window::WindowAttributes;

pub(crate) const WINDOW_TITLE: &str = "Voucher";

type ContextFactory = Box<dyn Fn() -> Box<dyn Any> + Send + Sync>;

/// Open the link store and run the UI until the window is closed.
pub fn launch() {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt::init();

    let store = match open_store() {
        Ok(store) => store,
        Err(err) => {
            eprintln!("Cannot open link storage: {err}");
            std::process::exit(1);
        }
    };

    let store_context: ContextFactory =
        Box::new(move || Box::new(store.clone()) as Box<dyn Any>);
    let window: Box<dyn Any> = Box::new(WindowAttributes::default().with_title(WINDOW_TITLE));

    tracing::info!("Launching {WINDOW_TITLE}");
    dioxus_native::launch_cfg(app::app, vec![store_context], vec![window])
}

/// Falls back to a session-only store so the app stays usable when the disk is not.
fn open_store() -> Result<SqliteStore, PersistenceError> {
    match database_path().and_then(SqliteStore::open) {
        Ok(store) => Ok(store),
        Err(err) => {
            tracing::error!("Failed to open link store, links will not be kept: {err}");
            SqliteStore::open_in_memory()
        }
    }
}

#[cfg(not(any(target_os = "android", target_os = "ios")))]
fn database_path() -> Result<PathBuf, PersistenceError> {
    voucher_persistence::default_database_path()
}

#[cfg(target_os = "android")]
fn database_path() -> Result<PathBuf, PersistenceError> {
    dioxus_native::current_android_app()
        .internal_data_path()
        .map(|dir| voucher_persistence::database_path_in(&dir))
        .ok_or(PersistenceError::NoDataDir)
}

#[cfg(target_os = "ios")]
fn database_path() -> Result<PathBuf, PersistenceError> {
    std::env::home_dir()
        .map(|home| {
            voucher_persistence::database_path_in(&home.join("Library").join("Application Support"))
        })
        .ok_or(PersistenceError::NoDataDir)
}

/// Run with `cargo apk run`
#[cfg(target_os = "android")]
#[unsafe(no_mangle)]
pub fn android_main(android_app: dioxus_native::AndroidApp) {
    dioxus_native::set_android_app(android_app);
    launch()
}
