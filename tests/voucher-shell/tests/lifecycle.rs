//! Drives the shell against the SQLite store, restarting between steps the way
//! the app does when it is closed and reopened.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use voucher_persistence::{SqliteStore, database_path_in};
use voucher_shell::{Alert, Driver, Screen, ShellEvent, ShellState, USER_URL_KEY, UrlStore};

fn database() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = database_path_in(dir.path());
    (dir, path)
}

async fn launch(path: &Path) -> Driver<SqliteStore> {
    let mut driver = Driver::new(SqliteStore::open(path).unwrap());
    driver.start().await;
    driver
}

async fn type_and_save(driver: &mut Driver<SqliteStore>, input: &str) {
    driver
        .dispatch(ShellEvent::InputChanged(input.to_string()))
        .await;
    driver.dispatch(ShellEvent::SaveRequested).await;
}

#[tokio::test]
async fn first_launch_asks_for_a_link() {
    let (_dir, path) = database();
    let driver = launch(&path).await;
    assert_eq!(
        driver.machine().screen(),
        Screen::Setup {
            input: "",
            can_save: false
        }
    );
}

#[tokio::test]
async fn saved_link_opens_directly_on_next_launch() {
    let (_dir, path) = database();

    let mut driver = launch(&path).await;
    type_and_save(&mut driver, "voucher.redeem.gov.sg/abc123").await;
    assert_eq!(
        driver.machine().saved_url().map(|url| url.as_str()),
        Some("https://voucher.redeem.gov.sg/abc123")
    );
    drop(driver);

    let driver = launch(&path).await;
    match driver.machine().state() {
        ShellState::Active { url } => {
            assert_eq!(url.as_str(), "https://voucher.redeem.gov.sg/abc123")
        }
        other => panic!("expected the saved link, got {other:?}"),
    }
}

#[tokio::test]
async fn dotless_host_is_rejected_and_nothing_is_written() {
    let (_dir, path) = database();

    let mut driver = launch(&path).await;
    type_and_save(&mut driver, "localhost").await;
    assert_eq!(driver.machine().alert(), Some(Alert::InvalidUrl));
    assert!(matches!(driver.machine().state(), ShellState::Unset { .. }));

    let store = driver.into_store();
    assert_eq!(store.get(USER_URL_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn cancelled_reset_keeps_the_link() {
    let (_dir, path) = database();

    let mut driver = launch(&path).await;
    type_and_save(&mut driver, "shop.example.com").await;
    driver.dispatch(ShellEvent::ResetRequested).await;
    assert_eq!(driver.machine().alert(), Some(Alert::ConfirmReset));
    driver.dispatch(ShellEvent::ResetCancelled).await;
    drop(driver);

    let driver = launch(&path).await;
    assert_eq!(
        driver.machine().saved_url().map(|url| url.as_str()),
        Some("https://shop.example.com")
    );
}

#[tokio::test]
async fn confirmed_reset_forgets_the_link() {
    let (_dir, path) = database();

    let mut driver = launch(&path).await;
    type_and_save(&mut driver, "https://shop.example.com/v/9").await;
    driver.dispatch(ShellEvent::ResetRequested).await;
    driver.dispatch(ShellEvent::ResetConfirmed).await;
    assert_eq!(
        driver.machine().screen(),
        Screen::Setup {
            input: "",
            can_save: false
        }
    );
    drop(driver);

    let driver = launch(&path).await;
    assert!(matches!(driver.machine().state(), ShellState::Unset { .. }));
    assert_eq!(driver.machine().alert(), None);
}

#[tokio::test]
async fn empty_input_never_reaches_storage() {
    let (_dir, path) = database();

    let mut driver = launch(&path).await;
    type_and_save(&mut driver, "").await;
    assert_eq!(driver.machine().alert(), None);
    assert!(!driver.machine().is_busy());

    let store = driver.into_store();
    assert_eq!(store.get(USER_URL_KEY).await.unwrap(), None);
}
