//! The app shell behind Voucher View.
//!
//! Voucher View remembers a single web address and shows it full-screen. This
//! crate holds everything that does not depend on a renderer:
//!
//!  - [`address`]: normalization and validation of what the user types.
//!  - [`Machine`]: the `Loading` / `Unset` / `Active` state machine.
//!  - [`UrlStore`]: the persistent storage capability, with an in-memory [`MemoryStore`].
//!  - [`Alert`]: the modal messages a renderer must present.
//!  - [`Driver`]: runs the machine against a store without any UI.

pub mod address;

mod alert;
pub use alert::{Alert, AlertButton, AlertResponse, ButtonRole, StorageOp};

mod config;
pub use config::Config;

mod driver;
pub use driver::{Driver, execute};

mod machine;
pub use machine::{Command, Machine, Screen, ShellEvent, ShellState};

mod store;
pub use store::{BoxedError, MemoryStore, StoreError, USER_URL_KEY, UrlStore};

pub use address::{InvalidUrl, VoucherUrl, is_valid_url, normalize};
