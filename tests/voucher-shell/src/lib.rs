//! Lifecycle tests for the voucher shell and its SQLite store live in `tests/`.
