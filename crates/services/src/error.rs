//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;
use style_core::BankError;

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error("sheet sink selected but STYLE_SHEET_WEBHOOK_URL is not set")]
    SheetNotConfigured,
}

/// Unknown value for `--sink` / `STYLE_SINK`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sink `{0}` (expected sqlite, sheet or none)")]
pub struct ParseSinkError(pub String);
