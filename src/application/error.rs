use thiserror::Error;

use crate::domain::{Cents, LedgerError, ParseEntryRefError, ParseKindError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    UnknownKind(#[from] ParseKindError),

    #[error("Description must not be empty")]
    EmptyDescription,

    #[error("Invalid amount '{0}'. Use '50.00' or '50'")]
    InvalidAmount(String),

    #[error("Amount '{0}' has more than two decimal places")]
    TooManyDecimals(String),

    #[error("Amount '{0}' is too large")]
    AmountTooLarge(String),

    #[error("Amount must be positive, got {0} cents")]
    NonPositiveAmount(Cents),

    #[error(transparent)]
    InvalidEntryRef(#[from] ParseEntryRefError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

