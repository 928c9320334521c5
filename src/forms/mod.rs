//! Form definitions backing the tool tracker pages.

use thiserror::Error;
use validator::ValidationErrors;

pub mod lend;
pub mod tool;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid name")]
    InvalidName,

    #[error("no person selected")]
    PersonNotSelected,

    #[error("unknown person")]
    UnknownPerson,
}
