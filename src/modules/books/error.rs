use bookshelf_http::error::AppError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use super::models::BookId;

/// Why a book draft was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    RequiredField,
    TooShort,
    TooLong,
    /// ISBN contains something other than digits and hyphens
    InvalidFormat,
    /// ISBN digit count is neither 10 nor 13
    InvalidLength,
    DuplicateIsbn,
    FutureDate,
    TooOld,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::RequiredField => "required_field",
            ErrorKind::TooShort => "too_short",
            ErrorKind::TooLong => "too_long",
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::InvalidLength => "invalid_length",
            ErrorKind::DuplicateIsbn => "duplicate_isbn",
            ErrorKind::FutureDate => "future_date",
            ErrorKind::TooOld => "too_old",
        }
    }
}

/// Book field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Author,
    Isbn,
    PublicationDate,
}

/// First failed check for a book draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

/// Errors returned by catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Book with ID {0} not found")]
    NotFound(BookId),
}

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::Validation(err) => AppError::validation(
                err.kind.code(),
                vec![json!({ "field": err.field, "kind": err.kind })],
                err.message,
            ),
            BookError::NotFound(_) => AppError::not_found(err.to_string()),
        }
    }
}
