//! Error types for Gedkit Core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using Gedkit's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Gedkit error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Line {line} is not a valid GEDCOM line: {content:?}")]
    Grammar { line: usize, content: String },

    #[error("Line {line} has level {level} but no enclosing element at level {}", .level - 1)]
    MissingParent { line: usize, level: u32 },

    #[error("Tag {found} differs from default {expected}")]
    TagMismatch { expected: &'static str, found: String },

    #[error("Type error: {0}")]
    Type(String),

    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    #[error("Ran out of ids for prefix {prefix} after {attempts} attempts")]
    ExhaustedIdSpace { prefix: char, attempts: u32 },

    #[error("Id already registered in this document: {0}")]
    DuplicateId(String),

    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("Malformed name: {0:?}")]
    MalformedName(String),

    #[error("Unsupported sex {0:?}, expected M or F")]
    InvalidSex(String),

    #[error("Note text can only be continued with CONT or CONC, found {0}")]
    InvalidNoteChild(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
