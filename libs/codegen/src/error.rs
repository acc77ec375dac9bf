//! Error types for fragment emission and splicing

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Reported with the literal marker text so the missing line can be
    /// pasted into the target file as-is.
    #[error("begin marker not found in {file}: {marker:?}")]
    BeginMarkerNotFound { file: String, marker: String },

    #[error("end marker not found in {file}: {marker:?}")]
    EndMarkerNotFound { file: String, marker: String },

    #[error("generator produced no content for region '{0}'")]
    UnknownRegion(String),

    #[error("unit type '{unit_type}' is not resolved; run resolution before emission")]
    Unresolved { unit_type: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
