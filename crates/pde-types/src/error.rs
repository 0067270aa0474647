// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdeError {
    #[error("Sub-index value {value} out of range [0, {num_values})")]
    SubIndexOutOfRange { value: usize, num_values: usize },

    #[error("Column number {column} out of range [0, {total})")]
    ColumnOutOfRange { column: usize, total: usize },

    #[error("Invalid multi-index: {0}")]
    MultiIndexInvalid(String),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("Unsupported number of spatial dimensions: {0} (expected 1 or 2)")]
    UnsupportedDimension(usize),

    #[error("Training diverged at epoch {epoch}: {message}")]
    Diverged { epoch: usize, message: String },

    #[error("Integer overflow: {0}")]
    Overflow(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PdeResult<T> = Result<T, PdeError>;
