use thiserror::Error;

/// Conditions that abort an extraction run. Everything else is a
/// [`Diagnostic`](crate::diagnostics::Diagnostic).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// Two `INPUT_PORTS_START` blocks share a name; the source no longer
    /// matches the assumptions the scanners are built on.
    #[error("duplicate input definition for {device}")]
    DuplicateInput { device: String },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
