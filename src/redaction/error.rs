use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RedactionModeError {
    #[error("unsupported redaction mode value")]
    Unsupported { value: i64 },
}
