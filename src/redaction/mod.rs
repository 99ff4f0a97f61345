mod classification;
mod error;
mod policy;
mod redactor;

pub use classification::{ClassificationMap, Classifier, DataClassification};
pub use error::RedactionModeError;
pub use policy::{REDACTED_PLACEHOLDER, RedactionPolicy, apply_redaction};
pub use redactor::{ErasingRedactor, Redactor};
