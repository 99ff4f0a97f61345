use super::DataClassification;

/// Rewrites a sensitive value into a form that is safe to emit.
pub trait Redactor {
    fn redact(&self, value: &str, classification: &DataClassification) -> String;
}

impl<F> Redactor for F
where
    F: Fn(&str, &DataClassification) -> String,
{
    fn redact(&self, value: &str, classification: &DataClassification) -> String {
        self(value, classification)
    }
}

/// Replaces every value with a fixed string, whatever its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErasingRedactor(pub &'static str);

impl Redactor for ErasingRedactor {
    fn redact(&self, _value: &str, _classification: &DataClassification) -> String {
        self.0.to_string()
    }
}
