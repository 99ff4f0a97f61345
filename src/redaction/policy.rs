use std::borrow::Cow;

use super::{Classifier, RedactionModeError, Redactor};
use crate::enums::RedactionMode;

/// Emitted in place of a value that has no known classification under [`RedactionMode::Strict`].
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

/// Decides what a single route parameter looks like in telemetry.
///
/// Returns the final value and whether it was redacted. Values that did not come from the
/// request path (template defaults) carry no user input and always pass through unchanged.
///
/// | mode   | classified `None` | classified sensitive | unclassified            |
/// |--------|-------------------|----------------------|-------------------------|
/// | None   | raw               | raw                  | raw                     |
/// | Loose  | raw               | redactor output      | raw                     |
/// | Strict | raw               | redactor output      | [`REDACTED_PLACEHOLDER`] |
pub fn apply_redaction<'v, C, R>(
    name: &str,
    raw_value: &'v str,
    from_path: bool,
    mode: RedactionMode,
    classifier: &C,
    redactor: &R,
) -> (Cow<'v, str>, bool)
where
    C: Classifier + ?Sized,
    R: Redactor + ?Sized,
{
    if !from_path || mode == RedactionMode::None {
        return (Cow::Borrowed(raw_value), false);
    }

    match classifier.classify(name) {
        Some(classification) if classification.is_none() => (Cow::Borrowed(raw_value), false),
        Some(classification) => (Cow::Owned(redactor.redact(raw_value, classification)), true),
        None => match mode {
            RedactionMode::Strict => (Cow::Borrowed(REDACTED_PLACEHOLDER), true),
            RedactionMode::Loose | RedactionMode::None => (Cow::Borrowed(raw_value), false),
        },
    }
}

/// A redaction mode bound to its classification lookup and redactor.
#[derive(Debug, Clone)]
pub struct RedactionPolicy<C, R> {
    mode: RedactionMode,
    classifier: C,
    redactor: R,
}

impl<C: Classifier, R: Redactor> RedactionPolicy<C, R> {
    pub fn new(mode: RedactionMode, classifier: C, redactor: R) -> Self {
        Self {
            mode,
            classifier,
            redactor,
        }
    }

    /// Builds a policy from an untyped mode value, rejecting anything outside the known modes.
    pub fn from_raw_mode(mode: i64, classifier: C, redactor: R) -> Result<Self, RedactionModeError> {
        let mode = RedactionMode::try_from(mode)?;
        Ok(Self::new(mode, classifier, redactor))
    }

    #[inline]
    pub fn mode(&self) -> RedactionMode {
        self.mode
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    #[inline]
    pub fn apply<'v>(&self, name: &str, raw_value: &'v str, from_path: bool) -> (Cow<'v, str>, bool) {
        apply_redaction(
            name,
            raw_value,
            from_path,
            self.mode,
            &self.classifier,
            &self.redactor,
        )
    }
}
