use serde::{Deserialize, Serialize};

use crate::enums::RedactionMode;
use crate::extract::ParameterExtractor;
use crate::redaction::RedactionModeError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TelemetryOptions {
    pub redaction_mode: RedactionMode,
    /// Compare literal route text ordinally. Off by default, so literals match
    /// ASCII case-insensitively like the router.
    pub case_sensitive: bool,
    /// Emit cache hit/miss events at DEBUG level.
    pub debug: bool,
}

impl Default for TelemetryOptions {
    fn default() -> Self {
        Self {
            redaction_mode: RedactionMode::Strict,
            case_sensitive: false,
            debug: false,
        }
    }
}

impl TelemetryOptions {
    pub fn builder() -> TelemetryOptionsBuilder {
        TelemetryOptionsBuilder::default()
    }

    pub fn extractor(&self) -> ParameterExtractor {
        ParameterExtractor::new(self.case_sensitive)
    }
}

#[derive(Debug, Default, Clone)]
pub struct TelemetryOptionsBuilder {
    options: TelemetryOptions,
}

impl TelemetryOptionsBuilder {
    pub fn redaction_mode(mut self, value: RedactionMode) -> Self {
        self.options.redaction_mode = value;
        self
    }

    /// Sets the mode from an untyped value, e.g. one read from a host config or FFI call.
    pub fn redaction_mode_value(mut self, value: i64) -> Result<Self, RedactionModeError> {
        self.options.redaction_mode = RedactionMode::try_from(value)?;
        Ok(self)
    }

    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.options.case_sensitive = value;
        self
    }

    pub fn debug(mut self, value: bool) -> Self {
        self.options.debug = value;
        self
    }

    pub fn build(self) -> TelemetryOptions {
        self.options
    }
}
