//! Route template parsing and parameter redaction for HTTP telemetry.
//!
//! A template such as `api/routes/{routeId}/chats/{chatId?}/{**tail}` is compiled once into a
//! [`ParsedRoute`]. Each request path is then walked against it to pull out parameter values,
//! and every value taken from the path passes through a [`RedactionPolicy`] before it reaches
//! logs or traces.

pub mod enums;
pub mod errors;
pub mod extract;
pub mod path;
pub mod redaction;
pub mod route;
pub mod telemetry;

pub use enums::RedactionMode;
pub use errors::{RouteTelemetryError, RouteTelemetryResult};
pub use extract::{ExtractedParameter, ParameterExtractor, RawParameter, extract_parameters};
pub use redaction::{
    ClassificationMap, Classifier, DataClassification, ErasingRedactor, REDACTED_PLACEHOLDER,
    RedactionModeError, RedactionPolicy, Redactor, apply_redaction,
};
pub use route::{ParamOffset, ParsedRoute, Segment, SegmentFlags, TemplateError, compile_template};
pub use telemetry::{
    RouteParameter, RouteTelemetry, TelemetryOptions, TelemetryOptionsBuilder, TemplateCache,
};
