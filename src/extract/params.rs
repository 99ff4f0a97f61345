use smallvec::SmallVec;
use std::borrow::Cow;

use crate::route::ParamOffset;

/// A parameter value located in a request path, before any redaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParameter<'a> {
    pub name: &'a str,
    /// Path text for explicit values, otherwise the template default (or `""`).
    pub value: &'a str,
    pub from_path: bool,
    /// Span into the normalized path; `None` unless `from_path`.
    pub offset: Option<ParamOffset>,
}

/// A parameter ready for telemetry: `final_value` is what sinks may record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedParameter<'a> {
    pub name: &'a str,
    pub raw_value: &'a str,
    pub final_value: Cow<'a, str>,
    pub is_redacted: bool,
    pub from_path: bool,
}

pub(crate) type RawParameterList<'a> = SmallVec<[RawParameter<'a>; 8]>;
