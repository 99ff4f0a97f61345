use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

use super::{TelemetryOptions, TemplateCache};
use crate::errors::RouteTelemetryResult;
use crate::extract::{ExtractedParameter, ParameterExtractor};
use crate::redaction::{Classifier, RedactionPolicy, Redactor};
use crate::route::ParsedRoute;

/// Owned copy of an extracted parameter, for sinks that outlive the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParameter {
    pub name: String,
    pub value: String,
    pub is_redacted: bool,
}

impl From<&ExtractedParameter<'_>> for RouteParameter {
    fn from(param: &ExtractedParameter<'_>) -> Self {
        Self {
            name: param.name.to_string(),
            value: param.final_value.to_string(),
            is_redacted: param.is_redacted,
        }
    }
}

/// Compile once, extract and redact per request.
///
/// Templates are compiled on first use (or eagerly through [`register`](Self::register)) and
/// shared read-only by every request afterwards.
#[derive(Debug)]
pub struct RouteTelemetry<C, R> {
    options: TelemetryOptions,
    extractor: ParameterExtractor,
    policy: RedactionPolicy<C, R>,
    cache: TemplateCache,
}

impl<C: Classifier, R: Redactor> RouteTelemetry<C, R> {
    pub fn new(options: TelemetryOptions, classifier: C, redactor: R) -> Self {
        Self {
            options,
            extractor: options.extractor(),
            policy: RedactionPolicy::new(options.redaction_mode, classifier, redactor),
            cache: TemplateCache::new(options.debug),
        }
    }

    pub fn options(&self) -> &TelemetryOptions {
        &self.options
    }

    pub fn policy(&self) -> &RedactionPolicy<C, R> {
        &self.policy
    }

    /// Compiles and caches `template`. Call at route registration so bad templates fail early.
    pub fn register(&self, template: &str) -> RouteTelemetryResult<Arc<ParsedRoute>> {
        self.cache.get_or_compile(template).map_err(|err| {
            tracing::warn!(template = %template, error = %err, "route template rejected");
            err.into()
        })
    }

    /// Extracts and redacts the parameters of `path` into a stack buffer and hands them to `f`.
    ///
    /// Yields `Ok(None)` when the path does not belong to the route.
    pub fn with_parameters<T>(
        &self,
        template: &str,
        path: &str,
        f: impl FnOnce(&[ExtractedParameter<'_>]) -> T,
    ) -> RouteTelemetryResult<Option<T>> {
        let route = self.register(template)?;
        let mut buffer: SmallVec<[ExtractedParameter<'_>; 8]> =
            SmallVec::from_elem(ExtractedParameter::default(), route.parameter_count());

        if !self.extractor.extract(path, &route, &self.policy, buffer.as_mut_slice()) {
            tracing::debug!(
                template = %route.route_template(),
                "request path does not match route template"
            );
            return Ok(None);
        }

        Ok(Some(f(buffer.as_slice())))
    }

    pub fn collect_parameters(
        &self,
        template: &str,
        path: &str,
    ) -> RouteTelemetryResult<Option<Vec<RouteParameter>>> {
        self.with_parameters(template, path, |params| {
            params.iter().map(RouteParameter::from).collect::<Vec<_>>()
        })
    }

    /// The request path with explicit parameter values replaced by their redacted form.
    pub fn format(&self, template: &str, path: &str) -> RouteTelemetryResult<Option<String>> {
        let route = self.register(template)?;
        Ok(self.extractor.format_route(path, &route, &self.policy))
    }

    /// `(hits, misses)` of the template cache.
    pub fn cache_metrics(&self) -> (u64, u64) {
        self.cache.stats().snapshot()
    }

    pub fn cached_templates(&self) -> usize {
        self.cache.len()
    }
}
