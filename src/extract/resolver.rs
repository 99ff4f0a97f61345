use memchr::{memchr, memchr2};

use super::params::{ExtractedParameter, RawParameter, RawParameterList};
use crate::path::normalize_path;
use crate::redaction::{Classifier, RedactionPolicy, Redactor};
use crate::route::{ParsedRoute, Segment};

/// Walks a [`ParsedRoute`] against concrete request paths.
///
/// Literal text is compared ASCII case-insensitively unless `case_sensitive` is set,
/// in which case the comparison is ordinal.
/// Paths are not percent-decoded, so an encoded separator never splits a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParameterExtractor {
    case_sensitive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LiteralMatch {
    Matched,
    Truncated,
    Mismatch,
}

impl ParameterExtractor {
    pub fn new(case_sensitive: bool) -> Self {
        Self { case_sensitive }
    }

    #[inline]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Fills `out` with the raw parameter values of `path`, in template order.
    ///
    /// `out` must hold exactly `route.parameter_count()` entries. Returns `false` without
    /// touching `out` when it does not, or when the path contradicts a literal of the route.
    #[tracing::instrument(level = "trace", skip_all, fields(path_len = path.len() as u64, params = route.parameter_count() as u64))]
    pub fn extract_raw<'a>(
        &self,
        path: &'a str,
        route: &'a ParsedRoute,
        out: &mut [RawParameter<'a>],
    ) -> bool {
        if out.len() != route.parameter_count() {
            return false;
        }

        let mut resolved = RawParameterList::new();
        if !self.resolve(path, route, &mut resolved) {
            return false;
        }

        for (slot, param) in out.iter_mut().zip(resolved) {
            *slot = param;
        }
        true
    }

    /// Like [`extract_raw`](Self::extract_raw), then runs every value through `policy`.
    #[tracing::instrument(level = "trace", skip_all, fields(path_len = path.len() as u64, params = route.parameter_count() as u64))]
    pub fn extract<'a, C, R>(
        &self,
        path: &'a str,
        route: &'a ParsedRoute,
        policy: &RedactionPolicy<C, R>,
        out: &mut [ExtractedParameter<'a>],
    ) -> bool
    where
        C: Classifier,
        R: Redactor,
    {
        if out.len() != route.parameter_count() {
            return false;
        }

        let mut resolved = RawParameterList::new();
        if !self.resolve(path, route, &mut resolved) {
            return false;
        }

        for (slot, raw) in out.iter_mut().zip(resolved) {
            let (final_value, is_redacted) = policy.apply(raw.name, raw.value, raw.from_path);
            *slot = ExtractedParameter {
                name: raw.name,
                raw_value: raw.value,
                final_value,
                is_redacted,
                from_path: raw.from_path,
            };
        }
        true
    }

    /// Single forward pass over the segments. Once the path runs out, every remaining
    /// parameter resolves to its default.
    pub(crate) fn resolve<'a>(
        &self,
        path: &'a str,
        route: &'a ParsedRoute,
        params: &mut RawParameterList<'a>,
    ) -> bool {
        let path = normalize_path(path);
        let segments = route.segments();
        let mut cursor = 0usize;
        let mut exhausted = false;

        for (idx, segment) in segments.iter().enumerate() {
            if !segment.is_param() {
                if exhausted {
                    continue;
                }
                let literal = segment.literal_text();
                match self.match_literal(&path[cursor..], literal) {
                    LiteralMatch::Matched => cursor += literal.len(),
                    LiteralMatch::Truncated => exhausted = true,
                    LiteralMatch::Mismatch => return false,
                }
                continue;
            }

            let remaining = if exhausted { "" } else { &path[cursor..] };
            if remaining.is_empty() {
                params.push(RawParameter {
                    name: segment.param_name(),
                    value: segment.default_value(),
                    from_path: false,
                    offset: None,
                });
            } else {
                // an empty delimited value is still explicit, e.g. `a//b`
                let next = segments.get(idx + 1);
                let len = if segment.is_catch_all() {
                    catch_all_len(remaining, next)
                } else {
                    self.param_len(remaining, next)
                };
                params.push(RawParameter {
                    name: segment.param_name(),
                    value: &path[cursor..cursor + len],
                    from_path: true,
                    offset: Some((cursor, len)),
                });
                cursor += len;
            }
        }

        true
    }

    fn match_literal(&self, remaining: &str, literal: &str) -> LiteralMatch {
        let rem = remaining.as_bytes();
        let lit = literal.as_bytes();

        if rem.len() >= lit.len() {
            if self.bytes_eq(&rem[..lit.len()], lit) {
                LiteralMatch::Matched
            } else {
                LiteralMatch::Mismatch
            }
        } else if self.bytes_eq(rem, &lit[..rem.len()]) {
            LiteralMatch::Truncated
        } else {
            LiteralMatch::Mismatch
        }
    }

    #[inline]
    fn bytes_eq(&self, a: &[u8], b: &[u8]) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.eq_ignore_ascii_case(b)
        }
    }

    /// A plain parameter runs up to the first character of the next literal, or to the end.
    fn param_len(&self, remaining: &str, next: Option<&Segment>) -> usize {
        let Some(delimiter) = next.and_then(|s| s.literal_text().as_bytes().first().copied())
        else {
            return remaining.len();
        };

        let haystack = remaining.as_bytes();
        let found = if !self.case_sensitive && delimiter.is_ascii_alphabetic() {
            memchr2(
                delimiter.to_ascii_lowercase(),
                delimiter.to_ascii_uppercase(),
                haystack,
            )
        } else {
            memchr(delimiter, haystack)
        };
        found.unwrap_or(remaining.len())
    }
}

// the only segment allowed after a catch-all is a trailing "/", which stays out of the value
fn catch_all_len(remaining: &str, next: Option<&Segment>) -> usize {
    if next.is_some() && remaining.ends_with('/') {
        remaining.len() - 1
    } else {
        remaining.len()
    }
}

/// Extracts and redacts with the default (case-insensitive) extractor.
pub fn extract_parameters<'a, C, R>(
    path: &'a str,
    route: &'a ParsedRoute,
    policy: &RedactionPolicy<C, R>,
    out: &mut [ExtractedParameter<'a>],
) -> bool
where
    C: Classifier,
    R: Redactor,
{
    ParameterExtractor::default().extract(path, route, policy, out)
}
