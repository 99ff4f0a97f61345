use super::ParameterExtractor;
use super::params::RawParameterList;
use crate::path::normalize_path;
use crate::redaction::{Classifier, RedactionPolicy, Redactor};
use crate::route::ParsedRoute;

impl ParameterExtractor {
    /// Renders the normalized `path` with every explicit parameter replaced by its policy output,
    /// e.g. `api/routes/[REDACTED]/chats/Redacted:chatId123`.
    ///
    /// Literal text and anything past the last segment are copied verbatim. Returns `None` when
    /// the path does not belong to `route`.
    pub fn format_route<C, R>(
        &self,
        path: &str,
        route: &ParsedRoute,
        policy: &RedactionPolicy<C, R>,
    ) -> Option<String>
    where
        C: Classifier,
        R: Redactor,
    {
        let mut resolved = RawParameterList::new();
        if !self.resolve(path, route, &mut resolved) {
            return None;
        }

        let normalized = normalize_path(path);
        let mut formatted = String::with_capacity(normalized.len());
        let mut copied = 0usize;

        for param in resolved.iter() {
            let Some((start, len)) = param.offset else {
                continue;
            };
            formatted.push_str(&normalized[copied..start]);
            let (value, _) = policy.apply(param.name, param.value, param.from_path);
            formatted.push_str(&value);
            copied = start + len;
        }
        formatted.push_str(&normalized[copied..]);

        Some(formatted)
    }
}
