use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("route template '{template}' is malformed at byte {index}: {reason}")]
    Malformed {
        template: String,
        index: usize,
        reason: &'static str,
    },
    #[error("A catch-all parameter must be the last segment in the route.")]
    CatchAllNotLast { template: String },
}

impl TemplateError {
    pub(crate) fn malformed(template: &str, index: usize, reason: &'static str) -> Self {
        Self::Malformed {
            template: template.to_string(),
            index,
            reason,
        }
    }
}

pub type TemplateResult<T> = Result<T, TemplateError>;
