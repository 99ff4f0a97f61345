use crate::redaction::RedactionModeError;
use crate::route::TemplateError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteTelemetryError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    RedactionMode(#[from] RedactionModeError),
}

pub type RouteTelemetryResult<T> = Result<T, RouteTelemetryError>;
