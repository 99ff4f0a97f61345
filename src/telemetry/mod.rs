mod cache;
mod options;
mod service;

pub use cache::{CacheStats, TemplateCache};
pub use options::{TelemetryOptions, TelemetryOptionsBuilder};
pub use service::{RouteParameter, RouteTelemetry};
