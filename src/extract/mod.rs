mod formatter;
mod params;
mod resolver;

pub use params::{ExtractedParameter, RawParameter};
pub use resolver::{ParameterExtractor, extract_parameters};
