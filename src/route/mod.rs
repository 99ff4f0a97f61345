mod error;
mod parser;
mod segment;

pub use error::{TemplateError, TemplateResult};
pub use parser::compile_template;
pub use segment::{ParamOffset, ParsedRoute, Segment, SegmentFlags};
