mod normalize;

pub use normalize::{
    normalize_path, normalize_template, strip_query, strip_template_query, trim_leading_slash,
};
