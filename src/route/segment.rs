use bitflags::bitflags;
use smallvec::SmallVec;

/// `(start, len)` byte span into a normalized template or path.
pub type ParamOffset = (usize, usize);

pub(crate) type ConstraintList = SmallVec<[Box<str>; 2]>;
pub(crate) type SegmentList = SmallVec<[Segment; 8]>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SegmentFlags: u8 {
        const PARAM = 0b0000_0001;
        const OPTIONAL = 0b0000_0010;
        const CATCH_ALL = 0b0000_0100;
        // `**name`: keeps encoded separators; extraction is identical to `*name`
        const ROUND_TRIP = 0b0000_1000;
        const HAS_DEFAULT = 0b0001_0000;
    }
}

/// One token of a compiled route: either literal text or a parameter placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub(crate) content: Box<str>,
    pub(crate) literal: Box<str>,
    pub(crate) param_name: Box<str>,
    pub(crate) default_value: Option<Box<str>>,
    pub(crate) constraints: ConstraintList,
    pub(crate) flags: SegmentFlags,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl Segment {
    pub(crate) fn literal(template: &str, text: String, start: usize, end: usize) -> Self {
        Self {
            content: template[start..end].into(),
            literal: text.into_boxed_str(),
            param_name: Box::default(),
            default_value: None,
            constraints: SmallVec::new(),
            flags: SegmentFlags::empty(),
            start,
            end,
        }
    }

    /// Raw template text of the segment, braces included for parameters.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Literal text with `{{`/`}}` unescaped. Empty for parameters.
    #[inline]
    pub fn literal_text(&self) -> &str {
        &self.literal
    }

    #[inline]
    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    /// Template default, or `""` when none was declared.
    #[inline]
    pub fn default_value(&self) -> &str {
        self.default_value.as_deref().unwrap_or("")
    }

    #[inline]
    pub fn has_default(&self) -> bool {
        self.flags.contains(SegmentFlags::HAS_DEFAULT)
    }

    pub fn constraints(&self) -> impl Iterator<Item = &str> + '_ {
        self.constraints.iter().map(|c| c.as_ref())
    }

    #[inline(always)]
    pub fn is_param(&self) -> bool {
        self.flags.contains(SegmentFlags::PARAM)
    }

    #[inline(always)]
    pub fn is_optional(&self) -> bool {
        self.flags.contains(SegmentFlags::OPTIONAL)
    }

    #[inline(always)]
    pub fn is_catch_all(&self) -> bool {
        self.flags.contains(SegmentFlags::CATCH_ALL)
    }

    #[inline(always)]
    pub fn is_round_trip(&self) -> bool {
        self.flags.contains(SegmentFlags::ROUND_TRIP)
    }

    #[inline]
    pub fn flags(&self) -> SegmentFlags {
        self.flags
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }
}

/// A compiled route template. Immutable once built and shared by every request on that route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRoute {
    pub(crate) route_template: Box<str>,
    pub(crate) segments: SegmentList,
    pub(crate) parameter_count: usize,
}

impl ParsedRoute {
    pub(crate) fn new(route_template: &str, segments: SegmentList) -> Self {
        let parameter_count = segments.iter().filter(|s| s.is_param()).count();
        Self {
            route_template: route_template.into(),
            segments,
            parameter_count,
        }
    }

    /// Normalized template: query stripped, no leading slash.
    #[inline]
    pub fn route_template(&self) -> &str {
        &self.route_template
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().filter(|s| s.is_param())
    }

    pub fn has_catch_all(&self) -> bool {
        self.segments.iter().any(Segment::is_catch_all)
    }
}
