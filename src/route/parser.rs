use std::str::FromStr;

use crate::path::normalize_template;
use crate::route::segment::{ConstraintList, SegmentList};
use crate::route::{ParsedRoute, Segment, SegmentFlags, TemplateError, TemplateResult};

/// Compiles a route template such as `api/{routeId:int}/files/{**path}` into a [`ParsedRoute`].
///
/// The query string and a single leading `/` are dropped first; all offsets in the result are
/// byte offsets into that normalized template.
#[tracing::instrument(level = "trace", skip(template), fields(template_len = template.len() as u64))]
pub fn compile_template(template: &str) -> TemplateResult<ParsedRoute> {
    let normalized = normalize_template(template);
    let mut parser = TemplateParser::new(normalized);
    let segments = parser.parse_segments()?;
    validate_segments(normalized, &segments)?;
    Ok(ParsedRoute::new(normalized, segments))
}

impl FromStr for ParsedRoute {
    type Err = TemplateError;

    fn from_str(template: &str) -> Result<Self, Self::Err> {
        compile_template(template)
    }
}

struct TemplateParser<'a> {
    template: &'a str,
    chars: Vec<(usize, char)>,
    index: usize,
}

impl<'a> TemplateParser<'a> {
    fn new(template: &'a str) -> Self {
        Self {
            template,
            chars: template.char_indices().collect(),
            index: 0,
        }
    }

    fn parse_segments(&mut self) -> TemplateResult<SegmentList> {
        let mut segments = SegmentList::new();
        while let Some(ch) = self.peek() {
            if ch == '{' && self.peek_at(1) != Some('{') {
                segments.push(self.parse_parameter()?);
            } else {
                segments.push(self.parse_literal()?);
            }
        }
        Ok(segments)
    }

    fn parse_literal(&mut self) -> TemplateResult<Segment> {
        let start = self.current_byte_index();
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                '{' => {
                    if self.peek_at(1) != Some('{') {
                        break;
                    }
                    text.push('{');
                    self.advance(2);
                }
                '}' => {
                    if self.peek_at(1) != Some('}') {
                        return Err(self.malformed("unmatched '}' in literal text"));
                    }
                    text.push('}');
                    self.advance(2);
                }
                _ => {
                    text.push(ch);
                    self.next();
                }
            }
        }
        Ok(Segment::literal(
            self.template,
            text,
            start,
            self.current_byte_index(),
        ))
    }

    fn parse_parameter(&mut self) -> TemplateResult<Segment> {
        let start = self.current_byte_index();
        self.expect('{');

        let mut flags = SegmentFlags::PARAM;
        if self.peek() == Some('*') {
            self.next();
            flags |= SegmentFlags::CATCH_ALL;
            if self.peek() == Some('*') {
                self.next();
                flags |= SegmentFlags::ROUND_TRIP;
            }
        }

        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }

        if name.is_empty() {
            return Err(match self.peek() {
                None => self.malformed_at(start, "unterminated parameter token"),
                Some('}') if !flags.contains(SegmentFlags::CATCH_ALL) => {
                    self.malformed_at(start, "empty parameter token")
                }
                _ => self.malformed("parameter name is empty"),
            });
        }

        let mut constraints = ConstraintList::new();
        while self.peek() == Some(':') {
            self.next();
            let constraint = self.parse_constraint(start)?;
            constraints.push(constraint.into_boxed_str());
        }

        let mut default_value = None;
        match self.peek() {
            Some('=') => {
                self.next();
                default_value = Some(self.parse_default(start)?.into_boxed_str());
                flags |= SegmentFlags::HAS_DEFAULT | SegmentFlags::OPTIONAL;
            }
            Some('?') => {
                self.next();
                flags |= SegmentFlags::OPTIONAL;
                match self.peek() {
                    Some('}') => {}
                    None => return Err(self.malformed_at(start, "unterminated parameter token")),
                    Some(_) => {
                        return Err(
                            self.malformed("'?' must be the last character of a parameter token")
                        );
                    }
                }
            }
            _ => {}
        }

        match self.peek() {
            Some('}') => {
                self.next();
            }
            None => return Err(self.malformed_at(start, "unterminated parameter token")),
            Some(_) => return Err(self.malformed("invalid character in parameter name")),
        }

        let end = self.current_byte_index();
        Ok(Segment {
            content: self.template[start..end].into(),
            literal: Box::default(),
            param_name: name.into_boxed_str(),
            default_value,
            constraints,
            flags,
            start,
            end,
        })
    }

    /// Reads one `:constraint[(args)]` group. Parenthesis depth is tracked so arguments may
    /// carry `:`, `=`, `?` or regex syntax verbatim.
    fn parse_constraint(&mut self, token_start: usize) -> TemplateResult<String> {
        let constraint_start = self.current_byte_index();
        let mut depth = 0usize;
        let mut constraint = String::new();

        while let Some(ch) = self.peek() {
            match ch {
                '}' if self.peek_at(1) == Some('}') => {
                    constraint.push('}');
                    self.advance(2);
                }
                '{' if self.peek_at(1) == Some('{') => {
                    constraint.push('{');
                    self.advance(2);
                }
                '{' => return Err(self.malformed("nested '{' inside parameter token")),
                '}' => break,
                '(' => {
                    depth += 1;
                    constraint.push(ch);
                    self.next();
                }
                ')' => {
                    if depth == 0 {
                        return Err(self.malformed("unbalanced ')' in constraint"));
                    }
                    depth -= 1;
                    constraint.push(ch);
                    self.next();
                }
                ':' | '=' if depth == 0 => break,
                '?' if depth == 0 && self.closes_after_optional_marker() => break,
                _ => {
                    constraint.push(ch);
                    self.next();
                }
            }
        }

        if self.peek().is_none() {
            return Err(self.malformed_at(token_start, "unterminated parameter token"));
        }
        if depth > 0 {
            return Err(self.malformed_at(constraint_start, "unterminated constraint argument list"));
        }
        if constraint.is_empty() {
            return Err(self.malformed_at(constraint_start, "empty constraint"));
        }
        Ok(constraint)
    }

    fn parse_default(&mut self, token_start: usize) -> TemplateResult<String> {
        let mut value = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                '}' if self.peek_at(1) == Some('}') => {
                    value.push('}');
                    self.advance(2);
                }
                '{' if self.peek_at(1) == Some('{') => {
                    value.push('{');
                    self.advance(2);
                }
                '{' => return Err(self.malformed("nested '{' inside parameter token")),
                '}' => break,
                '?' if self.closes_after_optional_marker() => {
                    return Err(self.malformed(
                        "parameter with a default value cannot be marked optional",
                    ));
                }
                _ => {
                    value.push(ch);
                    self.next();
                }
            }
        }

        if self.peek().is_none() {
            return Err(self.malformed_at(token_start, "unterminated parameter token"));
        }
        Ok(value)
    }

    fn closes_after_optional_marker(&self) -> bool {
        self.peek_at(1) == Some('}') && self.peek_at(2) != Some('}')
    }

    fn expect(&mut self, expected: char) {
        let actual = self.next();
        debug_assert_eq!(Some(expected), actual);
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).map(|(_, ch)| *ch)
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.index += 1;
        }
        ch
    }

    fn advance(&mut self, count: usize) {
        self.index = (self.index + count).min(self.chars.len());
    }

    fn current_byte_index(&self) -> usize {
        self.chars
            .get(self.index)
            .map(|(idx, _)| *idx)
            .unwrap_or(self.template.len())
    }

    fn malformed(&self, reason: &'static str) -> TemplateError {
        self.malformed_at(self.current_byte_index(), reason)
    }

    fn malformed_at(&self, index: usize, reason: &'static str) -> TemplateError {
        TemplateError::malformed(self.template, index, reason)
    }
}

fn validate_segments(template: &str, segments: &[Segment]) -> TemplateResult<()> {
    for (idx, segment) in segments.iter().enumerate() {
        if segment.is_catch_all() && !is_terminal_position(&segments[idx + 1..]) {
            return Err(TemplateError::CatchAllNotLast {
                template: template.to_string(),
            });
        }
    }

    for pair in segments.windows(2) {
        if pair[0].is_param() && pair[1].is_param() {
            return Err(TemplateError::malformed(
                template,
                pair[1].start,
                "parameters must be separated by literal text",
            ));
        }
    }

    let params: Vec<&Segment> = segments.iter().filter(|s| s.is_param()).collect();
    for (idx, param) in params.iter().enumerate() {
        let duplicated = params[..idx]
            .iter()
            .any(|prev| prev.param_name.eq_ignore_ascii_case(&param.param_name));
        if duplicated {
            return Err(TemplateError::malformed(
                template,
                param.start,
                "duplicate parameter name",
            ));
        }
    }

    Ok(())
}

// a catch-all may only be followed by a single trailing "/"
fn is_terminal_position(rest: &[Segment]) -> bool {
    match rest {
        [] => true,
        [only] => !only.is_param() && only.literal_text() == "/",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed_reason(template: &str) -> &'static str {
        match compile_template(template) {
            Err(TemplateError::Malformed { reason, .. }) => reason,
            other => panic!("expected malformed error for '{template}', got {other:?}"),
        }
    }

    #[test]
    fn splits_literals_and_parameters_with_offsets() {
        let route = compile_template("/api/routes/{routeId}/chats/{chatId?}").unwrap();
        assert_eq!(route.route_template(), "api/routes/{routeId}/chats/{chatId?}");
        assert_eq!(route.parameter_count(), 2);

        let segments = route.segments();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].literal_text(), "api/routes/");
        assert_eq!((segments[0].start(), segments[0].end()), (0, 11));
        assert_eq!(segments[1].param_name(), "routeId");
        assert_eq!(segments[1].content(), "{routeId}");
        assert_eq!((segments[1].start(), segments[1].end()), (11, 20));
        assert!(!segments[1].is_optional());
        assert_eq!(segments[2].literal_text(), "/chats/");
        assert_eq!(segments[3].param_name(), "chatId");
        assert!(segments[3].is_optional());
        assert!(!segments[3].has_default());
        assert_eq!(segments[3].end(), route.route_template().len());
    }

    #[test]
    fn parses_default_values_as_optional() {
        let route = compile_template("{controller=home}/{action=index}/{id?}").unwrap();
        let params: Vec<_> = route.parameters().collect();
        assert_eq!(params[0].default_value(), "home");
        assert!(params[0].is_optional());
        assert!(params[0].has_default());
        assert_eq!(params[1].default_value(), "index");
        assert_eq!(params[2].default_value(), "");
    }

    #[test]
    fn preserves_constraint_arguments_with_special_characters() {
        let route =
            compile_template("items/{id:regex(^\\d{{3}}:[a-z]=?$):minlength(3)?}").unwrap();
        let param = route.parameters().next().unwrap();
        let constraints: Vec<_> = param.constraints().collect();
        assert_eq!(constraints, vec!["regex(^\\d{3}:[a-z]=?$)", "minlength(3)"]);
        assert!(param.is_optional());
    }

    #[test]
    fn recognises_catch_all_markers() {
        let simple = compile_template("files/{*path}").unwrap();
        let simple_param = simple.parameters().next().unwrap();
        assert!(simple_param.is_catch_all());
        assert!(!simple_param.is_round_trip());

        let round_trip = compile_template("files/{**path}").unwrap();
        let round_trip_param = round_trip.parameters().next().unwrap();
        assert!(round_trip_param.is_catch_all());
        assert!(round_trip_param.is_round_trip());
        assert_eq!(round_trip_param.param_name(), "path");
    }

    #[test]
    fn catch_all_may_be_followed_by_trailing_slash_only() {
        assert!(compile_template("files/{*path}/").is_ok());
        assert!(matches!(
            compile_template("files/{*path}/x"),
            Err(TemplateError::CatchAllNotLast { .. })
        ));
    }

    #[test]
    fn unescapes_braces_in_literals() {
        let route = compile_template("a{{b}}/{id}").unwrap();
        assert_eq!(route.segments()[0].literal_text(), "a{b}/");
        assert_eq!(route.segments()[0].content(), "a{{b}}/");
        assert_eq!(route.parameter_count(), 1);
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(malformed_reason("a/{id"), "unterminated parameter token");
        assert_eq!(malformed_reason("a/{}"), "empty parameter token");
        assert_eq!(malformed_reason("a/{:int}"), "parameter name is empty");
        assert_eq!(malformed_reason("a/{i-d}"), "invalid character in parameter name");
        assert_eq!(malformed_reason("a/}"), "unmatched '}' in literal text");
        assert_eq!(
            malformed_reason("a/{id=1?}"),
            "parameter with a default value cannot be marked optional"
        );
        assert_eq!(
            malformed_reason("a/{id?x}"),
            "'?' must be the last character of a parameter token"
        );
        assert_eq!(
            malformed_reason("a/{id:regex(x}"),
            "unterminated constraint argument list"
        );
        assert_eq!(malformed_reason("a/{id:}"), "empty constraint");
        assert_eq!(malformed_reason("{a}{b}"), "parameters must be separated by literal text");
        assert_eq!(malformed_reason("{id}/{ID}"), "duplicate parameter name");
    }

    #[test]
    fn reports_byte_index_of_malformed_token() {
        match compile_template("/api/{id") {
            Err(TemplateError::Malformed { template, index, .. }) => {
                assert_eq!(template, "api/{id");
                assert_eq!(index, 4);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn parses_via_from_str() {
        let route: ParsedRoute = "/users/{id}?tab=1".parse().unwrap();
        assert_eq!(route.route_template(), "users/{id}");
    }
}
