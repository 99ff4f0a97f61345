use memchr::memchr;

/// Drops everything from the first `?` onwards.
#[inline]
pub fn strip_query(path: &str) -> &str {
    match memchr(b'?', path.as_bytes()) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// Like [`strip_query`], but a `?` inside a `{...}` parameter token marks an
/// optional parameter and is kept.
pub fn strip_template_query(template: &str) -> &str {
    let bytes = template.as_bytes();
    let mut in_param = false;
    let mut idx = 0usize;

    while idx < bytes.len() {
        let next = bytes.get(idx + 1).copied();
        match (bytes[idx], in_param) {
            (b'{', false) => {
                if next == Some(b'{') {
                    idx += 2;
                    continue;
                }
                in_param = true;
            }
            (b'}', true) => {
                if next == Some(b'}') {
                    idx += 2;
                    continue;
                }
                in_param = false;
            }
            (b'?', false) => return &template[..idx],
            _ => {}
        }
        idx += 1;
    }

    template
}

#[inline]
pub fn trim_leading_slash(value: &str) -> &str {
    value.strip_prefix('/').unwrap_or(value)
}

/// Normalizes a request path for extraction: query stripped, one leading `/` removed.
#[inline]
pub fn normalize_path(path: &str) -> &str {
    trim_leading_slash(strip_query(path))
}

/// Normalizes a route template the same way request paths are normalized.
#[inline]
pub fn normalize_template(template: &str) -> &str {
    trim_leading_slash(strip_template_query(template))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_query_and_single_leading_slash() {
        assert_eq!(normalize_path("/api/users?id=1"), "api/users");
        assert_eq!(normalize_path("//api"), "/api");
        assert_eq!(normalize_path("?only=query"), "");
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn keeps_optional_marker_inside_parameter_token() {
        assert_eq!(
            normalize_template("/chats/{chatId?}?x=1"),
            "chats/{chatId?}"
        );
        assert_eq!(normalize_template("a/{b?}/{c?}"), "a/{b?}/{c?}");
    }

    #[test]
    fn escaped_braces_do_not_open_a_token() {
        assert_eq!(strip_template_query("a{{b?c"), "a{{b");
        assert_eq!(strip_template_query("{x:regex(^a}}?$)}?q"), "{x:regex(^a}}?$)}");
    }

    #[test]
    fn path_without_query_is_borrowed_unchanged() {
        let path = "files/a/b";
        assert!(std::ptr::eq(normalize_path(path), path));
    }
}
