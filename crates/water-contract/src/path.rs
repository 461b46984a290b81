//! Path templates with `:name` placeholders.
//!
//! Templates are written the way clients read them (`/api/water/:plz`).
//! [`build_url`] fills them in for requests and [`route_pattern`] rewrites them
//! into the `{name}` syntax expected by the server router.

/// Substitute `:name` placeholders with the supplied values.
///
/// Only whole path segments are treated as placeholders, so `:plz` never
/// matches inside `:plzCode`. Parameters without a matching placeholder are
/// ignored and placeholders without a parameter are left untouched. Values are
/// inserted verbatim.
///
/// # Examples
///
/// ```
/// use water_contract::build_url;
///
/// assert_eq!(build_url("/api/water/:plz", &[("plz", "10115")]), "/api/water/10115");
/// assert_eq!(build_url("/api/water/:plz", &[]), "/api/water/:plz");
/// ```
#[must_use]
pub fn build_url(path: &str, params: &[(&str, &str)]) -> String {
    path.split('/')
        .map(|segment| {
            segment
                .strip_prefix(':')
                .and_then(|name| {
                    params
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                })
                .unwrap_or(segment)
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Rewrite a `:name` template into the router's `{name}` syntax.
///
/// # Examples
///
/// ```
/// use water_contract::route_pattern;
///
/// assert_eq!(route_pattern("/api/water/:plz"), "/api/water/{plz}");
/// assert_eq!(route_pattern("/api/filters"), "/api/filters");
/// ```
#[must_use]
pub fn route_pattern(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("{{{name}}}"),
            None => segment.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Iterate over the placeholder names declared by a template.
#[must_use]
pub fn path_params(path: &str) -> impl Iterator<Item = &str> {
    path.split('/')
        .filter_map(|segment| segment.strip_prefix(':'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/water/:plz", &[("plz", "10115")], "/api/water/10115")]
    #[case("/api/water/:plz", &[("city", "Berlin")], "/api/water/:plz")]
    #[case("/api/filters", &[("plz", "10115")], "/api/filters")]
    #[case("/a/:x/b/:y", &[("y", "2"), ("x", "1")], "/a/1/b/2")]
    #[case("/a/:xy", &[("x", "1")], "/a/:xy")]
    fn build_url_substitutes_whole_segments(
        #[case] template: &str,
        #[case] params: &[(&str, &str)],
        #[case] expected: &str,
    ) {
        assert_eq!(build_url(template, params), expected);
    }

    #[rstest]
    #[case("/api/water/:plz", "/api/water/{plz}")]
    #[case("/api/water/aggregate", "/api/water/aggregate")]
    #[case("/api/conversations/:id/messages", "/api/conversations/{id}/messages")]
    fn route_pattern_uses_router_syntax(#[case] template: &str, #[case] expected: &str) {
        assert_eq!(route_pattern(template), expected);
    }

    #[rstest]
    fn path_params_lists_placeholders_in_order() {
        let names: Vec<_> = path_params("/a/:x/b/:y").collect();
        assert_eq!(names, vec!["x", "y"]);
    }
}
