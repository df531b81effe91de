//! Paths with query strings.

use std::fmt;

/// A navigable location: a path plus ordered, decoded query pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// Parse `"/search?keyword=rust%20async"`. A missing leading slash is added.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.split('#').next().unwrap_or_default();
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (raw, None),
        };

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        let query = query
            .map(|q| {
                q.split('&')
                    .filter(|pair| !pair.is_empty())
                    .map(|pair| {
                        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                        (decode(k), decode(v))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { path, query }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// First value for `name`.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Path plus encoded query string.
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw)
        .map(|s| s.into_owned())
        .unwrap_or(raw)
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}

impl From<&str> for Location {
    fn from(raw: &str) -> Self {
        Location::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decodes_query() {
        let loc = Location::parse("/search?keyword=rust%20async&page=2");
        assert_eq!(loc.path(), "/search");
        assert_eq!(loc.query_param("keyword"), Some("rust async"));
        assert_eq!(loc.query_param("page"), Some("2"));
        assert_eq!(loc.query_param("missing"), None);
    }

    #[test]
    fn test_parse_adds_leading_slash_and_drops_fragment() {
        let loc = Location::parse("user/profile#avatar");
        assert_eq!(loc.path(), "/user/profile");
        assert!(loc.query().is_empty());
    }

    #[test]
    fn test_full_path_encodes_nested_location() {
        let original = Location::parse("/user/articles?page=2");
        let login = Location::parse("/login").with_query("redirect", original.full_path());
        assert_eq!(login.full_path(), "/login?redirect=%2Fuser%2Farticles%3Fpage%3D2");

        let reparsed = Location::parse(&login.full_path());
        assert_eq!(reparsed.query_param("redirect"), Some("/user/articles?page=2"));
    }
}
