//! Recovering the path of an input line.
//!
//! Lines are parsed with the `url` crate, but segments come from the
//! decoded path as the line wrote it. `http://a.com` has an empty path
//! rather than `/`, and scheme-less lines such as `/a/b` or `a.com/x` keep
//! their own path.

use percent_encoding::percent_decode_str;
use url::{ParseError, Url};

/// Host of the base that scheme-less lines are resolved against.
const PLACEHOLDER_HOST: &str = "relative.invalid";

/// An input line that parsed as a URL reference.
#[derive(Debug, Clone)]
pub struct ParsedLine {
    pub url: Url,
    /// Percent-decoded path; empty when the line has none
    pub path: String,
    /// The line had no scheme
    pub relative: bool,
}

impl ParsedLine {
    /// Parses `line`, or returns `None` when it is not URL syntax.
    ///
    /// Control characters and `%` escapes not followed by two hex digits
    /// are rejected even where the `url` crate would let them through.
    pub fn parse(line: &str) -> Option<Self> {
        if !is_well_formed(line) {
            return None;
        }
        let line = line.trim();

        let (url, relative) = match Url::parse(line) {
            Ok(url) => (url, false),
            Err(ParseError::RelativeUrlWithoutBase) => {
                let base = Url::parse(&format!("http://{}/", PLACEHOLDER_HOST)).ok()?;
                let url = Url::options().base_url(Some(&base)).parse(line).ok()?;
                (url, true)
            }
            Err(_) => return None,
        };

        let path = if url.cannot_be_a_base() || has_empty_path(line) {
            String::new()
        } else {
            let decoded = percent_decode_str(url.path()).decode_utf8_lossy();
            // Resolving `a/b` against the base adds a root the line never had
            match decoded.strip_prefix('/') {
                Some(rooted) if relative && !line.starts_with(|c: char| c == '/' || c == '\\') => {
                    rooted.to_string()
                }
                _ => decoded.to_string(),
            }
        };

        Some(Self { url, path, relative })
    }

    /// The `/`-separated component at `position`. Index 0 is whatever
    /// precedes the first slash, which is empty for rooted paths.
    pub fn segment(&self, position: usize) -> Option<&str> {
        self.path.split('/').nth(position)
    }

    /// `scheme://host[:port]` for absolute lines, `//host[:port]` for
    /// network-path references and nothing for plain relative paths.
    pub fn origin(&self) -> String {
        let host = match (self.url.host_str(), self.url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };

        if !self.relative {
            format!("{}://{}", self.url.scheme(), host)
        } else if host.is_empty() || host == PLACEHOLDER_HOST {
            String::new()
        } else {
            format!("//{}", host)
        }
    }
}

fn is_well_formed(line: &str) -> bool {
    if line.bytes().any(|b| b < b' ' || b == 0x7f) {
        return false;
    }
    // The query is kept raw, so only the part before it and the fragment
    // have their escapes checked
    let (rest, fragment) = line.split_once('#').unwrap_or((line, ""));
    let before_query = rest.split_once('?').map_or(rest, |(head, _)| head);
    valid_escapes(before_query) && valid_escapes(fragment)
}

fn valid_escapes(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        match bytes.get(i + 1..i + 3) {
            Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => i += 3,
            _ => return false,
        }
    }
    true
}

/// The text after `scheme://` or a leading `//`, when the line has an
/// authority at all.
fn after_authority_marker(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix("//") {
        return Some(rest);
    }
    let (scheme, rest) = line.split_once("://")?;
    let is_scheme = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    is_scheme.then_some(rest)
}

/// True when the authority is not followed by a path, as in `http://a.com`
/// or `http://a.com?x=1`. The parser reports `/` for these.
fn has_empty_path(line: &str) -> bool {
    let Some(rest) = after_authority_marker(line) else {
        return false;
    };
    match rest.find(|c: char| matches!(c, '/' | '\\' | '?' | '#')) {
        Some(end) => !matches!(rest.as_bytes()[end], b'/' | b'\\'),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_of(line: &str) -> Option<String> {
        ParsedLine::parse(line).map(|parsed| parsed.path)
    }

    #[test]
    fn test_path_is_decoded() {
        assert_eq!(path_of("http://a.com/x/caf%C3%A9"), Some("/x/café".to_string()));
        assert_eq!(path_of("http://a.com/日本語"), Some("/日本語".to_string()));
        assert_eq!(path_of("http://a.com/a%20b"), Some("/a b".to_string()));
    }

    #[test]
    fn test_bare_host_has_empty_path() {
        assert_eq!(path_of("http://a.com"), Some(String::new()));
        assert_eq!(path_of("http://a.com:8080"), Some(String::new()));
        assert_eq!(path_of("http://c.com?x=1"), Some(String::new()));
        assert_eq!(path_of("http://c.com#top"), Some(String::new()));
        assert_eq!(path_of("http://a.com/"), Some("/".to_string()));
    }

    #[test]
    fn test_relative_lines_keep_their_path() {
        assert_eq!(path_of("/relative/path"), Some("/relative/path".to_string()));
        assert_eq!(path_of("a.com/x/abc"), Some("a.com/x/abc".to_string()));
        assert_eq!(path_of("//cdn.a.com/lib"), Some("/lib".to_string()));
        assert_eq!(path_of("//cdn.a.com"), Some(String::new()));
        assert_eq!(path_of("?x=1"), Some(String::new()));
        assert_eq!(path_of(""), Some(String::new()));

        assert!(ParsedLine::parse("/relative/path").unwrap().relative);
        assert!(!ParsedLine::parse("http://a.com/x").unwrap().relative);
    }

    #[test]
    fn test_opaque_urls_have_no_path() {
        assert_eq!(path_of("mailto:admin@a.com"), Some(String::new()));
    }

    #[test]
    fn test_bad_escapes_and_control_characters() {
        assert_eq!(path_of("not a url###%%"), None);
        assert_eq!(path_of("http://a.com/%zz"), None);
        assert_eq!(path_of("http://a.com/x%4"), None);
        assert_eq!(path_of("http://a.com/a\tb"), None);
        // Query escapes are not checked
        assert_eq!(path_of("http://a.com/x?q=100%"), Some("/x".to_string()));
    }

    #[test]
    fn test_segment_indexing() {
        let parsed = ParsedLine::parse("http://a.com/x/abc123?id=1#top").unwrap();
        assert_eq!(parsed.segment(0), Some(""));
        assert_eq!(parsed.segment(2), Some("abc123"));
        assert_eq!(parsed.segment(3), None);

        let bare = ParsedLine::parse("http://a.com").unwrap();
        assert_eq!(bare.segment(0), Some(""));
        assert_eq!(bare.segment(1), None);
    }

    #[test]
    fn test_origin() {
        let origin = |line: &str| ParsedLine::parse(line).unwrap().origin();
        assert_eq!(origin("https://user:pw@a.com:8443/x"), "https://a.com:8443");
        assert_eq!(origin("/relative/path"), "");
        assert_eq!(origin("//cdn.a.com/lib"), "//cdn.a.com");
    }
}
