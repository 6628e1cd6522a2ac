//! Percent-encoding for URL path segments.
//!
//! Federation and project identifiers are user-typed and end up inside
//! request paths (`/fed/{pid}/invite`, `/projects/{pid}/learn`). Encoding
//! keeps a pid containing `/`, `?` or `%` from being resolved as a
//! different route.

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in URL path segments.
///
/// RFC 3986 section 3.3 reserved characters, plus `/` (path traversal),
/// `%` (double-encode protection) and `?`/`#` (URL structure).
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for safe use as a URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_pid_unchanged() {
        assert_eq!(encode_path_segment("clean-room-1"), "clean-room-1");
        assert_eq!(encode_path_segment("my_project.v2"), "my_project.v2");
    }

    #[test]
    fn test_slash_encoded() {
        assert_eq!(encode_path_segment("a/b"), "a%2Fb");
    }

    #[test]
    fn test_percent_encoded() {
        assert_eq!(encode_path_segment("100%"), "100%25");
    }

    #[test]
    fn test_space_and_query_chars() {
        assert_eq!(encode_path_segment("room one"), "room%20one");
        assert_eq!(encode_path_segment("room?x"), "room%3Fx");
        assert_eq!(encode_path_segment("room#x"), "room%23x");
    }

    #[test]
    fn test_unicode_utf8_bytes() {
        assert_eq!(encode_path_segment("caf\u{00e9}"), "caf%C3%A9");
    }
}
