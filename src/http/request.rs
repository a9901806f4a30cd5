//! Request parsing and identification.
//!
//! # Responsibilities
//! - Split a raw request URL into a clean path and query parameters
//! - Generate a unique request ID (UUID v4) for tracing
//!
//! # Design Decisions
//! - The first `?` counts as an `&` boundary, so both `posts/5?x=1` and the
//!   rewritten front-controller form `posts/5&x=1` parse the same way
//! - No URL decoding; values are passed through as received
//! - Repeated query keys: last value wins, first position is kept

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::routing::Params;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// A raw URL split into path and query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRequest {
    /// Path with leading/trailing `/` and `?` trimmed.
    pub path: String,
    /// Query parameters in encounter order.
    pub query: Params,
}

impl ParsedRequest {
    /// Parse a raw request URL.
    ///
    /// When the first `&`-delimited segment contains `=`, the whole input is
    /// treated as a query string and the path is empty.
    ///
    /// Every `&` is a boundary. A front controller that splits the rewritten
    /// URL at the first `&` only would read `posts/5&a=1&b=2` as
    /// `{a: "1&b=2"}`; here it is `{a: "1", b: "2"}`.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }

        let normalized = raw.replacen('?', "&", 1);
        let mut segments = normalized.split('&');
        let first = segments
            .next()
            .unwrap_or("")
            .trim_matches(&['/', '?'][..]);

        let mut query = Params::new();
        for segment in std::iter::once(first).chain(segments) {
            if let Some((key, value)) = segment.split_once('=') {
                query.insert(key.to_string(), value.to_string());
            }
        }

        let path = if first.contains('=') {
            String::new()
        } else {
            first.to_string()
        };

        Self { path, query }
    }
}

/// Request ID generator backed by UUID v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ParsedRequest::parse(""), ParsedRequest::default());
    }

    #[test]
    fn test_parse_path_only() {
        let parsed = ParsedRequest::parse("posts/5");
        assert_eq!(parsed.path, "posts/5");
        assert!(parsed.query.is_empty());
    }

    #[test]
    fn test_parse_trims_slashes() {
        assert_eq!(ParsedRequest::parse("/posts/5/").path, "posts/5");
        assert_eq!(ParsedRequest::parse("/").path, "");
    }

    #[test]
    fn test_parse_question_mark_boundary() {
        let parsed = ParsedRequest::parse("search?q=test");
        assert_eq!(parsed.path, "search");
        assert_eq!(parsed.query, query(&[("q", "test")]));
    }

    #[test]
    fn test_parse_ampersand_boundary() {
        let parsed = ParsedRequest::parse("posts/5&sort=asc&page=2");
        assert_eq!(parsed.path, "posts/5");
        assert_eq!(parsed.query, query(&[("sort", "asc"), ("page", "2")]));
    }

    #[test]
    fn test_parse_compat_every_ampersand_is_a_boundary() {
        let parsed = ParsedRequest::parse("posts/5&a=1&b=2");
        assert_eq!(parsed.path, "posts/5");
        assert_eq!(parsed.query, query(&[("a", "1"), ("b", "2")]));
        assert_ne!(parsed.query.get("a").map(String::as_str), Some("1&b=2"));
    }

    #[test]
    fn test_parse_query_only() {
        let parsed = ParsedRequest::parse("/?lang=ar&x=1");
        assert_eq!(parsed.path, "");
        assert_eq!(parsed.query, query(&[("lang", "ar"), ("x", "1")]));

        let parsed = ParsedRequest::parse("lang=ar");
        assert_eq!(parsed.path, "");
        assert_eq!(parsed.query, query(&[("lang", "ar")]));
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let parsed = ParsedRequest::parse("posts?filter=a=b");
        assert_eq!(parsed.query, query(&[("filter", "a=b")]));
    }

    #[test]
    fn test_parse_repeated_key_last_wins() {
        let parsed = ParsedRequest::parse("posts?a=1&b=2&a=3");
        assert_eq!(parsed.query, query(&[("a", "3"), ("b", "2")]));
    }

    #[test]
    fn test_parse_ignores_segments_without_equals() {
        let parsed = ParsedRequest::parse("posts?flag&x=1");
        assert_eq!(parsed.path, "posts");
        assert_eq!(parsed.query, query(&[("x", "1")]));
    }

    #[test]
    fn test_parse_does_not_decode() {
        let parsed = ParsedRequest::parse("search?q=hello%20world");
        assert_eq!(parsed.query, query(&[("q", "hello%20world")]));
    }

    #[test]
    fn test_request_ids_are_unique() {
        let request = Request::builder().body(()).unwrap();
        let mut make = MakeRequestUuid;
        let a = make.make_request_id(&request).unwrap();
        let b = make.make_request_id(&request).unwrap();
        assert_ne!(a.header_value(), b.header_value());
    }
}
