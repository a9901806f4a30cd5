//! Ordered route table.
//!
//! # Responsibilities
//! - Store compiled routes with their default parameters
//! - Look up the first route matching a clean path
//! - Merge route defaults with named captures
//!
//! # Design Decisions
//! - Populated once at startup, read-only afterwards (share via `Arc`)
//! - O(n) scan in insertion order; first match wins
//! - Explicit `None` on no match rather than a silent default route

use super::pattern::{PatternError, RoutePattern};
use super::{Params, ACTION_KEY, CONTROLLER_KEY};

/// A registered route.
#[derive(Debug, Clone)]
pub struct Route {
    pattern: RoutePattern,
    defaults: Params,
}

impl Route {
    /// Compile `spec` into a route carrying `defaults`.
    pub fn new(spec: &str, defaults: Params) -> Self {
        Self {
            pattern: RoutePattern::compile(spec),
            defaults,
        }
    }

    /// The route spec as registered.
    pub fn spec(&self) -> &str {
        self.pattern.spec()
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn defaults(&self) -> &Params {
        &self.defaults
    }

    /// Defaults overlaid with the captures of `path`, if it matches.
    fn match_path(&self, path: &str) -> Option<MatchResult> {
        let captures = self.pattern.captures(path)?;
        let mut params = self.defaults.clone();
        for (name, value) in captures {
            params.insert(name, value);
        }
        Some(MatchResult { params })
    }
}

/// Merged parameters of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Route defaults first, then captures in declaration order.
    pub params: Params,
}

impl MatchResult {
    pub fn controller(&self) -> Option<&str> {
        self.params.get(CONTROLLER_KEY).map(String::as_str)
    }

    pub fn action(&self) -> Option<&str> {
        self.params.get(ACTION_KEY).map(String::as_str)
    }
}

/// Routes in registration order.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. Malformed specs are accepted and never match.
    pub fn add(&mut self, spec: &str, defaults: Params) {
        tracing::debug!(spec = %spec, defaults = ?defaults, "Registering route");
        self.routes.push(Route::new(spec, defaults));
    }

    /// Register a route after validating its spec.
    pub fn try_add(&mut self, spec: &str, defaults: Params) -> Result<(), PatternError> {
        RoutePattern::validate(spec)?;
        self.add(spec, defaults);
        Ok(())
    }

    /// First route matching `path`, with merged parameters.
    pub fn match_path(&self, path: &str) -> Option<MatchResult> {
        self.routes.iter().find_map(|route| route.match_path(path))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::defaults;

    fn table() -> RouteTable {
        let mut table = RouteTable::new();
        table.add("", defaults("Home", "index"));
        table.add("language/switch", defaults("Language", "switch"));
        table.add("posts/{id}", defaults("Posts", "view"));
        table
    }

    #[test]
    fn test_match_literal_route() {
        let result = table().match_path("language/switch").unwrap();
        assert_eq!(result.controller(), Some("Language"));
        assert_eq!(result.action(), Some("switch"));
        assert_eq!(result.params.len(), 2);
    }

    #[test]
    fn test_match_empty_path_hits_home() {
        let result = table().match_path("").unwrap();
        assert_eq!(result.controller(), Some("Home"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let result = table().match_path("Posts/42").unwrap();
        assert_eq!(result.params.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_captures_follow_defaults() {
        let result = table().match_path("posts/42").unwrap();
        let keys: Vec<&str> = result.params.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["controller", "action", "id"]);
    }

    #[test]
    fn test_capture_overrides_same_named_default() {
        let mut table = RouteTable::new();
        table.add("{action}/items", defaults("Items", "index"));

        let result = table.match_path("list/items").unwrap();
        assert_eq!(result.action(), Some("list"));
        let keys: Vec<&str> = result.params.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["controller", "action"]);
    }

    #[test]
    fn test_non_ascii_capture_does_not_match() {
        assert!(table().match_path("posts/a\u{17F}b").is_none());
        assert!(table().match_path("language/\u{17F}witch").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let mut table = RouteTable::new();
        table.add("posts/{id}", defaults("Posts", "view"));
        table.add("posts/latest", defaults("Posts", "latest"));

        let result = table.match_path("posts/latest").unwrap();
        assert_eq!(result.action(), Some("view"));
        assert_eq!(result.params.get("id").map(String::as_str), Some("latest"));
    }

    #[test]
    fn test_no_match() {
        assert!(table().match_path("users/1").is_none());
        assert!(table().match_path("posts").is_none());
        assert!(RouteTable::new().match_path("").is_none());
    }

    #[test]
    fn test_try_add_rejects_malformed_spec() {
        let mut table = RouteTable::new();
        assert!(table.try_add("posts/{id", defaults("Posts", "view")).is_err());
        assert!(table.is_empty());

        table.try_add("posts/{id}", defaults("Posts", "view")).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.routes()[0].spec(), "posts/{id}");
    }
}
