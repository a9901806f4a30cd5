//! Route pattern compilation.
//!
//! # Responsibilities
//! - Compile a route spec such as `posts/{id}` into an anchored regex
//! - Record placeholder names in declaration order
//! - Validate specs for callers that want registration to fail fast
//!
//! # Design Decisions
//! - Matching is case-insensitive and covers the whole path; ASCII text and
//!   captured values fold case in ASCII only
//! - Placeholder names are `[a-z]+`, captured values are `[A-Za-z0-9-]+`
//! - `compile` never fails: a spec that cannot be compiled never matches

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z]+)\}").expect("placeholder regex is valid"));

/// Character class accepted for a captured placeholder value, ASCII only
/// even under case folding.
const CAPTURE_CLASS: &str = "(?-u:[A-Za-z0-9-]+)";

/// Errors reported by [`RoutePattern::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A `{` without a matching `}` or the reverse.
    #[error("unbalanced brace at byte {position} in route spec '{spec}'")]
    UnbalancedBraces { spec: String, position: usize },

    /// Placeholder name outside `[a-z]+`.
    #[error("invalid placeholder '{{{name}}}' in route spec '{spec}'")]
    InvalidPlaceholder { spec: String, name: String },

    /// The same placeholder declared twice.
    #[error("placeholder '{{{name}}}' declared twice in route spec '{spec}'")]
    DuplicatePlaceholder { spec: String, name: String },
}

/// A compiled route spec.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    spec: String,
    regex: Option<Regex>,
    captures: Vec<String>,
}

impl RoutePattern {
    /// Compile a route spec.
    ///
    /// Literal text matches literally, each `{name}` becomes a named capture,
    /// and the result is anchored at both ends. Braces that do not form a
    /// valid placeholder stay literal text.
    pub fn compile(spec: &str) -> Self {
        let mut source = String::from("^");
        let mut captures = Vec::new();
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(spec) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            push_literal(&mut source, &spec[last..whole.start()]);
            source.push_str(&format!("(?P<{}>{})", name.as_str(), CAPTURE_CLASS));
            captures.push(name.as_str().to_string());
            last = whole.end();
        }
        push_literal(&mut source, &spec[last..]);
        source.push('$');

        let regex = match RegexBuilder::new(&source).case_insensitive(true).build() {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!(spec = %spec, error = %e, "Route spec does not compile; it will never match");
                None
            }
        };

        Self {
            spec: spec.to_string(),
            regex,
            captures,
        }
    }

    /// Check a spec for unbalanced braces, bad names and duplicates.
    pub fn validate(spec: &str) -> Result<(), PatternError> {
        let mut seen: Vec<&str> = Vec::new();
        let mut open: Option<usize> = None;

        for (i, c) in spec.char_indices() {
            match (c, open) {
                ('{', None) => open = Some(i),
                ('{', Some(_)) | ('}', None) => {
                    return Err(PatternError::UnbalancedBraces {
                        spec: spec.to_string(),
                        position: i,
                    });
                }
                ('}', Some(start)) => {
                    let name = &spec[start + 1..i];
                    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_lowercase()) {
                        return Err(PatternError::InvalidPlaceholder {
                            spec: spec.to_string(),
                            name: name.to_string(),
                        });
                    }
                    if seen.contains(&name) {
                        return Err(PatternError::DuplicatePlaceholder {
                            spec: spec.to_string(),
                            name: name.to_string(),
                        });
                    }
                    seen.push(name);
                    open = None;
                }
                _ => {}
            }
        }

        match open {
            Some(position) => Err(PatternError::UnbalancedBraces {
                spec: spec.to_string(),
                position,
            }),
            None => Ok(()),
        }
    }

    /// The spec this pattern was compiled from.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// Placeholder names in declaration order.
    pub fn capture_names(&self) -> &[String] {
        &self.captures
    }

    /// Whether the spec compiled to a usable matcher.
    pub fn is_matchable(&self) -> bool {
        self.regex.is_some()
    }

    /// Match `path` and return the captured values in declaration order.
    pub fn captures(&self, path: &str) -> Option<Vec<(String, String)>> {
        let caps = self.regex.as_ref()?.captures(path)?;
        Some(
            self.captures
                .iter()
                .filter_map(|name| {
                    caps.name(name)
                        .map(|value| (name.clone(), value.as_str().to_string()))
                })
                .collect(),
        )
    }

    /// Whether `path` matches this pattern.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(path))
    }
}

/// Append literal spec text. ASCII runs fold case in ASCII only, so `posts`
/// never matches `po\u{17F}t\u{17F}`; other characters keep Unicode folding.
fn push_literal(source: &mut String, text: &str) {
    let mut ascii = String::new();
    for c in text.chars() {
        if c.is_ascii() {
            ascii.push(c);
            continue;
        }
        flush_ascii(source, &mut ascii);
        source.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
    }
    flush_ascii(source, &mut ascii);
}

fn flush_ascii(source: &mut String, ascii: &mut String) {
    if !ascii.is_empty() {
        source.push_str(&format!("(?-u:{})", regex::escape(ascii)));
        ascii.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_spec_matches_exactly() {
        let pattern = RoutePattern::compile("language/switch");
        assert!(pattern.is_match("language/switch"));
        assert!(pattern.is_match("LANGUAGE/Switch"));
        assert!(!pattern.is_match("language/switch/now"));
        assert!(!pattern.is_match("xlanguage/switch"));
        assert!(!pattern.is_match("language"));
    }

    #[test]
    fn test_empty_spec_only_matches_empty_path() {
        let pattern = RoutePattern::compile("");
        assert!(pattern.is_match(""));
        assert!(!pattern.is_match("posts"));
    }

    #[test]
    fn test_placeholder_captures_value() {
        let pattern = RoutePattern::compile("posts/{id}");
        for value in ["42", "abc", "my-first-post", "A1-b2"] {
            let path = format!("posts/{}", value);
            let caps = pattern.captures(&path).expect("should match");
            assert_eq!(caps, vec![("id".to_string(), value.to_string())]);
        }
    }

    #[test]
    fn test_placeholder_rejects_outside_class() {
        let pattern = RoutePattern::compile("posts/{id}");
        assert!(!pattern.is_match("posts/"));
        assert!(!pattern.is_match("posts/4_2"));
        assert!(!pattern.is_match("posts/4/2"));
        assert!(!pattern.is_match("posts/4.2"));
    }

    #[test]
    fn test_captures_in_declaration_order() {
        let pattern = RoutePattern::compile("{year}/{slug}/comments/{page}");
        assert_eq!(pattern.capture_names(), &["year", "slug", "page"]);

        let caps = pattern.captures("2024/hello-world/comments/3").unwrap();
        let names: Vec<&str> = caps.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["year", "slug", "page"]);
        assert_eq!(caps[1].1, "hello-world");
    }

    #[test]
    fn test_case_folding_is_ascii_only() {
        let pattern = RoutePattern::compile("posts/{id}");
        assert!(pattern.captures("posts/\u{212A}").is_none());
        assert!(pattern.captures("posts/a\u{17F}b").is_none());
        assert!(pattern.captures("posts/\u{e9}").is_none());
        assert!(pattern.is_match("POSTS/K"));

        let literal = RoutePattern::compile("posts");
        assert!(!literal.is_match("po\u{17F}t\u{17F}"));
        assert!(literal.is_match("PoStS"));
    }

    #[test]
    fn test_non_ascii_literal_still_matches() {
        let pattern = RoutePattern::compile("caf\u{e9}/{id}");
        assert!(pattern.is_matchable());
        assert!(pattern.is_match("caf\u{e9}/1"));
        assert!(pattern.is_match("CAF\u{c9}/1"));
        assert!(!pattern.is_match("cafe/1"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let pattern = RoutePattern::compile("feed.xml");
        assert!(pattern.is_match("feed.xml"));
        assert!(!pattern.is_match("feedxxml"));
    }

    #[test]
    fn test_malformed_specs_compile_but_never_match() {
        let uppercase = RoutePattern::compile("posts/{Id}");
        assert!(uppercase.is_matchable());
        assert!(!uppercase.is_match("posts/5"));
        assert!(uppercase.is_match("posts/{Id}"));

        let duplicate = RoutePattern::compile("{id}/{id}");
        assert!(!duplicate.is_matchable());
        assert!(!duplicate.is_match("1/2"));
    }

    #[test]
    fn test_validate_accepts_wellformed_specs() {
        assert!(RoutePattern::validate("").is_ok());
        assert!(RoutePattern::validate("posts/{id}").is_ok());
        assert!(RoutePattern::validate("{year}/{slug}").is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed_specs() {
        assert!(matches!(
            RoutePattern::validate("posts/{id"),
            Err(PatternError::UnbalancedBraces { position: 6, .. })
        ));
        assert!(matches!(
            RoutePattern::validate("posts/id}"),
            Err(PatternError::UnbalancedBraces { .. })
        ));
        assert!(matches!(
            RoutePattern::validate("posts/{post_id}"),
            Err(PatternError::InvalidPlaceholder { name, .. }) if name == "post_id"
        ));
        assert!(matches!(
            RoutePattern::validate("posts/{}"),
            Err(PatternError::InvalidPlaceholder { .. })
        ));
        assert!(matches!(
            RoutePattern::validate("{id}/{id}"),
            Err(PatternError::DuplicatePlaceholder { name, .. }) if name == "id"
        ));
    }
}
