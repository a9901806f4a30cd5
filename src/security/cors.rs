//! CORS origin matching and response headers.

use axum::http::{header, HeaderValue};
use regex::Regex;

use crate::config::CorsConfig;
use crate::http::Response;

/// Compiled CORS policy.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origins: Vec<Regex>,
    methods: String,
    headers: String,
    allow_credentials: bool,
}

impl CorsPolicy {
    /// Compile origin globs; `*` matches any run of characters.
    pub fn from_config(config: &CorsConfig) -> Self {
        let origins = config
            .allowed_origins
            .iter()
            .filter_map(|glob| {
                let source = format!("^{}$", regex::escape(glob).replace(r"\*", ".*"));
                match Regex::new(&source) {
                    Ok(regex) => Some(regex),
                    Err(e) => {
                        tracing::warn!(origin = %glob, error = %e, "Ignoring invalid CORS origin");
                        None
                    }
                }
            })
            .collect();

        Self {
            origins,
            methods: config.allowed_methods.join(", "),
            headers: config.allowed_headers.join(", "),
            allow_credentials: config.allow_credentials,
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.origins.iter().any(|regex| regex.is_match(origin))
    }

    /// Add CORS headers to `response` when `origin` is allowed.
    pub fn apply(&self, origin: Option<&str>, mut response: Response) -> Response {
        let Some(origin) = origin.filter(|o| self.allows(o)) else {
            return response;
        };

        let values = [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_str(origin)),
            (header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_str(&self.methods)),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_str(&self.headers)),
        ];
        for (name, value) in values {
            if let Ok(value) = value {
                response.headers.insert(name, value);
            }
        }
        if self.allow_credentials {
            response.headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn policy() -> CorsPolicy {
        CorsPolicy::from_config(&CorsConfig::default())
    }

    #[test]
    fn test_wildcard_origin() {
        let policy = policy();
        assert!(policy.allows("http://localhost:3000"));
        assert!(policy.allows("http://localhost:"));
        assert!(!policy.allows("https://localhost:3000"));
        assert!(!policy.allows("http://example.com"));
    }

    #[test]
    fn test_dots_are_literal() {
        let policy = CorsPolicy::from_config(&CorsConfig {
            allowed_origins: vec!["https://app.example.com".into()],
            ..CorsConfig::default()
        });
        assert!(policy.allows("https://app.example.com"));
        assert!(!policy.allows("https://appxexample.com"));
    }

    #[test]
    fn test_apply_allowed_origin() {
        let response = policy().apply(Some("http://localhost:5173"), Response::empty(StatusCode::OK));
        assert_eq!(
            response.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            response.headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            response.headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[test]
    fn test_apply_rejected_origin() {
        let response = policy().apply(Some("http://evil.test"), Response::empty(StatusCode::OK));
        assert!(response.headers.is_empty());

        let response = policy().apply(None, Response::empty(StatusCode::OK));
        assert!(response.headers.is_empty());
    }
}
