//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! application. All types derive Serde traits for deserialization from
//! TOML files.

use serde::{Deserialize, Serialize};

use crate::routing::{self, Params};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listener settings.
    pub server: ServerConfig,

    /// Application settings (base URL, environment, views).
    pub app: ApplicationConfig,

    /// Language catalogs.
    pub i18n: I18nConfig,

    /// Cross-origin policy for actions that enable it.
    pub cors: CorsConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,

    /// Routes in match order.
    pub routes: Vec<RouteConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            app: ApplicationConfig::default(),
            i18n: I18nConfig::default(),
            cors: CorsConfig::default(),
            observability: ObservabilityConfig::default(),
            routes: default_routes(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8000").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Base URL used by the URL helpers.
    pub base_url: String,

    /// Development shows error details; production hides them.
    pub environment: Environment,

    /// Directory holding view and layout templates.
    pub views_dir: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            environment: Environment::Development,
            views_dir: "views".to_string(),
        }
    }
}

/// Language catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Language used when the request carries none.
    pub default_language: String,

    /// Languages a client may switch to.
    pub supported: Vec<String>,

    /// Directory with one `<lang>.json` catalog per language.
    pub catalog_dir: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            supported: vec!["en".to_string(), "ar".to_string()],
            catalog_dir: "config/languages".to_string(),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins; `*` matches any run of characters.
    pub allowed_origins: Vec<String>,

    pub allowed_methods: Vec<String>,

    pub allowed_headers: Vec<String>,

    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:*".to_string()],
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .map(String::from)
                .to_vec(),
            allowed_headers: ["Content-Type", "Authorization"]
                .map(String::from)
                .to_vec(),
            allow_credentials: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Enable the Prometheus metrics listener.
    pub metrics_enabled: bool,

    /// Metrics listener address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9000".to_string(),
        }
    }
}

/// A route mapping a spec to a controller action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route spec, e.g. `posts/{id}`.
    pub pattern: String,

    /// Controller name, e.g. `Posts` or `blog-posts`.
    pub controller: String,

    /// Action name, e.g. `view` or `show-all`.
    pub action: String,
}

impl RouteConfig {
    pub fn new(pattern: &str, controller: &str, action: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            controller: controller.to_string(),
            action: action.to_string(),
        }
    }

    /// Route defaults (`controller`, `action`).
    pub fn defaults(&self) -> Params {
        routing::defaults(&self.controller, &self.action)
    }
}

fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("", "Home", "index"),
        RouteConfig::new("language/switch", "Language", "switch"),
        RouteConfig::new("posts", "Posts", "index"),
        RouteConfig::new("posts/{id}", "Posts", "view"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_include_application_routes() {
        let config = AppConfig::default();
        let patterns: Vec<&str> = config.routes.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["", "language/switch", "posts", "posts/{id}"]);
        assert_eq!(config.app.base_url, "http://localhost:8000/");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.routes.len(), 4);
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.i18n.default_language, "en");
    }

    #[test]
    fn test_partial_document() {
        let config: AppConfig = toml::from_str(
            r#"
            [app]
            environment = "production"

            [[routes]]
            pattern = "blog/{slug}"
            controller = "blog-posts"
            action = "show"
            "#,
        )
        .unwrap();

        assert_eq!(config.app.environment, Environment::Production);
        assert_eq!(config.app.views_dir, "views");
        assert_eq!(config.routes, vec![RouteConfig::new("blog/{slug}", "blog-posts", "show")]);
    }
}
