//! Request-scoped context handed to controller actions.
//!
//! # Responsibilities
//! - Expose the request method, headers and decoded form body
//! - Carry the active language from request start to request end
//! - Give actions access to shared services (views, URLs, translations, CORS)
//!
//! # Design Decisions
//! - One context per request; nothing request-specific is global
//! - `begin` reads the language handed in by the HTTP layer, `finish`
//!   reports a changed language so the HTTP layer can persist it

use std::sync::Arc;

use axum::http::{HeaderMap, Method, StatusCode};
use serde::Serialize;

use super::translate::Translator;
use super::view::ViewRenderer;
use super::ActionError;
use crate::config::{AppConfig, Environment};
use crate::http::{Response, UrlBuilder};
use crate::routing::Params;
use crate::security::CorsPolicy;

/// Services shared read-only by every request.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub urls: UrlBuilder,
    pub views: ViewRenderer,
    pub translator: Translator,
    pub cors: CorsPolicy,
    pub environment: Environment,
}

impl AppServices {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            urls: UrlBuilder::new(&config.app.base_url),
            views: ViewRenderer::new(&config.app.views_dir),
            translator: Translator::load(&config.i18n),
            cors: CorsPolicy::from_config(&config.cors),
            environment: config.app.environment,
        }
    }
}

/// Per-request state.
#[derive(Debug)]
pub struct RequestContext {
    method: Method,
    headers: HeaderMap,
    form: Params,
    language: String,
    language_changed: bool,
    services: Arc<AppServices>,
}

impl RequestContext {
    /// A `GET` context with no headers or form data.
    pub fn new(services: Arc<AppServices>) -> Self {
        Self::begin(Method::GET, HeaderMap::new(), Params::new(), None, services)
    }

    /// Start a request. An unsupported `language` falls back to the default.
    pub fn begin(
        method: Method,
        headers: HeaderMap,
        form: Params,
        language: Option<String>,
        services: Arc<AppServices>,
    ) -> Self {
        let language = language
            .filter(|lang| services.translator.is_supported(lang))
            .unwrap_or_else(|| services.translator.default_language().to_string());

        Self {
            method,
            headers,
            form,
            language,
            language_changed: false,
            services,
        }
    }

    /// End the request, returning the language to persist if it changed.
    pub fn finish(self) -> Option<String> {
        self.language_changed.then_some(self.language)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn form_value(&self, key: &str) -> Option<&str> {
        self.form.get(key).map(String::as_str)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Switch language. Returns `false` for unsupported languages.
    pub fn set_language(&mut self, lang: &str) -> bool {
        if !self.services.translator.is_supported(lang) {
            return false;
        }
        if self.language != lang {
            self.language = lang.to_string();
            self.language_changed = true;
        }
        true
    }

    pub fn translate(&self, key: &str) -> String {
        self.services.translator.translate(&self.language, key)
    }

    /// Render a view with the layout values filled in.
    ///
    /// A `title` entry in `data` becomes the page title; otherwise the
    /// translated `app_name` is used. Entries in `data` win over layout values.
    pub fn render(&self, view: &str, data: Params) -> Result<Response, ActionError> {
        let title = data
            .get("title")
            .cloned()
            .unwrap_or_else(|| self.translate("app_name"));

        let mut context: Params = [
            ("lang", self.language.clone()),
            ("dir", Translator::direction(&self.language).to_string()),
            ("title", title),
            ("app_name", self.translate("app_name")),
            ("footer", self.translate("footer")),
            ("switch_url", self.services.urls.url("language/switch")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        context.extend(data);

        let html = self.services.views.render(view, &context)?;
        Ok(Response::html(html))
    }

    /// JSON response.
    pub fn json<T: Serialize + ?Sized>(&self, data: &T) -> Result<Response, ActionError> {
        Ok(Response::json(data)?)
    }

    /// Redirect to an application path.
    pub fn redirect(&self, path: &str) -> Response {
        self.services.urls.redirect(path)
    }

    /// Apply the CORS policy for this request's `Origin`.
    pub fn with_cors(&self, response: Response) -> Response {
        self.services.cors.apply(self.header("origin"), response)
    }

    /// For `OPTIONS` requests, the preflight answer to return immediately.
    pub fn cors_preflight(&self) -> Option<Response> {
        (self.method == Method::OPTIONS).then(|| self.with_cors(Response::empty(StatusCode::OK)))
    }
}
