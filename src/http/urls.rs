//! URL helpers relative to the configured base URL.

use super::response::Response;

/// Builds absolute URLs from application paths.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: String,
}

impl UrlBuilder {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_matches('/').to_string(),
        }
    }

    /// `base/path`, with surrounding slashes on `path` collapsed.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_matches('/'))
    }

    /// Redirect response to an application path.
    pub fn redirect(&self, path: &str) -> Response {
        Response::redirect(&self.url(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_with_single_slash() {
        let urls = UrlBuilder::new("http://localhost:8000/");
        assert_eq!(urls.url("/posts/1/"), "http://localhost:8000/posts/1");
        assert_eq!(urls.url(""), "http://localhost:8000/");
    }

    #[test]
    fn test_base_without_trailing_slash() {
        let urls = UrlBuilder::new("http://localhost:8000");
        assert_eq!(urls.url("posts"), "http://localhost:8000/posts");
    }

    #[test]
    fn test_redirect() {
        let urls = UrlBuilder::new("http://localhost:8000/");
        let response = urls.redirect("language/switch");
        assert_eq!(response.location(), Some("http://localhost:8000/language/switch"));
    }
}
