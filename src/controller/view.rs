//! View rendering.
//!
//! # Responsibilities
//! - Load every `<views_dir>/**/*.html` template with Tera at startup
//! - Render a view by name (`posts/view` → `posts/view.html`)
//!
//! # Design Decisions
//! - Views extend `layouts/main.html` and fill its `content` block
//! - Values are HTML-escaped by Tera's autoescape for `.html` templates
//! - A template directory that fails to load is logged; every render then
//!   fails with `ActionError::View`

use std::path::Path;
use std::sync::Arc;

use tera::{Context, Tera};

use super::ActionError;
use crate::routing::Params;

/// Renders views from a template directory.
#[derive(Debug, Clone)]
pub struct ViewRenderer {
    tera: Arc<Tera>,
}

impl ViewRenderer {
    /// Load all `.html` templates under `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let glob = format!("{}/**/*.html", dir.as_ref().display());
        let tera = match Tera::new(&glob) {
            Ok(tera) => {
                tracing::debug!(templates = tera.get_template_names().count(), glob = %glob, "Loaded views");
                tera
            }
            Err(e) => {
                tracing::error!(glob = %glob, error = %e, "Failed to load views");
                Tera::default()
            }
        };
        Self::with_tera(tera)
    }

    /// Use a preconfigured Tera instance.
    pub fn with_tera(tera: Tera) -> Self {
        Self {
            tera: Arc::new(tera),
        }
    }

    /// Render view `name` with `data` as its context.
    pub fn render(&self, name: &str, data: &Params) -> Result<String, ActionError> {
        let mut context = Context::new();
        for (key, value) in data {
            context.insert(key.as_str(), value);
        }

        self.tera
            .render(&format!("{name}.html"), &context)
            .map_err(|source| ActionError::View {
                view: name.to_string(),
                source,
            })
    }
}
