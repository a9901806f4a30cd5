//! Message catalogs.
//!
//! One JSON object per language (`<catalog_dir>/<lang>.json`) mapping keys to
//! translated strings. Unknown keys translate to themselves.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::I18nConfig;

/// Languages written right to left.
const RTL_LANGUAGES: &[&str] = &["ar", "fa", "he", "ur"];

type Catalog = HashMap<String, String>;

/// Translation lookup shared by all requests.
#[derive(Debug, Clone)]
pub struct Translator {
    default_language: String,
    supported: Vec<String>,
    catalogs: HashMap<String, Catalog>,
}

impl Translator {
    /// A translator with no catalogs loaded.
    pub fn new(default_language: &str, supported: &[String]) -> Self {
        Self {
            default_language: default_language.to_string(),
            supported: supported.to_vec(),
            catalogs: HashMap::new(),
        }
    }

    /// Load a catalog for every supported language.
    ///
    /// Missing or unreadable catalogs are logged and left empty.
    pub fn load(config: &I18nConfig) -> Self {
        let mut translator = Self::new(&config.default_language, &config.supported);
        let dir = Path::new(&config.catalog_dir);

        for lang in &config.supported {
            let path = dir.join(format!("{lang}.json"));
            let parsed = fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|content| {
                    serde_json::from_str::<Catalog>(&content).map_err(|e| e.to_string())
                });

            match parsed {
                Ok(catalog) => {
                    tracing::debug!(language = %lang, entries = catalog.len(), "Loaded message catalog");
                    translator.catalogs.insert(lang.clone(), catalog);
                }
                Err(e) => {
                    tracing::warn!(language = %lang, path = ?path, error = %e, "Message catalog unavailable");
                }
            }
        }

        translator
    }

    /// Add or replace the catalog of one language.
    pub fn with_catalog<I, K, V>(mut self, lang: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let catalog = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.catalogs.insert(lang.to_string(), catalog);
        self
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn is_supported(&self, lang: &str) -> bool {
        self.supported.iter().any(|l| l == lang)
    }

    /// Translate `key` for `lang`, falling back to the key itself.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.catalogs
            .get(lang)
            .and_then(|catalog| catalog.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// `rtl` or `ltr`.
    pub fn direction(lang: &str) -> &'static str {
        if RTL_LANGUAGES.contains(&lang) {
            "rtl"
        } else {
            "ltr"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supported() -> Vec<String> {
        vec!["en".into(), "ar".into()]
    }

    #[test]
    fn test_translate_with_fallback() {
        let translator = Translator::new("en", &supported())
            .with_catalog("en", [("welcome", "Welcome")])
            .with_catalog("ar", [("welcome", "مرحبا")]);

        assert_eq!(translator.translate("en", "welcome"), "Welcome");
        assert_eq!(translator.translate("ar", "welcome"), "مرحبا");
        assert_eq!(translator.translate("ar", "missing"), "missing");
        assert_eq!(translator.translate("fr", "welcome"), "welcome");
    }

    #[test]
    fn test_load_bundled_catalogs() {
        let translator = Translator::load(&I18nConfig::default());
        assert_eq!(translator.translate("en", "welcome"), "Welcome");
        assert_ne!(translator.translate("ar", "welcome"), "welcome");
    }

    #[test]
    fn test_load_missing_dir_leaves_catalogs_empty() {
        let config = I18nConfig {
            catalog_dir: "config/no-such-dir".into(),
            ..I18nConfig::default()
        };
        let translator = Translator::load(&config);
        assert!(translator.is_supported("ar"));
        assert_eq!(translator.translate("en", "welcome"), "welcome");
    }

    #[test]
    fn test_direction() {
        assert_eq!(Translator::direction("ar"), "rtl");
        assert_eq!(Translator::direction("en"), "ltr");
    }
}
