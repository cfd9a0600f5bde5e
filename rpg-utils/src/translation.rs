//! Guild-language lookup for reply strings.
//!
//! Each locale is a JSON object mapping the English source text to its
//! translation. English is the source language and is always available.

use std::{collections::HashMap, fs, path::Path};

use anyhow::Context as _;
use tracing::{info, warn};

pub const SOURCE_LANGUAGE: &str = "en";

type Catalog = HashMap<String, String>;

#[derive(Debug, Default)]
pub struct Translator {
    locales: HashMap<String, Catalog>,
}

impl Translator {
    pub fn from_locales(locales: HashMap<String, Catalog>) -> Self {
        Self { locales }
    }

    /// Load every `<lang>.json` file in `dir`.
    ///
    /// A missing directory leaves only the source language available.
    pub fn load_dir(dir: &Path) -> anyhow::Result<Self> {
        if !dir.is_dir() {
            warn!(path = %dir.display(), "locale directory not found, only English is available");
            return Ok(Self::default());
        }

        let mut locales = HashMap::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let Some(lang) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read locale {}", path.display()))?;
            let catalog: Catalog = serde_json::from_str(&raw)
                .with_context(|| format!("invalid locale file {}", path.display()))?;

            info!(lang, entries = catalog.len(), "loaded locale");
            locales.insert(lang.to_owned(), catalog);
        }

        Ok(Self { locales })
    }

    /// Translate `text` into `lang`, falling back to the source text.
    pub fn translate<'a>(&'a self, lang: &str, text: &'a str) -> &'a str {
        self.locales
            .get(lang)
            .and_then(|catalog| catalog.get(text))
            .map_or(text, String::as_str)
    }

    pub fn is_supported(&self, lang: &str) -> bool {
        lang == SOURCE_LANGUAGE || self.locales.contains_key(lang)
    }

    /// Sorted list of selectable language codes.
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        if !self.locales.contains_key(SOURCE_LANGUAGE) {
            languages.push(SOURCE_LANGUAGE);
        }
        languages.sort_unstable();
        languages
    }
}

/// Substitute each `{}` in `template` with the next argument, in order.
pub fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();

    while let Some(index) = rest.find("{}") {
        let Some(arg) = args.next() else {
            break;
        };
        out.push_str(&rest[..index]);
        out.push_str(arg);
        rest = &rest[index + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> Translator {
        let german = HashMap::from([(
            "Currency successfully set!".to_owned(),
            "Währung erfolgreich gesetzt!".to_owned(),
        )]);
        Translator::from_locales(HashMap::from([("de".to_owned(), german)]))
    }

    #[test]
    fn known_strings_are_translated() {
        let translator = translator();
        assert_eq!(
            translator.translate("de", "Currency successfully set!"),
            "Währung erfolgreich gesetzt!"
        );
    }

    #[test]
    fn unknown_strings_and_languages_fall_back() {
        let translator = translator();
        assert_eq!(translator.translate("de", "Updated settings"), "Updated settings");
        assert_eq!(translator.translate("xx", "Updated settings"), "Updated settings");
    }

    #[test]
    fn english_is_always_supported() {
        let translator = translator();
        assert!(translator.is_supported("en"));
        assert!(translator.is_supported("de"));
        assert!(!translator.is_supported("fr"));
        assert_eq!(translator.languages(), vec!["de", "en"]);
    }

    #[test]
    fn fill_substitutes_in_order() {
        assert_eq!(
            fill("Starting amount changed to {} {}", &["50", "gold"]),
            "Starting amount changed to 50 gold"
        );
        assert_eq!(fill("Removed {}", &[]), "Removed {}");
        assert_eq!(fill("plain", &["x"]), "plain");
    }
}
