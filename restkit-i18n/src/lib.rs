//! Translation lookup for user-facing strings.
//!
//! A [`Translations`] table maps translation keys to per-language display
//! strings and is immutable after load. [`I18n`] pairs such a table with the
//! active language code. Lookups that miss return the empty string, so
//! display code never has to handle a missing key; this makes the lookup
//! suitable for display fallback only, not for correctness-critical text.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Language code in effect before [`I18n::set_lang`] is called.
pub const DEFAULT_LANG: &str = "zh-CN";

/// Translation table: translation key → language code → display string.
///
/// Owned by the application's configuration layer, typically deserialized
/// from a JSON document shaped like:
///
/// ```json
/// { "greeting": { "en-US": "Hello", "zh-CN": "你好" } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(HashMap<String, HashMap<String, String>>);

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation for `key` in language `lang`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        lang: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.0
            .entry(key.into())
            .or_default()
            .insert(lang.into(), text.into());
    }

    /// The string stored for `(key, lang)`, if any.
    pub fn get(&self, key: &str, lang: &str) -> Option<&str> {
        self.0.get(key)?.get(lang).map(String::as_str)
    }
}

/// Active-language lookup over a [`Translations`] table.
#[derive(Debug, Clone)]
pub struct I18n {
    translations: Translations,
    lang: String,
}

impl I18n {
    /// Wrap a translation table; the active language starts at
    /// [`DEFAULT_LANG`].
    pub fn new(translations: Translations) -> Self {
        Self {
            translations,
            lang: DEFAULT_LANG.to_string(),
        }
    }

    /// Set the user language for all subsequent lookups.
    pub fn set_lang(&mut self, lang: impl Into<String>) {
        self.lang = lang.into();
    }

    /// The currently active language code.
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Translated string for `key` in the active language.
    ///
    /// Returns `""` when the key is unknown or has no translation for the
    /// active language.
    pub fn trans(&self, key: &str) -> &str {
        self.translations.get(key, &self.lang).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Translations {
        let mut translations = Translations::new();
        translations.insert("greeting", "zh-CN", "你好");
        translations.insert("greeting", "en-US", "Hello");
        translations.insert("farewell", "en-US", "Bye");
        translations
    }

    #[test]
    fn returns_stored_string_for_active_language() {
        let i18n = I18n::new(table());
        assert_eq!(i18n.lang(), DEFAULT_LANG);
        assert_eq!(i18n.trans("greeting"), "你好");
    }

    #[test]
    fn missing_key_yields_empty_string() {
        let i18n = I18n::new(table());
        assert_eq!(i18n.trans("nope"), "");
    }

    #[test]
    fn missing_language_yields_empty_string() {
        // "farewell" has no zh-CN entry
        let i18n = I18n::new(table());
        assert_eq!(i18n.trans("farewell"), "");
    }

    #[test]
    fn set_lang_switches_subsequent_lookups() {
        let mut i18n = I18n::new(table());
        assert_eq!(i18n.trans("greeting"), "你好");
        assert_eq!(i18n.trans("farewell"), "");

        i18n.set_lang("en-US");
        assert_eq!(i18n.trans("greeting"), "Hello");
        assert_eq!(i18n.trans("farewell"), "Bye");
    }

    #[test]
    fn table_deserializes_from_json() {
        let table: Translations =
            serde_json::from_str(r#"{ "greeting": { "en-US": "Hello" } }"#).unwrap();

        let mut i18n = I18n::new(table);
        assert_eq!(i18n.trans("greeting"), "");
        i18n.set_lang("en-US");
        assert_eq!(i18n.trans("greeting"), "Hello");
    }
}
