//! Localized message catalog
//!
//! Bundles are flat JSON objects keyed by message key. Lookup tries the
//! exact locale tag, then its primary language, then the `en` root bundle,
//! and finally returns the key itself.

use std::collections::HashMap;
use std::fmt;

/// Catalog key of the default subject line
pub const MESSAGE_SUBJECT: &str = "messageSubject";
/// Catalog key of the label preceding the passcode in the body
pub const OTP_LABEL: &str = "otpLabel";

const ROOT_LOCALE: &str = "en";

const EMBEDDED_BUNDLES: &[(&str, &str)] = &[
    ("en", include_str!("bundles/en.json")),
    ("fr", include_str!("bundles/fr.json")),
    ("de", include_str!("bundles/de.json")),
];

lazy_static::lazy_static! {
    static ref EMBEDDED: MessageCatalog =
        MessageCatalog::from_json_bundles(EMBEDDED_BUNDLES.iter().copied()).unwrap();
}

/// A BCP 47 style language tag, normalised to lowercase with `-` separators
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: &str) -> Self {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        if normalized.is_empty() {
            Self(ROOT_LOCALE.to_string())
        } else {
            Self(normalized)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag, e.g. `fr` for `fr-ca`
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    fn candidates(&self) -> impl Iterator<Item = &str> {
        [self.as_str(), self.language(), ROOT_LOCALE].into_iter()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self(ROOT_LOCALE.to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Message bundles per locale
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    bundles: HashMap<String, HashMap<String, String>>,
}

impl MessageCatalog {
    /// The catalog compiled into the crate (en, fr, de)
    pub fn embedded() -> Self {
        EMBEDDED.clone()
    }

    /// Build a catalog from `(locale tag, JSON object)` pairs
    pub fn from_json_bundles<'a, I>(bundles: I) -> Result<Self, serde_json::Error>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut catalog = Self::default();
        for (tag, json) in bundles {
            let messages: HashMap<String, String> = serde_json::from_str(json)?;
            catalog = catalog.with_bundle(tag, messages);
        }
        Ok(catalog)
    }

    /// Add or replace the bundle for a locale
    pub fn with_bundle(mut self, tag: &str, messages: HashMap<String, String>) -> Self {
        self.bundles
            .insert(Locale::new(tag).as_str().to_string(), messages);
        self
    }

    /// Localized text for `key`, falling back through the locale chain
    pub fn get<'a>(&'a self, locale: &Locale, key: &'a str) -> &'a str {
        locale
            .candidates()
            .filter_map(|tag| self.bundles.get(tag))
            .find_map(|bundle| bundle.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }
}
