//! Localization bundles and supported languages

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Root of the per-language bundle documents
pub const LOCALIZATION_ROOT: &str = "Game/Localization";

/// String table names used by the resolvers
pub mod tables {
    pub const CHARACTER_NAME: &str = "ST_CharacterName";
    pub const CHARACTER_ALIAS: &str = "ST_Character_AliasName";
    pub const MENU: &str = "ST_Menu";
    pub const COMMON: &str = "ST_Common";
    pub const COMMUNICATION: &str = "ST_Communication";
    pub const ITEM_NAME: &str = "ST_ItemName";
    pub const ITEM_EXPLANATION: &str = "ST_ItemExplanation";
    pub const ITEM_CATEGORY_NAME: &str = "ST_ItemCategoryName";
}

/// Supported interface languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "de")]
    De,
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "es")]
    Es,
    #[serde(rename = "fr")]
    Fr,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "zh-Hans")]
    ZhHans,
    #[serde(rename = "zh-Hant")]
    ZhHant,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::De,
        Language::En,
        Language::Es,
        Language::Fr,
        Language::Ja,
        Language::ZhHans,
        Language::ZhHant,
    ];

    /// Language code used in bundle paths and stored preferences
    pub fn code(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::Ja => "ja",
            Language::ZhHans => "zh-Hans",
            Language::ZhHant => "zh-Hant",
        }
    }

    /// Name of the language in itself, for language pickers
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::De => "Deutsch",
            Language::En => "English",
            Language::Es => "Español",
            Language::Fr => "Français",
            Language::Ja => "日本語",
            Language::ZhHans => "简体中文",
            Language::ZhHant => "繁體中文",
        }
    }

    /// Parse a language code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Path of this language's bundle, relative to the data root
    pub fn bundle_path(&self) -> String {
        format!("{}/{}.json", LOCALIZATION_ROOT, self.code())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Language code outside the supported set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown language code: {0}")]
pub struct UnknownLanguage(pub String);

/// One language's string tables: table name -> key -> text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle {
    tables: HashMap<String, HashMap<String, String>>,
}

impl Bundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string, returning the bundle
    pub fn with(mut self, table: &str, key: &str, text: &str) -> Self {
        self.insert(table, key, text);
        self
    }

    /// Add a string
    pub fn insert(&mut self, table: &str, key: &str, text: &str) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(key.to_string(), text.to_string());
    }

    /// Localized text, treating an empty string as missing
    pub fn text(&self, table: &str, key: &str) -> Option<&str> {
        self.tables
            .get(table)
            .and_then(|t| t.get(key))
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Lookup against a bundle that may not be loaded yet
pub(crate) fn lookup<'a>(bundle: Option<&'a Bundle>, table: &str, key: &str) -> Option<&'a str> {
    bundle.and_then(|b| b.text(table, key))
}

/// Localized text, or the key itself when it is missing
pub(crate) fn text_or_key(bundle: Option<&Bundle>, table: &str, key: &str) -> String {
    lookup(bundle, table, key).unwrap_or(key).to_string()
}
