//! RON configuration for the catalog data layer

use crate::error::{Error, Result};
use crate::localization_store::LocalizationStore;
use crate::preference::LanguagePreference;
use crate::source::Source;
use crate::table_cache::TableCache;
use habaki_core::catalog::DEFAULT_ITEMS_PER_PAGE;
use habaki_core::{Language, ProfileCategories, ResidenceIndex, RosterFilter};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Where the exported data lives
    pub source: SourceConfig,
    /// Language used when no preference is stored
    #[serde(default, with = "language_code")]
    pub default_language: Language,
    /// File remembering the chosen language
    #[serde(default)]
    pub preference_path: Option<PathBuf>,
    /// HTTP request timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Page size of the item browser
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    /// Villager roster bounds
    #[serde(default)]
    pub roster: RosterFilter,
    /// Profile element tag -> category number
    #[serde(default)]
    pub profile_categories: ProfileCategories,
    /// Replacement for the built-in villager residences
    #[serde(default)]
    pub residences: Option<ResidenceLists>,
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

/// Data root
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum SourceConfig {
    /// Base URL the export is served under
    Http(String),
    /// Local copy of the export
    Directory(PathBuf),
}

/// Villager ids per residence
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResidenceLists {
    pub spring: Vec<String>,
    pub summer: Vec<String>,
    pub autumn: Vec<String>,
    pub winter: Vec<String>,
}

mod language_code {
    use habaki_core::Language;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(language: &Language, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(language.code())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Language, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(de::Error::custom)
    }
}

impl CatalogConfig {
    /// Configuration reading from `source` with every default
    pub fn new(source: SourceConfig) -> Self {
        Self {
            source,
            default_language: Language::default(),
            preference_path: None,
            request_timeout_secs: None,
            items_per_page: default_items_per_page(),
            roster: RosterFilter::default(),
            profile_categories: ProfileCategories::default(),
            residences: None,
        }
    }

    /// Load configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// Document source, with the configured timeout
    pub fn build_source(&self) -> Result<Source> {
        match &self.source {
            SourceConfig::Http(base) => {
                let mut builder = Client::builder();
                if let Some(secs) = self.request_timeout_secs {
                    builder = builder.timeout(Duration::from_secs(secs));
                }
                let client = builder.build().map_err(|source| Error::Request {
                    url: base.clone(),
                    source,
                })?;
                Ok(Source::Http {
                    client,
                    base: base.clone(),
                })
            }
            SourceConfig::Directory(root) => Ok(Source::directory(root)),
        }
    }

    /// Residence assignment, built-in unless overridden
    pub fn residence_index(&self) -> ResidenceIndex {
        match &self.residences {
            Some(lists) => ResidenceIndex::from_lists(
                lists.spring.clone(),
                lists.summer.clone(),
                lists.autumn.clone(),
                lists.winter.clone(),
            ),
            None => ResidenceIndex::builtin(),
        }
    }

    pub fn preference(&self) -> Option<LanguagePreference> {
        self.preference_path.as_ref().map(LanguagePreference::new)
    }

    /// Table cache and localization store sharing one source
    pub fn build_stores(&self) -> Result<(TableCache, LocalizationStore)> {
        let source = self.build_source()?;
        let mut localization = LocalizationStore::new(source.clone(), self.default_language);
        if let Some(preference) = self.preference() {
            localization = localization.with_preference(preference);
        }
        Ok((TableCache::new(source), localization))
    }
}

impl FromStr for CatalogConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(ron::from_str(s)?)
    }
}
