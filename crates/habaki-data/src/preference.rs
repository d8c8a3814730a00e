//! Persisted interface language

use crate::error::{Error, Result};
use habaki_core::Language;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Key holding the language code in the preference file
pub const PREFERENCE_KEY: &str = "mihoshi-lang";

/// A small JSON object file remembering the chosen language
///
/// Other keys in the file are preserved on write.
#[derive(Debug, Clone)]
pub struct LanguagePreference {
    path: PathBuf,
}

impl LanguagePreference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_object(&self) -> Result<Map<String, Value>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(Error::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| Error::Preference {
            path: self.path.clone(),
            source,
        })
    }

    /// The stored language; `None` when absent or not a supported code
    pub async fn load(&self) -> Result<Option<Language>> {
        let object = self.read_object().await?;
        let stored = object.get(PREFERENCE_KEY).and_then(Value::as_str);
        let language = stored.and_then(Language::from_code);
        if let (Some(code), None) = (stored, language) {
            debug!(code, "ignoring unsupported stored language");
        }
        Ok(language)
    }

    /// Remember a language
    ///
    /// A file that is not a JSON object is replaced.
    pub async fn store(&self, language: Language) -> Result<()> {
        let mut object = match self.read_object().await {
            Ok(object) => object,
            Err(err @ Error::Preference { .. }) => {
                warn!(error = %err, "overwriting unreadable language preference");
                Map::new()
            }
            Err(err) => return Err(err),
        };
        object.insert(PREFERENCE_KEY.to_string(), Value::from(language.code()));

        let io_error = |source| Error::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        let body = serde_json::to_vec_pretty(&object).map_err(|source| Error::Preference {
            path: self.path.clone(),
            source,
        })?;
        tokio::fs::write(&self.path, body).await.map_err(io_error)
    }
}
