//! Per-language bundle cache and the active interface language

use crate::error::{Error, Result};
use crate::preference::LanguagePreference;
use crate::source::Source;
use habaki_core::{Bundle, Language};
use moka::future::Cache;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Bundles by language, plus which one is active
///
/// Bundles are fetched once and kept, so switching back to a language
/// already seen does no I/O. Clones share the same state.
#[derive(Clone)]
pub struct LocalizationStore {
    source: Source,
    bundles: Cache<Language, Arc<Bundle>>,
    active: Arc<watch::Sender<Language>>,
    fallback: Language,
    preference: Option<LanguagePreference>,
}

impl LocalizationStore {
    /// Create a store whose active language is `initial`
    pub fn new(source: Source, initial: Language) -> Self {
        let (active, _) = watch::channel(initial);
        Self {
            source,
            bundles: Cache::builder().build(),
            active: Arc::new(active),
            fallback: initial,
            preference: None,
        }
    }

    /// Persist every switch to `preference`
    pub fn with_preference(mut self, preference: LanguagePreference) -> Self {
        self.preference = Some(preference);
        self
    }

    /// Bundle of a language, fetched on first use
    pub async fn get(&self, language: Language) -> Result<Arc<Bundle>> {
        self.bundles
            .try_get_with(language, async {
                let path = language.bundle_path();
                let bundle: Bundle = self.source.fetch_json(&path).await?;
                debug!(language = %language, "bundle loaded");
                Ok::<_, Error>(Arc::new(bundle))
            })
            .await
            .map_err(Error::Shared)
    }

    /// The active language
    pub fn active(&self) -> Language {
        *self.active.borrow()
    }

    /// Watch for language switches
    pub fn subscribe(&self) -> watch::Receiver<Language> {
        self.active.subscribe()
    }

    /// Bundle of the active language; `None` until it has been loaded
    pub async fn current(&self) -> Option<Arc<Bundle>> {
        self.bundles.get(&self.active()).await
    }

    /// Load a language, make it active and remember it
    pub async fn switch(&self, language: Language) -> Result<Arc<Bundle>> {
        let bundle = self.get(language).await?;
        let previous = self.active.send_replace(language);
        if previous != language {
            info!(from = %previous, to = %language, "language switched");
        }
        if let Some(preference) = &self.preference {
            preference.store(language).await?;
        }
        Ok(bundle)
    }

    /// Activate the stored language, or the initial one when none is stored
    ///
    /// An unreadable preference is treated as absent.
    pub async fn restore(&self) -> Result<Arc<Bundle>> {
        let stored = match &self.preference {
            Some(preference) => preference.load().await.unwrap_or_else(|err| {
                warn!(error = %err, "ignoring unreadable language preference");
                None
            }),
            None => None,
        };
        let language = stored.unwrap_or(self.fallback);
        let bundle = self.get(language).await?;
        self.active.send_replace(language);
        info!(language = %language, "language restored");
        Ok(bundle)
    }
}
