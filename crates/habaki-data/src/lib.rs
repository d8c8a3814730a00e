//! Habaki Data - Loading and caching for the catalog
//!
//! This crate feeds the pure resolvers in `habaki-core`:
//! - `Source`: an HTTP base URL or a local directory holding the export
//! - `TableCache`: typed data tables, fetched once and shared as `Arc`
//! - `LocalizationStore`: per-language bundles and the active language
//! - `LanguagePreference`: the remembered language on disk
//! - `CatalogConfig`: RON configuration tying the above together
//!
//! Both caches are cheap `Clone` handles and are meant to be created once
//! and passed to whatever needs them.

mod config;
mod error;
mod localization_store;
mod preference;
mod source;
mod table_cache;

pub use config::{CatalogConfig, ResidenceLists, SourceConfig};
pub use error::{Error, Result};
pub use localization_store::LocalizationStore;
pub use preference::{LanguagePreference, PREFERENCE_KEY};
pub use source::Source;
pub use table_cache::{communication_npc_path, TableCache, COMMUNICATION_NPC_ROOT};
