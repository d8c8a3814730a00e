//! Error types for habaki-core

use thiserror::Error;

/// Resolver error type
///
/// Only required entities fail hard. Optional facets (equipment stats,
/// recipes, localized text) degrade to `None` or to the raw key instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Character not found: {0}")]
    CharacterNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
