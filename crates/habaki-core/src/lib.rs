//! Habaki Core - Catalog data model and view-model resolvers
//!
//! This crate holds everything about the game catalog that does not need
//! I/O:
//! - Typed data table documents (`DataTable`, `TableId`, `TableKind`)
//! - Localization bundles and the supported `Language` set
//! - The villager `ResidenceIndex`
//! - Pure resolvers that join tables and bundles into display-ready views
//!   for characters, items, recipes and NPC preferences
//! - Listing helpers for the villager roster and the item browser
//!
//! Resolvers take an `Option<&Bundle>`; with no bundle loaded yet every
//! text falls back to its raw key. Loading and caching live in
//! `habaki-data`.

pub mod catalog;
mod character;
pub mod communication;
mod error;
mod item;
pub mod key;
pub mod localization;
pub mod records;
mod residence;
pub mod table;

pub use catalog::{
    all_items, brand_catalog, filter_items, filter_options, paginate, villager_number,
    villager_roster, BrandMetadata, FilterOptions, ItemQuery, Page, RosterFilter, SelectOption,
};
pub use character::{resolve_character, CharacterTables, CharacterView, ProfileCategories};
pub use communication::{
    communication_preferences, picky_item_ids, picky_items, reaction_label, tier_banner_src,
    CommandEntry, PickyTier, Reaction,
};
pub use error::{Error, Result};
pub use item::{
    category_name, equipment_parameter, item_metadata, recipe_parameter, recipes_using_item,
    EquipmentParameter, EquipmentTables, Ingredient, ItemMetadata, NamedRef, Recipe, RecipeEntry,
    RecipeTables, RecipeUsage,
};
pub use localization::{Bundle, Language, UnknownLanguage};
pub use residence::{Residence, ResidenceData, ResidenceIndex};
pub use table::{DataTable, TableId, TableKind};
