//! Row records of the exported game data tables
//!
//! Field names follow the export (PascalCase). Every field is defaulted so a
//! row missing an attribute still deserializes; unknown attributes are ignored.

pub mod character;
pub mod communication;
pub mod item;

pub use character::{CharacterRow, ProfileElem, ProfileRow};
pub use communication::{
    CommandPreference, CommunicationCommandRow, CommunicationNpc, CommunicationNpcProperties,
    NpcPickyItemRow,
};
pub use item::{AssetPath, EquipmentParamRow, GrowthStat, ItemRow, MaterialParam, RecipeParamRow};

use serde::{Deserialize, Serialize};

/// Reference into a string table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StringTableKey {
    /// Localization key
    pub key: String,
    /// Name of the string table holding the key
    pub default_string_table_name: String,
    /// Id of the string table holding the key
    pub string_table_id: String,
}
