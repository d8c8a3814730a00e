//! Character and character profile rows

use super::StringTableKey;
use serde::{Deserialize, Serialize};

/// Row of `DT_Character`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CharacterRow {
    /// Key into `ST_CharacterName`
    pub name_text_key: String,
    /// Key into `ST_Character_AliasName`
    pub alias_name_text_key: String,
    pub tribe_type: String,
    pub sort_order: i64,
}

/// Row of `DT_CharacterProfile`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProfileRow {
    pub character_id: String,
    pub partner_type: String,
    pub birthday_month: u32,
    pub birthday_day: u32,
    pub name_string_table_key_data: StringTableKey,
    pub main_sentence_key_data: StringTableKey,
    /// Profile entries in display order
    pub profile_elem_array: Vec<ProfileElem>,
}

/// One categorized entry of a character profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProfileElem {
    /// Scoped enum tag, e.g. `EAppProfileElemType::Hobby`
    pub elem_type: String,
    pub string_table_key_data: StringTableKey,
}
