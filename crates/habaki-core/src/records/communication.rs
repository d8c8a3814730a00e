//! NPC preference and communication rows

use super::StringTableKey;
use serde::{Deserialize, Serialize};

/// Row of `DT_NpcPickyItem`, keyed `{characterId}_{TIER}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NpcPickyItemRow {
    #[serde(rename = "TargetCharacterID")]
    pub target_character_id: String,
    pub purpose: String,
    pub picky_type: String,
    pub item_id_array: Vec<String>,
}

/// Row of `DT_CommunicationCommand`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommunicationCommandRow {
    // The export misspells this attribute.
    #[serde(rename = "ComuunicationCommandTextKeyData")]
    pub text_key_data: StringTableKey,
    pub text_communication_level: i64,
    pub default_friendship_exp: i64,
}

/// Per-NPC communication document (`DA_CommunicationNpc_{shortId}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommunicationNpc {
    pub properties: CommunicationNpcProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommunicationNpcProperties {
    pub command_preference: Vec<CommandPreference>,
}

/// Reaction of an NPC to one communication command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommandPreference {
    /// Row key into `DT_CommunicationCommand`
    pub key: String,
    /// Scoped reaction tag, e.g. `EAppCommunicationReactionType::LIKE`
    pub value: String,
}

impl CommunicationNpc {
    /// Build a document from `(command key, reaction tag)` pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let command_preference = pairs
            .into_iter()
            .map(|(key, value)| CommandPreference {
                key: key.to_string(),
                value: value.to_string(),
            })
            .collect();
        Self {
            properties: CommunicationNpcProperties { command_preference },
        }
    }
}
