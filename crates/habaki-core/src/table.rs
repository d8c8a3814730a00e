//! Data table container and table identifiers

use crate::records::{
    CharacterRow, CommunicationCommandRow, EquipmentParamRow, ItemRow, NpcPickyItemRow, ProfileRow,
    RecipeParamRow,
};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Root of every data table path
pub const DATA_TABLE_ROOT: &str = "Game/Senbei/DataTable";

/// A named, row-keyed static snapshot of one category of game data
///
/// Rows keep the order of the exported document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", bound(deserialize = "R: Deserialize<'de>"))]
pub struct DataTable<R> {
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
    #[serde(default)]
    pub rows: IndexMap<String, R>,
}

impl<R> DataTable<R> {
    /// Create a table from rows
    pub fn from_rows<K: Into<String>>(name: &str, rows: impl IntoIterator<Item = (K, R)>) -> Self {
        Self {
            kind: "DataTable".to_string(),
            name: name.to_string(),
            class: String::new(),
            properties: None,
            rows: rows.into_iter().map(|(k, r)| (k.into(), r)).collect(),
        }
    }

    /// Look up a row by id
    pub fn row(&self, id: &str) -> Option<&R> {
        self.rows.get(id)
    }

    /// Whether a row exists
    pub fn contains(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row ids in document order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Rows in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.rows.iter().map(|(k, r)| (k.as_str(), r))
    }
}

/// The closed set of tables the catalog reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableId {
    Character,
    CharacterProfile,
    CommunicationCommand,
    NpcPickyItem,
    Item,
    EquipmentParam,
    RecipeParam,
}

impl TableId {
    pub const ALL: [TableId; 7] = [
        TableId::Character,
        TableId::CharacterProfile,
        TableId::CommunicationCommand,
        TableId::NpcPickyItem,
        TableId::Item,
        TableId::EquipmentParam,
        TableId::RecipeParam,
    ];

    /// Identifier used in logs and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            TableId::Character => "character",
            TableId::CharacterProfile => "characterProfile",
            TableId::CommunicationCommand => "communicationCommand",
            TableId::NpcPickyItem => "npcPickyItem",
            TableId::Item => "item",
            TableId::EquipmentParam => "equipmentParam",
            TableId::RecipeParam => "recipeParam",
        }
    }

    /// Category directory under the data table root
    pub fn category(&self) -> &'static str {
        match self {
            TableId::Character => "Character",
            TableId::CharacterProfile | TableId::CommunicationCommand | TableId::NpcPickyItem => {
                "Communication"
            }
            TableId::Item | TableId::EquipmentParam | TableId::RecipeParam => "Item",
        }
    }

    /// Exported table name
    pub fn table_name(&self) -> &'static str {
        match self {
            TableId::Character => "DT_Character",
            TableId::CharacterProfile => "DT_CharacterProfile",
            TableId::CommunicationCommand => "DT_CommunicationCommand",
            TableId::NpcPickyItem => "DT_NpcPickyItem",
            TableId::Item => "DT_Item",
            TableId::EquipmentParam => "DT_EquipmentParam",
            TableId::RecipeParam => "DT_RecipeParam",
        }
    }

    /// Well-known resource path, relative to the data root
    pub fn path(&self) -> String {
        format!(
            "{}/{}/{}.json",
            DATA_TABLE_ROOT,
            self.category(),
            self.table_name()
        )
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static binding of a table id to its row record type
pub trait TableKind: Send + Sync + 'static {
    const ID: TableId;
    type Row: DeserializeOwned + fmt::Debug + Send + Sync + 'static;
}

macro_rules! table_kind {
    ($(#[$meta:meta])* $name:ident, $id:expr, $row:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl TableKind for $name {
            const ID: TableId = $id;
            type Row = $row;
        }
    };
}

table_kind!(
    /// `DT_Character`
    Characters, TableId::Character, CharacterRow
);
table_kind!(
    /// `DT_CharacterProfile`
    Profiles, TableId::CharacterProfile, ProfileRow
);
table_kind!(
    /// `DT_CommunicationCommand`
    CommunicationCommands, TableId::CommunicationCommand, CommunicationCommandRow
);
table_kind!(
    /// `DT_NpcPickyItem`
    NpcPickyItems, TableId::NpcPickyItem, NpcPickyItemRow
);
table_kind!(
    /// `DT_Item`
    Items, TableId::Item, ItemRow
);
table_kind!(
    /// `DT_EquipmentParam`
    EquipmentParams, TableId::EquipmentParam, EquipmentParamRow
);
table_kind!(
    /// `DT_RecipeParam`
    RecipeParams, TableId::RecipeParam, RecipeParamRow
);
