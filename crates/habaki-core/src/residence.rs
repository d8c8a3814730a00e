//! Villager residences
//!
//! Which village a character lives in is not part of the exported tables;
//! it is fixed catalog configuration. The built-in assignment can be
//! replaced through [`ResidenceIndex::from_lists`].

use crate::localization::{lookup, tables, Bundle};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four villages, or unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Residence {
    Spring,
    Summer,
    Autumn,
    Winter,
    Unknown,
}

impl Residence {
    pub const ALL: [Residence; 5] = [
        Residence::Spring,
        Residence::Summer,
        Residence::Autumn,
        Residence::Winter,
        Residence::Unknown,
    ];

    /// Fixed ordinal, 0 to 4
    pub fn index(&self) -> usize {
        match self {
            Residence::Spring => 0,
            Residence::Summer => 1,
            Residence::Autumn => 2,
            Residence::Winter => 3,
            Residence::Unknown => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Residence::Spring => "spring",
            Residence::Summer => "summer",
            Residence::Autumn => "autumn",
            Residence::Winter => "winter",
            Residence::Unknown => "unknown",
        }
    }

    /// Localized label, image and ordinal for display
    pub fn display_data(&self, bundle: Option<&Bundle>) -> ResidenceData {
        let index = self.index();
        let village_key = format!("TXT_CMN_Village{:03}", index + 1);
        let text = lookup(bundle, tables::COMMON, &village_key)
            .or_else(|| lookup(bundle, tables::COMMON, "TXT_CMN_Unopened"))
            .unwrap_or_default()
            .to_string();
        // There is no tab icon for the unknown residence.
        let image_src = if index >= 4 {
            String::new()
        } else {
            format!("/Game/Senbei/UI/Textures/T_UI_menu_village_tabicon_{:02}.png", index)
        };
        ResidenceData {
            id: *self,
            index,
            image_src,
            text,
        }
    }
}

impl fmt::Display for Residence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata for a residence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidenceData {
    pub id: Residence,
    pub index: usize,
    pub image_src: String,
    pub text: String,
}

/// Character id -> residence lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidenceIndex {
    spring: Vec<String>,
    summer: Vec<String>,
    autumn: Vec<String>,
    winter: Vec<String>,
}

const SPRING: &[&str] = &[
    "ID_LNPC000", // Subaru
    "ID_LNPC001", // Kaguya
    "ID_LNPC002", // Murasame
    "ID_LNPC003", // Mauro
    "ID_LNPC008", // Ulalaka
    "ID_LNPC009", // Iroha
    "ID_LNPC013", // Hina
    "ID_WNPC017", // Sakaki
    "ID_WNPC018", // Takumi
    "ID_WNPC019", // Suzu
];

const SUMMER: &[&str] = &[
    "ID_LNPC010", // Matsuri
    "ID_WNPC020", // Tsubame
    "ID_WNPC021", // Hisui
    "ID_WNPC022", // Kosatsu
];

const AUTUMN: &[&str] = &[
    "ID_LNPC004", // Kai
    "ID_LNPC005", // Kurama
    "ID_LNPC015", // Cuilang
    "ID_WNPC023", // Kotaro
    "ID_WNPC024", // Yachiyo
];

const WINTER: &[&str] = &[
    "ID_LNPC006", // Fubuki
    "ID_LNPC016", // Pilika
    "ID_WNPC025", // Zaza
    "ID_WNPC026", // Watarase
];

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

impl ResidenceIndex {
    /// The game's villager assignment
    pub fn builtin() -> Self {
        Self {
            spring: owned(SPRING),
            summer: owned(SUMMER),
            autumn: owned(AUTUMN),
            winter: owned(WINTER),
        }
    }

    /// Build an index from explicit id lists
    pub fn from_lists(
        spring: Vec<String>,
        summer: Vec<String>,
        autumn: Vec<String>,
        winter: Vec<String>,
    ) -> Self {
        Self {
            spring,
            summer,
            autumn,
            winter,
        }
    }

    /// Residence of a character; ids in no list are `Unknown`
    pub fn residence_of(&self, character_id: &str) -> Residence {
        let lists = [
            (Residence::Spring, &self.spring),
            (Residence::Summer, &self.summer),
            (Residence::Autumn, &self.autumn),
            (Residence::Winter, &self.winter),
        ];
        lists
            .into_iter()
            .find(|(_, ids)| ids.iter().any(|id| id == character_id))
            .map(|(residence, _)| residence)
            .unwrap_or(Residence::Unknown)
    }

    /// Residence display data for a character
    pub fn display_data_of(&self, character_id: &str, bundle: Option<&Bundle>) -> ResidenceData {
        self.residence_of(character_id).display_data(bundle)
    }
}

impl Default for ResidenceIndex {
    fn default() -> Self {
        Self::builtin()
    }
}
