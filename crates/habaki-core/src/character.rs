//! Character view model resolution

use crate::communication::{picky_item_ids, PickyTier};
use crate::error::{Error, Result};
use crate::key::{id_suffix, unscoped};
use crate::localization::{lookup, tables, text_or_key, Bundle};
use crate::records::{CharacterRow, NpcPickyItemRow, ProfileElem, ProfileRow};
use crate::residence::{ResidenceData, ResidenceIndex};
use crate::table::DataTable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Family code shared by every marriageable character id
const MARRIAGE_CANDIDATE_CODE: &str = "LNPC";

/// Tables a character view is joined from
#[derive(Debug, Clone, Copy)]
pub struct CharacterTables<'a> {
    pub characters: &'a DataTable<CharacterRow>,
    pub profiles: &'a DataTable<ProfileRow>,
    /// Picky items are filled in only when this table is loaded
    pub picky_items: Option<&'a DataTable<NpcPickyItemRow>>,
}

impl<'a> CharacterTables<'a> {
    pub fn new(
        characters: &'a DataTable<CharacterRow>,
        profiles: &'a DataTable<ProfileRow>,
    ) -> Self {
        Self {
            characters,
            profiles,
            picky_items: None,
        }
    }

    pub fn with_picky_items(mut self, picky_items: &'a DataTable<NpcPickyItemRow>) -> Self {
        self.picky_items = Some(picky_items);
        self
    }
}

/// Denormalized, display-ready character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterView {
    pub id: String,
    pub name: String,
    pub image_src: String,
    pub alias: String,
    pub is_marriage_candidate: bool,
    pub residence: ResidenceData,
    /// `(category label, text)` pairs in profile order
    pub profile: Vec<(String, String)>,
    pub desc: String,
    /// Item ids per preference tier
    pub picky_items: BTreeMap<PickyTier, Vec<String>>,
}

/// Profile element tag -> `TXT_PD_CAT_T{n}` category number
///
/// Tags not in the map use their trailing decimal digits, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileCategories {
    by_tag: HashMap<String, u32>,
}

impl ProfileCategories {
    pub fn new(by_tag: HashMap<String, u32>) -> Self {
        Self { by_tag }
    }

    /// Category number for an unscoped element tag
    pub fn number(&self, tag: &str) -> Option<u32> {
        if let Some(n) = self.by_tag.get(tag) {
            return Some(*n);
        }
        let digits_start = tag
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)?;
        tag[digits_start..].parse().ok()
    }

    /// Localized `(label, text)` for one profile element
    fn entry(&self, elem: &ProfileElem, bundle: Option<&Bundle>) -> (String, String) {
        let label = self
            .number(unscoped(&elem.elem_type))
            .and_then(|n| lookup(bundle, tables::MENU, &format!("TXT_PD_CAT_T{n}")))
            .unwrap_or(elem.elem_type.as_str())
            .to_string();
        let text = text_or_key(bundle, tables::MENU, &elem.string_table_key_data.key);
        (label, text)
    }
}

/// Resolve a character into its view model
///
/// Fails with [`Error::CharacterNotFound`] when either the character row or
/// the profile row is missing. Missing strings fall back to their keys.
pub fn resolve_character(
    id: &str,
    data: CharacterTables<'_>,
    residences: &ResidenceIndex,
    categories: &ProfileCategories,
    bundle: Option<&Bundle>,
) -> Result<CharacterView> {
    let (character, profile) = match (data.characters.row(id), data.profiles.row(id)) {
        (Some(c), Some(p)) => (c, p),
        _ => return Err(Error::CharacterNotFound(id.to_string())),
    };

    let suffix = id_suffix(id);
    let image_src = format!("/Game/Senbei/UI/Textures/Face/T_UI_menu_friend_face_{suffix}.png");
    let name = text_or_key(bundle, tables::CHARACTER_NAME, &character.name_text_key);
    let alias = text_or_key(bundle, tables::CHARACTER_ALIAS, &character.alias_name_text_key);

    let profile_entries = profile
        .profile_elem_array
        .iter()
        .map(|elem| categories.entry(elem, bundle))
        .collect();

    let picky_items = data
        .picky_items
        .map(|picky| picky_item_ids(id, picky))
        .unwrap_or_default();

    Ok(CharacterView {
        id: id.to_string(),
        name,
        image_src,
        alias,
        is_marriage_candidate: id.contains(MARRIAGE_CANDIDATE_CODE),
        residence: residences.display_data_of(id, bundle),
        profile: profile_entries,
        desc: description(suffix, bundle),
        picky_items,
    })
}

/// Character description; some span two entries joined by a space
fn description(suffix: &str, bundle: Option<&Bundle>) -> String {
    let key = format!("TXT_CP_{suffix}");
    if let Some(desc) = lookup(bundle, tables::MENU, &key) {
        return desc.to_string();
    }
    let first = lookup(bundle, tables::MENU, &format!("{key}_0")).unwrap_or_default();
    let second = lookup(bundle, tables::MENU, &format!("{key}_1")).unwrap_or_default();
    format!("{first} {second}")
}
