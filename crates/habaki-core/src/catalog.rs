//! Catalog listings: the villager roster, the item browser and its filters

use crate::character::{resolve_character, CharacterTables, CharacterView, ProfileCategories};
use crate::item::{category_name, item_metadata, ItemMetadata};
use crate::localization::Bundle;
use crate::records::ItemRow;
use crate::residence::{Residence, ResidenceIndex};
use crate::table::DataTable;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::warn;

/// Items shown per page in the item browser
pub const DEFAULT_ITEMS_PER_PAGE: usize = 50;

fn villager_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[WL]NPC(\d+)").expect("villager pattern is valid"))
}

/// Villager number of a character id (`ID_LNPC013` -> 13)
pub fn villager_number(id: &str) -> Option<u32> {
    villager_pattern()
        .captures(id)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Which characters appear in the villager roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterFilter {
    /// Highest villager number shown
    #[serde(default = "default_max_number")]
    pub max_number: u32,
    /// Villager numbers never shown
    #[serde(default = "default_excluded")]
    pub excluded: Vec<u32>,
}

fn default_max_number() -> u32 {
    32
}

fn default_excluded() -> Vec<u32> {
    vec![12]
}

impl Default for RosterFilter {
    fn default() -> Self {
        Self {
            max_number: default_max_number(),
            excluded: default_excluded(),
        }
    }
}

impl RosterFilter {
    pub fn accepts(&self, id: &str) -> bool {
        match villager_number(id) {
            Some(n) => n <= self.max_number && !self.excluded.contains(&n),
            None => false,
        }
    }
}

/// Resolved villagers grouped by residence
///
/// Every residence is present, in ordinal order; villagers keep character
/// table order.
pub fn villager_roster(
    data: CharacterTables<'_>,
    residences: &ResidenceIndex,
    categories: &ProfileCategories,
    filter: &RosterFilter,
    bundle: Option<&Bundle>,
) -> IndexMap<Residence, Vec<CharacterView>> {
    let mut roster: IndexMap<Residence, Vec<CharacterView>> =
        Residence::ALL.into_iter().map(|r| (r, Vec::new())).collect();

    for id in data.characters.ids().filter(|id| filter.accepts(id)) {
        match resolve_character(id, data, residences, categories, bundle) {
            Ok(view) => roster.entry(view.residence.id).or_default().push(view),
            Err(err) => warn!(character = id, error = %err, "skipping villager"),
        }
    }
    roster
}

/// Item browser filters; empty fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemQuery {
    /// Case-insensitive substring of the item name
    pub search: String,
    pub genre: String,
    pub category: String,
    pub brand: String,
}

impl ItemQuery {
    pub fn matches(&self, item: &ItemMetadata) -> bool {
        let exact = |wanted: &str, actual: &str| wanted.is_empty() || wanted == actual;
        (self.search.is_empty()
            || item.name.to_lowercase().contains(&self.search.to_lowercase()))
            && exact(&self.genre, &item.genre.id)
            && exact(&self.category, &item.category.id)
            && exact(&self.brand, &item.brand.id)
    }
}

/// Resolve every row of the item table, in table order
pub fn all_items(items: &DataTable<ItemRow>, bundle: Option<&Bundle>) -> Vec<ItemMetadata> {
    items
        .ids()
        .filter_map(|id| item_metadata(id, items, bundle).ok())
        .collect()
}

/// Items matching a query, in input order
pub fn filter_items<'a>(items: &'a [ItemMetadata], query: &ItemQuery) -> Vec<&'a ItemMetadata> {
    items.iter().filter(|item| query.matches(item)).collect()
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// 1-based page actually shown
    pub page: usize,
    pub max_page: usize,
    pub total: usize,
    pub items: Vec<T>,
}

/// Cut one page out of a listing
///
/// Page 0, or a page past the end of a non-empty listing, shows page 1.
pub fn paginate<T: Clone>(items: &[T], requested_page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let max_page = total.div_ceil(per_page);
    let page = if requested_page == 0 || (total > 0 && requested_page > max_page) {
        1
    } else {
        requested_page
    };
    let items = items
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();
    Page {
        page,
        max_page,
        total,
        items,
    }
}

/// One entry of a filter dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub name: String,
}

impl SelectOption {
    fn placeholder() -> Self {
        Self {
            value: String::new(),
            name: "-".to_string(),
        }
    }
}

/// Dropdown options for the item browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub genre: Vec<SelectOption>,
    pub category: Vec<SelectOption>,
    pub brand: Vec<SelectOption>,
}

fn options<'a>(refs: impl Iterator<Item = (&'a str, &'a str)>) -> Vec<SelectOption> {
    let distinct: BTreeMap<&str, &str> = refs.collect();
    let mut sorted: Vec<SelectOption> = distinct
        .into_iter()
        .map(|(value, name)| SelectOption {
            value: value.to_string(),
            name: name.to_string(),
        })
        .collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.value.cmp(&b.value)));

    let mut all = vec![SelectOption::placeholder()];
    all.extend(sorted);
    all
}

/// Distinct genres, categories and brands of a listing
pub fn filter_options(items: &[ItemMetadata]) -> FilterOptions {
    FilterOptions {
        genre: options(items.iter().map(|i| (i.genre.id.as_str(), i.genre.name.as_str()))),
        category: options(
            items
                .iter()
                .map(|i| (i.category.id.as_str(), i.category.name.as_str())),
        ),
        brand: options(items.iter().map(|i| (i.brand.id.as_str(), i.brand.name.as_str()))),
    }
}

/// A brand with a representative icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandMetadata {
    pub id: String,
    pub name: String,
    pub image_src: String,
}

/// Brands of a listing; the first item of each brand supplies its icon
pub fn brand_catalog(
    items: &[ItemMetadata],
    bundle: Option<&Bundle>,
) -> IndexMap<String, BrandMetadata> {
    let mut brands = IndexMap::new();
    for item in items {
        brands
            .entry(item.brand.id.clone())
            .or_insert_with(|| BrandMetadata {
                id: item.brand.id.clone(),
                name: category_name(&item.brand.id, bundle),
                image_src: item.image_src.clone(),
            });
    }
    brands
}
