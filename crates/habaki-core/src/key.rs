//! Key rewrite rules joining tables by naming convention
//!
//! The game export has no foreign keys between tables. Related rows are
//! found by slicing a fixed-width prefix off one id and prepending another:
//!
//! - `ID_ITM_WEP_ONE010` -> `ID_PRM_WEP_ONE010` (equipment parameters)
//! - `ID_ITM_WEP_ONE010` -> `ID_PRM_RCP_WEP_ONE010` (recipe parameters)
//! - `ID_PRM_RCP_FOD_MRE007` -> `ID_ITM_FOD_MRE007` (item produced by a recipe)
//!
//! All slicing is by character count and never panics on short ids.

/// Sentinel used by empty recipe material slots.
pub const NONE_SENTINEL: &str = "None";

/// Prefix shared by every concrete item id.
pub const ITEM_PREFIX: &str = "ID_ITM";

const ID_PREFIX_LEN: usize = 3;
const ITEM_SEGMENT_LEN: usize = 7;
const RECIPE_SEGMENT_LEN: usize = 11;

/// Everything after the first `n` characters, or `""` when the string is shorter.
pub fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[i..],
        None => "",
    }
}

/// Id without its `ID_` prefix (`ID_LNPC001` -> `LNPC001`).
pub fn id_suffix(id: &str) -> &str {
    skip_chars(id, ID_PREFIX_LEN)
}

/// Localization key naming an item or item category (`TXT_NAME_{suffix}`).
pub fn name_key(id: &str) -> String {
    format!("TXT_NAME_{}", id_suffix(id))
}

/// Equipment parameter row key for an item id.
pub fn equipment_param_key(item_id: &str) -> String {
    format!("ID_PRM_{}", skip_chars(item_id, ITEM_SEGMENT_LEN))
}

/// Recipe parameter row key for an item id.
pub fn recipe_param_key(item_id: &str) -> String {
    format!("ID_PRM_RCP_{}", skip_chars(item_id, ITEM_SEGMENT_LEN))
}

/// Id of the item a recipe row produces.
pub fn produced_item_id(recipe_key: &str) -> String {
    format!("ID_ITM_{}", skip_chars(recipe_key, RECIPE_SEGMENT_LEN))
}

/// Whether an id names a concrete item rather than a category or brand.
pub fn is_item_id(id: &str) -> bool {
    id.starts_with(ITEM_PREFIX)
}

/// Value after the `::` scope separator of an exported enum
/// (`EAppProfileElemType::Birthday` -> `Birthday`). Unscoped values pass through.
pub fn unscoped(tag: &str) -> &str {
    match tag.split_once("::") {
        Some((_, value)) => value,
        None => tag,
    }
}

/// Asset path with its object suffix replaced by `.png`
/// (`/Game/UI/T_Icon.T_Icon` -> `/Game/UI/T_Icon.png`).
pub fn png_path(asset_path: &str) -> String {
    let stem = asset_path.split('.').next().unwrap_or_default();
    format!("{stem}.png")
}
