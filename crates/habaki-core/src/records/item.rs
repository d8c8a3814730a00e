//! Item, equipment parameter and recipe parameter rows

use serde::{Deserialize, Serialize};

/// Row of `DT_Item`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemRow {
    pub item_name_text_key: String,
    /// Key into `ST_ItemExplanation`
    pub item_explanation_text_key: String,
    pub item_genre_id: String,
    pub item_category_id: String,
    pub item_brand_id: String,
    pub base_selling_price: i64,
    pub base_buying_price: i64,
    #[serde(rename = "bSaleAllowed")]
    pub sale_allowed: bool,
    #[serde(rename = "bGiftAllowed")]
    pub gift_allowed: bool,
    pub stack_limit: i64,
    pub icon_texture: AssetPath,
    pub order_index: i64,
}

/// Soft object reference to an asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AssetPath {
    pub asset_path_name: String,
    pub sub_path_string: String,
}

/// Stat with an initial value and a per-level growth
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GrowthStat {
    pub init_value: f64,
    pub growth_value: f64,
}

/// Row of `DT_EquipmentParam`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EquipmentParamRow {
    pub equipment_param_name: String,
    pub attack_type: String,
    pub hit_effect: String,
    pub physical_attack_power: GrowthStat,
    pub physical_defense_power: GrowthStat,
    pub magic_attack_power: GrowthStat,
    pub magic_defense_power: GrowthStat,
    pub critical_rate: GrowthStat,
    pub attack_element_type: String,
    pub slot: i64,
}

/// Row of `DT_RecipeParam`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RecipeParamRow {
    pub recipe_param_name: String,
    pub item_id: String,
    pub fee: i64,
    /// Material slots; unused slots carry the `None` sentinel id
    pub material_params: Vec<MaterialParam>,
    pub craftable_character_id: String,
}

/// One material slot of a recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MaterialParam {
    /// Item id, category id, or `None`
    pub item_id: String,
    pub min_level: i64,
    pub required_quantity: i64,
}
