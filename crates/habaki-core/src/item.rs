//! Item metadata, equipment parameters and recipes
//!
//! Parameter rows are found from item ids by the rewrite rules in
//! [`crate::key`]. A derived key that misses is a soft outcome: the item is
//! simply not equipment, or not craftable.

use crate::error::{Error, Result};
use crate::key::{
    equipment_param_key, is_item_id, name_key, png_path, produced_item_id, recipe_param_key,
    NONE_SENTINEL,
};
use crate::localization::{lookup, tables, Bundle};
use crate::records::{EquipmentParamRow, ItemRow, RecipeParamRow};
use crate::table::DataTable;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Id with its localized name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

/// Display-ready item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub image_src: String,
    pub category: NamedRef,
    pub genre: NamedRef,
    pub brand: NamedRef,
    pub base_selling_price: i64,
    pub base_buying_price: i64,
    pub sale_allowed: bool,
    pub buy_allowed: bool,
}

/// Initial combat stats of an equipment item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentParameter {
    pub id: String,
    pub attack_type: String,
    pub physical_attack_power: f64,
    pub physical_defense_power: f64,
    pub magic_attack_power: f64,
    pub magic_defense_power: f64,
    pub critical_rate: f64,
    pub attack_element_type: String,
}

/// A recipe material: a concrete item, or any item of a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Ingredient {
    Item(ItemMetadata),
    Category(NamedRef),
}

impl Ingredient {
    pub fn id(&self) -> &str {
        match self {
            Ingredient::Item(item) => &item.id,
            Ingredient::Category(category) => &category.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Ingredient::Item(item) => &item.name,
            Ingredient::Category(category) => &category.name,
        }
    }

    /// Icon path; categories have none
    pub fn image_src(&self) -> Option<&str> {
        match self {
            Ingredient::Item(item) => Some(&item.image_src),
            Ingredient::Category(_) => None,
        }
    }
}

/// One material slot of a resolved recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub ingredient: Ingredient,
    pub amount: i64,
}

/// Materials of a recipe in slot order
pub type Recipe = Vec<RecipeEntry>;

/// A recipe that consumes a given item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeUsage {
    /// The item the recipe produces
    pub result: ItemMetadata,
    pub recipe: Recipe,
}

/// Tables needed for equipment stats
#[derive(Debug, Clone, Copy)]
pub struct EquipmentTables<'a> {
    pub items: &'a DataTable<ItemRow>,
    pub equipment: &'a DataTable<EquipmentParamRow>,
}

/// Tables needed for recipes
#[derive(Debug, Clone, Copy)]
pub struct RecipeTables<'a> {
    pub items: &'a DataTable<ItemRow>,
    pub recipes: &'a DataTable<RecipeParamRow>,
}

/// Localized name of a category, genre or brand id
pub fn category_name(id: &str, bundle: Option<&Bundle>) -> String {
    lookup(bundle, tables::ITEM_CATEGORY_NAME, &name_key(id))
        .unwrap_or(id)
        .to_string()
}

fn named(id: &str, bundle: Option<&Bundle>) -> NamedRef {
    NamedRef {
        id: id.to_string(),
        name: category_name(id, bundle),
    }
}

/// Resolve an item row into display metadata
///
/// Fails with [`Error::ItemNotFound`] when the row is missing.
pub fn item_metadata(
    id: &str,
    items: &DataTable<ItemRow>,
    bundle: Option<&Bundle>,
) -> Result<ItemMetadata> {
    let row = items
        .row(id)
        .ok_or_else(|| Error::ItemNotFound(id.to_string()))?;

    let name = lookup(bundle, tables::ITEM_NAME, &name_key(id))
        .unwrap_or(id)
        .to_string();
    let desc = lookup(bundle, tables::ITEM_EXPLANATION, &row.item_explanation_text_key)
        .unwrap_or_default()
        .to_string();

    Ok(ItemMetadata {
        id: id.to_string(),
        name,
        desc,
        image_src: png_path(&row.icon_texture.asset_path_name),
        category: named(&row.item_category_id, bundle),
        genre: named(&row.item_genre_id, bundle),
        brand: named(&row.item_brand_id, bundle),
        base_selling_price: row.base_selling_price,
        base_buying_price: row.base_buying_price,
        sale_allowed: row.sale_allowed,
        buy_allowed: row.gift_allowed,
    })
}

/// Equipment stats of an item, if it is equipment
///
/// `None` when the item row or its parameter row is missing, or when
/// localization has not been loaded yet.
pub fn equipment_parameter(
    id: &str,
    data: EquipmentTables<'_>,
    bundle: Option<&Bundle>,
) -> Option<EquipmentParameter> {
    bundle?;
    data.items.row(id)?;
    let key = equipment_param_key(id);
    let Some(param) = data.equipment.row(&key) else {
        debug!(item = id, key = %key, "no equipment parameters");
        return None;
    };

    Some(EquipmentParameter {
        id: id.to_string(),
        attack_type: param.attack_type.clone(),
        physical_attack_power: param.physical_attack_power.init_value,
        physical_defense_power: param.physical_defense_power.init_value,
        magic_attack_power: param.magic_attack_power.init_value,
        magic_defense_power: param.magic_defense_power.init_value,
        critical_rate: param.critical_rate.init_value,
        attack_element_type: param.attack_element_type.clone(),
    })
}

/// Materials needed to craft an item, if it is craftable
///
/// `None` when the item or recipe row is missing or localization has not been
/// loaded. Also `None` when no material slot resolves, so a recipe is never
/// empty.
pub fn recipe_parameter(
    id: &str,
    data: RecipeTables<'_>,
    bundle: Option<&Bundle>,
) -> Option<Recipe> {
    bundle?;
    data.items.row(id)?;
    let key = recipe_param_key(id);
    let Some(row) = data.recipes.row(&key) else {
        debug!(item = id, key = %key, "no recipe parameters");
        return None;
    };

    if row
        .material_params
        .iter()
        .all(|param| param.item_id == NONE_SENTINEL)
    {
        return None;
    }

    let recipe = row
        .material_params
        .iter()
        .filter(|param| param.item_id != NONE_SENTINEL)
        .filter_map(|param| {
            let ingredient = if is_item_id(&param.item_id) {
                match item_metadata(&param.item_id, data.items, bundle) {
                    Ok(item) => Ingredient::Item(item),
                    Err(err) => {
                        warn!(
                            recipe = %key,
                            error = %err,
                            "recipe material is not in the item table"
                        );
                        return None;
                    }
                }
            } else {
                Ingredient::Category(named(&param.item_id, bundle))
            };
            Some(RecipeEntry {
                ingredient,
                amount: param.required_quantity,
            })
        })
        .collect::<Recipe>();

    if recipe.is_empty() {
        warn!(recipe = %key, "no recipe material resolves");
        return None;
    }
    Some(recipe)
}

/// Every recipe that lists an item among its materials
///
/// Scans the whole recipe table. Recipes whose produced item cannot be
/// resolved are skipped.
pub fn recipes_using_item(
    id: &str,
    data: RecipeTables<'_>,
    bundle: Option<&Bundle>,
) -> Vec<RecipeUsage> {
    data.recipes
        .iter()
        .filter(|(_, row)| row.material_params.iter().any(|param| param.item_id == id))
        .filter_map(|(recipe_key, _)| {
            let produced = produced_item_id(recipe_key);
            let Some(recipe) = recipe_parameter(&produced, data, bundle) else {
                debug!(recipe = recipe_key, produced = %produced, "recipe does not resolve");
                return None;
            };
            match item_metadata(&produced, data.items, bundle) {
                Ok(result) => Some(RecipeUsage { result, recipe }),
                Err(err) => {
                    warn!(
                        recipe = recipe_key,
                        error = %err,
                        "produced item is not in the item table"
                    );
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{AssetPath, GrowthStat, MaterialParam};

    fn item(category: &str) -> ItemRow {
        ItemRow {
            item_explanation_text_key: "TXT_EXP".to_string(),
            item_category_id: category.to_string(),
            item_genre_id: "ID_GNR_FOD".to_string(),
            item_brand_id: "ID_BRN_NONE".to_string(),
            base_selling_price: 30,
            base_buying_price: 60,
            sale_allowed: true,
            gift_allowed: true,
            icon_texture: AssetPath {
                asset_path_name: "/Game/Senbei/UI/Textures/Item/T_icon.T_icon".to_string(),
                sub_path_string: String::new(),
            },
            ..Default::default()
        }
    }

    fn material(id: &str, quantity: i64) -> MaterialParam {
        MaterialParam {
            item_id: id.to_string(),
            min_level: 1,
            required_quantity: quantity,
        }
    }

    fn recipe(materials: Vec<MaterialParam>) -> RecipeParamRow {
        RecipeParamRow {
            material_params: materials,
            ..Default::default()
        }
    }

    fn items() -> DataTable<ItemRow> {
        DataTable::from_rows(
            "DT_Item",
            [
                ("ID_ITM_CRP_RCE000", item("ID_CAT_CRP")),
                ("ID_ITM_FOD_MRE007", item("ID_CAT_FOD")),
                ("ID_ITM_FOD_MRE008", item("ID_CAT_FOD")),
                ("ID_ITM_FOD_WTR000", item("ID_CAT_FOD")),
                ("ID_ITM_WEP_ONE010", item("ID_CAT_WEP")),
                ("ID_ITM_MAT_STN000", item("ID_CAT_MAT")),
            ],
        )
    }

    fn recipes() -> DataTable<RecipeParamRow> {
        DataTable::from_rows(
            "DT_RecipeParam",
            [
                (
                    "ID_PRM_RCP_FOD_MRE007",
                    recipe(vec![
                        material("ID_ITM_CRP_RCE000", 2),
                        material("None", 0),
                        material("ID_BRN_LVP_MLK", 1),
                    ]),
                ),
                (
                    "ID_PRM_RCP_FOD_MRE008",
                    recipe(vec![
                        material("ID_ITM_CRP_RCE000", 1),
                        material("ID_ITM_FOD_WTR000", 1),
                    ]),
                ),
                (
                    "ID_PRM_RCP_FOD_WTR000",
                    recipe(vec![material("None", 0), material("None", 0)]),
                ),
                // Produced item missing from the item table
                ("ID_PRM_RCP_FOD_GONE00", recipe(vec![material("ID_ITM_CRP_RCE000", 5)])),
            ],
        )
    }

    fn bundle() -> Bundle {
        Bundle::new()
            .with(tables::ITEM_NAME, "TXT_NAME_ITM_CRP_RCE000", "Rice")
            .with(tables::ITEM_NAME, "TXT_NAME_ITM_FOD_MRE007", "Onigiri")
            .with(tables::ITEM_EXPLANATION, "TXT_EXP", "Tasty.")
            .with(tables::ITEM_CATEGORY_NAME, "TXT_NAME_CAT_FOD", "Food")
            .with(tables::ITEM_CATEGORY_NAME, "TXT_NAME_BRN_LVP_MLK", "Any Milk")
    }

    #[test]
    fn test_item_metadata() {
        let items = items();
        let bundle = bundle();
        let meta = item_metadata("ID_ITM_FOD_MRE007", &items, Some(&bundle)).unwrap();

        assert_eq!(meta.name, "Onigiri");
        assert_eq!(meta.desc, "Tasty.");
        assert_eq!(meta.image_src, "/Game/Senbei/UI/Textures/Item/T_icon.png");
        assert_eq!(meta.category.id, "ID_CAT_FOD");
        assert_eq!(meta.category.name, "Food");
        assert_eq!(meta.genre.name, "ID_GNR_FOD");
        assert_eq!(meta.base_selling_price, 30);
        assert!(meta.sale_allowed);
        assert!(meta.buy_allowed);
    }

    #[test]
    fn test_item_metadata_fallbacks() {
        let items = items();
        let meta = item_metadata("ID_ITM_FOD_MRE008", &items, None).unwrap();
        assert_eq!(meta.name, "ID_ITM_FOD_MRE008");
        assert_eq!(meta.desc, "");

        let err = item_metadata("ID_ITM_NOPE", &items, None).unwrap_err();
        assert_eq!(err, Error::ItemNotFound("ID_ITM_NOPE".to_string()));
    }

    #[test]
    fn test_equipment_parameter() {
        let items = items();
        let equipment = DataTable::from_rows(
            "DT_EquipmentParam",
            [(
                "ID_PRM_WEP_ONE010",
                EquipmentParamRow {
                    attack_type: "EAppAttackType::Slash".to_string(),
                    physical_attack_power: GrowthStat {
                        init_value: 12.0,
                        growth_value: 1.5,
                    },
                    critical_rate: GrowthStat {
                        init_value: 0.05,
                        growth_value: 0.0,
                    },
                    attack_element_type: "EAppElementType::None".to_string(),
                    ..Default::default()
                },
            )],
        );
        let tables = EquipmentTables {
            items: &items,
            equipment: &equipment,
        };
        let bundle = bundle();

        let param = equipment_parameter("ID_ITM_WEP_ONE010", tables, Some(&bundle)).unwrap();
        assert_eq!(param.id, "ID_ITM_WEP_ONE010");
        assert_eq!(param.physical_attack_power, 12.0);
        assert_eq!(param.critical_rate, 0.05);
        assert_eq!(param.attack_type, "EAppAttackType::Slash");

        // Not equipment, unknown item, localization not loaded
        assert!(equipment_parameter("ID_ITM_FOD_MRE007", tables, Some(&bundle)).is_none());
        assert!(equipment_parameter("ID_ITM_NOPE", tables, Some(&bundle)).is_none());
        assert!(equipment_parameter("ID_ITM_WEP_ONE010", tables, None).is_none());
    }

    #[test]
    fn test_recipe_parameter_skips_none_slots() {
        let items = items();
        let recipes = recipes();
        let bundle = bundle();
        let tables = RecipeTables {
            items: &items,
            recipes: &recipes,
        };

        let recipe = recipe_parameter("ID_ITM_FOD_MRE007", tables, Some(&bundle)).unwrap();
        assert_eq!(recipe.len(), 2);
        assert_eq!(recipe[0].ingredient.name(), "Rice");
        assert_eq!(recipe[0].amount, 2);
        assert!(recipe[0].ingredient.image_src().is_some());
        assert_eq!(
            recipe[1].ingredient,
            Ingredient::Category(NamedRef {
                id: "ID_BRN_LVP_MLK".to_string(),
                name: "Any Milk".to_string(),
            })
        );
        assert!(recipe[1].ingredient.image_src().is_none());
    }

    #[test]
    fn test_recipe_parameter_not_craftable() {
        let items = items();
        let recipes = recipes();
        let bundle = bundle();
        let tables = RecipeTables {
            items: &items,
            recipes: &recipes,
        };

        // All slots are None
        assert!(recipe_parameter("ID_ITM_FOD_WTR000", tables, Some(&bundle)).is_none());
        // No recipe row
        assert!(recipe_parameter("ID_ITM_WEP_ONE010", tables, Some(&bundle)).is_none());
        // No item row
        assert!(recipe_parameter("ID_ITM_FOD_GONE00", tables, Some(&bundle)).is_none());
        // Localization not loaded
        assert!(recipe_parameter("ID_ITM_FOD_MRE007", tables, None).is_none());
    }

    #[test]
    fn test_recipes_using_item() {
        let items = items();
        let recipes = recipes();
        let bundle = bundle();
        let tables = RecipeTables {
            items: &items,
            recipes: &recipes,
        };

        let usages = recipes_using_item("ID_ITM_CRP_RCE000", tables, Some(&bundle));
        let produced: Vec<&str> = usages.iter().map(|u| u.result.id.as_str()).collect();
        assert_eq!(produced, vec!["ID_ITM_FOD_MRE007", "ID_ITM_FOD_MRE008"]);

        for usage in &usages {
            let direct = recipe_parameter(&usage.result.id, tables, Some(&bundle)).unwrap();
            assert_eq!(usage.recipe, direct);
            assert!(direct
                .iter()
                .any(|entry| entry.ingredient.id() == "ID_ITM_CRP_RCE000"));
        }
    }

    #[test]
    fn test_recipes_using_unused_item() {
        let items = items();
        let recipes = recipes();
        let tables = RecipeTables {
            items: &items,
            recipes: &recipes,
        };
        assert!(recipes_using_item("ID_ITM_MAT_STN000", tables, Some(&bundle())).is_empty());
        assert!(recipes_using_item("ID_ITM_CRP_RCE000", tables, None).is_empty());
    }

    #[test]
    fn test_recipe_with_only_unknown_materials() {
        let items = items();
        let recipes = DataTable::from_rows(
            "DT_RecipeParam",
            [(
                "ID_PRM_RCP_MAT_STN000",
                recipe(vec![material("ID_ITM_GONE000", 3), material("None", 0)]),
            )],
        );
        let tables = RecipeTables {
            items: &items,
            recipes: &recipes,
        };
        let bundle = bundle();

        assert!(recipe_parameter("ID_ITM_MAT_STN000", tables, Some(&bundle)).is_none());
        assert!(recipes_using_item("ID_ITM_GONE000", tables, Some(&bundle)).is_empty());
    }
}
