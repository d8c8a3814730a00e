//! Command-line walk through the catalog data layer
//!
//! Loads the configured export, then prints the villager roster, one
//! character with gift and communication preferences, and one item with its
//! equipment stats, recipe and uses.
//!
//! ## Usage
//!
//! ```text
//! catalog [config.ron] [character id] [item id] [item search]
//! ```
//!
//! Set `RUST_LOG` to control log output (default `info`).

use habaki_core::key::id_suffix;
use habaki_core::table::{
    Characters, CommunicationCommands, EquipmentParams, Items, NpcPickyItems, Profiles,
    RecipeParams,
};
use habaki_core::{
    all_items, brand_catalog, communication_preferences, equipment_parameter, filter_items,
    filter_options, item_metadata, paginate, picky_items, reaction_label, recipe_parameter,
    recipes_using_item, resolve_character, villager_roster, Bundle, CharacterTables,
    EquipmentTables, ItemMetadata, ItemQuery, Recipe, RecipeTables,
};
use habaki_data::CatalogConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn print_recipe(recipe: &Recipe) {
    for entry in recipe {
        println!("      {} x{}", entry.ingredient.name(), entry.amount);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "config/catalog.ron".to_string());
    let character_id = args.next().unwrap_or_else(|| "ID_LNPC001".to_string());
    let item_id = args.next();
    let search = args.next().unwrap_or_default();

    info!(path = %config_path, "loading configuration");
    let config = CatalogConfig::load(&config_path)?;
    let (tables, localization) = config.build_stores()?;
    let residences = config.residence_index();

    let active_bundle = localization.restore().await?;
    let bundle: Option<&Bundle> = Some(active_bundle.as_ref());
    println!("=== Mihoshi Habaki ({}) ===", localization.active().native_name());

    let (characters, profiles, picky, commands, items, equipment, recipes) = tokio::try_join!(
        tables.get::<Characters>(),
        tables.get::<Profiles>(),
        tables.get::<NpcPickyItems>(),
        tables.get::<CommunicationCommands>(),
        tables.get::<Items>(),
        tables.get::<EquipmentParams>(),
        tables.get::<RecipeParams>(),
    )?;
    let character_tables = CharacterTables::new(&characters, &profiles).with_picky_items(&picky);

    // Roster
    let roster = villager_roster(
        character_tables,
        &residences,
        &config.profile_categories,
        &config.roster,
        bundle,
    );
    for (residence, villagers) in &roster {
        let label = villagers
            .first()
            .map(|v| v.residence.text.clone())
            .unwrap_or_else(|| residence.to_string());
        println!("\n[{}] {} villagers", label, villagers.len());
        for villager in villagers {
            let marker = if villager.is_marriage_candidate { " *" } else { "" };
            println!("  {} ({}){}", villager.name, villager.id, marker);
        }
    }

    // Character
    let view = resolve_character(
        &character_id,
        character_tables,
        &residences,
        &config.profile_categories,
        bundle,
    )?;
    println!("\n=== {} / {} ===", view.name, view.alias);
    println!("{}", view.desc);
    for (label, text) in &view.profile {
        println!("  {label}: {text}");
    }
    for (tier, gifts) in picky_items(&character_id, &picky, &items, bundle) {
        let names: Vec<&str> = gifts.iter().map(|item| item.name.as_str()).collect();
        println!("  {}: {}", reaction_label(tier.as_str(), bundle), names.join(", "));
    }
    match tables.communication_npc(id_suffix(&character_id)).await {
        Ok(npc) => {
            for (reaction, entries) in communication_preferences(&npc, &commands, bundle) {
                println!("  [{}]", reaction_label(reaction.as_str(), bundle));
                for entry in entries {
                    println!("    Lv{} {} (+{})", entry.level, entry.text, entry.exp);
                }
            }
        }
        Err(err) => warn!(character = %character_id, error = %err, "no communication preferences"),
    }

    // Item browser
    let listing = all_items(&items, bundle);
    let query = ItemQuery {
        search,
        ..Default::default()
    };
    let matches: Vec<ItemMetadata> = filter_items(&listing, &query).into_iter().cloned().collect();
    let page = paginate(&matches, 1, config.items_per_page);
    let options = filter_options(&listing);
    let brands = brand_catalog(&listing, bundle);
    println!(
        "\n=== Items: {} of {} match, page {}/{}, {} genres, {} categories, {} brands ===",
        page.total,
        listing.len(),
        page.page,
        page.max_page,
        options.genre.len() - 1,
        options.category.len() - 1,
        brands.len()
    );
    for listed in &page.items {
        println!("  {} ({})", listed.name, listed.id);
    }

    // Item detail
    let Some(item_id) = item_id.or_else(|| page.items.first().map(|item| item.id.clone())) else {
        return Ok(());
    };
    let item = item_metadata(&item_id, &items, bundle)?;
    println!("\n=== {} ({}) ===", item.name, item.id);
    println!("  {} / {} / {}", item.genre.name, item.category.name, item.brand.name);
    println!("  {}", item.desc);

    let equipment_data = EquipmentTables {
        items: &items,
        equipment: &equipment,
    };
    if let Some(stats) = equipment_parameter(&item.id, equipment_data, bundle) {
        println!(
            "  ATK {} DEF {} MATK {} MDEF {} CRIT {}",
            stats.physical_attack_power,
            stats.physical_defense_power,
            stats.magic_attack_power,
            stats.magic_defense_power,
            stats.critical_rate
        );
    }

    let recipe_data = RecipeTables {
        items: &items,
        recipes: &recipes,
    };
    if let Some(recipe) = recipe_parameter(&item.id, recipe_data, bundle) {
        println!("  Recipe:");
        print_recipe(&recipe);
    }
    for usage in recipes_using_item(&item.id, recipe_data, bundle) {
        println!("  Used in {}:", usage.result.name);
        print_recipe(&usage.recipe);
    }

    Ok(())
}
