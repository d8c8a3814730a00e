//! NPC gift preferences and communication reactions

use crate::item::{item_metadata, ItemMetadata};
use crate::key::unscoped;
use crate::localization::{lookup, tables, text_or_key, Bundle};
use crate::records::{CommunicationCommandRow, CommunicationNpc, ItemRow, NpcPickyItemRow};
use crate::table::DataTable;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Gift preference tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PickyTier {
    Love,
    Like,
    Dislike,
    Hate,
}

impl PickyTier {
    pub const ALL: [PickyTier; 4] = [
        PickyTier::Love,
        PickyTier::Like,
        PickyTier::Dislike,
        PickyTier::Hate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PickyTier::Love => "LOVE",
            PickyTier::Like => "LIKE",
            PickyTier::Dislike => "DISLIKE",
            PickyTier::Hate => "HATE",
        }
    }

    /// Parse a tier tag, scoped or not
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = unscoped(tag);
        Self::ALL.into_iter().find(|tier| tier.as_str() == tag)
    }

    /// Position among the tiers, 0 to 3
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for PickyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NPC reaction to a communication command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Reaction {
    Love,
    Like,
    Dislike,
    Hate,
    Neutral,
}

impl Reaction {
    pub const ALL: [Reaction; 5] = [
        Reaction::Love,
        Reaction::Like,
        Reaction::Dislike,
        Reaction::Hate,
        Reaction::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Reaction::Love => "LOVE",
            Reaction::Like => "LIKE",
            Reaction::Dislike => "DISLIKE",
            Reaction::Hate => "HATE",
            Reaction::Neutral => "NEUTRAL",
        }
    }

    /// Parse a reaction tag, scoped or not
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = unscoped(tag);
        Self::ALL.into_iter().find(|reaction| reaction.as_str() == tag)
    }

    /// Position among the reactions, 0 to 4
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Localized heading for a tier or reaction tag (`LOVE`, `NEUTRAL`, ...)
pub fn reaction_label(tag: &str, bundle: Option<&Bundle>) -> String {
    lookup(bundle, tables::COMMUNICATION, &format!("TXT_COM_{tag}"))
        .unwrap_or(tag)
        .to_string()
}

/// Banner image behind the heading of the `index`-th group
pub fn tier_banner_src(index: usize) -> String {
    format!("/Game/Senbei/UI/Textures/T_UI_menu_profile_title_{:02}.png", index)
}

/// Picky item ids of a character for every tier
///
/// Rows are keyed `{characterId}_{TIER}`; a missing tier is empty.
pub fn picky_item_ids(
    character_id: &str,
    picky: &DataTable<NpcPickyItemRow>,
) -> BTreeMap<PickyTier, Vec<String>> {
    PickyTier::ALL
        .into_iter()
        .map(|tier| {
            let ids = picky
                .row(&format!("{character_id}_{tier}"))
                .map(|row| row.item_id_array.clone())
                .unwrap_or_default();
            (tier, ids)
        })
        .collect()
}

/// Picky items of a character resolved to item metadata
///
/// Every tier is present. Ids missing from the item table are skipped.
pub fn picky_items(
    character_id: &str,
    picky: &DataTable<NpcPickyItemRow>,
    items: &DataTable<ItemRow>,
    bundle: Option<&Bundle>,
) -> BTreeMap<PickyTier, Vec<ItemMetadata>> {
    picky_item_ids(character_id, picky)
        .into_iter()
        .map(|(tier, ids)| {
            let resolved = ids
                .iter()
                .filter_map(|id| match item_metadata(id, items, bundle) {
                    Ok(item) => Some(item),
                    Err(err) => {
                        warn!(
                            character = character_id,
                            tier = %tier,
                            error = %err,
                            "picky item is not in the item table"
                        );
                        None
                    }
                })
                .collect();
            (tier, resolved)
        })
        .collect()
}

/// One communication command as shown to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Row key in the command table
    pub key: String,
    pub text: String,
    pub level: i64,
    /// Friendship experience before reaction multipliers
    pub exp: i64,
}

/// Display order within a reaction group: level, then text
pub fn compare_commands(a: &CommandEntry, b: &CommandEntry) -> Ordering {
    a.level.cmp(&b.level).then_with(|| a.text.cmp(&b.text))
}

/// Communication commands of an NPC grouped by reaction
///
/// Every reaction is present; each group is sorted by level, then text.
/// Commands missing from the command table and unknown reaction tags are
/// skipped.
pub fn communication_preferences(
    npc: &CommunicationNpc,
    commands: &DataTable<CommunicationCommandRow>,
    bundle: Option<&Bundle>,
) -> BTreeMap<Reaction, Vec<CommandEntry>> {
    let mut groups: BTreeMap<Reaction, Vec<CommandEntry>> =
        Reaction::ALL.into_iter().map(|r| (r, Vec::new())).collect();

    for preference in &npc.properties.command_preference {
        let Some(command) = commands.row(&preference.key) else {
            debug!(command = %preference.key, "command is not in the command table");
            continue;
        };
        let Some(reaction) = Reaction::from_tag(&preference.value) else {
            warn!(command = %preference.key, tag = %preference.value, "unknown reaction tag");
            continue;
        };
        let text = text_or_key(bundle, tables::COMMUNICATION, &command.text_key_data.key);
        groups.entry(reaction).or_default().push(CommandEntry {
            key: preference.key.clone(),
            text,
            level: command.text_communication_level,
            exp: command.default_friendship_exp,
        });
    }

    for entries in groups.values_mut() {
        entries.sort_by(compare_commands);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::StringTableKey;

    fn command(key: &str, level: i64, exp: i64) -> CommunicationCommandRow {
        CommunicationCommandRow {
            text_key_data: StringTableKey {
                key: key.to_string(),
                ..Default::default()
            },
            text_communication_level: level,
            default_friendship_exp: exp,
        }
    }

    #[test]
    fn test_tags() {
        assert_eq!(
            PickyTier::from_tag("EAppCommunicationPickyType::DISLIKE"),
            Some(PickyTier::Dislike)
        );
        assert_eq!(PickyTier::from_tag("NEUTRAL"), None);
        assert_eq!(
            Reaction::from_tag("EAppCommunicationReactionType::NEUTRAL"),
            Some(Reaction::Neutral)
        );
        assert_eq!(Reaction::Hate.index(), 3);
        assert_eq!(PickyTier::Like.to_string(), "LIKE");
    }

    #[test]
    fn test_commands_sorted_by_level_then_text() {
        let commands = DataTable::from_rows(
            "DT_CommunicationCommand",
            [
                ("CMD_B", command("TXT_B", 2, 10)),
                ("CMD_A", command("TXT_A", 1, 20)),
                ("CMD_Z", command("TXT_Z", 1, 30)),
            ],
        );
        let bundle = Bundle::new()
            .with(tables::COMMUNICATION, "TXT_A", "A")
            .with(tables::COMMUNICATION, "TXT_B", "B")
            .with(tables::COMMUNICATION, "TXT_Z", "Z");
        let npc = CommunicationNpc::from_pairs([
            ("CMD_B", "EAppCommunicationReactionType::LIKE"),
            ("CMD_Z", "EAppCommunicationReactionType::LIKE"),
            ("CMD_A", "EAppCommunicationReactionType::LIKE"),
        ]);

        let groups = communication_preferences(&npc, &commands, Some(&bundle));
        let like: Vec<(i64, &str)> = groups[&Reaction::Like]
            .iter()
            .map(|c| (c.level, c.text.as_str()))
            .collect();
        assert_eq!(like, vec![(1, "A"), (1, "Z"), (2, "B")]);
        assert_eq!(groups[&Reaction::Like][0].exp, 20);
    }

    #[test]
    fn test_every_reaction_present() {
        let commands =
            DataTable::from_rows("DT_CommunicationCommand", [("CMD_A", command("TXT_A", 1, 5))]);
        let npc = CommunicationNpc::from_pairs([
            ("CMD_A", "EAppCommunicationReactionType::HATE"),
            ("CMD_MISSING", "EAppCommunicationReactionType::LOVE"),
            ("CMD_A", "EAppCommunicationReactionType::SHRUG"),
        ]);

        let groups = communication_preferences(&npc, &commands, None);
        assert_eq!(groups.len(), 5);
        assert_eq!(groups[&Reaction::Hate].len(), 1);
        assert_eq!(groups[&Reaction::Hate][0].text, "TXT_A");
        assert!(groups[&Reaction::Love].is_empty());
        assert!(groups[&Reaction::Neutral].is_empty());
    }

    #[test]
    fn test_picky_items_by_tier() {
        let picky = DataTable::from_rows(
            "DT_NpcPickyItem",
            [
                (
                    "ID_LNPC001_LOVE",
                    NpcPickyItemRow {
                        item_id_array: vec!["ID_ITM_A".to_string(), "ID_ITM_MISSING".to_string()],
                        ..Default::default()
                    },
                ),
                (
                    "ID_LNPC001_HATE",
                    NpcPickyItemRow {
                        item_id_array: vec!["ID_ITM_B".to_string()],
                        ..Default::default()
                    },
                ),
            ],
        );
        let items = DataTable::from_rows(
            "DT_Item",
            [("ID_ITM_A", ItemRow::default()), ("ID_ITM_B", ItemRow::default())],
        );

        let ids = picky_item_ids("ID_LNPC001", &picky);
        assert_eq!(ids.len(), 4);
        assert!(ids[&PickyTier::Like].is_empty());
        assert_eq!(ids[&PickyTier::Hate], vec!["ID_ITM_B"]);

        let resolved = picky_items("ID_LNPC001", &picky, &items, None);
        let love: Vec<&str> = resolved[&PickyTier::Love].iter().map(|i| i.id.as_str()).collect();
        assert_eq!(love, vec!["ID_ITM_A"]);
        assert_eq!(resolved[&PickyTier::Hate].len(), 1);
        assert!(resolved[&PickyTier::Dislike].is_empty());
    }

    #[test]
    fn test_labels() {
        let bundle = Bundle::new().with(tables::COMMUNICATION, "TXT_COM_LOVE", "Loves");
        assert_eq!(reaction_label("LOVE", Some(&bundle)), "Loves");
        assert_eq!(reaction_label("HATE", Some(&bundle)), "HATE");
        assert_eq!(
            tier_banner_src(2),
            "/Game/Senbei/UI/Textures/T_UI_menu_profile_title_02.png"
        );
    }
}
