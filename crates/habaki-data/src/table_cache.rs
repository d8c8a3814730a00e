//! Fill-once data table cache using moka
//!
//! Each table is fetched the first time it is asked for and kept for the
//! life of the cache. Concurrent first requests for one table share a single
//! fetch. Failed fetches are not stored.

use crate::error::{Error, Result};
use crate::source::Source;
use habaki_core::records::CommunicationNpc;
use habaki_core::{DataTable, TableId, TableKind};
use moka::future::Cache;
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

/// Directory of the per-NPC communication documents
pub const COMMUNICATION_NPC_ROOT: &str = "Game/Senbei/Communication/Communication_NPC";

/// Path of one NPC's communication document (`shortId` is the id without `ID_`)
pub fn communication_npc_path(short_id: &str) -> String {
    format!("{COMMUNICATION_NPC_ROOT}/DA_CommunicationNpc_{short_id}.json")
}

type AnyTable = Arc<dyn Any + Send + Sync>;

/// Cache of parsed data tables and communication documents
#[derive(Clone)]
pub struct TableCache {
    source: Source,
    tables: Cache<TableId, AnyTable>,
    npcs: Cache<String, Arc<CommunicationNpc>>,
}

impl TableCache {
    /// Create an empty cache reading from `source`
    pub fn new(source: Source) -> Self {
        Self {
            source,
            tables: Cache::builder().build(),
            npcs: Cache::builder().build(),
        }
    }

    /// A table, fetched and parsed on first use
    pub async fn get<K: TableKind>(&self) -> Result<Arc<DataTable<K::Row>>> {
        let entry = self
            .tables
            .try_get_with(K::ID, async {
                let path = K::ID.path();
                let table: DataTable<K::Row> = self.source.fetch_first(&path).await?;
                debug!(table = %K::ID, rows = table.len(), "table loaded");
                Ok::<AnyTable, Error>(Arc::new(table))
            })
            .await
            .map_err(Error::Shared)?;

        entry
            .downcast::<DataTable<K::Row>>()
            .map_err(|_| Error::TableType(K::ID))
    }

    /// Whether a table is resident, without fetching it
    pub fn is_loaded<K: TableKind>(&self) -> bool {
        self.tables.contains_key(&K::ID)
    }

    /// Communication document of one NPC, fetched on first use
    pub async fn communication_npc(&self, short_id: &str) -> Result<Arc<CommunicationNpc>> {
        self.npcs
            .try_get_with(short_id.to_string(), async {
                let path = communication_npc_path(short_id);
                let npc: CommunicationNpc = self.source.fetch_first(&path).await?;
                debug!(
                    npc = short_id,
                    commands = npc.properties.command_preference.len(),
                    "communication loaded"
                );
                Ok::<_, Error>(Arc::new(npc))
            })
            .await
            .map_err(Error::Shared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use habaki_core::table::{Characters, Items};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn item_table() -> serde_json::Value {
        json!([{
            "Type": "DataTable",
            "Name": "DT_Item",
            "Rows": {
                "ID_ITM_A": { "BaseSellingPrice": 10 },
                "ID_ITM_B": { "BaseSellingPrice": 20 }
            }
        }])
    }

    async fn item_server(expected_fetches: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Game/Senbei/DataTable/Item/DT_Item.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(item_table()))
            .expect(expected_fetches)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_second_get_reuses_table() {
        let server = item_server(1).await;
        let cache = TableCache::new(Source::http(server.uri()));

        assert!(!cache.is_loaded::<Items>());
        let first = cache.get::<Items>().await.unwrap();
        let second = cache.get::<Items>().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_loaded::<Items>());
        assert_eq!(first.row("ID_ITM_B").unwrap().base_selling_price, 20);
    }

    #[tokio::test]
    async fn test_concurrent_first_gets_share_one_fetch() {
        let server = item_server(1).await;
        let cache = TableCache::new(Source::http(server.uri()));

        let (a, b) = tokio::join!(cache.get::<Items>(), cache.get::<Items>());
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Game/Senbei/DataTable/Item/DT_Item.json"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/Game/Senbei/DataTable/Item/DT_Item.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(item_table()))
            .expect(1)
            .mount(&server)
            .await;

        let cache = TableCache::new(Source::http(server.uri()));
        let err = cache.get::<Items>().await.unwrap_err();
        assert!(matches!(err, Error::Shared(_)));
        assert!(matches!(err.root(), Error::Status { status: 503, .. }));
        assert!(!cache.is_loaded::<Items>());

        let table = cache.get::<Items>().await.unwrap();
        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        let table_dir = dir.path().join("Game/Senbei/DataTable/Character");
        std::fs::create_dir_all(&table_dir).unwrap();
        let document = json!([{
            "Name": "DT_Character",
            "Rows": { "ID_LNPC001": { "NameTextKey": "TXT_NAME_LNPC001" } }
        }]);
        std::fs::write(table_dir.join("DT_Character.json"), document.to_string()).unwrap();

        let cache = TableCache::new(Source::directory(dir.path()));
        let characters = cache.get::<Characters>().await.unwrap();
        assert!(characters.contains("ID_LNPC001"));
        let missing = cache.get::<Items>().await.unwrap_err();
        assert!(matches!(missing.root(), Error::Io { .. }));
    }

    #[tokio::test]
    async fn test_communication_npc() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(
                "/Game/Senbei/Communication/Communication_NPC/DA_CommunicationNpc_LNPC001.json",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "Properties": {
                    "CommandPreference": [
                        { "Key": "CMD_001", "Value": "EAppCommunicationReactionType::LOVE" }
                    ]
                }
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let cache = TableCache::new(Source::http(server.uri()));
        let first = cache.communication_npc("LNPC001").await.unwrap();
        let second = cache.communication_npc("LNPC001").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.properties.command_preference[0].key, "CMD_001");
    }
}
