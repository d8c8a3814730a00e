//! Where catalog documents come from
//!
//! Every document has a well-known path relative to the data root. The root
//! is either an HTTP base URL or a local directory laid out the same way.

use crate::error::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tracing::debug;

/// Root of the exported game data
#[derive(Debug, Clone)]
pub enum Source {
    /// Static files served under a base URL
    Http { client: Client, base: String },
    /// A local copy of the export
    Directory(PathBuf),
}

impl Source {
    /// HTTP source with a default client
    pub fn http(base: impl Into<String>) -> Self {
        Self::Http {
            client: Client::new(),
            base: base.into(),
        }
    }

    /// Directory source
    pub fn directory(root: impl Into<PathBuf>) -> Self {
        Self::Directory(root.into())
    }

    /// Human-readable location of a document, for logs and errors
    pub fn locate(&self, path: &str) -> String {
        match self {
            Source::Http { base, .. } => format!("{}/{}", base.trim_end_matches('/'), path),
            Source::Directory(root) => root.join(path).display().to_string(),
        }
    }

    /// Raw bytes of a document
    pub async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        match self {
            Source::Http { client, .. } => {
                let url = self.locate(path);
                debug!(url = %url, "fetching");
                let response = client.get(&url).send().await.map_err(|source| Error::Request {
                    url: url.clone(),
                    source,
                })?;
                let status = response.status();
                if !status.is_success() {
                    return Err(Error::Status {
                        url,
                        status: status.as_u16(),
                    });
                }
                let body = response
                    .bytes()
                    .await
                    .map_err(|source| Error::Request { url, source })?;
                Ok(body.to_vec())
            }
            Source::Directory(root) => {
                let file = root.join(path);
                debug!(path = %file.display(), "reading");
                tokio::fs::read(&file)
                    .await
                    .map_err(|source| Error::Io { path: file, source })
            }
        }
    }

    /// A JSON object document
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let bytes = self.fetch(path).await?;
        serde_json::from_slice(&bytes).map_err(|source| Error::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// The first element of a JSON array document
    ///
    /// Exported tables and assets are wrapped in a one-element array.
    pub async fn fetch_first<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let elements: Vec<T> = self.fetch_json(path).await?;
        elements
            .into_iter()
            .next()
            .ok_or_else(|| Error::EmptyDocument(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_locate() {
        let source = Source::http("http://localhost:8000/");
        assert_eq!(
            source.locate("Game/Localization/en.json"),
            "http://localhost:8000/Game/Localization/en.json"
        );
    }

    #[tokio::test]
    async fn test_fetch_first_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{"a": 1}, {"a": 2}])),
            )
            .mount(&server)
            .await;

        let source = Source::http(server.uri());
        let first: Value = source.fetch_first("doc.json").await.unwrap();
        assert_eq!(first["a"], 1);
    }

    #[tokio::test]
    async fn test_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = Source::http(server.uri());
        let err = source.fetch("missing.json").await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("empty.json"), "[]").unwrap();

        let source = Source::directory(dir.path());
        let err = source.fetch_first::<Value>("empty.json").await.unwrap_err();
        assert!(matches!(err, Error::EmptyDocument(_)));
    }

    #[tokio::test]
    async fn test_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "[{").unwrap();

        let source = Source::directory(dir.path());
        assert!(matches!(
            source.fetch("absent.json").await.unwrap_err(),
            Error::Io { .. }
        ));
        assert!(matches!(
            source.fetch_first::<Value>("broken.json").await.unwrap_err(),
            Error::Parse { .. }
        ));
    }
}
