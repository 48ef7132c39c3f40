//! Create a connector from a local JSON file

use anyhow::{Context, Result};
use kconnect_core::ConnectClient;
use std::io::Write;
use std::path::Path;

use crate::output;

/// Run the post command
///
/// The file is checked for JSON syntax first; nothing is sent when it is
/// invalid. Valid files are posted byte-for-byte.
pub async fn run<W: Write>(client: &ConnectClient, out: &mut W, file: &Path) -> Result<()> {
    let raw = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    if let Err(e) = serde_json::from_slice::<serde_json::Value>(&raw) {
        anyhow::bail!("Syntax error in {}: {}", file.display(), e);
    }

    tracing::info!("Creating connector from {}", file.display());
    let response = client.create(raw).await?;
    output::echo(out, &response)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{any, body_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_malformed_json_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("bad.json");
        std::fs::write(&file, r#"{"name": "c1", "config": {"#).unwrap();

        let client = ConnectClient::builder()
            .base_url(server.uri())
            .build()
            .unwrap();
        let mut out = Vec::new();
        let err = run(&client, &mut out, &file).await.unwrap_err();
        assert!(err.to_string().starts_with("Syntax error in"), "{err}");
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_valid_json_is_posted_verbatim() {
        let server = MockServer::start().await;
        let raw = "{ \"name\": \"c1\",\n  \"config\": { \"tasks.max\": \"1\" } }\n";
        Mock::given(method("POST"))
            .and(path("/connectors"))
            .and(body_string(raw))
            .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"name":"c1"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("c1.json");
        std::fs::write(&file, raw).unwrap();

        let client = ConnectClient::builder()
            .base_url(server.uri())
            .build()
            .unwrap();
        let mut out = Vec::new();
        run(&client, &mut out, &file).await.unwrap();
        assert!(String::from_utf8(out).unwrap().contains("HTTP 201"));
    }
}
