//! Delete a connector and create it again from its current config
//!
//! Not atomic: if the create step fails the connector stays deleted and the
//! attempted payload is printed so it can be posted by hand.

use anyhow::{Context, Result, bail};
use kconnect_core::{ConnectClient, ConnectorConfig, NewConnector};
use std::io::Write;

use crate::output::{self, Tone};

const OK: u16 = 200;
const CREATED: u16 = 201;
const NO_CONTENT: u16 = 204;
const NOT_FOUND: u16 = 404;

/// Run the recreate command
pub async fn run<W: Write>(client: &ConnectClient, out: &mut W, name: &str) -> Result<()> {
    // Stage 1: fetch config
    let response = client.get_config(name).await?;
    if response.status == NOT_FOUND {
        output::echo(out, &response)?;
        bail!("Connector '{}' not found", name);
    }
    if response.status != OK {
        output::echo(out, &response)?;
        bail!("Failed to fetch config for '{}'; nothing was changed", name);
    }
    let config: ConnectorConfig = response
        .json()
        .with_context(|| format!("Config for '{}' is not a JSON object", name))?;

    // Stage 2: delete
    let deleted = client.delete(name).await?;
    if deleted.status != NO_CONTENT {
        output::echo(out, &deleted)?;
        bail!("Failed to delete '{}'; connector left unchanged", name);
    }
    writeln!(out, "Deleted connector '{}'", name)?;

    // Stage 3: create
    let payload = NewConnector {
        name: name.to_string(),
        config,
    };
    match client.create_connector(&payload).await {
        Ok(created) if created.status == CREATED => {
            writeln!(
                out,
                "{}",
                Tone::Success
                    .style()
                    .apply_to(format!("Created connector '{}'", name))
            )?;
            Ok(())
        }
        Ok(created) => {
            output::echo(out, &created)?;
            print_payload(out, &payload)?;
            bail!("Failed to create '{}' after deleting it", name);
        }
        Err(e) => {
            print_payload(out, &payload)?;
            Err(e).with_context(|| format!("Failed to create '{}' after deleting it", name))
        }
    }
}

fn print_payload<W: Write>(out: &mut W, payload: &NewConnector) -> Result<()> {
    writeln!(out, "Attempted payload:")?;
    writeln!(out, "{}", serde_json::to_string_pretty(payload)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CONFIG: &str = r#"{"tasks.max":"2","connector.class":"FileStreamSink","topics":"orders","file":"/tmp/orders.txt"}"#;

    async fn get_config(server: &MockServer, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path("/connectors/c1/config"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn delete(server: &MockServer, status: u16, calls: u64) {
        Mock::given(method("DELETE"))
            .and(path("/connectors/c1"))
            .respond_with(ResponseTemplate::new(status))
            .expect(calls)
            .mount(server)
            .await;
    }

    async fn create(server: &MockServer, status: u16, calls: u64) {
        Mock::given(method("POST"))
            .and(path("/connectors"))
            .respond_with(ResponseTemplate::new(status).set_body_string("{}"))
            .expect(calls)
            .mount(server)
            .await;
    }

    async fn recreate(server: &MockServer) -> (Result<()>, String) {
        let client = ConnectClient::builder()
            .base_url(server.uri())
            .build()
            .unwrap();
        let mut out = Vec::new();
        let result = run(&client, &mut out, "c1").await;
        let text = console::strip_ansi_codes(&String::from_utf8(out).unwrap()).into_owned();
        (result, text)
    }

    #[tokio::test]
    async fn test_not_found_makes_no_changes() {
        let server = MockServer::start().await;
        get_config(&server, 404, r#"{"error_code":404,"message":"Connector c1 not found"}"#).await;
        delete(&server, 204, 0).await;
        create(&server, 201, 0).await;

        let (result, _) = recreate(&server).await;
        assert_eq!(result.unwrap_err().to_string(), "Connector 'c1' not found");
    }

    #[tokio::test]
    async fn test_config_fetch_failure_makes_no_changes() {
        let server = MockServer::start().await;
        get_config(&server, 500, "oops").await;
        delete(&server, 204, 0).await;
        create(&server, 201, 0).await;

        let (result, text) = recreate(&server).await;
        assert!(result.unwrap_err().to_string().contains("Failed to fetch config"));
        assert!(text.contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_delete_failure_skips_create() {
        let server = MockServer::start().await;
        get_config(&server, 200, CONFIG).await;
        delete(&server, 409, 1).await;
        create(&server, 201, 0).await;

        let (result, _) = recreate(&server).await;
        assert!(result.unwrap_err().to_string().contains("Failed to delete"));
    }

    #[tokio::test]
    async fn test_recreate_reposts_fetched_config() {
        let server = MockServer::start().await;
        get_config(&server, 200, CONFIG).await;
        delete(&server, 204, 1).await;
        let config: serde_json::Value = serde_json::from_str(CONFIG).unwrap();
        Mock::given(method("POST"))
            .and(path("/connectors"))
            .and(body_json(serde_json::json!({"name": "c1", "config": config})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let (result, text) = recreate(&server).await;
        result.unwrap();
        assert_eq!(text, "Deleted connector 'c1'\nCreated connector 'c1'\n");
    }

    #[tokio::test]
    async fn test_recreate_preserves_key_order() {
        let server = MockServer::start().await;
        get_config(&server, 200, CONFIG).await;
        delete(&server, 204, 1).await;
        create(&server, 201, 1).await;

        let (result, _) = recreate(&server).await;
        result.unwrap();

        let requests = server.received_requests().await.unwrap();
        let post = requests
            .iter()
            .find(|r| r.method.as_str() == "POST")
            .unwrap();
        assert_eq!(
            String::from_utf8(post.body.clone()).unwrap(),
            format!(r#"{{"name":"c1","config":{}}}"#, CONFIG)
        );
    }

    #[tokio::test]
    async fn test_create_failure_prints_payload() {
        let server = MockServer::start().await;
        get_config(&server, 200, CONFIG).await;
        delete(&server, 204, 1).await;
        create(&server, 400, 1).await;

        let (result, text) = recreate(&server).await;
        assert!(result.unwrap_err().to_string().contains("after deleting it"));
        assert!(text.contains("Attempted payload:"));
        assert!(text.contains("\"connector.class\": \"FileStreamSink\""));
    }
}
