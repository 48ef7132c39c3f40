use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Write an environment file with `local` pointing at `url` and return its path.
fn environments(dir: &TempDir, url: &str) -> String {
    let path = dir.path().join("environments.json");
    std::fs::write(
        &path,
        format!(
            r#"{{"current": "local", "available": {{"local": "{url}", "other": "other:8083"}}}}"#
        ),
    )
    .unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_env_set_persists() {
    let dir = tempfile::tempdir().unwrap();
    let config = environments(&dir, "localhost:8083");

    cargo_bin_cmd!("kconnect")
        .args(["--config", &config, "env", "--set", "other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"current\": \"other\""));

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("\"current\": \"other\""));
}

#[test]
fn test_env_set_unknown_fails_and_keeps_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = environments(&dir, "localhost:8083");
    let before = std::fs::read_to_string(&config).unwrap();

    cargo_bin_cmd!("kconnect")
        .args(["--config", &config, "env", "-s", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown environment 'nope'"));

    assert_eq!(std::fs::read_to_string(&config).unwrap(), before);
}

#[test]
fn test_missing_environment_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("absent.json");

    cargo_bin_cmd!("kconnect")
        .args(["--config", config.to_str().unwrap(), "ls"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("environment file not found"));
}

#[tokio::test]
async fn test_post_malformed_json_makes_no_calls() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = environments(&dir, &server.uri());
    let file = dir.path().join("connector.json");
    std::fs::write(&file, "{\"name\": \"c1\",}").unwrap();

    cargo_bin_cmd!("kconnect")
        .args(["--config", &config, "post", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Syntax error"));
}

#[tokio::test]
async fn test_ls_against_cluster() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/connectors"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"["orders-sink"]"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/connectors/orders-sink/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"name":"orders-sink","connector":{"state":"RUNNING"},"tasks":[{"id":0,"state":"FAILED"}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = environments(&dir, &server.uri());

    cargo_bin_cmd!("kconnect")
        .args(["--config", &config, "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "orders-sink  RUNNING  task[0]: FAILED",
        ));
}

#[tokio::test]
async fn test_env_override_targets_other_cluster() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/connector-plugins"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("environments.json");
    std::fs::write(
        &config,
        format!(
            r#"{{"current": "dead", "available": {{"dead": "127.0.0.1:1", "live": "{}"}}}}"#,
            server.uri()
        ),
    )
    .unwrap();

    cargo_bin_cmd!("kconnect")
        .args(["--config", config.to_str().unwrap(), "--env", "live", "plugin", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HTTP 200"));

    // Override is not persisted
    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains(r#""current": "dead""#));
}

#[test]
fn test_unreachable_cluster_names_environment() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let dir = tempfile::tempdir().unwrap();
    let config = environments(&dir, &format!("127.0.0.1:{port}"));

    cargo_bin_cmd!("kconnect")
        .args(["--config", &config, "status", "c1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!(
            "environment 'local' at 127.0.0.1:{port} is unreachable"
        )));
}
