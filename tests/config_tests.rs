// Configuration loading tests
// Author: kelexine (https://github.com/kelexine)

use corpus_gateway::config::AppConfig;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_file_overrides_defaults() {
    let file = config_file(
        r#"
environment = "production"

[server]
port = 8080

[upstream]
base_url = "https://api.example.com/v1/"
timeout_seconds = 5

[session]
access_token_days = 1
"#,
    );

    let config = AppConfig::load(Some(file.path().to_str().unwrap())).unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.upstream_base(), Some("https://api.example.com/v1"));
    assert_eq!(config.upstream.timeout_seconds, 5);
    assert_eq!(config.upstream.connect_timeout_seconds, 10);
    assert_eq!(config.session.access_token_days, 1);
    assert_eq!(config.session.refresh_token_days, 30);
    assert!(config.secure_cookies());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    assert!(AppConfig::load(Some(missing.to_str().unwrap())).is_err());
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = config_file("[server]\nport = \"not a port\"\n");

    assert!(AppConfig::load(Some(file.path().to_str().unwrap())).is_err());
}

#[test]
fn test_environment_overrides_file() {
    let file = config_file("[proxy]\nrefresh_grace_seconds = 3\n");

    std::env::set_var("CORPUS_GATEWAY__PROXY__REFRESH_GRACE_SECONDS", "42");
    let config = AppConfig::load(Some(file.path().to_str().unwrap()));
    std::env::remove_var("CORPUS_GATEWAY__PROXY__REFRESH_GRACE_SECONDS");

    let config = config.unwrap();
    assert_eq!(config.proxy.refresh_grace_seconds, 42);
    assert_eq!(config.proxy.route_prefix, "/api/proxy");
}
