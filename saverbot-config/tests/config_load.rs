use saverbot_config::SaverConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
version: "0.1"
api:
  endpoint: "${SAVER_ENDPOINT}"
  user_agent: "saverbot-ci"
  "#;
    let p = write_yaml(&tmp, "saverbot.yaml", file_yaml);

    temp_env::with_var("SAVER_ENDPOINT", Some("http://127.0.0.1:9000"), || {
        let config = SaverConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load saverbot config");

        assert_eq!(config.version.as_deref(), Some("0.1"));
        assert_eq!(config.api.endpoint, "http://127.0.0.1:9000");
        assert_eq!(config.api.user_agent, "saverbot-ci");
    });
}

#[test]
#[serial]
fn test_defaults_without_file() {
    let config = SaverConfigLoader::new().load().expect("defaults load");

    assert!(config.version.is_none());
    assert_eq!(config.api.endpoint, "https://api.luogu.me");
    assert_eq!(config.api.user_agent, "Uptime-Kuma");
}
