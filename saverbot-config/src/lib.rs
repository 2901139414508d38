//! Loader for saverbot configuration with YAML + environment overlays.
//!
//! Sources are merged in order: YAML file (or inline snippet), then
//! `SAVERBOT_`-prefixed environment variables. `${VAR}` placeholders inside
//! string values are expanded recursively with a depth cap so cyclic
//! definitions terminate.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct SaverConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Where the archive API lives and how we identify ourselves to it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base endpoint, no trailing slash required.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.luogu.me".into()
}

fn default_user_agent() -> String {
    "Uptime-Kuma".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct SaverConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for SaverConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SaverConfigLoader {
    /// Start with the defaults: `SAVERBOT_` env overrides, nothing else.
    ///
    /// ```
    /// use saverbot_config::SaverConfigLoader;
    ///
    /// let config = SaverConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.api.endpoint, "https://api.luogu.me");
    /// assert_eq!(config.api.user_agent, "Uptime-Kuma");
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("SAVERBOT").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// ```
    /// use saverbot_config::SaverConfigLoader;
    ///
    /// unsafe { std::env::set_var("ARCHIVE_ENDPOINT", "https://archive.example.org"); }
    ///
    /// let config = SaverConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// api:
    ///   endpoint: "${ARCHIVE_ENDPOINT}"
    ///   user_agent: "saverbot/0.1"
    /// "#,
    ///     )
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.api.endpoint, "https://archive.example.org");
    /// assert_eq!(config.api.user_agent, "saverbot/0.1");
    ///
    /// unsafe { std::env::remove_var("ARCHIVE_ENDPOINT"); }
    /// ```
    pub fn load(self) -> Result<SaverConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Expand ${VAR} placeholders before materialising the typed struct.
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: SaverConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
