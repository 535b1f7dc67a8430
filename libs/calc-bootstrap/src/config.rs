//! Application configuration.
//!
//! Sources are layered, later ones winning:
//! 1. built-in defaults
//! 2. the YAML file passed with `--config`
//! 3. `APP__`-prefixed environment variables, `__` separating path segments
//!    (`APP__LOGGING__LEVEL=debug`,
//!    `APP__MODULES__API_GATEWAY__CONFIG__BIND_ADDR=0.0.0.0:8087`)
//! 4. command-line overrides ([`CliArgs`])
//!
//! Module sections stay raw JSON (`modules.<name>.config`) and are decoded
//! by each module through [`module_config_or_default`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::paths::{HomeDirError, resolve_home_dir};

/// Prefix of environment variables that override configuration.
pub const ENV_PREFIX: &str = "APP__";

/// Configuration error for typed config operations
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid config for module '{module}': {source}")]
    InvalidConfig {
        module: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Provider of module-specific configuration (raw JSON sections only).
pub trait ConfigProvider: Send + Sync {
    /// Returns raw JSON section for the module, if any.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Raw per-module sections, keyed by module name.
    #[serde(default)]
    pub modules: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Base directory for relative log file paths. `~` is expanded;
    /// defaults to `$HOME/.matrix-calc`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_dir: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    /// Daily-rolling log file, relative to the home directory unless absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_level() -> String {
    "info".to_owned()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    /// Verbosity count: 1 = info, 2 = debug, 3+ = trace.
    pub verbose: u8,
}

impl AppConfig {
    /// Load configuration from defaults, an optional YAML file and the
    /// environment.
    ///
    /// # Errors
    /// Returns an error if `path` does not exist or any source fails to
    /// parse into the expected shape.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract()
            .context("failed to load application configuration")
    }

    /// Load and apply command-line overrides in one step.
    ///
    /// # Errors
    /// See [`AppConfig::load_or_default`].
    pub fn load_with_cli(args: &CliArgs) -> anyhow::Result<Self> {
        let mut config = Self::load_or_default(args.config.as_deref())?;
        config.apply_cli_overrides(args);
        Ok(config)
    }

    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        match args.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
    }

    /// Resolve `server.home_dir`.
    ///
    /// # Errors
    /// See [`resolve_home_dir`].
    pub fn home_dir(&self, create: bool) -> Result<PathBuf, HomeDirError> {
        resolve_home_dir(self.server.home_dir.as_deref(), create)
    }

    /// Replace `modules.<module>.config` with `config`, keeping sibling keys.
    pub fn set_module_config(&mut self, module: &str, config: serde_json::Value) {
        let entry = self
            .modules
            .entry(module.to_owned())
            .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));

        if let serde_json::Value::Object(section) = entry {
            section.insert("config".to_owned(), config);
        } else {
            *entry = serde_json::json!({ "config": config });
        }
    }

    /// Render the effective configuration as pretty JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize configuration")
    }
}

impl ConfigProvider for AppConfig {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.modules.get(module_name)
    }
}

/// Lenient configuration loader that falls back to defaults.
///
/// - module not present in config → `Ok(T::default())`
/// - module value is not an object → `Ok(T::default())`
/// - no `config` field → `Ok(T::default())`
/// - `config` present but invalid → `Err(ConfigError::InvalidConfig)`
///
/// # Errors
/// Returns `ConfigError::InvalidConfig` if the config section exists but cannot be deserialized.
pub fn module_config_or_default<T: DeserializeOwned + Default>(
    provider: &dyn ConfigProvider,
    module_name: &str,
) -> Result<T, ConfigError> {
    let Some(config_section) = provider
        .get_module_config(module_name)
        .and_then(serde_json::Value::as_object)
        .and_then(|obj| obj.get("config"))
    else {
        return Ok(T::default());
    };

    serde_json::from_value(config_section.clone()).map_err(|e| ConfigError::InvalidConfig {
        module: module_name.to_owned(),
        source: e,
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[derive(Debug, PartialEq, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    struct TestConfig {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        retries: u32,
    }

    fn with_modules(modules: serde_json::Value) -> AppConfig {
        AppConfig {
            modules: serde_json::from_value(modules).unwrap(),
            ..AppConfig::default()
        }
    }

    const ENV_KEYS: [&str; 3] = [
        "APP__LOGGING__LEVEL",
        "APP__LOGGING__FORMAT",
        "APP__MODULES__MATRIX_CALC__CONFIG__LOG_REQUEST_BODIES",
    ];

    fn write_yaml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn lenient_loader_defaults_when_missing() {
        let cfg = with_modules(json!({ "other": { "config": {} } }));
        let parsed: TestConfig = module_config_or_default(&cfg, "test").unwrap();
        assert_eq!(parsed, TestConfig::default());

        let cfg = with_modules(json!({ "test": "not an object" }));
        let parsed: TestConfig = module_config_or_default(&cfg, "test").unwrap();
        assert_eq!(parsed, TestConfig::default());

        let cfg = with_modules(json!({ "test": { "database": {} } }));
        let parsed: TestConfig = module_config_or_default(&cfg, "test").unwrap();
        assert_eq!(parsed, TestConfig::default());
    }

    #[test]
    fn lenient_loader_parses_present_section() {
        let cfg = with_modules(json!({ "test": { "config": { "api_key": "k", "retries": 3 } } }));
        let parsed: TestConfig = module_config_or_default(&cfg, "test").unwrap();
        assert_eq!(
            parsed,
            TestConfig {
                api_key: "k".to_owned(),
                retries: 3
            }
        );
    }

    #[test]
    fn lenient_loader_reports_invalid_section() {
        let cfg = with_modules(json!({ "test": { "config": { "unknown": true } } }));
        let err = module_config_or_default::<TestConfig>(&cfg, "test").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig { ref module, .. } if module == "test"));
    }

    #[test]
    fn defaults_without_file() {
        temp_env::with_vars_unset(ENV_KEYS, || {
            let cfg = AppConfig::load_or_default(None).unwrap();
            assert_eq!(cfg.logging.level, "info");
            assert_eq!(cfg.logging.format, LogFormat::Text);
            assert!(cfg.modules.is_empty());
        });
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load_or_default(Some(Path::new("/definitely/not/here.yaml")))
            .unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn yaml_file_is_loaded() {
        let file = write_yaml(
            r#"
logging:
  level: warn
  format: json
modules:
  api_gateway:
    config:
      bind_addr: "0.0.0.0:9000"
"#,
        );
        temp_env::with_vars_unset(ENV_KEYS, || {
            let cfg = AppConfig::load_or_default(Some(file.path())).unwrap();
            assert_eq!(cfg.logging.level, "warn");
            assert_eq!(cfg.logging.format, LogFormat::Json);
            assert_eq!(
                cfg.modules["api_gateway"]["config"]["bind_addr"],
                "0.0.0.0:9000"
            );
        });
    }

    #[test]
    fn unknown_top_level_keys_are_rejected() {
        let file = write_yaml("loging:\n  level: warn\n");
        assert!(AppConfig::load_or_default(Some(file.path())).is_err());
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_yaml("logging:\n  level: warn\n");
        temp_env::with_vars(
            [
                ("APP__LOGGING__LEVEL", Some("error")),
                ("APP__MODULES__MATRIX_CALC__CONFIG__LOG_REQUEST_BODIES", Some("true")),
            ],
            || {
                let cfg = AppConfig::load_or_default(Some(file.path())).unwrap();
                assert_eq!(cfg.logging.level, "error");
                assert_eq!(
                    cfg.modules["matrix_calc"]["config"]["log_request_bodies"],
                    true
                );
            },
        );
    }

    #[test]
    fn verbosity_raises_level() {
        let mut cfg = AppConfig::default();
        cfg.logging.level = "warn".to_owned();
        cfg.apply_cli_overrides(&CliArgs::default());
        assert_eq!(cfg.logging.level, "warn");

        cfg.apply_cli_overrides(&CliArgs {
            verbose: 1,
            ..CliArgs::default()
        });
        assert_eq!(cfg.logging.level, "info");

        cfg.apply_cli_overrides(&CliArgs {
            verbose: 2,
            ..CliArgs::default()
        });
        assert_eq!(cfg.logging.level, "debug");

        cfg.apply_cli_overrides(&CliArgs {
            verbose: 3,
            ..CliArgs::default()
        });
        assert_eq!(cfg.logging.level, "trace");
    }

    #[test]
    fn set_module_config_keeps_siblings() {
        let mut cfg = with_modules(json!({ "api_gateway": { "note": 1, "config": { "a": 1 } } }));
        cfg.set_module_config("api_gateway", json!({ "b": 2 }));
        cfg.set_module_config("fresh", json!({ "c": 3 }));

        assert_eq!(cfg.modules["api_gateway"], json!({ "note": 1, "config": { "b": 2 } }));
        assert_eq!(cfg.modules["fresh"], json!({ "config": { "c": 3 } }));
    }

    #[test]
    fn pretty_json_round_trips() {
        let cfg = with_modules(json!({ "matrix_calc": { "config": { "log_request_bodies": true } } }));
        let rendered = cfg.to_pretty_json().unwrap();
        let back: AppConfig = serde_json::from_str(&rendered).unwrap();
        assert_eq!(back.modules, cfg.modules);
    }
}
