use crate::constants;
use crate::error::ConfigError;
use crate::types::ToolKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Tool name -> endpoint path, relative to `api_prefix`.
    #[serde(default = "default_endpoints")]
    pub endpoints: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    constants::DEFAULT_BACKEND_BASE_URL.into()
}
fn default_api_prefix() -> String {
    constants::DEFAULT_API_PREFIX.into()
}
fn default_endpoints() -> BTreeMap<String, String> {
    ToolKind::ALL
        .into_iter()
        .map(|kind| (kind.as_str().to_string(), kind.default_endpoint().to_string()))
        .collect()
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            endpoints: default_endpoints(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration with layered precedence:
    /// 1. Environment variables (`LSBRIDGE_<SECTION>_<KEY>`, highest priority)
    /// 2. Explicit config file (from `--config` flag)
    /// 3. Global config: `~/.lsbridge/config.toml`
    /// 4. Built-in defaults (lowest priority)
    ///
    /// Only fields explicitly set in a higher-priority file override lower layers.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let global = dirs::home_dir().map(|home| {
            home.join(constants::DEFAULT_DATA_DIR)
                .join(constants::CONFIG_FILE_NAME)
        });
        let mut config = Self::load_layers(global.as_deref(), config_file)?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Merge the built-in defaults with the optional global and explicit files.
    /// A missing global file is skipped; a missing explicit file is an error.
    pub fn load_layers(
        global_file: Option<&Path>,
        config_file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        // Seeding with the defaults keeps partial `[backend.endpoints]` tables
        // from dropping the tools they do not mention.
        let mut merged = toml::Value::try_from(Config::default())
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if let Some(global) = global_file
            && global.exists()
        {
            let raw = load_toml_value(global)?;
            merge_toml_values(&mut merged, &raw);
        }

        if let Some(cf) = config_file {
            if !cf.exists() {
                return Err(ConfigError::NotFound {
                    path: cf.display().to_string(),
                });
            }
            let raw = load_toml_value(cf)?;
            merge_toml_values(&mut merged, &raw);
        }

        let config: Config = merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError(e.to_string()))?;
        Ok(config)
    }

    /// Check the cross-field invariants the dispatcher relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.backend.base_url)
            .map_err(|e| ConfigError::invalid("backend.base_url", e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "backend.base_url",
                format!("unsupported scheme `{}`", parsed.scheme()),
            ));
        }

        let prefix = &self.backend.api_prefix;
        if !prefix.is_empty() && !prefix.starts_with('/') {
            return Err(ConfigError::invalid(
                "backend.api_prefix",
                "must be empty or start with `/`",
            ));
        }

        for name in self.backend.endpoints.keys() {
            if ToolKind::from_name(name).is_none() {
                return Err(ConfigError::invalid(
                    format!("backend.endpoints.{name}"),
                    "no tool with this name",
                ));
            }
        }
        for kind in ToolKind::ALL {
            match self.backend.endpoints.get(kind.as_str()) {
                Some(path) if path.starts_with('/') => {}
                Some(_) => {
                    return Err(ConfigError::invalid(
                        format!("backend.endpoints.{kind}"),
                        "must start with `/`",
                    ));
                }
                None => {
                    return Err(ConfigError::invalid(
                        format!("backend.endpoints.{kind}"),
                        "missing endpoint path",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Endpoint path configured for a tool, without the API prefix.
    pub fn endpoint_path(&self, kind: ToolKind) -> Option<&str> {
        self.backend.endpoints.get(kind.as_str()).map(String::as_str)
    }

    /// Full request URL: `base_url + api_prefix + endpoint_path`.
    pub fn endpoint_url(&self, endpoint_path: &str) -> String {
        format!(
            "{}{}{}",
            self.backend.base_url.trim_end_matches('/'),
            self.backend.api_prefix,
            endpoint_path
        )
    }
}

/// Load a TOML file as a raw `toml::Value` (preserving only explicitly-set fields).
fn load_toml_value(path: &Path) -> Result<toml::Value, ConfigError> {
    debug!(path = %path.display(), "loading config file");
    let content = std::fs::read_to_string(path)?;
    content
        .parse::<toml::Value>()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Deep-merge `overlay` into `base`. Only keys present in `overlay` are written.
fn merge_toml_values(base: &mut toml::Value, overlay: &toml::Value) {
    if let (toml::Value::Table(base_map), toml::Value::Table(overlay_map)) = (base, overlay) {
        for (key, overlay_val) in overlay_map {
            if let Some(base_val) = base_map.get_mut(key) {
                if base_val.is_table() && overlay_val.is_table() {
                    merge_toml_values(base_val, overlay_val);
                } else {
                    *base_val = overlay_val.clone();
                }
            } else {
                base_map.insert(key.clone(), overlay_val.clone());
            }
        }
    }
}

/// Apply environment variable overrides to config fields.
/// Convention: `LSBRIDGE_<SECTION>_<KEY>` in UPPER_SNAKE_CASE.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("LSBRIDGE_BACKEND_BASE_URL") {
        config.backend.base_url = v;
    }
    if let Some(v) = lookup("LSBRIDGE_BACKEND_API_PREFIX") {
        config.backend.api_prefix = v;
    }
    if let Some(v) = lookup("LSBRIDGE_LOGGING_LEVEL") {
        config.logging.level = v;
    }
}
