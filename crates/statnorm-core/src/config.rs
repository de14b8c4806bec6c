//! Engine configuration for statnorm.
//!
//! [`EngineConfig::load`] layers an optional TOML file and `STATNORM_*`
//! environment variables on top of the built-in defaults.
//! [`EngineConfig::defaults`] returns the same defaults without touching the
//! filesystem or environment (useful in tests).

use serde::Deserialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[reducer]
host_prefix   = "https://localhost/"
path_prefixes = ["mgmt/tm/sys/", "mgmt/tm/ltm/", "mgmt/tm/net/", "mgmt/tm/gtm/", "mgmt/tm/"]
max_depth     = 512

[key_path]
separator = "::"
"#;

const ENV_PREFIX: &str = "STATNORM";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub reducer: ReducerConfig,
    #[serde(default)]
    pub key_path: KeyPathConfig,
}

/// `[reducer]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReducerConfig {
    /// Stripped first from every `entries` key.
    #[serde(default = "default_host_prefix")]
    pub host_prefix: String,
    /// The first of these found at the start of an `entries` key (after the
    /// host prefix) is stripped. Longer, more specific prefixes go first.
    #[serde(default = "default_path_prefixes")]
    pub path_prefixes: Vec<String>,
    /// Deepest nesting any recursive stage will walk before failing.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_host_prefix() -> String { "https://localhost/".to_string() }
fn default_path_prefixes() -> Vec<String> {
    ["mgmt/tm/sys/", "mgmt/tm/ltm/", "mgmt/tm/net/", "mgmt/tm/gtm/", "mgmt/tm/"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}
fn default_max_depth() -> usize { 512 }

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            host_prefix: default_host_prefix(),
            path_prefixes: default_path_prefixes(),
            max_depth: default_max_depth(),
        }
    }
}

/// `[key_path]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyPathConfig {
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String { "::".to_string() }

impl Default for KeyPathConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl EngineConfig {
    /// Built-in defaults, then `path` (if given, must exist), then
    /// `STATNORM_SECTION__FIELD` environment variables.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let cfg: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("reducer.path_prefixes")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.key_path.separator.is_empty() {
            anyhow::bail!("key_path.separator must not be empty");
        }
        if self.reducer.max_depth == 0 {
            anyhow::bail!("reducer.max_depth must be at least 1");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
