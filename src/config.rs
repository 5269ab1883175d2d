use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use chrono::Weekday;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ExitError;

/// Config file name.
pub const CONFIG_TOML: &str = ".cookbot.toml";

pub const DEFAULT_PROXY: &str = "https://cf.ghproxy.cc/";
pub const DEFAULT_REMOTE_URL: &str =
    "https://cdn.jsdelivr.net/gh/tongque0/HowToCook-json@main/json/simpleType.json";

/// Find `.cookbot.toml` in `dir`. Returns None if it does not exist.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_TOML);
    path.exists().then_some(path)
}

/// Top-level .cookbot.toml config.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// `false` to load images directly, or a URL prefix prepended to every
    /// image URL.
    #[serde(default)]
    pub use_proxy: UseProxy,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
}

/// Image proxy setting. Serialized as `false` or a prefix string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProxy", into = "RawProxy")]
pub enum UseProxy {
    Direct,
    Prefix(String),
}

impl Default for UseProxy {
    fn default() -> Self {
        UseProxy::Prefix(DEFAULT_PROXY.to_string())
    }
}

impl UseProxy {
    /// Apply the proxy to a raw image URL.
    pub fn apply(&self, url: &str) -> String {
        match self {
            UseProxy::Direct => url.to_string(),
            UseProxy::Prefix(prefix) => format!("{prefix}{url}"),
        }
    }
}

impl JsonSchema for UseProxy {
    fn schema_name() -> String {
        "UseProxy".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        RawProxy::json_schema(generator)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
enum RawProxy {
    Flag(bool),
    Prefix(String),
}

impl TryFrom<RawProxy> for UseProxy {
    type Error = String;

    fn try_from(raw: RawProxy) -> Result<Self, Self::Error> {
        match raw {
            RawProxy::Flag(false) => Ok(UseProxy::Direct),
            RawProxy::Flag(true) => {
                Err("use_proxy must be false or a URL prefix, not true".to_string())
            }
            RawProxy::Prefix(prefix) => Ok(UseProxy::Prefix(prefix)),
        }
    }
}

impl From<UseProxy> for RawProxy {
    fn from(proxy: UseProxy) -> Self {
        match proxy {
            UseProxy::Direct => RawProxy::Flag(false),
            UseProxy::Prefix(prefix) => RawProxy::Prefix(prefix),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CatalogConfig {
    /// Local recipe file. Relative paths resolve against the config file's
    /// directory.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
    #[serde(default = "default_remote_url")]
    pub remote_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            remote_url: default_remote_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RefreshConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Day of week, e.g. "mon" or "monday".
    #[serde(default = "default_weekday")]
    pub weekday: String,
    #[serde(default = "default_hour")]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            weekday: default_weekday(),
            hour: default_hour(),
            minute: 0,
        }
    }
}

impl RefreshConfig {
    pub fn parsed_weekday(&self) -> anyhow::Result<Weekday> {
        self.weekday
            .parse()
            .map_err(|_| ExitError::Config(format!("invalid refresh weekday: {:?}", self.weekday)).into())
    }
}

// Default value functions for serde
fn default_catalog_path() -> PathBuf { PathBuf::from("recipes.json") }
fn default_remote_url() -> String { DEFAULT_REMOTE_URL.into() }
fn default_timeout_secs() -> u64 { 30 }
fn default_true() -> bool { true }
fn default_weekday() -> String { "mon".into() }
fn default_hour() -> u32 { 3 }

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config = Self::parse_toml(&contents)?;
        if let Some(dir) = path.parent() {
            config.catalog.path = dir.join(&config.catalog.path);
        }
        Ok(config)
    }

    /// Load from `--config` if given, else `.cookbot.toml` in `dir`, else
    /// defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match find_config(dir) {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!("no {CONFIG_TOML} in {}, using defaults", dir.display());
                let mut config = Self::default();
                config.catalog.path = dir.join(&config.catalog.path);
                Ok(config)
            }
        }
    }

    /// Parse config from a TOML string.
    pub fn parse_toml(toml_str: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ExitError::Config(format!("invalid {CONFIG_TOML}: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.refresh.parsed_weekday()?;
        if self.refresh.hour > 23 || self.refresh.minute > 59 {
            return Err(ExitError::Config(format!(
                "invalid refresh time {}:{:02}",
                self.refresh.hour, self.refresh.minute
            ))
            .into());
        }
        if self.catalog.timeout_secs == 0 {
            return Err(ExitError::Config("catalog.timeout_secs must be positive".into()).into());
        }
        Ok(())
    }

    /// Serialize config to a TOML string with helpful comments.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        let raw = toml::to_string_pretty(self).context("serializing config to TOML")?;

        let mut doc: toml_edit::DocumentMut = raw
            .parse()
            .context("parsing generated TOML for comment injection")?;

        doc.decor_mut().set_prefix("# cookbot configuration\n\n");

        if let Some(mut key) = doc.key_mut("use_proxy") {
            key.leaf_decor_mut().set_prefix(
                "# Image proxy: false for direct links, or a URL prefix\n",
            );
        }

        fn set_table_comment(doc: &mut toml_edit::DocumentMut, key: &str, comment: &str) {
            if let Some(item) = doc.get_mut(key) {
                if let Some(tbl) = item.as_table_mut() {
                    tbl.decor_mut().set_prefix(comment);
                }
            }
        }

        set_table_comment(&mut doc, "catalog", "\n# Local recipe file and remote source\n");
        set_table_comment(&mut doc, "refresh", "\n# Weekly catalog refresh (local time)\n");

        Ok(doc.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
use_proxy = "https://p/"

[catalog]
path = "data/recipes.json"
remote_url = "https://example.com/recipes.json"
timeout_secs = 5

[refresh]
enabled = false
weekday = "fri"
hour = 22
minute = 30
"#;
        let config = Config::parse_toml(toml_str).unwrap();
        assert_eq!(config.use_proxy, UseProxy::Prefix("https://p/".into()));
        assert_eq!(config.catalog.path, PathBuf::from("data/recipes.json"));
        assert_eq!(config.catalog.remote_url, "https://example.com/recipes.json");
        assert_eq!(config.catalog.timeout(), Duration::from_secs(5));
        assert!(!config.refresh.enabled);
        assert_eq!(config.refresh.parsed_weekday().unwrap(), Weekday::Fri);
        assert_eq!(config.refresh.hour, 22);
        assert_eq!(config.refresh.minute, 30);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.use_proxy, UseProxy::Prefix(DEFAULT_PROXY.into()));
        assert_eq!(config.catalog.path, PathBuf::from("recipes.json"));
        assert_eq!(config.catalog.remote_url, DEFAULT_REMOTE_URL);
        assert_eq!(config.catalog.timeout_secs, 30);
        assert!(config.refresh.enabled);
        assert_eq!(config.refresh.parsed_weekday().unwrap(), Weekday::Mon);
        assert_eq!(config.refresh.hour, 3);
        assert_eq!(config.refresh.minute, 0);
    }

    #[test]
    fn use_proxy_false_is_direct() {
        let config = Config::parse_toml("use_proxy = false").unwrap();
        assert_eq!(config.use_proxy, UseProxy::Direct);
    }

    #[test]
    fn use_proxy_true_is_rejected() {
        assert!(Config::parse_toml("use_proxy = true").is_err());
    }

    #[test]
    fn proxy_apply() {
        assert_eq!(UseProxy::Direct.apply("http://x/a.png"), "http://x/a.png");
        assert_eq!(
            UseProxy::Prefix("https://p/".into()).apply("http://x/a.png"),
            "https://p/http://x/a.png"
        );
    }

    #[test]
    fn bad_weekday_is_config_error() {
        let err = Config::parse_toml("[refresh]\nweekday = \"someday\"").unwrap_err();
        let exit = err.downcast_ref::<ExitError>().unwrap();
        assert!(matches!(exit, ExitError::Config(_)));
    }

    #[test]
    fn bad_hour_is_rejected() {
        assert!(Config::parse_toml("[refresh]\nhour = 24").is_err());
    }

    #[test]
    fn to_toml_round_trips_with_comments() {
        let mut config = Config::default();
        config.use_proxy = UseProxy::Direct;
        let out = config.to_toml().unwrap();
        assert!(out.contains("# cookbot configuration"));
        assert!(out.contains("# Image proxy"));
        assert!(out.contains("# Weekly catalog refresh"));
        let back = Config::parse_toml(&out).unwrap();
        assert_eq!(back.use_proxy, UseProxy::Direct);
        assert_eq!(back.refresh.weekday, "mon");
    }

    #[test]
    fn load_resolves_catalog_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_TOML);
        std::fs::write(&path, "[catalog]\npath = \"r.json\"\n").unwrap();
        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.catalog.path, dir.path().join("r.json"));
    }

    #[test]
    fn discover_without_file_defaults_into_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.catalog.path, dir.path().join("recipes.json"));
    }
}
