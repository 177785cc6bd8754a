use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub collection: CollectionSettings,
    pub cache: CacheSettings,
    pub auth: AuthSettings,
    pub matching: MatchingSettings,
    pub scoring: ScoringSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub users: String,
    pub family_members: String,
    pub konnections: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
}

/// Decision thresholds for the tree matcher. The defaults are the
/// hand-tuned constants; nothing is learned at runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_pair_minimum")]
    pub pair_minimum: f64,
    #[serde(default = "default_tree_minimum")]
    pub tree_minimum: f64,
    #[serde(default = "default_min_contributing_pairs")]
    pub min_contributing_pairs: usize,
    #[serde(default = "default_birth_year_tolerance")]
    pub birth_year_tolerance: i32,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            pair_minimum: default_pair_minimum(),
            tree_minimum: default_tree_minimum(),
            min_contributing_pairs: default_min_contributing_pairs(),
            birth_year_tolerance: default_birth_year_tolerance(),
        }
    }
}

fn default_pair_minimum() -> f64 { 55.0 }
fn default_tree_minimum() -> f64 { 120.0 }
fn default_min_contributing_pairs() -> usize { 2 }
fn default_birth_year_tolerance() -> i32 { 2 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_name_weight")]
    pub name: f64,
    #[serde(default = "default_alias_weight")]
    pub alias: f64,
    #[serde(default = "default_birth_year_exact_weight")]
    pub birth_year_exact: f64,
    #[serde(default = "default_birth_year_close_weight")]
    pub birth_year_close: f64,
    #[serde(default = "default_birth_place_weight")]
    pub birth_place: f64,
    #[serde(default = "default_current_place_weight")]
    pub current_place: f64,
    #[serde(default = "default_religion_weight")]
    pub religion: f64,
    #[serde(default = "default_caste_weight")]
    pub caste: f64,
    #[serde(default = "default_deceased_weight")]
    pub deceased: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            name: default_name_weight(),
            alias: default_alias_weight(),
            birth_year_exact: default_birth_year_exact_weight(),
            birth_year_close: default_birth_year_close_weight(),
            birth_place: default_birth_place_weight(),
            current_place: default_current_place_weight(),
            religion: default_religion_weight(),
            caste: default_caste_weight(),
            deceased: default_deceased_weight(),
        }
    }
}

fn default_name_weight() -> f64 { 50.0 }
fn default_alias_weight() -> f64 { 30.0 }
fn default_birth_year_exact_weight() -> f64 { 20.0 }
fn default_birth_year_close_weight() -> f64 { 10.0 }
fn default_birth_place_weight() -> f64 { 10.0 }
fn default_current_place_weight() -> f64 { 10.0 }
fn default_religion_weight() -> f64 { 5.0 }
fn default_caste_weight() -> f64 { 5.0 }
fn default_deceased_weight() -> f64 { 5.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with KIN_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., KIN_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("KIN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("KIN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
