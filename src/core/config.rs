//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tutor/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TutorConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub course: CourseConfig,
    #[serde(default)]
    pub openrouter: OpenRouterConfig,
    #[serde(default)]
    pub lmstudio: LmStudioConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_provider: Option<String>,
    pub default_model: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub feedback_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub bind_address: Option<String>,
    pub max_events: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CourseConfig {
    pub course_id: Option<String>,
    pub unit_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OpenRouterConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LmStudioConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PROVIDER: &str = "openrouter";
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;
pub const DEFAULT_FEEDBACK_DELAY_MS: u64 = 2000;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3001";
pub const DEFAULT_MAX_EVENTS: usize = 10_000;
pub const DEFAULT_COURSE_ID: &str = "BIO101";
pub const DEFAULT_UNIT_ID: &str = "unit1";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider: String,
    pub model_name: String,
    pub max_output_tokens: u32,
    pub feedback_delay: Duration,
    pub bind_address: String,
    /// Cap on the server's in-memory analytics log.
    pub max_events: usize,
    pub course_id: String,
    pub unit_id: String,
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub lmstudio_base_url: String,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub provider: Option<String>,
    pub bind_address: Option<String>,
    pub unit_id: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tutor/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tutor").join("config.toml"))
}

/// Load config from `~/.tutor/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TutorConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TutorConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TutorConfig::default());
        }
    };
    load_config_from(&path)
}

/// Load config from an explicit path, generating a default if missing.
pub fn load_config_from(path: &Path) -> Result<TutorConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TutorConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TutorConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Tutor Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_provider = "openrouter"    # "openrouter" or "lmstudio"
# default_model = "openai/gpt-3.5-turbo"
# max_output_tokens = 500            # cap on explanation length
# feedback_delay_ms = 2000           # how long quiz feedback shows before moving on

# [server]
# bind_address = "127.0.0.1:3001"    # Or set TUTOR_BIND_ADDRESS env var
# max_events = 10000                 # oldest analytics events are dropped past this

# [course]
# course_id = "BIO101"
# unit_id = "unit1"

# [openrouter]
# api_key = "sk-or-..."              # Or set OPENROUTER_API_KEY env var
# base_url = "https://openrouter.ai/api/v1"

# [lmstudio]
# base_url = "http://localhost:1234/v1"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TutorConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Provider: CLI → env → config → default
    let provider = cli
        .provider
        .clone()
        .or_else(|| std::env::var("TUTOR_PROVIDER").ok())
        .or_else(|| config.general.default_provider.clone())
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

    // Model: env → config → default
    let model_name = std::env::var("TUTOR_MODEL")
        .ok()
        .or_else(|| config.general.default_model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // Bind address: CLI → env → config → default
    let bind_address = cli
        .bind_address
        .clone()
        .or_else(|| std::env::var("TUTOR_BIND_ADDRESS").ok())
        .or_else(|| config.server.bind_address.clone())
        .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

    // Unit: CLI → config → default
    let unit_id = cli
        .unit_id
        .clone()
        .or_else(|| config.course.unit_id.clone())
        .unwrap_or_else(|| DEFAULT_UNIT_ID.to_string());

    // OpenRouter API key: env → config
    let openrouter_api_key = std::env::var("OPENROUTER_API_KEY")
        .ok()
        .or_else(|| config.openrouter.api_key.clone());

    // OpenRouter base URL: env → config → default
    let openrouter_base_url = std::env::var("OPENROUTER_BASE_URL")
        .ok()
        .or_else(|| config.openrouter.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string());

    // LM Studio base URL: env → config → default
    let lmstudio_base_url = std::env::var("LM_STUDIO_BASE_URL")
        .ok()
        .or_else(|| config.lmstudio.base_url.clone())
        .unwrap_or_else(|| DEFAULT_LMSTUDIO_BASE_URL.to_string());

    ResolvedConfig {
        provider,
        model_name,
        max_output_tokens: config
            .general
            .max_output_tokens
            .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
        feedback_delay: Duration::from_millis(
            config
                .general
                .feedback_delay_ms
                .unwrap_or(DEFAULT_FEEDBACK_DELAY_MS),
        ),
        bind_address,
        max_events: config.server.max_events.unwrap_or(DEFAULT_MAX_EVENTS),
        course_id: config
            .course
            .course_id
            .clone()
            .unwrap_or_else(|| DEFAULT_COURSE_ID.to_string()),
        unit_id,
        openrouter_api_key,
        openrouter_base_url,
        lmstudio_base_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = TutorConfig::default();
        assert!(config.general.default_provider.is_none());
        assert!(config.server.bind_address.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = TutorConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
        assert_eq!(resolved.feedback_delay, Duration::from_millis(2000));
        assert_eq!(resolved.course_id, "BIO101");
        assert_eq!(resolved.unit_id, "unit1");
        assert_eq!(resolved.max_events, DEFAULT_MAX_EVENTS);
    }

    #[test]
    fn test_max_events_from_file() {
        let config: TutorConfig = toml::from_str("[server]\nmax_events = 50\n").unwrap();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.max_events, 50);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TutorConfig {
            general: GeneralConfig {
                default_provider: Some("lmstudio".to_string()),
                default_model: Some("my-model".to_string()),
                max_output_tokens: Some(256),
                feedback_delay_ms: Some(500),
            },
            course: CourseConfig {
                course_id: Some("BIO102".to_string()),
                unit_id: Some("unit2".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.max_output_tokens, 256);
        assert_eq!(resolved.feedback_delay, Duration::from_millis(500));
        assert_eq!(resolved.course_id, "BIO102");
        assert_eq!(resolved.unit_id, "unit2");
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = TutorConfig {
            general: GeneralConfig {
                default_provider: Some("lmstudio".to_string()),
                ..Default::default()
            },
            server: ServerConfig {
                bind_address: Some("0.0.0.0:8080".to_string()),
                ..Default::default()
            },
            course: CourseConfig {
                unit_id: Some("unit2".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            provider: Some("openrouter".to_string()),
            bind_address: Some("127.0.0.1:9999".to_string()),
            unit_id: Some("unit1".to_string()),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.provider, "openrouter");
        assert_eq!(resolved.bind_address, "127.0.0.1:9999");
        assert_eq!(resolved.unit_id, "unit1");
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
default_provider = "openrouter"
default_model = "openai/gpt-4o-mini"
max_output_tokens = 800
feedback_delay_ms = 1500

[server]
bind_address = "0.0.0.0:3001"

[course]
course_id = "BIO101"
unit_id = "unit2"

[openrouter]
api_key = "sk-test-123"

[lmstudio]
base_url = "http://192.168.1.100:1234/v1"
"#;
        let config: TutorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.general.default_model.as_deref(),
            Some("openai/gpt-4o-mini")
        );
        assert_eq!(config.general.feedback_delay_ms, Some(1500));
        assert_eq!(config.server.bind_address.as_deref(), Some("0.0.0.0:3001"));
        assert_eq!(config.course.unit_id.as_deref(), Some("unit2"));
        assert_eq!(config.openrouter.api_key.as_deref(), Some("sk-test-123"));
        assert_eq!(
            config.lmstudio.base_url.as_deref(),
            Some("http://192.168.1.100:1234/v1")
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[general]
default_model = "my-model"
"#;
        let config: TutorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_model.as_deref(), Some("my-model"));
        assert!(config.general.default_provider.is_none());
        assert!(config.course.course_id.is_none());
    }

    #[test]
    fn test_generated_default_is_all_comments() {
        let config: TutorConfig = toml::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert!(config.general.default_model.is_none());
        assert!(config.openrouter.api_key.is_none());
    }

    #[test]
    fn test_load_config_from_generates_then_reads() {
        let dir = std::env::temp_dir().join(format!("tutor-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let first = load_config_from(&path).unwrap();
        assert!(first.general.default_provider.is_none());
        assert!(path.exists());

        fs::write(&path, "[course]\nunit_id = \"unit2\"\n").unwrap();
        let second = load_config_from(&path).unwrap();
        assert_eq!(second.course.unit_id.as_deref(), Some("unit2"));

        fs::write(&path, "[course\n").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
