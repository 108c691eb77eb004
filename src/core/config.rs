//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.acrodef/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::lookup::acromine::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AcrodefConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "acrodef.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    /// Ignored values, reported once the logger is up.
    pub warnings: Vec<String>,
}

/// Values taken from the command line. `None` = flag not given.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub base_url: Option<&'a str>,
    pub log_file: Option<&'a str>,
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

/// Where the loaded config came from.
///
/// Loading runs before the logger exists, so the caller logs this afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    NoHomeDir,
    File(PathBuf),
    Generated(PathBuf),
    GenerateFailed(PathBuf, String),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::NoHomeDir => write!(f, "no home directory, using default config"),
            ConfigSource::File(path) => write!(f, "loaded config from {}", path.display()),
            ConfigSource::Generated(path) => {
                write!(f, "no config file found, generated default at {}", path.display())
            }
            ConfigSource::GenerateFailed(path, e) => {
                write!(f, "failed to write default config to {}: {e}", path.display())
            }
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.acrodef/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".acrodef").join("config.toml"))
}

/// Load config from `~/.acrodef/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AcrodefConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<(AcrodefConfig, ConfigSource), ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok((AcrodefConfig::default(), ConfigSource::NoHomeDir)),
    }
}

pub fn load_config_from(path: &Path) -> Result<(AcrodefConfig, ConfigSource), ConfigError> {
    if !path.exists() {
        let source = match generate_default_config(path) {
            Ok(()) => ConfigSource::Generated(path.to_path_buf()),
            Err(e) => ConfigSource::GenerateFailed(path.to_path_buf(), e.to_string()),
        };
        return Ok((AcrodefConfig::default(), source));
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AcrodefConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    Ok((config, ConfigSource::File(path.to_path_buf())))
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# acrodef configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [service]
# base_url = "http://www.nactem.ac.uk/software/acromine"   # Or ACRODEF_BASE_URL
# timeout_secs = 15                                         # Or ACRODEF_TIMEOUT_SECS

# [logging]
# file = "acrodef.log"                                      # Or ACRODEF_LOG_FILE
# level = "debug"                                           # off, error, warn, info, debug, trace
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG_CONTENT)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AcrodefConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    let mut warnings = Vec::new();

    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("ACRODEF_BASE_URL").ok())
        .or_else(|| config.service.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Timeout: env → config → default
    let timeout = resolve_timeout(
        std::env::var("ACRODEF_TIMEOUT_SECS").ok().as_deref(),
        config.service.timeout_secs,
        &mut warnings,
    );

    // Log file: CLI → env → config → default
    let log_file = cli
        .log_file
        .map(|s| s.to_string())
        .or_else(|| std::env::var("ACRODEF_LOG_FILE").ok())
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        base_url,
        timeout,
        log_file: PathBuf::from(log_file),
        log_level: resolve_log_level(config.logging.level.as_deref(), &mut warnings),
        warnings,
    }
}

/// A zero timeout would fail every request, so it is ignored like a bad value.
fn resolve_timeout(env: Option<&str>, file: Option<u64>, warnings: &mut Vec<String>) -> Duration {
    let from_env = env.and_then(|raw| match raw.parse::<u64>() {
        Ok(0) => {
            warnings.push("Ignoring ACRODEF_TIMEOUT_SECS=0".to_string());
            None
        }
        Ok(secs) => Some(secs),
        Err(e) => {
            warnings.push(format!("Ignoring ACRODEF_TIMEOUT_SECS={raw:?}: {e}"));
            None
        }
    });
    let from_file = file.filter(|&secs| {
        if secs == 0 {
            warnings.push("Ignoring timeout_secs = 0 in config".to_string());
        }
        secs > 0
    });

    from_env
        .or(from_file)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT)
}

fn resolve_log_level(level: Option<&str>, warnings: &mut Vec<String>) -> LevelFilter {
    match level {
        None => DEFAULT_LOG_LEVEL,
        Some(raw) => LevelFilter::from_str(raw).unwrap_or_else(|_| {
            warnings.push(format!("Unknown log level {raw:?}, using {DEFAULT_LOG_LEVEL}"));
            DEFAULT_LOG_LEVEL
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = AcrodefConfig::default();
        assert!(config.service.base_url.is_none());
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_resolve_cli_base_url_wins() {
        let config = AcrodefConfig {
            service: ServiceConfig {
                base_url: Some("http://from-config".to_string()),
                timeout_secs: None,
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            base_url: Some("http://from-cli"),
            log_file: Some("cli.log"),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.base_url, "http://from-cli");
        assert_eq!(resolved.log_file, PathBuf::from("cli.log"));
    }

    #[test]
    fn test_log_level_parsing() {
        let mut warnings = Vec::new();
        assert_eq!(resolve_log_level(None, &mut warnings), LevelFilter::Debug);
        assert_eq!(resolve_log_level(Some("warn"), &mut warnings), LevelFilter::Warn);
        assert_eq!(resolve_log_level(Some("TRACE"), &mut warnings), LevelFilter::Trace);
        assert!(warnings.is_empty());

        assert_eq!(resolve_log_level(Some("loud"), &mut warnings), DEFAULT_LOG_LEVEL);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_timeout_env_beats_file() {
        let mut warnings = Vec::new();
        assert_eq!(resolve_timeout(Some("7"), Some(3), &mut warnings), Duration::from_secs(7));
        assert_eq!(resolve_timeout(None, Some(3), &mut warnings), Duration::from_secs(3));
        assert_eq!(resolve_timeout(None, None, &mut warnings), DEFAULT_TIMEOUT);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let mut warnings = Vec::new();
        assert_eq!(resolve_timeout(None, Some(0), &mut warnings), DEFAULT_TIMEOUT);
        assert_eq!(resolve_timeout(Some("0"), Some(4), &mut warnings), Duration::from_secs(4));
        assert_eq!(resolve_timeout(Some("0"), Some(0), &mut warnings), DEFAULT_TIMEOUT);
        assert_eq!(warnings.len(), 4);
    }

    #[test]
    fn test_unparsable_env_timeout_is_reported() {
        let mut warnings = Vec::new();
        assert_eq!(resolve_timeout(Some("soon"), None, &mut warnings), DEFAULT_TIMEOUT);
        assert!(warnings[0].contains("ACRODEF_TIMEOUT_SECS"));
    }

    #[test]
    fn test_toml_parses_all_sections() {
        let toml_str = r#"
[service]
base_url = "http://localhost:9000/acromine"
timeout_secs = 3

[logging]
file = "/tmp/acrodef.log"
level = "info"
"#;
        let config: AcrodefConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.service.base_url.as_deref(),
            Some("http://localhost:9000/acromine")
        );
        assert_eq!(config.service.timeout_secs, Some(3));
        assert_eq!(config.logging.level.as_deref(), Some("info"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[service]
timeout_secs = 30
"#;
        let config: AcrodefConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.service.timeout_secs, Some(30));
        assert!(config.service.base_url.is_none());
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let config: AcrodefConfig = toml::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert!(config.service.base_url.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_load_config_from_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("acrodef-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let (config, source) = load_config_from(&path).unwrap();
        assert!(config.service.base_url.is_none());
        assert_eq!(source, ConfigSource::Generated(path.clone()));
        assert!(path.exists());

        // Second load parses the generated file.
        let (_, source) = load_config_from(&path).unwrap();
        assert_eq!(source, ConfigSource::File(path.clone()));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_from_malformed_file_fails() {
        let dir = std::env::temp_dir().join(format!("acrodef-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[service\nbase_url = ").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_dir_all(&dir);
    }
}
