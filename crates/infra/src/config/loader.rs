//! Configuration loader
//!
//! Loads provider configuration from environment variables or files and
//! resolves it against defaults.
//!
//! ## Loading Strategy
//! 1. Applies an optional `.env` file from the working directory
//! 2. Reads a config file if one exists in the standard locations
//! 3. Fills fields the file leaves unset from environment variables (the
//!    host is left for `resolve`)
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `KINETICPANEL_HOST`: Panel host (default `https://kineticpanel.net`)
//! - `KINETICPANEL_API_KEY`: API key (required)
//! - `KINETICPANEL_USE_APPLICATION`: Use the application API (true/false)
//! - `KINETICPANEL_DEBUG`: Log full request/response diagnostics (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./kineticpanel.toml` or `./kineticpanel.json` (current working directory)
//! 2. `../kineticpanel.toml` or `../kineticpanel.json` (parent directory)
//! 3. Relative to executable location

use std::path::{Path, PathBuf};

use kineticpanel_domain::constants::{
    DEFAULT_HOST, ENV_API_KEY, ENV_DEBUG, ENV_HOST, ENV_USE_APPLICATION,
};
use kineticpanel_domain::{ApiNamespace, PanelError, ProviderConfig, ResolvedConfig, Result};

/// Load configuration with automatic fallback strategy
///
/// A config file, when present, takes precedence; any field it leaves unset
/// is taken from the environment. The host is the exception: only a host
/// from the file is carried, so [`resolve`] treats an environment host as
/// a trusted fallback rather than an explicit setting. The result is not
/// yet resolved.
///
/// # Errors
/// Returns `PanelError::Config` if a config file exists but cannot be read
/// or parsed.
pub fn load() -> Result<ProviderConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to load .env file"),
    }

    // Host from the environment is left for `resolve` to pick up.
    let from_env = ProviderConfig { host: None, ..load_from_env()? };

    match probe_config_paths() {
        Some(path) => {
            let from_file = load_from_file(Some(path))?;
            Ok(merge(from_file, from_env))
        }
        None => {
            tracing::debug!("No config file found, using environment variables only");
            Ok(from_env)
        }
    }
}

/// Load configuration from environment variables
///
/// Unset variables leave the corresponding field unset.
///
/// # Errors
/// Returns `PanelError::Config` if a variable is set but not valid unicode.
pub fn load_from_env() -> Result<ProviderConfig> {
    Ok(ProviderConfig {
        host: env_var(ENV_HOST)?,
        api_key: env_var(ENV_API_KEY)?,
        use_application: env_var(ENV_USE_APPLICATION)?.map(|value| parse_bool(&value)),
        debug: env_var(ENV_DEBUG)?.map(|value| parse_bool(&value)),
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PanelError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ProviderConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PanelError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PanelError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PanelError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Resolve raw configuration against environment fallbacks and defaults
///
/// - host: explicit, then `KINETICPANEL_HOST`, then the default host. An
///   explicit host other than the default produces a warning.
/// - api_key: explicit, then `KINETICPANEL_API_KEY`; required.
/// - use_application: explicit, then env, then `true`.
/// - debug: explicit, then env, then `false`.
///
/// # Errors
/// Returns `PanelError::Config` if no API key is available.
pub fn resolve(config: ProviderConfig) -> Result<ResolvedConfig> {
    let env = load_from_env()?;
    let mut warnings = Vec::new();

    let explicit_host = non_empty(config.host);
    if let Some(host) = &explicit_host {
        if !is_default_host(host) {
            let warning = format!(
                "Non-standard host: {host} is not {DEFAULT_HOST}; make sure it is a \
                 Kinetic Panel compatible endpoint"
            );
            tracing::warn!(host = %host, "Non-standard host configured");
            warnings.push(warning);
        }
    }
    let host = explicit_host
        .or_else(|| non_empty(env.host))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    let api_key = non_empty(config.api_key)
        .or_else(|| non_empty(env.api_key))
        .ok_or_else(|| PanelError::Config("api_key is required".to_string()))?;

    let use_application = config.use_application.or(env.use_application).unwrap_or(true);
    let debug = config.debug.or(env.debug).unwrap_or(false);

    Ok(ResolvedConfig {
        host,
        api_key,
        namespace: ApiNamespace::from_use_application(use_application),
        debug,
        warnings,
    })
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `PanelError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<ProviderConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PanelError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PanelError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(PanelError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("kineticpanel.toml"),
            cwd.join("kineticpanel.json"),
            cwd.join("../kineticpanel.toml"),
            cwd.join("../kineticpanel.json"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("kineticpanel.toml"),
                exe_dir.join("kineticpanel.json"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

/// Fields set in `primary` win over `fallback`
fn merge(primary: ProviderConfig, fallback: ProviderConfig) -> ProviderConfig {
    ProviderConfig {
        host: primary.host.or(fallback.host),
        api_key: primary.api_key.or(fallback.api_key),
        use_application: primary.use_application.or(fallback.use_application),
        debug: primary.debug.or(fallback.debug),
    }
}

fn is_default_host(host: &str) -> bool {
    host.trim_end_matches('/').eq_ignore_ascii_case(DEFAULT_HOST)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Get optional environment variable
///
/// # Errors
/// Returns `PanelError::Config` if the variable is set but not unicode.
fn env_var(key: &str) -> Result<Option<String>> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => {
            Err(PanelError::Config(format!("Environment variable {} is not valid unicode", key)))
        }
    }
}

/// Parse boolean from a string
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Parse boolean from environment variable
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
#[cfg(test)]
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key).ok().map(|s| parse_bool(&s)).unwrap_or(default)
}
