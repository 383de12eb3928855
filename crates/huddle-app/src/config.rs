// Configuration loading and parsing (huddle.toml, credentials.toml, env).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use huddle_core::SlotRequirements;
use huddle_yahoo::{ClientSettings, OAuthApp};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

pub const ENV_CLIENT_ID: &str = "YAHOO_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "YAHOO_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "YAHOO_REDIRECT_URI";
pub const ENV_LEAGUE_ID: &str = "YAHOO_LEAGUE_ID";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

impl ConfigError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub lineup: SlotRequirements,
    pub fetch: FetchConfig,
    /// Token file, resolved against the base directory.
    pub token_path: PathBuf,
    pub credentials: CredentialsConfig,
}

// ---------------------------------------------------------------------------
// huddle.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the whole huddle.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    league: LeagueConfig,
    lineup: HashMap<String, usize>,
    #[serde(default)]
    fetch: FetchConfig,
    #[serde(default)]
    auth: AuthSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    /// "<game_key>.l.<league_id>"; may be empty until a league is chosen.
    #[serde(default)]
    pub league_key: String,
    #[serde(default = "default_game_code")]
    pub game_code: String,
}

fn default_game_code() -> String {
    "nfl".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    pub api_base_url: String,
    pub request_delay_ms: u64,
    pub cache_ttl_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let defaults = ClientSettings::default();
        FetchConfig {
            api_base_url: defaults.base_url,
            request_delay_ms: defaults.request_delay.as_millis() as u64,
            cache_ttl_secs: defaults.cache_ttl.as_secs(),
        }
    }
}

impl FetchConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_base_url.clone(),
            request_delay: Duration::from_millis(self.request_delay_ms),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AuthSection {
    token_path: String,
}

impl Default for AuthSection {
    fn default() -> Self {
        AuthSection {
            token_path: "yahoo_token.json".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

impl CredentialsConfig {
    /// The registered Yahoo app, when both id and secret are known.
    pub fn oauth_app(&self) -> Option<OAuthApp> {
        let id = self.client_id.as_deref().filter(|s| !s.trim().is_empty())?;
        let secret = self.client_secret.as_deref().filter(|s| !s.trim().is_empty())?;
        Some(OAuthApp::new(
            id.to_string(),
            secret.to_string(),
            self.redirect_uri.clone(),
        ))
    }
}

impl Config {
    /// League key for commands that need one.
    pub fn require_league_key(&self) -> Result<&str, ConfigError> {
        if self.league.league_key.trim().is_empty() {
            return Err(ConfigError::invalid(
                "league.league_key",
                format!(
                    "no league configured; set it in config/huddle.toml or {ENV_LEAGUE_ID} \
                     (run `huddle leagues` to list yours)"
                ),
            ));
        }
        Ok(&self.league.league_key)
    }

    /// Credentials for commands that cannot run without them.
    pub fn require_oauth_app(&self) -> Result<OAuthApp, ConfigError> {
        self.credentials.oauth_app().ok_or_else(|| {
            ConfigError::invalid(
                "credentials.client_id",
                format!(
                    "Yahoo app credentials missing; set {ENV_CLIENT_ID} and {ENV_CLIENT_SECRET} \
                     or fill in config/credentials.toml"
                ),
            )
        })
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/huddle.toml` and
/// (optionally) `config/credentials.toml` under `base_dir`, then apply
/// environment overrides looked up through `env`.
///
/// This is the lower-level primitive: it does not copy defaults or read
/// `.env`. Prefer `load_config()`.
pub fn load_config_from(
    base_dir: &Path,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- huddle.toml (required) ---
    let main_path = config_dir.join("huddle.toml");
    let text = read_file(&main_path)?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: main_path.clone(),
        source: e,
    })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let mut credentials: CredentialsConfig = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    // --- environment overrides ---
    let mut league = file.league;
    let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());
    if let Some(v) = non_empty(ENV_LEAGUE_ID) {
        league.league_key = v;
    }
    if let Some(v) = non_empty(ENV_CLIENT_ID) {
        credentials.client_id = Some(v);
    }
    if let Some(v) = non_empty(ENV_CLIENT_SECRET) {
        credentials.client_secret = Some(v);
    }
    if let Some(v) = non_empty(ENV_REDIRECT_URI) {
        credentials.redirect_uri = Some(v);
    }

    let lineup = SlotRequirements::from_config(&file.lineup)
        .map_err(|e| ConfigError::invalid("lineup", e.to_string()))?;

    let token_path = PathBuf::from(&file.auth.token_path);
    let token_path = if token_path.is_relative() {
        base_dir.join(token_path)
    } else {
        token_path
    };

    let config = Config {
        league,
        lineup,
        fetch: file.fetch,
        token_path,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                info!("copied default config to {}", target.display());
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Load relative to the current directory: reads `.env`, copies defaults,
/// then loads with the process environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();
    ensure_config_files(&cwd)?;
    load_config_from(&cwd, &|key| std::env::var(key).ok())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let key = config.league.league_key.trim();
    if !key.is_empty() && !key.contains(".l.") {
        return Err(ConfigError::invalid(
            "league.league_key",
            format!("expected \"<game_key>.l.<league_id>\", got \"{key}\""),
        ));
    }

    if config.league.game_code.trim().is_empty() {
        return Err(ConfigError::invalid("league.game_code", "must not be empty"));
    }

    let url = &config.fetch.api_base_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::invalid(
            "fetch.api_base_url",
            format!("must be an http(s) URL, got \"{url}\""),
        ));
    }

    if config.token_path.as_os_str().is_empty() {
        return Err(ConfigError::invalid("auth.token_path", "must not be empty"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
