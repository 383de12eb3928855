// Yahoo OAuth2: token persistence, the authorization-code grant used by
// `huddle auth`, and the refresh-token grant used transparently by the client.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::ApiError;

pub const AUTH_URL: &str = "https://api.login.yahoo.com/oauth2/request_auth";
pub const TOKEN_URL: &str = "https://api.login.yahoo.com/oauth2/get_token";

/// Environment variable holding a token as JSON (hosted secret store).
pub const TOKEN_ENV_VAR: &str = "HUDDLE_YAHOO_TOKEN_JSON";

/// Refresh this many seconds before the access token actually expires.
pub const REFRESH_LEEWAY_SECS: f64 = 60.0;

/// Out-of-band redirect used when no redirect URI is configured.
pub const OOB_REDIRECT: &str = "oob";

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<f64>,
    /// Absolute expiry, epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xoauth_yahoo_guid: Option<String>,
    /// Anything else Yahoo (or another OAuth library) wrote into the file.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl OAuthToken {
    pub fn from_json(text: &str) -> Result<Self, ApiError> {
        let token: OAuthToken =
            serde_json::from_str(text).map_err(|e| ApiError::InvalidToken(e.to_string()))?;
        if token.access_token.trim().is_empty() {
            return Err(ApiError::InvalidToken("access_token is empty".into()));
        }
        Ok(token)
    }

    /// True when the token expires within `leeway` seconds of `now`.
    /// A token with no known expiry is treated as valid.
    pub fn is_expired(&self, now: f64, leeway: f64) -> bool {
        match self.expires_at {
            Some(at) => now + leeway >= at,
            None => false,
        }
    }

    /// Fill in `expires_at` from `expires_in` for a freshly issued token.
    pub fn stamp(&mut self, now: f64) {
        if let Some(secs) = self.expires_in {
            self.expires_at = Some(now + secs);
        }
    }
}

/// Current wall-clock time as epoch seconds.
pub fn epoch_now() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenOrigin {
    Environment,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct TokenStore {
    token: Option<OAuthToken>,
    origin: TokenOrigin,
}

impl TokenStore {
    /// An empty store that persists to `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        TokenStore {
            token: None,
            origin: TokenOrigin::File(path.into()),
        }
    }

    /// Load from the environment, falling back to the token file.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        Self::load_from(std::env::var(TOKEN_ENV_VAR).ok(), path)
    }

    /// The environment value wins over the file when both are present.
    pub fn load_from(env_value: Option<String>, path: &Path) -> Result<Self, ApiError> {
        if let Some(json) = env_value.filter(|v| !v.trim().is_empty()) {
            debug!("using OAuth token from {TOKEN_ENV_VAR}");
            return Ok(TokenStore {
                token: Some(OAuthToken::from_json(&json)?),
                origin: TokenOrigin::Environment,
            });
        }

        let mut store = Self::file(path);
        match std::fs::read_to_string(path) {
            Ok(text) => {
                debug!(path = %path.display(), "using OAuth token file");
                store.token = Some(OAuthToken::from_json(&text)?);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ApiError::TokenFile {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        }
        Ok(store)
    }

    pub fn token(&self) -> Result<&OAuthToken, ApiError> {
        self.token.as_ref().ok_or(ApiError::MissingToken)
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn origin(&self) -> &TokenOrigin {
        &self.origin
    }

    pub fn set(&mut self, token: OAuthToken) {
        self.token = Some(token);
    }

    /// Write the token back to its file. Environment tokens stay in memory.
    /// Returns whether anything was written.
    pub fn save(&self) -> Result<bool, ApiError> {
        let (TokenOrigin::File(path), Some(token)) = (&self.origin, &self.token) else {
            return Ok(false);
        };
        let json = serde_json::to_string_pretty(token)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ApiError::TokenFile {
                path: path.clone(),
                source: e,
            })?;
        }
        std::fs::write(path, json).map_err(|e| ApiError::TokenFile {
            path: path.clone(),
            source: e,
        })?;
        info!(path = %path.display(), "saved OAuth token");
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// OAuth application
// ---------------------------------------------------------------------------

/// Registered Yahoo application credentials.
#[derive(Debug, Clone)]
pub struct OAuthApp {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    token_url: String,
}

impl OAuthApp {
    pub fn new(client_id: String, client_secret: String, redirect_uri: Option<String>) -> Self {
        OAuthApp {
            client_id,
            client_secret,
            redirect_uri: redirect_uri
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| OOB_REDIRECT.to_string()),
            token_url: TOKEN_URL.to_string(),
        }
    }

    /// Point the token grants somewhere other than Yahoo's login server.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// URL the user opens in a browser to grant access.
    pub fn authorization_url(&self) -> Result<String, ApiError> {
        let url = reqwest::Url::parse_with_params(
            AUTH_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("language", "en-us"),
            ],
        )
        .map_err(|e| ApiError::InvalidToken(format!("bad authorization URL: {e}")))?;
        Ok(url.into())
    }

    /// Exchange an authorization code for a token.
    pub async fn exchange_code(
        &self,
        http: &reqwest::Client,
        code: &str,
    ) -> Result<OAuthToken, ApiError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        self.token_request(http, &form)
            .await
            .map_err(|e| ApiError::InvalidToken(format!("code exchange failed: {e}")))
    }

    /// Refresh-token grant. Yahoo may omit the refresh token in the response,
    /// in which case the old one is kept.
    pub async fn refresh(
        &self,
        http: &reqwest::Client,
        token: &OAuthToken,
    ) -> Result<OAuthToken, ApiError> {
        let refresh_token = token
            .refresh_token
            .as_deref()
            .ok_or_else(|| ApiError::RefreshFailed("token has no refresh_token".into()))?;
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        let mut fresh = self
            .token_request(http, &form)
            .await
            .map_err(|e| ApiError::RefreshFailed(e.to_string()))?;
        if fresh.refresh_token.is_none() {
            fresh.refresh_token = Some(refresh_token.to_string());
        }
        info!("refreshed OAuth access token");
        Ok(fresh)
    }

    async fn token_request(
        &self,
        http: &reqwest::Client,
        form: &[(&str, &str)],
    ) -> Result<OAuthToken, String> {
        let resp = http
            .post(self.token_url.as_str())
            .form(form)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| e.to_string())?;
        if !status.is_success() {
            return Err(format!("HTTP {}: {}", status.as_u16(), body));
        }
        let mut token = OAuthToken::from_json(&body).map_err(|e| e.to_string())?;
        token.stamp(epoch_now());
        Ok(token)
    }
}

/// Pull the authorization code out of whatever the user pasted: the full
/// redirect URL, or the bare code shown by the out-of-band flow.
pub fn extract_code(pasted: &str) -> Option<String> {
    let pasted = pasted.trim();
    if pasted.is_empty() {
        return None;
    }
    match reqwest::Url::parse(pasted) {
        Ok(url) => url
            .query_pairs()
            .find(|(k, _)| k == "code")
            .map(|(_, v)| v.into_owned())
            .filter(|c| !c.is_empty()),
        Err(_) if !pasted.contains(char::is_whitespace) => Some(pasted.to_string()),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN_JSON: &str = r#"{
        "access_token": "abc",
        "refresh_token": "r1",
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": 1700003600.5,
        "xoauth_yahoo_guid": "GUID"
    }"#;

    #[test]
    fn token_parses_and_keeps_expiry() {
        let token = OAuthToken::from_json(TOKEN_JSON).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_at, Some(1700003600.5));
        assert!(!token.is_expired(1700000000.0, REFRESH_LEEWAY_SECS));
        assert!(token.is_expired(1700003550.0, REFRESH_LEEWAY_SECS));
    }

    #[test]
    fn token_without_expiry_is_never_expired() {
        let token = OAuthToken::from_json(r#"{"access_token": "x"}"#).unwrap();
        assert_eq!(token.token_type, "bearer");
        assert!(!token.is_expired(f64::MAX / 2.0, 0.0));
    }

    #[test]
    fn empty_access_token_rejected() {
        let err = OAuthToken::from_json(r#"{"access_token": " "}"#).unwrap_err();
        assert!(err.is_auth());
    }

    #[test]
    fn stamp_sets_expires_at() {
        let mut token = OAuthToken::from_json(r#"{"access_token": "x", "expires_in": 3600}"#).unwrap();
        token.stamp(100.0);
        assert_eq!(token.expires_at, Some(3700.0));
    }

    #[test]
    fn unknown_fields_survive_round_trip() {
        let token = OAuthToken::from_json(r#"{"access_token": "x", "scope": "fspt-r"}"#).unwrap();
        let back = serde_json::to_value(&token).unwrap();
        assert_eq!(back["scope"], "fspt-r");
    }

    #[test]
    fn env_value_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yahoo_token.json");
        std::fs::write(&path, r#"{"access_token": "from-file"}"#).unwrap();

        let store = TokenStore::load_from(Some(TOKEN_JSON.to_string()), &path).unwrap();
        assert_eq!(store.origin(), &TokenOrigin::Environment);
        assert_eq!(store.token().unwrap().access_token, "abc");
        assert!(!store.save().unwrap(), "environment tokens are never written");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{"access_token": "from-file"}"#
        );
    }

    #[test]
    fn file_token_loads_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yahoo_token.json");
        std::fs::write(&path, TOKEN_JSON).unwrap();

        let mut store = TokenStore::load_from(None, &path).unwrap();
        assert_eq!(store.origin(), &TokenOrigin::File(path.clone()));

        let mut next = store.token().unwrap().clone();
        next.access_token = "def".into();
        store.set(next);
        assert!(store.save().unwrap());

        let reloaded = TokenStore::load_from(None, &path).unwrap();
        assert_eq!(reloaded.token().unwrap().access_token, "def");
    }

    #[test]
    fn missing_file_is_missing_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::load_from(None, &dir.path().join("none.json")).unwrap();
        assert!(!store.has_token());
        assert!(matches!(store.token(), Err(ApiError::MissingToken)));
    }

    #[test]
    fn authorization_url_carries_client() {
        let app = OAuthApp::new("cid".into(), "secret".into(), None);
        let url = app.authorization_url().unwrap();
        assert!(url.starts_with(AUTH_URL));
        assert!(url.contains("client_id=cid"));
        assert!(url.contains("redirect_uri=oob"));
        assert!(url.contains("response_type=code"));
        assert!(!url.contains("secret"));
    }

    #[test]
    fn extract_code_variants() {
        assert_eq!(
            extract_code("https://localhost:8080/?code=xyz&state=s").as_deref(),
            Some("xyz")
        );
        assert_eq!(extract_code("  k3b9q  ").as_deref(), Some("k3b9q"));
        assert_eq!(extract_code("https://localhost:8080/?state=s"), None);
        assert_eq!(extract_code(""), None);
        assert_eq!(extract_code("not a code"), None);
    }
}
