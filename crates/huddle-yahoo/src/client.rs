// Authenticated, paced, cached HTTP client for the Yahoo Fantasy API.
//
// Requests are sequential by construction: every call awaits the pacing
// lock, so two requests are never in flight at once and consecutive calls
// are at least `request_delay` apart.

use std::sync::Arc;
use std::time::Duration;

use huddle_core::{GameInfo, LeagueSummary};
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::auth::{epoch_now, OAuthApp, TokenStore, REFRESH_LEEWAY_SECS};
use crate::cache::{CacheKey, ResponseCache};
use crate::error::ApiError;
use crate::schema::v2::discovery;

pub const DEFAULT_BASE_URL: &str = "https://fantasysports.yahooapis.com/fantasy/v2";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    /// Minimum gap between consecutive requests.
    pub request_delay: Duration,
    /// Lifetime of cached responses. Zero disables the cache.
    pub cache_ttl: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_delay: Duration::from_millis(250),
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

pub struct YahooClient {
    http: reqwest::Client,
    settings: ClientSettings,
    app: Option<OAuthApp>,
    tokens: Mutex<TokenStore>,
    cache: Mutex<ResponseCache>,
    /// Held across the whole request, which keeps calls sequential.
    last_request: Mutex<Option<Instant>>,
}

impl YahooClient {
    pub fn new(settings: ClientSettings, app: Option<OAuthApp>, tokens: TokenStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
            app,
            tokens: Mutex::new(tokens),
            cache: Mutex::new(ResponseCache::new()),
            last_request: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Current access token, refreshed first if it is about to expire.
    async fn bearer(&self) -> Result<String, ApiError> {
        let mut store = self.tokens.lock().await;
        let token = store.token()?;
        if !token.is_expired(epoch_now(), REFRESH_LEEWAY_SECS) {
            return Ok(token.access_token.clone());
        }

        let app = self.app.as_ref().ok_or_else(|| {
            ApiError::RefreshFailed("access token expired and no client credentials are configured".into())
        })?;
        debug!("access token expired, refreshing");
        let fresh = app.refresh(&self.http, token).await?;
        let access = fresh.access_token.clone();
        store.set(fresh);
        if let Err(e) = store.save() {
            // The in-memory token is still good for this session.
            warn!("could not persist refreshed token: {e}");
        }
        Ok(access)
    }

    /// GET `{base}/{path}?format=json`, served from the cache when fresh.
    pub async fn get_json(&self, key: CacheKey, path: &str) -> Result<Arc<Value>, ApiError> {
        if let Some(hit) = self.cache.lock().await.get(&key, Instant::now()) {
            return Ok(hit);
        }

        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            tokio::time::sleep_until(prev + self.settings.request_delay).await;
        }
        let result = self.request(path).await;
        *last = Some(Instant::now());
        drop(last);

        let value = Arc::new(result?);
        self.cache.lock().await.insert(
            key,
            Arc::clone(&value),
            self.settings.cache_ttl,
            Instant::now(),
        );
        Ok(value)
    }

    async fn request(&self, path: &str) -> Result<Value, ApiError> {
        let url = format!(
            "{}/{}?format=json",
            self.settings.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let bearer = self.bearer().await?;
        debug!(%url, "GET");

        let resp = self
            .http
            .get(&url)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                endpoint: path.to_string(),
                source: e,
            })?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| ApiError::Transport {
            endpoint: path.to_string(),
            source: e,
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), endpoint = path, "Yahoo API error");
            return Err(ApiError::Http {
                status: status.as_u16(),
                endpoint: path.to_string(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Drop every cached response.
    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    #[cfg(test)]
    pub(crate) async fn cached_responses(&self) -> usize {
        self.cache.lock().await.len()
    }

    // -----------------------------------------------------------------------
    // Discovery
    // -----------------------------------------------------------------------

    /// Current game for a game code ("nfl").
    pub async fn game(&self, code: &str) -> Result<GameInfo, ApiError> {
        let value = self
            .get_json(CacheKey::new("game", [("code", code)]), &format!("game/{code}"))
            .await?;
        discovery::parse_game(&value)
    }

    /// Leagues the logged-in user belongs to in the given game.
    pub async fn user_leagues(&self, game_key: &str) -> Result<Vec<LeagueSummary>, ApiError> {
        let value = self
            .get_json(
                CacheKey::new("user_leagues", [("game", game_key)]),
                &format!("users;use_login=1/games;game_keys={game_key}/leagues"),
            )
            .await?;
        discovery::parse_user_leagues(&value)
    }
}
