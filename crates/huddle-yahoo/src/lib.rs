// Yahoo Fantasy Sports API access: OAuth2 tokens, a paced and cached HTTP
// client, fantasy/v2 payload parsers and the `LeagueSource` seam.

pub mod auth;
pub mod cache;
pub mod client;
pub mod error;
pub mod schema;
pub mod source;

pub use auth::{OAuthApp, OAuthToken, TokenOrigin, TokenStore};
pub use client::{ClientSettings, YahooClient};
pub use error::ApiError;
pub use source::{LeagueSource, YahooLeague};
