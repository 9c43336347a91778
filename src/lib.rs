//! # Ojeomme - restaurant review backend
//!
//! Users sign in through a social provider, search restaurants through the
//! Kakao keyword API, write reviews with star scores and images, and browse
//! per-store statistics such as today's ranking.
//!
//! Ojeomme provides:
//! - A place search aggregator merging external places with local stores
//! - A daily store ranking over review and like activity
//! - A region-scoped "eat together" board with replies
//! - SQLite-backed storage for stores, reviews, categories and users
//! - An axum HTTP API and a small operator CLI

pub mod domain;
pub mod storage;
pub mod maps;
pub mod oauth;
pub mod query;
pub mod service;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use domain::{Category, NewReview, NewStore, PlaceSnapshot, RegionCode, Review, Store, User};
pub use maps::{PlaceSearch, PlaceSearchRequest};
pub use service::OjeommeService;
pub use storage::SqliteStore;

/// Result type alias for Ojeomme operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Ojeomme operations.
///
/// The set is closed: the HTTP layer maps every variant to exactly one
/// entry of the API error catalog.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported OAuth provider: {0}")]
    NotSupportOauthProvider(String),

    #[error("Social login failed: {0}")]
    SocialLogin(String),

    #[error("Access token has not expired yet")]
    OauthTokenBeforeExpired,

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("User token not found")]
    UserTokenNotFound,

    #[error("Login required")]
    Unauthorized,

    #[error("Store not found: {0}")]
    StoreNotFound(i64),

    #[error("Region not found: {0}")]
    RegionNotFound(String),

    #[error("Eat-together post not found: {0}")]
    EatTogetherPostNotFound(i64),

    #[error("Place search failed: {0}")]
    SearchMaps(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
