use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::config::OjeommeConfig;
use crate::maps::KakaoKeywordClient;
use crate::oauth::KakaoOauthClient;
use crate::service::{OjeommeService, ServiceSettings};
use crate::storage::SqliteStore;

pub mod auth;
pub mod error;
pub mod routes;

pub use error::ApiErrorCode;

/// Server state
pub struct AppState {
    pub service: OjeommeService,
}

impl AppState {
    pub fn new(service: OjeommeService) -> Self {
        Self { service }
    }

    /// Open the database and build the Kakao clients described by `config`
    pub fn from_config(config: &OjeommeConfig, database_path: &Path) -> anyhow::Result<Self> {
        let store = SqliteStore::open(database_path)?;
        let places = KakaoKeywordClient::new(&config.maps)?;
        let social = KakaoOauthClient::new(&config.oauth)?;
        let service = OjeommeService::new(store, Arc::new(places), Arc::new(social), ServiceSettings::from(config));
        Ok(Self::new(service))
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/auth/check", get(routes::auth_check))
        .route("/api/auth/refresh", post(routes::refresh))
        .route("/api/auth/{provider}/login", post(routes::login))
        .route("/api/store/searchPlaceList", get(routes::search_place_list))
        .route("/api/store/{store_id}", get(routes::store_detail))
        .route("/api/store/{store_id}/like", post(routes::like_store))
        .route("/api/store/{store_id}/reviews", get(routes::store_reviews))
        .route("/api/review/{place_id}", post(routes::write_review))
        .route("/api/storeReviewStatistics/todayRanking", get(routes::today_ranking))
        .route("/api/category/{up_category_id}/children", get(routes::child_categories))
        .route(
            "/api/eatTogether/post",
            get(routes::eat_together_posts).post(routes::write_eat_together_post),
        )
        .route("/api/eatTogether/post/{post_id}", get(routes::eat_together_post))
        .route(
            "/api/eatTogether/post/{post_id}/reply",
            get(routes::eat_together_replies).post(routes::write_eat_together_reply),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API on an already bound listener
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> anyhow::Result<()> {
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

pub async fn start_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    serve(listener, Arc::new(state)).await
}
