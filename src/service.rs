//! Application service
//!
//! Owns the shared SQLite store and the external clients, and exposes one
//! async method per API operation. The acting user and the current time are
//! always passed in by the caller; nothing here reads request context.

use std::sync::Arc;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use crate::config::OjeommeConfig;
use crate::domain::{
    Category, EatTogetherPost, NewEatTogetherPost, NewEatTogetherReply, NewReview, OauthProvider, PlaceSnapshot,
    Review, TokenPair, User, region_prefix,
};
use crate::maps::{PlaceSearch, PlaceSearchRequest};
use crate::oauth::SocialLogin;
use crate::query::{
    EatTogetherPostListResponse, EatTogetherQuery, EatTogetherReplyListResponse, RankingQuery, ReviewListResponse,
    SearchPlaceListResponse, StoreDetailResponse, StoreQuery, TodayStoreRanking, merge_places, place_ids,
};
use crate::storage::SqliteStore;
use crate::{Error, Result};

/// Tunables taken from the configuration file
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub ranking_size: usize,
    pub preview_image_limit: usize,
    pub review_page_size: usize,
    pub max_review_images: usize,
    pub eat_together_page_size: usize,
    pub access_token_ttl_secs: i64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from(&OjeommeConfig::default())
    }
}

impl From<&OjeommeConfig> for ServiceSettings {
    fn from(config: &OjeommeConfig) -> Self {
        Self {
            ranking_size: config.ranking.size,
            preview_image_limit: config.store.preview_image_limit,
            review_page_size: config.review.page_size,
            max_review_images: config.review.max_images,
            eat_together_page_size: config.eat_together.page_size,
            access_token_ttl_secs: config.oauth.access_token_ttl_secs,
        }
    }
}

/// Body of `POST /api/review/{placeId}`: the place as seen in search plus the review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteReviewRequest {
    #[serde(flatten)]
    pub place: PlaceSnapshot,
    #[serde(flatten)]
    pub review: NewReview,
}

pub struct OjeommeService {
    store: Arc<Mutex<SqliteStore>>,
    places: Arc<dyn PlaceSearch>,
    social: Arc<dyn SocialLogin>,
    settings: ServiceSettings,
}

impl OjeommeService {
    pub fn new(
        store: SqliteStore,
        places: Arc<dyn PlaceSearch>,
        social: Arc<dyn SocialLogin>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            places,
            social,
            settings,
        }
    }

    /// Shared handle to the underlying store
    pub fn store(&self) -> Arc<Mutex<SqliteStore>> {
        self.store.clone()
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    // ========== Search ==========

    /// Provider keyword search merged with local store counters.
    ///
    /// The store lock is taken only after the provider call has returned.
    pub async fn search_place_list(&self, request: &PlaceSearchRequest) -> Result<SearchPlaceListResponse> {
        request.validate()?;

        let page = self.places.search_keyword(request).await.map_err(|e| {
            tracing::warn!("Place search for {:?} failed: {}", request.query, e);
            e
        })?;

        let ids = place_ids(&page);
        let summaries = {
            let store = self.store.lock().await;
            store.find_store_summaries(&ids)?
        };

        tracing::debug!(
            "Search {:?} page {}: {} places, {} known locally",
            request.query,
            request.page,
            ids.len(),
            summaries.len()
        );
        Ok(merge_places(page, &summaries))
    }

    // ========== Stores ==========

    pub async fn store_detail(&self, store_id: i64) -> Result<StoreDetailResponse> {
        let store = self.store.lock().await;
        StoreQuery::new(&store).detail(store_id, self.settings.preview_image_limit)
    }

    pub async fn store_reviews(&self, store_id: i64, more_id: Option<i64>) -> Result<ReviewListResponse> {
        let store = self.store.lock().await;
        StoreQuery::new(&store).reviews(store_id, more_id, self.settings.review_page_size)
    }

    /// Like a store as `user`; returns the store's like count
    pub async fn like_store(&self, user: &User, store_id: i64, now: i64) -> Result<i64> {
        let store = self.store.lock().await;
        store.like_store(store_id, user.id, now)
    }

    // ========== Reviews ==========

    /// Write a review for a provider place, creating the local store if needed
    pub async fn write_review(
        &self,
        user: &User,
        place_id: i64,
        request: &WriteReviewRequest,
        now: i64,
    ) -> Result<Review> {
        if place_id <= 0 {
            return Err(Error::InvalidRequest(format!("invalid place id {}", place_id)));
        }
        request.review.validate(self.settings.max_review_images)?;

        let store = self.store.lock().await;
        if store.find_store_by_place_id(place_id)?.is_none() {
            request.place.validate()?;
        }

        let review = store.write_review(user.id, place_id, &request.place, &request.review, now)?;
        tracing::info!("User {} reviewed store {} (review {})", user.id, review.store_id, review.id);
        Ok(review)
    }

    // ========== Statistics ==========

    pub async fn today_ranking(&self, now: DateTime<Local>, region_code: Option<&str>) -> Result<TodayStoreRanking> {
        let region_code = region_prefix(region_code)?;
        let store = self.store.lock().await;
        RankingQuery::new(&store, self.settings.ranking_size).today(now, region_code)
    }

    // ========== Categories ==========

    pub async fn child_categories(&self, up_category_id: i64, depth: u32) -> Result<Vec<Category>> {
        let store = self.store.lock().await;
        store.child_categories(up_category_id, depth)
    }

    // ========== Eat Together ==========

    /// Write a post in an existing region; returns the new post id
    pub async fn write_eat_together_post(&self, user: &User, post: &NewEatTogetherPost, now: i64) -> Result<i64> {
        post.validate()?;
        let store = self.store.lock().await;
        let post_id = store.insert_eat_together_post(user.id, post, now)?;
        tracing::info!("User {} opened eat-together post {} in {}", user.id, post_id, post.region_code);
        Ok(post_id)
    }

    pub async fn eat_together_posts(&self, region_code: Option<&str>, more_id: Option<i64>) -> Result<EatTogetherPostListResponse> {
        let region_code = region_prefix(region_code)?;
        let store = self.store.lock().await;
        EatTogetherQuery::new(&store).posts(region_code, more_id, self.settings.eat_together_page_size)
    }

    pub async fn eat_together_post(&self, post_id: i64) -> Result<EatTogetherPost> {
        let store = self.store.lock().await;
        EatTogetherQuery::new(&store).post(post_id)
    }

    /// Reply to a post; returns the new reply id
    pub async fn write_eat_together_reply(
        &self,
        user: &User,
        post_id: i64,
        reply: &NewEatTogetherReply,
        now: i64,
    ) -> Result<i64> {
        reply.validate()?;
        let store = self.store.lock().await;
        let reply_id = store.insert_eat_together_reply(post_id, user.id, reply, now)?;
        tracing::debug!("User {} replied to eat-together post {}", user.id, post_id);
        Ok(reply_id)
    }

    pub async fn eat_together_replies(&self, post_id: i64) -> Result<EatTogetherReplyListResponse> {
        let store = self.store.lock().await;
        EatTogetherQuery::new(&store).replies(post_id)
    }

    // ========== Sessions ==========

    /// Exchange a provider access token for an Ojeomme session
    pub async fn login(&self, provider: &str, provider_token: &str, now: i64) -> Result<TokenPair> {
        let provider: OauthProvider = provider.parse()?;
        if provider_token.trim().is_empty() {
            return Err(Error::InvalidRequest("provider access token is empty".to_string()));
        }

        let profile = self.social.fetch_profile(provider, provider_token).await.map_err(|e| {
            tracing::warn!("Social login via {} failed: {}", provider, e);
            e
        })?;

        let store = self.store.lock().await;
        let user = store.upsert_user(profile.provider, &profile.oauth_id, &profile.nickname, profile.profile.as_deref())?;
        let pair = TokenPair::generate(now, self.settings.access_token_ttl_secs);
        store.start_session(&pair.clone().into_user_token(user.id), now)?;

        tracing::info!("User {} signed in via {}", user.id, provider);
        Ok(pair)
    }

    /// Issue a session for an existing user without going through a provider
    pub async fn issue_session(&self, user_id: i64, now: i64) -> Result<TokenPair> {
        let store = self.store.lock().await;
        if store.get_user(user_id)?.is_none() {
            return Err(Error::UserNotFound(user_id));
        }
        let pair = TokenPair::generate(now, self.settings.access_token_ttl_secs);
        store.start_session(&pair.clone().into_user_token(user_id), now)?;
        Ok(pair)
    }

    /// Rotate an expired session. Refreshing a still-valid session is rejected.
    pub async fn refresh(&self, access_token: &str, refresh_token: &str, now: i64) -> Result<TokenPair> {
        let store = self.store.lock().await;
        let current = store
            .find_token(access_token)?
            .filter(|token| token.refresh_token == refresh_token)
            .ok_or(Error::UserTokenNotFound)?;

        if !current.is_expired(now) {
            return Err(Error::OauthTokenBeforeExpired);
        }

        let pair = TokenPair::generate(now, self.settings.access_token_ttl_secs);
        store.rotate_token(access_token, &pair.clone().into_user_token(current.user_id))?;
        Ok(pair)
    }

    /// Resolve a bearer token to its user. Unknown and expired tokens are both unauthorized.
    pub async fn authenticate(&self, access_token: &str, now: i64) -> Result<User> {
        let store = self.store.lock().await;
        let token = store.find_token(access_token)?.ok_or(Error::Unauthorized)?;
        if token.is_expired(now) {
            return Err(Error::Unauthorized);
        }
        store.get_user(token.user_id)?.ok_or(Error::UserNotFound(token.user_id))
    }
}
