use axum::{
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::domain::{Category, EatTogetherPost, NewEatTogetherPost, NewEatTogetherReply, TokenPair};
use crate::maps::PlaceSearchRequest;
use crate::query::{
    EatTogetherPostListResponse, EatTogetherReplyListResponse, ReviewListResponse, SearchPlaceListResponse,
    StoreDetailResponse, TodayStoreRanking,
};
use crate::server::AppState;
use crate::server::auth::{AuthUser, MaybeUser};
use crate::service::WriteReviewRequest;
use crate::{Error, Result};

fn rejected(rejection: impl std::fmt::Display) -> Error {
    Error::InvalidRequest(rejection.to_string())
}

// ========== Auth ==========

#[derive(Serialize)]
pub struct AuthCheckResponse {
    pub result: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

pub async fn auth_check(MaybeUser(user): MaybeUser) -> Json<AuthCheckResponse> {
    let response = match user {
        Some(user) => AuthCheckResponse {
            result: true,
            id: Some(user.id),
            nickname: Some(user.nickname),
            profile: user.profile,
        },
        None => AuthCheckResponse { result: false, id: None, nickname: None, profile: None },
    };
    Json(response)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub access_token: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    provider: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenPair>> {
    let Path(provider) = provider.map_err(rejected)?;
    let Json(body) = body.map_err(rejected)?;
    let pair = state.service.login(&provider, &body.access_token, Local::now().timestamp()).await?;
    Ok(Json(pair))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub access_token: String,
    pub refresh_token: String,
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<TokenPair>> {
    let Json(body) = body.map_err(rejected)?;
    let pair = state
        .service
        .refresh(&body.access_token, &body.refresh_token, Local::now().timestamp())
        .await?;
    Ok(Json(pair))
}

// ========== Store ==========

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub x: String,
    pub y: String,
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

pub async fn search_place_list(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchPlaceListResponse>> {
    let Query(params) = params.map_err(rejected)?;
    let request = PlaceSearchRequest::new(params.query, params.x, params.y, params.page);
    Ok(Json(state.service.search_place_list(&request).await?))
}

pub async fn store_detail(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    store_id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<StoreDetailResponse>> {
    let Path(store_id) = store_id.map_err(rejected)?;
    Ok(Json(state.service.store_detail(store_id).await?))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub like_cnt: i64,
}

pub async fn like_store(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    store_id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<LikeResponse>> {
    let Path(store_id) = store_id.map_err(rejected)?;
    let like_cnt = state.service.like_store(&user, store_id, Local::now().timestamp()).await?;
    Ok(Json(LikeResponse { like_cnt }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsParams {
    pub more_id: Option<i64>,
}

pub async fn store_reviews(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    store_id: std::result::Result<Path<i64>, PathRejection>,
    params: std::result::Result<Query<ReviewsParams>, QueryRejection>,
) -> Result<Json<ReviewListResponse>> {
    let Path(store_id) = store_id.map_err(rejected)?;
    let Query(params) = params.map_err(rejected)?;
    Ok(Json(state.service.store_reviews(store_id, params.more_id).await?))
}

// ========== Review ==========

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteReviewResponse {
    pub review_id: i64,
}

pub async fn write_review(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    place_id: std::result::Result<Path<i64>, PathRejection>,
    body: std::result::Result<Json<WriteReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WriteReviewResponse>)> {
    let Path(place_id) = place_id.map_err(rejected)?;
    let Json(body) = body.map_err(rejected)?;
    let review = state
        .service
        .write_review(&user, place_id, &body, Local::now().timestamp())
        .await?;
    Ok((StatusCode::CREATED, Json(WriteReviewResponse { review_id: review.id })))
}

// ========== Statistics ==========

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingParams {
    pub region_code: Option<String>,
}

pub async fn today_ranking(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<RankingParams>, QueryRejection>,
) -> Result<Json<TodayStoreRanking>> {
    let Query(params) = params.map_err(rejected)?;
    let ranking = state
        .service
        .today_ranking(Local::now(), params.region_code.as_deref())
        .await?;
    Ok(Json(ranking))
}

// ========== Category ==========

#[derive(Deserialize)]
pub struct ChildrenParams {
    pub depth: u32,
}

#[derive(Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

pub async fn child_categories(
    State(state): State<Arc<AppState>>,
    up_category_id: std::result::Result<Path<i64>, PathRejection>,
    params: std::result::Result<Query<ChildrenParams>, QueryRejection>,
) -> Result<Json<CategoryListResponse>> {
    let Path(up_category_id) = up_category_id.map_err(rejected)?;
    let Query(params) = params.map_err(rejected)?;
    let categories = state.service.child_categories(up_category_id, params.depth).await?;
    Ok(Json(CategoryListResponse { categories }))
}

// ========== Eat Together ==========

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WritePostResponse {
    pub post_id: i64,
}

pub async fn write_eat_together_post(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    body: std::result::Result<Json<NewEatTogetherPost>, JsonRejection>,
) -> Result<(StatusCode, Json<WritePostResponse>)> {
    let Json(body) = body.map_err(rejected)?;
    let post_id = state
        .service
        .write_eat_together_post(&user, &body, Local::now().timestamp())
        .await?;
    Ok((StatusCode::CREATED, Json(WritePostResponse { post_id })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsParams {
    pub region_code: Option<String>,
    pub more_id: Option<i64>,
}

pub async fn eat_together_posts(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    params: std::result::Result<Query<PostsParams>, QueryRejection>,
) -> Result<Json<EatTogetherPostListResponse>> {
    let Query(params) = params.map_err(rejected)?;
    let posts = state
        .service
        .eat_together_posts(params.region_code.as_deref(), params.more_id)
        .await?;
    Ok(Json(posts))
}

pub async fn eat_together_post(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    post_id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<EatTogetherPost>> {
    let Path(post_id) = post_id.map_err(rejected)?;
    Ok(Json(state.service.eat_together_post(post_id).await?))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteReplyResponse {
    pub reply_id: i64,
}

pub async fn write_eat_together_reply(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    post_id: std::result::Result<Path<i64>, PathRejection>,
    body: std::result::Result<Json<NewEatTogetherReply>, JsonRejection>,
) -> Result<(StatusCode, Json<WriteReplyResponse>)> {
    let Path(post_id) = post_id.map_err(rejected)?;
    let Json(body) = body.map_err(rejected)?;
    let reply_id = state
        .service
        .write_eat_together_reply(&user, post_id, &body, Local::now().timestamp())
        .await?;
    Ok((StatusCode::CREATED, Json(WriteReplyResponse { reply_id })))
}

pub async fn eat_together_replies(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    post_id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<EatTogetherReplyListResponse>> {
    let Path(post_id) = post_id.map_err(rejected)?;
    Ok(Json(state.service.eat_together_replies(post_id).await?))
}
