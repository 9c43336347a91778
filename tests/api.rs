//! HTTP API tests against a fake Kakao server

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use ojeomme::config::OauthConfig;
use ojeomme::domain::RegionCode;
use ojeomme::Error;
use ojeomme::maps::{KakaoKeywordClient, PlaceSearch, PlaceSearchRequest};
use ojeomme::oauth::KakaoOauthClient;
use ojeomme::server::{self, AppState};
use ojeomme::service::{OjeommeService, ServiceSettings};
use ojeomme::storage::SqliteStore;

const API_KEY: &str = "test-key";
const SUSHI_PLACE_ID: i64 = 23829251;
const SEARCH_FAILED: &str = "매장을 찾는데 오류가 발생했습니다.\n관리자에게 문의하세요";

async fn fake_keyword(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("KakaoAK {}", API_KEY));
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"errorType": "AccessDeniedError"})));
    }
    match params.get("query").map(String::as_str) {
        Some("장애") => return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "boom"}))),
        Some("느림") => tokio::time::sleep(Duration::from_secs(3)).await,
        _ => {}
    }

    let body = json!({
        "documents": [{
            "address_name": "서울 강남구 논현동 92",
            "category_group_code": "FD6",
            "category_group_name": "음식점",
            "category_name": "음식점 > 일식 > 초밥,롤",
            "distance": "",
            "id": SUSHI_PLACE_ID.to_string(),
            "phone": "02-541-6200",
            "place_name": "스시코우지",
            "place_url": "http://place.map.kakao.com/23829251",
            "road_address_name": "서울 강남구 도산대로 318",
            "x": "127.03662909986537",
            "y": "37.52186058560857"
        }],
        "meta": {
            "is_end": true,
            "pageable_count": 1,
            "same_name": {"keyword": "스시코우지", "region": [], "selected_region": ""},
            "total_count": 1
        }
    });
    (StatusCode::OK, Json(body))
}

async fn fake_user_me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some("Bearer kakao-token") => (
            StatusCode::OK,
            Json(json!({"id": 2632890492i64, "properties": {"nickname": "오점뭐", "profile_image": "http://p.jpg"}})),
        ),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({"code": -401}))),
    }
}

fn fake_kakao() -> Router {
    Router::new()
        .route("/v2/local/search/keyword.json", get(fake_keyword))
        .route("/v2/user/me", get(fake_user_me))
}

async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

struct TestApp {
    base_url: String,
    http: reqwest::Client,
    state: Arc<AppState>,
}

impl TestApp {
    async fn start() -> Self {
        Self::with_search_timeout(Duration::from_secs(2)).await
    }

    async fn with_search_timeout(timeout: Duration) -> Self {
        let kakao = spawn(fake_kakao()).await;

        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_region(&RegionCode::new("1168010800", "논현동")).unwrap();

        let places = KakaoKeywordClient::with_api_key(&kakao, API_KEY, timeout).unwrap();
        let social = KakaoOauthClient::new(&OauthConfig {
            kakao_api_base_url: kakao.clone(),
            ..OauthConfig::default()
        })
        .unwrap();
        let service = OjeommeService::new(store, Arc::new(places), Arc::new(social), ServiceSettings::default());
        let state = Arc::new(AppState::new(service));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app_state = state.clone();
        tokio::spawn(async move {
            server::serve(listener, app_state).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            http: reqwest::Client::new(),
            state,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn login(&self) -> String {
        let response = self
            .http
            .post(self.url("/api/auth/kakao/login"))
            .json(&json!({"accessToken": "kakao-token"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        body["accessToken"].as_str().unwrap().to_string()
    }

    async fn search(&self, token: &str, query: &str) -> reqwest::Response {
        self.http
            .get(self.url("/api/store/searchPlaceList"))
            .bearer_auth(token)
            .query(&[
                ("query", query),
                ("x", "127.03662909986537"),
                ("y", "37.52186058560857"),
                ("page", "1"),
            ])
            .send()
            .await
            .unwrap()
    }

    async fn write_sushi_review(&self, token: &str, images: &[&str]) -> i64 {
        let response = self
            .http
            .post(self.url(&format!("/api/review/{}", SUSHI_PLACE_ID)))
            .bearer_auth(token)
            .json(&json!({
                "placeName": "스시코우지",
                "categoryName": "음식점 > 일식 > 초밥,롤",
                "addressName": "서울 강남구 논현동 92",
                "roadAddressName": "서울 강남구 도산대로 318",
                "x": "127.03662909986537",
                "y": "37.52186058560857",
                "regionCode": "1168010800",
                "starScore": 5,
                "content": "오마카세 최고",
                "revisitYn": true,
                "images": images
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED.as_u16());
        let body: Value = response.json().await.unwrap();
        body["reviewId"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn test_search_place_without_local_store() {
    let app = TestApp::start().await;
    let token = app.login().await;

    let response = app.search(&token, "스시코우지").await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();

    assert_eq!(body["meta"]["totalCount"], 1);
    assert_eq!(body["meta"]["pageableCount"], 1);
    assert_eq!(body["meta"]["isEnd"], true);

    let place = &body["places"][0];
    assert!(place.get("storeId").is_none());
    assert_eq!(place["placeId"], SUSHI_PLACE_ID);
    assert_eq!(place["placeName"], "스시코우지");
    assert_eq!(place["categoryName"], "초밥,롤");
    assert_eq!(place["phone"], "02-541-6200");
    assert_eq!(place["likeCnt"], 0);
    assert_eq!(place["reviewCnt"], 0);
}

#[tokio::test]
async fn test_search_place_with_local_store() {
    let app = TestApp::start().await;
    let token = app.login().await;
    app.write_sushi_review(&token, &[]).await;

    let store_id = {
        let store = app.state.service.store();
        let store = store.lock().await;
        let sushi = store.find_store_by_place_id(SUSHI_PLACE_ID).unwrap().unwrap();
        for i in 0..5 {
            let user = store
                .upsert_user(ojeomme::domain::OauthProvider::Kakao, &format!("fan-{i}"), "fan", None)
                .unwrap();
            store.like_store(sushi.id, user.id, 0).unwrap();
        }
        sushi.id
    };

    let body: Value = app.search(&token, "스시코우지").await.json().await.unwrap();
    let place = &body["places"][0];
    assert_eq!(place["storeId"], store_id);
    assert_eq!(place["likeCnt"], 5);
    assert_eq!(place["reviewCnt"], 1);
}

#[tokio::test]
async fn test_search_provider_failure() {
    let app = TestApp::start().await;
    let token = app.login().await;

    let response = app.search(&token, "장애").await;
    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await.unwrap(), SEARCH_FAILED);
}

#[tokio::test]
async fn test_keyword_client_times_out() {
    let kakao = spawn(fake_kakao()).await;
    let client = KakaoKeywordClient::with_api_key(&kakao, API_KEY, Duration::from_millis(200)).unwrap();

    let request = PlaceSearchRequest::new("느림", "127.03662909986537", "37.52186058560857", 1);
    let started = std::time::Instant::now();
    let result = client.search_keyword(&request).await;

    assert!(matches!(result, Err(Error::SearchMaps(_))));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_search_provider_timeout() {
    let app = TestApp::with_search_timeout(Duration::from_millis(200)).await;
    let token = app.login().await;

    let response = app.search(&token, "느림").await;
    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await.unwrap(), SEARCH_FAILED);
}

#[tokio::test]
async fn test_search_rejects_bad_page() {
    let app = TestApp::start().await;
    let token = app.login().await;

    let response = app
        .http
        .get(app.url("/api/store/searchPlaceList?query=a&x=127.0&y=37.5&page=0"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    assert_eq!(response.text().await.unwrap(), "잘못된 요청입니다.");
}

#[tokio::test]
async fn test_protected_routes_require_login() {
    let app = TestApp::start().await;

    let response = app.http.get(app.url("/api/store/1")).send().await.unwrap();
    assert_eq!(response.status(), 401);
    assert_eq!(response.text().await.unwrap(), "로그인이 필요한 서비스입니다.");

    let response = app
        .http
        .get(app.url("/api/store/1"))
        .bearer_auth("not-a-session")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_unknown_store() {
    let app = TestApp::start().await;
    let token = app.login().await;

    let response = app.http.get(app.url("/api/store/-1")).bearer_auth(&token).send().await.unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.unwrap(), "매장을 찾을 수 없습니다.");
}

#[tokio::test]
async fn test_store_detail_like_and_reviews() {
    let app = TestApp::start().await;
    let token = app.login().await;
    let review_id = app.write_sushi_review(&token, &["first.jpg", "second.jpg"]).await;

    let search: Value = app.search(&token, "스시코우지").await.json().await.unwrap();
    let store_id = search["places"][0]["storeId"].as_i64().unwrap();

    for _ in 0..2 {
        let response = app
            .http
            .post(app.url(&format!("/api/store/{}/like", store_id)))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["likeCnt"], 1);
    }

    let detail: Value = app
        .http
        .get(app.url(&format!("/api/store/{}", store_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(detail["store"]["storeName"], "스시코우지");
    assert_eq!(detail["store"]["likeCnt"], 1);
    assert_eq!(detail["store"]["reviewCnt"], 1);
    assert_eq!(detail["previewImages"], json!(["first.jpg", "second.jpg"]));

    let reviews: Value = app
        .http
        .get(app.url(&format!("/api/store/{}/reviews", store_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reviews["reviews"][0]["reviewId"], review_id);
    assert_eq!(reviews["reviews"][0]["nickname"], "오점뭐");
    assert_eq!(reviews["hasMore"], false);
}

#[tokio::test]
async fn test_review_for_unknown_region() {
    let app = TestApp::start().await;
    let token = app.login().await;

    let response = app
        .http
        .post(app.url("/api/review/1"))
        .bearer_auth(&token)
        .json(&json!({
            "placeName": "어딘가",
            "categoryName": "음식점 > 한식",
            "addressName": "주소",
            "x": "127.0",
            "y": "37.5",
            "regionCode": "9999999999",
            "starScore": 3,
            "content": "그럭저럭"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.unwrap(), "지역을 찾을 수 없습니다.");
}

#[tokio::test]
async fn test_today_ranking_and_categories() {
    let app = TestApp::start().await;

    let empty: Value = app
        .http
        .get(app.url("/api/storeReviewStatistics/todayRanking"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(empty["stores"], json!([]));

    let token = app.login().await;
    app.write_sushi_review(&token, &["cover.jpg"]).await;

    let ranking: Value = app
        .http
        .get(app.url("/api/storeReviewStatistics/todayRanking?regionCode=11"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ranking["stores"][0]["storeName"], "스시코우지");
    assert_eq!(ranking["stores"][0]["regionName"], "논현동");
    assert_eq!(ranking["stores"][0]["image"], "cover.jpg");

    let elsewhere: Value = app
        .http
        .get(app.url("/api/storeReviewStatistics/todayRanking?regionCode=26"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(elsewhere["stores"], json!([]));

    let root_id = {
        let store = app.state.service.store();
        let store = store.lock().await;
        store.find_category(1, "음식점").unwrap().unwrap().id
    };
    let children: Value = app
        .http
        .get(app.url(&format!("/api/category/{}/children?depth=2", root_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(children["categories"][0]["categoryName"], "일식");
}

#[tokio::test]
async fn test_auth_check_and_login_errors() {
    let app = TestApp::start().await;

    let anonymous: Value = app.http.get(app.url("/api/auth/check")).send().await.unwrap().json().await.unwrap();
    assert_eq!(anonymous, json!({"result": false}));

    let token = app.login().await;
    let signed_in: Value = app
        .http
        .get(app.url("/api/auth/check"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(signed_in["result"], true);
    assert_eq!(signed_in["nickname"], "오점뭐");

    let unsupported = app
        .http
        .post(app.url("/api/auth/naver/login"))
        .json(&json!({"accessToken": "kakao-token"}))
        .send()
        .await
        .unwrap();
    assert_eq!(unsupported.status(), 404);
    assert_eq!(unsupported.text().await.unwrap(), "지원하지 않는 소셜 플랫폼입니다.");

    let rejected = app
        .http
        .post(app.url("/api/auth/kakao/login"))
        .json(&json!({"accessToken": "expired"}))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), 500);
    assert_eq!(rejected.text().await.unwrap(), "소셜 로그인에 실패했습니다.");
}

#[tokio::test]
async fn test_eat_together_posts_and_replies() {
    let app = TestApp::start().await;
    let token = app.login().await;

    let unauthorized = app.http.get(app.url("/api/eatTogether/post")).send().await.unwrap();
    assert_eq!(unauthorized.status(), 401);

    let mut post_ids = Vec::new();
    for i in 0..12 {
        let response = app
            .http
            .post(app.url("/api/eatTogether/post"))
            .bearer_auth(&token)
            .json(&json!({"regionCode": "1168010800", "subject": format!("점심 {i}"), "content": "논현역 12시"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED.as_u16());
        let body: Value = response.json().await.unwrap();
        post_ids.push(body["postId"].as_i64().unwrap());
    }

    let first: Value = app
        .http
        .get(app.url("/api/eatTogether/post?regionCode=11"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let posts = first["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 10);
    assert_eq!(posts[0]["postId"], post_ids[11]);
    assert_eq!(posts[0]["regionName"], "논현동");
    assert_eq!(posts[0]["nickname"], "오점뭐");
    assert_eq!(first["hasMore"], true);

    let last_id = posts[9]["postId"].as_i64().unwrap();
    let second: Value = app
        .http
        .get(app.url(&format!("/api/eatTogether/post?regionCode=11&moreId={}", last_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["posts"].as_array().unwrap().len(), 2);
    assert_eq!(second["hasMore"], false);

    let post_id = post_ids[0];
    let reply = app
        .http
        .post(app.url(&format!("/api/eatTogether/post/{}/reply", post_id)))
        .bearer_auth(&token)
        .json(&json!({"content": "저요"}))
        .send()
        .await
        .unwrap();
    assert_eq!(reply.status(), StatusCode::CREATED.as_u16());

    let detail: Value = app
        .http
        .get(app.url(&format!("/api/eatTogether/post/{}", post_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(detail["subject"], "점심 0");
    assert_eq!(detail["replyCnt"], 1);

    let replies: Value = app
        .http
        .get(app.url(&format!("/api/eatTogether/post/{}/reply", post_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(replies["replies"][0]["content"], "저요");

    let missing = app
        .http
        .post(app.url("/api/eatTogether/post/-1/reply"))
        .bearer_auth(&token)
        .json(&json!({"content": "저요"}))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);
    assert_eq!(missing.text().await.unwrap(), "게시글을 찾을 수 없습니다.");

    let unknown_region = app
        .http
        .post(app.url("/api/eatTogether/post"))
        .bearer_auth(&token)
        .json(&json!({"regionCode": "2611010100", "subject": "부산", "content": "남포동"}))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_region.status(), 404);
}
