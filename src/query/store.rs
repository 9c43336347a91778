//! Store detail and review list queries

use serde::{Deserialize, Serialize};
use crate::{Error, Result};
use crate::domain::{ReviewView, StoreDetail};
use crate::storage::SqliteStore;

/// Response of `GET /api/store/{storeId}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDetailResponse {
    pub store: StoreDetail,
    pub preview_images: Vec<String>,
}

/// Response of `GET /api/store/{storeId}/reviews`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListResponse {
    pub reviews: Vec<ReviewView>,
    /// Whether older reviews exist past the last one returned
    pub has_more: bool,
}

pub struct StoreQuery<'a> {
    store: &'a SqliteStore,
}

impl<'a> StoreQuery<'a> {
    pub fn new(store: &'a SqliteStore) -> Self {
        Self { store }
    }

    /// Store detail with up to `preview_limit` review images
    pub fn detail(&self, store_id: i64, preview_limit: usize) -> Result<StoreDetailResponse> {
        let store = self
            .store
            .get_store_detail(store_id)?
            .ok_or(Error::StoreNotFound(store_id))?;
        let preview_images = self.store.preview_images(store_id, preview_limit)?;

        Ok(StoreDetailResponse { store, preview_images })
    }

    /// A page of reviews older than `more_id`, newest first
    pub fn reviews(&self, store_id: i64, more_id: Option<i64>, page_size: usize) -> Result<ReviewListResponse> {
        if self.store.get_store(store_id)?.is_none() {
            return Err(Error::StoreNotFound(store_id));
        }

        let mut reviews = self.store.list_reviews(store_id, more_id, page_size + 1)?;
        let has_more = reviews.len() > page_size;
        reviews.truncate(page_size);

        Ok(ReviewListResponse { reviews, has_more })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewReview, OauthProvider, PlaceSnapshot, RegionCode};

    fn seeded() -> (SqliteStore, i64) {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_region(&RegionCode::new("1168010800", "논현동")).unwrap();
        let user = store.upsert_user(OauthProvider::Kakao, "1", "먹보", None).unwrap();
        let place = PlaceSnapshot {
            place_name: "스시코우지".to_string(),
            category_name: "음식점 > 일식 > 초밥,롤".to_string(),
            address_name: "서울 강남구 논현동 92".to_string(),
            road_address_name: "서울 강남구 도산대로 318".to_string(),
            x: "127.03662909986537".to_string(),
            y: "37.52186058560857".to_string(),
            region_code: "1168010800".to_string(),
        };
        let mut store_id = 0;
        for i in 0..3 {
            let review = NewReview {
                star_score: 5,
                content: format!("리뷰 {i}"),
                revisit_yn: false,
                images: vec![format!("{i}-a.jpg"), format!("{i}-b.jpg")],
            };
            store_id = store.write_review(user.id, 23829251, &place, &review, i).unwrap().store_id;
        }
        (store, store_id)
    }

    #[test]
    fn test_detail() {
        let (store, store_id) = seeded();
        let detail = StoreQuery::new(&store).detail(store_id, 3).unwrap();

        assert_eq!(detail.store.store_id, store_id);
        assert_eq!(detail.store.place_id, 23829251);
        assert_eq!(detail.store.category_name, "초밥,롤");
        assert_eq!(detail.store.review_cnt, 3);
        assert_eq!(detail.preview_images, vec!["2-a.jpg", "2-b.jpg", "1-a.jpg"]);
    }

    #[test]
    fn test_detail_unknown_store() {
        let (store, _) = seeded();
        assert!(matches!(StoreQuery::new(&store).detail(-1, 3), Err(Error::StoreNotFound(-1))));
    }

    #[test]
    fn test_review_pages() {
        let (store, store_id) = seeded();
        let query = StoreQuery::new(&store);

        let first = query.reviews(store_id, None, 2).unwrap();
        assert_eq!(first.reviews.len(), 2);
        assert!(first.has_more);
        assert_eq!(first.reviews[0].content, "리뷰 2");

        let last_id = first.reviews[1].review_id;
        let second = query.reviews(store_id, Some(last_id), 2).unwrap();
        assert_eq!(second.reviews.len(), 1);
        assert!(!second.has_more);

        assert!(matches!(query.reviews(404, None, 2), Err(Error::StoreNotFound(404))));
    }
}
