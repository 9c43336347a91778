//! Store search aggregation
//!
//! Joins a page of provider places with the locally known stores by
//! external place id. Provider order is kept; places without a local store
//! are ordinary results with no store id and zeroed counters.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::domain::{StoreSummary, leaf_category};
use crate::maps::{PlaceMeta, PlacePage};

/// Response of `GET /api/store/searchPlaceList`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPlaceListResponse {
    pub meta: SearchMeta,
    pub places: Vec<PlaceResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMeta {
    pub total_count: u32,
    pub pageable_count: u32,
    pub is_end: bool,
}

impl From<PlaceMeta> for SearchMeta {
    fn from(meta: PlaceMeta) -> Self {
        Self {
            total_count: meta.total_count,
            pageable_count: meta.pageable_count,
            is_end: meta.is_end,
        }
    }
}

/// A provider place merged with its local store, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
    pub place_id: i64,
    pub place_name: String,
    /// Leaf segment of the provider category path
    pub category_name: String,
    pub phone: String,
    pub address_name: String,
    pub road_address_name: String,
    pub x: String,
    pub y: String,
    pub like_cnt: i64,
    pub review_cnt: i64,
}

/// External ids of a page, in provider order
pub fn place_ids(page: &PlacePage) -> Vec<i64> {
    page.documents.iter().map(|doc| doc.id).collect()
}

/// Merge a provider page with store counters looked up for its ids.
///
/// The output has exactly one entry per provider document, in the same order.
/// Pagination metadata is passed through unchanged.
pub fn merge_places(page: PlacePage, summaries: &[StoreSummary]) -> SearchPlaceListResponse {
    let by_place: HashMap<i64, &StoreSummary> = summaries
        .iter()
        .map(|summary| (summary.kakao_place_id, summary))
        .collect();

    let places = page
        .documents
        .into_iter()
        .map(|doc| {
            let local = by_place.get(&doc.id);
            PlaceResult {
                store_id: local.map(|s| s.store_id),
                place_id: doc.id,
                category_name: leaf_category(&doc.category_name).to_string(),
                place_name: doc.place_name,
                phone: doc.phone,
                address_name: doc.address_name,
                road_address_name: doc.road_address_name,
                x: doc.x,
                y: doc.y,
                like_cnt: local.map_or(0, |s| s.like_cnt),
                review_cnt: local.map_or(0, |s| s.review_cnt),
            }
        })
        .collect();

    SearchPlaceListResponse {
        meta: page.meta.into(),
        places,
    }
}
