//! Store types
//!
//! A store is the local counterpart of a provider place. At most one store
//! exists per `kakao_place_id`; it is created the first time somebody
//! reviews that place.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A persisted store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(rename = "storeId")]
    pub id: i64,
    #[serde(rename = "placeId")]
    pub kakao_place_id: i64,
    pub category_id: i64,
    pub region_code: String,
    pub store_name: String,
    pub address_name: String,
    pub road_address_name: String,
    /// Longitude as reported by the provider
    pub x: String,
    /// Latitude as reported by the provider
    pub y: String,
    pub like_cnt: i64,
}

/// Values for inserting a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStore {
    pub kakao_place_id: i64,
    pub category_id: i64,
    pub region_code: String,
    pub store_name: String,
    pub address_name: String,
    pub road_address_name: String,
    pub x: String,
    pub y: String,
}

impl NewStore {
    pub fn from_snapshot(kakao_place_id: i64, category_id: i64, place: &PlaceSnapshot) -> Self {
        Self {
            kakao_place_id,
            category_id,
            region_code: place.region_code.clone(),
            store_name: place.place_name.clone(),
            address_name: place.address_name.clone(),
            road_address_name: place.road_address_name.clone(),
            x: place.x.clone(),
            y: place.y.clone(),
        }
    }
}

/// The place a review is written for, as the client saw it in search results.
///
/// Only used when the place has no local store yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSnapshot {
    pub place_name: String,
    /// Full provider category path (`음식점 > 일식 > 초밥,롤`)
    pub category_name: String,
    pub address_name: String,
    #[serde(default)]
    pub road_address_name: String,
    pub x: String,
    pub y: String,
    pub region_code: String,
}

impl PlaceSnapshot {
    pub fn validate(&self) -> Result<()> {
        if self.place_name.trim().is_empty() {
            return Err(Error::InvalidRequest("place name is empty".to_string()));
        }
        if self.category_name.trim().is_empty() {
            return Err(Error::InvalidRequest("category name is empty".to_string()));
        }
        if self.region_code.trim().is_empty() {
            return Err(Error::InvalidRequest("region code is empty".to_string()));
        }
        parse_coordinate("x", &self.x)?;
        parse_coordinate("y", &self.y)?;
        Ok(())
    }
}

/// Parse a decimal coordinate string, keeping the original text as the stored value.
pub fn parse_coordinate(name: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidRequest(format!("{name} is not a coordinate: {value:?}")))
}

/// Per-store counters used when merging search results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSummary {
    pub store_id: i64,
    pub kakao_place_id: i64,
    pub like_cnt: i64,
    pub review_cnt: i64,
}

/// Store with its resolved category name and review count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDetail {
    pub store_id: i64,
    pub place_id: i64,
    pub store_name: String,
    pub category_name: String,
    pub region_code: String,
    pub address_name: String,
    pub road_address_name: String,
    pub x: String,
    pub y: String,
    pub like_cnt: i64,
    pub review_cnt: i64,
}
