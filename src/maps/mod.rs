//! Place search - the external maps provider
//!
//! The provider is reached through the [`PlaceSearch`] trait so the search
//! aggregator can be exercised against fakes. [`KakaoKeywordClient`] is the
//! production implementation.

pub mod kakao;

use crate::domain::store::parse_coordinate;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use kakao::KakaoKeywordClient;

/// Keyword search parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSearchRequest {
    pub query: String,
    /// Longitude of the search center
    pub x: String,
    /// Latitude of the search center
    pub y: String,
    /// 1-based page number
    pub page: u32,
}

impl PlaceSearchRequest {
    pub fn new(query: impl Into<String>, x: impl Into<String>, y: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            x: x.into(),
            y: y.into(),
            page,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(Error::InvalidRequest("query is empty".to_string()));
        }
        if self.page == 0 {
            return Err(Error::InvalidRequest("page starts at 1".to_string()));
        }
        parse_coordinate("x", &self.x)?;
        parse_coordinate("y", &self.y)?;
        Ok(())
    }
}

/// One place returned by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceDocument {
    pub id: i64,
    pub place_name: String,
    /// Full category path as reported by the provider
    pub category_name: String,
    pub phone: String,
    pub address_name: String,
    pub road_address_name: String,
    pub x: String,
    pub y: String,
}

/// Pagination metadata of a search page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceMeta {
    pub total_count: u32,
    pub pageable_count: u32,
    pub is_end: bool,
}

/// A page of provider results, in provider order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacePage {
    pub documents: Vec<PlaceDocument>,
    pub meta: PlaceMeta,
}

/// Keyword search against an external maps provider.
///
/// Implementations report every failure (transport, timeout, bad status,
/// undecodable body) as [`Error::SearchMaps`].
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search_keyword(&self, request: &PlaceSearchRequest) -> Result<PlacePage>;
}
