//! Review types
//!
//! A review belongs to exactly one store and one user. Reviews are
//! append-only: once written they are never edited by the service.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Allowed star scores
pub const STAR_SCORE_RANGE: RangeInclusive<u8> = 1..=5;

/// A persisted review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "reviewId")]
    pub id: i64,
    pub store_id: i64,
    pub user_id: i64,
    pub star_score: u8,
    pub content: String,
    pub revisit_yn: bool,
    /// Image URLs in upload order
    pub images: Vec<String>,
    /// Unix timestamp (seconds)
    pub created_at: i64,
}

/// Review payload written by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub star_score: u8,
    pub content: String,
    #[serde(default)]
    pub revisit_yn: bool,
    #[serde(default)]
    pub images: Vec<String>,
}

impl NewReview {
    /// Reject out-of-range scores, blank content and too many images.
    pub fn validate(&self, max_images: usize) -> Result<()> {
        if !STAR_SCORE_RANGE.contains(&self.star_score) {
            return Err(Error::InvalidRequest(format!(
                "star score must be within {}..={}, got {}",
                STAR_SCORE_RANGE.start(),
                STAR_SCORE_RANGE.end(),
                self.star_score
            )));
        }
        if self.content.trim().is_empty() {
            return Err(Error::InvalidRequest("review content is empty".to_string()));
        }
        if self.images.len() > max_images {
            return Err(Error::InvalidRequest(format!(
                "at most {} images per review, got {}",
                max_images,
                self.images.len()
            )));
        }
        if self.images.iter().any(|url| url.trim().is_empty()) {
            return Err(Error::InvalidRequest("image url is empty".to_string()));
        }
        Ok(())
    }
}

/// A review as shown in a store's review list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub review_id: i64,
    pub user_id: i64,
    pub nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub star_score: u8,
    pub content: String,
    pub revisit_yn: bool,
    pub images: Vec<String>,
    pub created_at: i64,
}
