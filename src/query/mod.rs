//! Read-side aggregations
//!
//! - Place search merge (provider page + local store counters)
//! - Today's store ranking
//! - Store detail and review list
//! - Eat-together posts and replies

pub mod eat_together;
pub mod ranking;
pub mod search;
pub mod store;

pub use eat_together::{EatTogetherPostListResponse, EatTogetherQuery, EatTogetherReplyListResponse};
pub use ranking::{RankingEntry, RankingQuery, TodayStoreRanking, day_window};
pub use search::{PlaceResult, SearchMeta, SearchPlaceListResponse, merge_places, place_ids};
pub use store::{ReviewListResponse, StoreDetailResponse, StoreQuery};
