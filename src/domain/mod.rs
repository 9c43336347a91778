//! Domain types - stores, reviews, categories, regions and users
//!
//! Stores own their reviews. Categories and region codes are shared
//! reference data looked up by id, never owned by a store.

pub mod category;
pub mod eat_together;
pub mod region;
pub mod review;
pub mod store;
pub mod user;

pub use category::{Category, leaf_category, split_category_path};
pub use eat_together::{EatTogetherPost, EatTogetherReply, NewEatTogetherPost, NewEatTogetherReply};
pub use region::{RegionCode, region_prefix};
pub use review::{NewReview, Review, ReviewView};
pub use store::{NewStore, PlaceSnapshot, Store, StoreDetail, StoreSummary};
pub use user::{OauthProvider, TokenPair, User, UserToken};
