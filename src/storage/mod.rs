//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - regions(code, region_name)
//! - categories(id, up_category_id, category_depth, category_name)
//! - users(id, provider, oauth_id, nickname, profile) and user_tokens
//! - stores(id, kakao_place_id, category_id, region_code, ..., like_cnt)
//! - reviews(id, store_id, user_id, star_score, content, revisit_yn, created_at)
//! - review_images(review_id, image_url, sort_order)
//! - store_likes(store_id, user_id, created_at)
//! - eat_together_posts(id, user_id, region_code, subject, content, created_at)
//! - eat_together_replies(id, post_id, user_id, content, created_at)

pub mod schema;
pub mod sqlite;

pub use sqlite::{DbStats, RankedStore, SqliteStore};
