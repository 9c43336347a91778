//! "Eat together" board queries

use serde::{Deserialize, Serialize};
use crate::{Error, Result};
use crate::domain::{EatTogetherPost, EatTogetherReply};
use crate::storage::SqliteStore;

/// Response of `GET /api/eatTogether/post`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EatTogetherPostListResponse {
    pub posts: Vec<EatTogetherPost>,
    pub has_more: bool,
}

/// Response of `GET /api/eatTogether/post/{postId}/reply`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EatTogetherReplyListResponse {
    pub replies: Vec<EatTogetherReply>,
}

pub struct EatTogetherQuery<'a> {
    store: &'a SqliteStore,
}

impl<'a> EatTogetherQuery<'a> {
    pub fn new(store: &'a SqliteStore) -> Self {
        Self { store }
    }

    /// A page of posts older than `more_id`, newest first, inside regions
    /// starting with `region`
    pub fn posts(&self, region: Option<&str>, more_id: Option<i64>, page_size: usize) -> Result<EatTogetherPostListResponse> {
        let mut posts = self
            .store
            .list_eat_together_posts(region.unwrap_or(""), more_id, page_size + 1)?;
        let has_more = posts.len() > page_size;
        posts.truncate(page_size);

        Ok(EatTogetherPostListResponse { posts, has_more })
    }

    pub fn post(&self, post_id: i64) -> Result<EatTogetherPost> {
        self.store
            .get_eat_together_post(post_id)?
            .ok_or(Error::EatTogetherPostNotFound(post_id))
    }

    pub fn replies(&self, post_id: i64) -> Result<EatTogetherReplyListResponse> {
        if self.store.get_eat_together_post(post_id)?.is_none() {
            return Err(Error::EatTogetherPostNotFound(post_id));
        }
        let replies = self.store.list_eat_together_replies(post_id)?;
        Ok(EatTogetherReplyListResponse { replies })
    }
}
