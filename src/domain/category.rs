//! Category hierarchy
//!
//! Categories form an adjacency table: each row points at its parent by id
//! (`up_category_id`) and records its depth, starting at 1 for the root.
//! The maps provider reports a category as a `>`-delimited path such as
//! `음식점 > 일식 > 초밥,롤`.

use serde::{Deserialize, Serialize};

/// Delimiter between hierarchy levels in a provider category path
pub const CATEGORY_PATH_DELIMITER: char = '>';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "categoryId")]
    pub id: i64,
    pub up_category_id: Option<i64>,
    pub category_depth: u32,
    pub category_name: String,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.up_category_id.is_none()
    }
}

/// Split a provider category path into its trimmed, non-empty segments.
///
/// Commas and slashes stay inside a segment (`초밥,롤` is one leaf).
pub fn split_category_path(path: &str) -> Vec<&str> {
    path.split(CATEGORY_PATH_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// The leaf segment of a category path, or the trimmed input if it has none.
pub fn leaf_category(path: &str) -> &str {
    split_category_path(path)
        .last()
        .copied()
        .unwrap_or_else(|| path.trim())
}
