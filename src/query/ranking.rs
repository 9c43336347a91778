//! Today's store ranking
//!
//! Popularity is the number of reviews plus likes a store received during
//! the server-local calendar day containing `now`. Equal popularity is
//! ordered by store id ascending so the ranking is stable for a given
//! database state and instant.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use crate::Result;
use crate::storage::SqliteStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayStoreRanking {
    pub stores: Vec<RankingEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub store_id: i64,
    pub store_name: String,
    pub region_name: String,
    /// First image of the newest review that has images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// `[start, end)` of the local calendar day containing `now`, as unix seconds
pub fn day_window(now: DateTime<Local>) -> (i64, i64) {
    let today = now.date_naive();
    let start = local_midnight(today);
    let end = today
        .checked_add_days(Days::new(1))
        .map(local_midnight)
        .unwrap_or(start + 24 * 60 * 60);
    (start, end)
}

fn local_midnight(date: NaiveDate) -> i64 {
    let naive = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|t| t.timestamp())
        // midnight skipped by a DST jump
        .unwrap_or_else(|| naive.and_utc().timestamp())
}

/// Bounded top-N ranking over the store's activity tables
pub struct RankingQuery<'a> {
    store: &'a SqliteStore,
    size: usize,
}

impl<'a> RankingQuery<'a> {
    pub fn new(store: &'a SqliteStore, size: usize) -> Self {
        Self { store, size }
    }

    /// Top stores for the day containing `now`, optionally restricted to a
    /// region code prefix.
    pub fn today(&self, now: DateTime<Local>, region_prefix: Option<&str>) -> Result<TodayStoreRanking> {
        let (from, to) = day_window(now);
        let ranked = self.store.rank_stores(from, to, region_prefix, self.size)?;

        let mut stores = Vec::with_capacity(ranked.len());
        for entry in ranked {
            let image = self.store.representative_image(entry.store_id)?;
            stores.push(RankingEntry {
                store_id: entry.store_id,
                store_name: entry.store_name,
                region_name: entry.region_name,
                image,
            });
        }

        tracing::debug!("Ranking for window [{}, {}): {} stores", from, to, stores.len());
        Ok(TodayStoreRanking { stores })
    }
}
