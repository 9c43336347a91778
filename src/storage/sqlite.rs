//! SQLite storage implementation

use std::collections::HashMap;
use std::path::Path;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use crate::{Error, Result};
use crate::domain::{
    Category, EatTogetherPost, EatTogetherReply, NewEatTogetherPost, NewEatTogetherReply, NewReview, NewStore, OauthProvider, PlaceSnapshot, RegionCode, Review, ReviewView,
    Store, StoreDetail, StoreSummary, User, UserToken, split_category_path,
};
use super::schema;

const STORE_COLUMNS: &str =
    "id, kakao_place_id, category_id, region_code, store_name, address_name, road_address_name, x, y, like_cnt";

const CATEGORY_COLUMNS: &str = "id, up_category_id, category_depth, category_name";

const USER_COLUMNS: &str = "id, provider, oauth_id, nickname, profile";

const EAT_TOGETHER_POST_SELECT: &str = r#"
    SELECT p.id, p.user_id, u.nickname, u.profile, p.region_code, g.region_name, p.subject, p.content,
           (SELECT COUNT(*) FROM eat_together_replies r WHERE r.post_id = p.id), p.created_at
    FROM eat_together_posts p
    JOIN users u ON u.id = p.user_id
    JOIN regions g ON g.code = p.region_code
"#;

/// SQLite-backed storage for stores, reviews and users
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON")?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Region Operations ==========

    /// Insert or replace a region code
    pub fn insert_region(&self, region: &RegionCode) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO regions (code, region_name) VALUES (?1, ?2)",
            params![region.code, region.region_name],
        )?;
        Ok(())
    }

    /// Get a region by code
    pub fn get_region(&self, code: &str) -> Result<Option<RegionCode>> {
        self.conn
            .query_row(
                "SELECT code, region_name FROM regions WHERE code = ?1",
                [code],
                |row| Ok(RegionCode { code: row.get(0)?, region_name: row.get(1)? }),
            )
            .optional()
            .map_err(Into::into)
    }

    // ========== Category Operations ==========

    /// Insert a category under `up_category_id` (None for a root)
    pub fn insert_category(&self, up_category_id: Option<i64>, depth: u32, name: &str) -> Result<Category> {
        self.conn.execute(
            "INSERT INTO categories (up_category_id, category_depth, category_name) VALUES (?1, ?2, ?3)",
            params![up_category_id, depth, name],
        )?;
        Ok(Category {
            id: self.conn.last_insert_rowid(),
            up_category_id,
            category_depth: depth,
            category_name: name.to_string(),
        })
    }

    /// Find the first category with the given depth and name
    pub fn find_category(&self, depth: u32, name: &str) -> Result<Option<Category>> {
        let sql = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE category_depth = ?1 AND category_name = ?2 ORDER BY id LIMIT 1"
        );
        self.conn
            .query_row(&sql, params![depth, name], row_to_category)
            .optional()
            .map_err(Into::into)
    }

    /// Find a named child of `up_category_id` at `depth` (`None` looks among roots)
    pub fn find_child_category(&self, up_category_id: Option<i64>, depth: u32, name: &str) -> Result<Option<Category>> {
        let sql = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories
             WHERE up_category_id IS ?1 AND category_depth = ?2 AND category_name = ?3
             ORDER BY id LIMIT 1"
        );
        self.conn
            .query_row(&sql, params![up_category_id, depth, name], row_to_category)
            .optional()
            .map_err(Into::into)
    }

    /// List the children of `up_category_id` at `depth`
    pub fn child_categories(&self, up_category_id: i64, depth: u32) -> Result<Vec<Category>> {
        let sql = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE up_category_id = ?1 AND category_depth = ?2 ORDER BY id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let categories = stmt
            .query_map(params![up_category_id, depth], row_to_category)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    /// Resolve a category path root-first, creating missing nodes. Returns the leaf.
    pub fn ensure_category_path(&self, names: &[&str]) -> Result<Category> {
        let mut current: Option<Category> = None;
        for (index, name) in names.iter().enumerate() {
            let depth = index as u32 + 1;
            let parent_id = current.as_ref().map(|c| c.id);
            let category = match self.find_child_category(parent_id, depth, name)? {
                Some(existing) => existing,
                None => {
                    tracing::debug!("Creating category {:?} at depth {}", name, depth);
                    self.insert_category(parent_id, depth, name)?
                }
            };
            current = Some(category);
        }
        current.ok_or_else(|| Error::InvalidRequest("category path is empty".to_string()))
    }

    // ========== User Operations ==========

    /// Insert a user, or refresh nickname and profile of an existing account
    pub fn upsert_user(
        &self,
        provider: OauthProvider,
        oauth_id: &str,
        nickname: &str,
        profile: Option<&str>,
    ) -> Result<User> {
        self.conn.execute(
            r#"
            INSERT INTO users (provider, oauth_id, nickname, profile)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(provider, oauth_id) DO UPDATE SET nickname = excluded.nickname, profile = excluded.profile
            "#,
            params![provider.as_str(), oauth_id, nickname, profile],
        )?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE provider = ?1 AND oauth_id = ?2");
        let user = self.conn.query_row(&sql, params![provider.as_str(), oauth_id], row_to_user)?;
        Ok(user)
    }

    /// Get a user by id
    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
        self.conn
            .query_row(&sql, [id], row_to_user)
            .optional()
            .map_err(Into::into)
    }

    // ========== Token Operations ==========

    /// Store a session token
    pub fn insert_token(&self, token: &UserToken) -> Result<()> {
        self.conn.execute(
            "INSERT INTO user_tokens (access_token, refresh_token, user_id, expires_at) VALUES (?1, ?2, ?3, ?4)",
            params![token.access_token, token.refresh_token, token.user_id, token.expires_at],
        )?;
        Ok(())
    }

    /// Store a new session for `token.user_id`, dropping that user's expired sessions
    pub fn start_session(&self, token: &UserToken, now: i64) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let purged = self.conn.execute(
            "DELETE FROM user_tokens WHERE user_id = ?1 AND expires_at <= ?2",
            params![token.user_id, now],
        )?;
        if purged > 0 {
            tracing::debug!("Purged {} expired sessions of user {}", purged, token.user_id);
        }
        self.insert_token(token)?;
        tx.commit()?;
        Ok(())
    }

    /// Number of stored sessions of a user
    pub fn count_tokens(&self, user_id: i64) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM user_tokens WHERE user_id = ?1", [user_id], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Look up a session by access token
    pub fn find_token(&self, access_token: &str) -> Result<Option<UserToken>> {
        self.conn
            .query_row(
                "SELECT user_id, access_token, refresh_token, expires_at FROM user_tokens WHERE access_token = ?1",
                [access_token],
                row_to_token,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Replace the session identified by `old_access_token` with `token`
    pub fn rotate_token(&self, old_access_token: &str, token: &UserToken) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = self.conn.execute("DELETE FROM user_tokens WHERE access_token = ?1", [old_access_token])?;
        if removed == 0 {
            return Err(Error::UserTokenNotFound);
        }
        self.insert_token(token)?;
        tx.commit()?;
        Ok(())
    }

    // ========== Store Operations ==========

    /// Insert a store
    pub fn insert_store(&self, store: &NewStore) -> Result<Store> {
        self.conn.execute(
            r#"
            INSERT INTO stores (kakao_place_id, category_id, region_code, store_name, address_name, road_address_name, x, y)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                store.kakao_place_id,
                store.category_id,
                store.region_code,
                store.store_name,
                store.address_name,
                store.road_address_name,
                store.x,
                store.y,
            ],
        )?;
        Ok(Store {
            id: self.conn.last_insert_rowid(),
            kakao_place_id: store.kakao_place_id,
            category_id: store.category_id,
            region_code: store.region_code.clone(),
            store_name: store.store_name.clone(),
            address_name: store.address_name.clone(),
            road_address_name: store.road_address_name.clone(),
            x: store.x.clone(),
            y: store.y.clone(),
            like_cnt: 0,
        })
    }

    /// Get a store by id
    pub fn get_store(&self, id: i64) -> Result<Option<Store>> {
        let sql = format!("SELECT {STORE_COLUMNS} FROM stores WHERE id = ?1");
        self.conn
            .query_row(&sql, [id], row_to_store)
            .optional()
            .map_err(Into::into)
    }

    /// Get the store mirroring a provider place
    pub fn find_store_by_place_id(&self, kakao_place_id: i64) -> Result<Option<Store>> {
        let sql = format!("SELECT {STORE_COLUMNS} FROM stores WHERE kakao_place_id = ?1");
        self.conn
            .query_row(&sql, [kakao_place_id], row_to_store)
            .optional()
            .map_err(Into::into)
    }

    /// Bulk lookup of like and review counters for the given provider places.
    ///
    /// One query regardless of how many ids are passed; unknown ids are absent
    /// from the result.
    pub fn find_store_summaries(&self, kakao_place_ids: &[i64]) -> Result<Vec<StoreSummary>> {
        if kakao_place_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; kakao_place_ids.len()].join(", ");
        let sql = format!(
            "SELECT s.id, s.kakao_place_id, s.like_cnt, COUNT(r.id)
             FROM stores s
             LEFT JOIN reviews r ON r.store_id = s.id
             WHERE s.kakao_place_id IN ({placeholders})
             GROUP BY s.id"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let summaries = stmt
            .query_map(params_from_iter(kakao_place_ids.iter()), |row| {
                Ok(StoreSummary {
                    store_id: row.get(0)?,
                    kakao_place_id: row.get(1)?,
                    like_cnt: row.get(2)?,
                    review_cnt: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(summaries)
    }

    /// Store with its leaf category name and review count
    pub fn get_store_detail(&self, id: i64) -> Result<Option<StoreDetail>> {
        self.conn
            .query_row(
                r#"
                SELECT s.id, s.kakao_place_id, s.store_name, c.category_name, s.region_code,
                       s.address_name, s.road_address_name, s.x, s.y, s.like_cnt,
                       (SELECT COUNT(*) FROM reviews r WHERE r.store_id = s.id)
                FROM stores s
                JOIN categories c ON c.id = s.category_id
                WHERE s.id = ?1
                "#,
                [id],
                |row| {
                    Ok(StoreDetail {
                        store_id: row.get(0)?,
                        place_id: row.get(1)?,
                        store_name: row.get(2)?,
                        category_name: row.get(3)?,
                        region_code: row.get(4)?,
                        address_name: row.get(5)?,
                        road_address_name: row.get(6)?,
                        x: row.get(7)?,
                        y: row.get(8)?,
                        like_cnt: row.get(9)?,
                        review_cnt: row.get(10)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Record a like. Each user counts once per store; returns the current like count.
    pub fn like_store(&self, store_id: i64, user_id: i64, created_at: i64) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        if self.get_store(store_id)?.is_none() {
            return Err(Error::StoreNotFound(store_id));
        }

        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO store_likes (store_id, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![store_id, user_id, created_at],
        )?;
        if inserted == 1 {
            self.conn.execute("UPDATE stores SET like_cnt = like_cnt + 1 WHERE id = ?1", [store_id])?;
        }

        let like_cnt: i64 = self.conn.query_row("SELECT like_cnt FROM stores WHERE id = ?1", [store_id], |row| row.get(0))?;
        tx.commit()?;
        Ok(like_cnt)
    }

    // ========== Review Operations ==========

    /// Insert a review and its images.
    ///
    /// Not transactional on its own; `write_review` wraps it.
    pub fn insert_review(&self, store_id: i64, user_id: i64, review: &NewReview, created_at: i64) -> Result<Review> {
        self.conn.execute(
            r#"
            INSERT INTO reviews (store_id, user_id, star_score, content, revisit_yn, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![store_id, user_id, review.star_score, review.content, review.revisit_yn, created_at],
        )?;
        let review_id = self.conn.last_insert_rowid();

        let mut stmt = self
            .conn
            .prepare("INSERT INTO review_images (review_id, image_url, sort_order) VALUES (?1, ?2, ?3)")?;
        for (order, url) in review.images.iter().enumerate() {
            stmt.execute(params![review_id, url, order as i64])?;
        }

        Ok(Review {
            id: review_id,
            store_id,
            user_id,
            star_score: review.star_score,
            content: review.content.clone(),
            revisit_yn: review.revisit_yn,
            images: review.images.clone(),
            created_at,
        })
    }

    /// Write a review for a provider place, creating its store on first review.
    pub fn write_review(
        &self,
        user_id: i64,
        kakao_place_id: i64,
        place: &PlaceSnapshot,
        review: &NewReview,
        created_at: i64,
    ) -> Result<Review> {
        let tx = self.conn.unchecked_transaction()?;

        let store = match self.find_store_by_place_id(kakao_place_id)? {
            Some(store) => store,
            None => {
                if self.get_region(&place.region_code)?.is_none() {
                    return Err(Error::RegionNotFound(place.region_code.clone()));
                }
                let category = self.ensure_category_path(&split_category_path(&place.category_name))?;
                let store = self.insert_store(&NewStore::from_snapshot(kakao_place_id, category.id, place))?;
                tracing::info!("Created store {} for place {}", store.id, kakao_place_id);
                store
            }
        };

        let review = self.insert_review(store.id, user_id, review, created_at)?;
        tx.commit()?;
        Ok(review)
    }

    /// Count reviews of a store
    pub fn count_reviews(&self, store_id: i64) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM reviews WHERE store_id = ?1", [store_id], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Newest-first page of a store's reviews, strictly older than `more_id` when given
    pub fn list_reviews(&self, store_id: i64, more_id: Option<i64>, limit: usize) -> Result<Vec<ReviewView>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT r.id, r.user_id, u.nickname, u.profile, r.star_score, r.content, r.revisit_yn, r.created_at
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.store_id = ?1 AND (?2 IS NULL OR r.id < ?2)
            ORDER BY r.id DESC
            LIMIT ?3
            "#,
        )?;
        let mut reviews = stmt
            .query_map(params![store_id, more_id, limit as i64], |row| {
                Ok(ReviewView {
                    review_id: row.get(0)?,
                    user_id: row.get(1)?,
                    nickname: row.get(2)?,
                    profile: row.get(3)?,
                    star_score: row.get(4)?,
                    content: row.get(5)?,
                    revisit_yn: row.get(6)?,
                    images: Vec::new(),
                    created_at: row.get(7)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut images = self.images_for_reviews(reviews.iter().map(|r| r.review_id).collect())?;
        for review in &mut reviews {
            review.images = images.remove(&review.review_id).unwrap_or_default();
        }
        Ok(reviews)
    }

    fn images_for_reviews(&self, review_ids: Vec<i64>) -> Result<HashMap<i64, Vec<String>>> {
        let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
        if review_ids.is_empty() {
            return Ok(grouped);
        }

        let placeholders = vec!["?"; review_ids.len()].join(", ");
        let sql = format!(
            "SELECT review_id, image_url FROM review_images WHERE review_id IN ({placeholders}) ORDER BY review_id, sort_order"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(review_ids.iter()), |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (review_id, url) = row?;
            grouped.entry(review_id).or_default().push(url);
        }
        Ok(grouped)
    }

    /// Review images of a store, newest review first, upload order within a review
    pub fn preview_images(&self, store_id: i64, limit: usize) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT ri.image_url
            FROM review_images ri
            JOIN reviews r ON r.id = ri.review_id
            WHERE r.store_id = ?1
            ORDER BY r.created_at DESC, r.id DESC, ri.sort_order ASC
            LIMIT ?2
            "#,
        )?;
        let images = stmt
            .query_map(params![store_id, limit as i64], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(images)
    }

    // ========== Ranking Operations ==========

    /// Stores ranked by reviews plus likes created in `[from, to)`.
    ///
    /// Ties are broken by store id ascending. Stores without activity in the
    /// window are not returned.
    pub fn rank_stores(&self, from: i64, to: i64, region_prefix: Option<&str>, limit: usize) -> Result<Vec<RankedStore>> {
        let mut stmt = self.conn.prepare(
            r#"
            WITH activity AS (
                SELECT store_id FROM reviews WHERE created_at >= ?1 AND created_at < ?2
                UNION ALL
                SELECT store_id FROM store_likes WHERE created_at >= ?1 AND created_at < ?2
            )
            SELECT s.id, s.store_name, g.region_name, COUNT(*) AS score
            FROM activity a
            JOIN stores s ON s.id = a.store_id
            JOIN regions g ON g.code = s.region_code
            WHERE ?3 IS NULL OR s.region_code LIKE ?3 || '%'
            GROUP BY s.id, s.store_name, g.region_name
            ORDER BY score DESC, s.id ASC
            LIMIT ?4
            "#,
        )?;
        let ranked = stmt
            .query_map(params![from, to, region_prefix, limit as i64], |row| {
                Ok(RankedStore {
                    store_id: row.get(0)?,
                    store_name: row.get(1)?,
                    region_name: row.get(2)?,
                    score: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ranked)
    }

    /// First image of the most recent review of a store that has any image
    pub fn representative_image(&self, store_id: i64) -> Result<Option<String>> {
        self.conn
            .query_row(
                r#"
                SELECT ri.image_url
                FROM reviews r
                JOIN review_images ri ON ri.review_id = r.id
                WHERE r.store_id = ?1
                ORDER BY r.created_at DESC, r.id DESC, ri.sort_order ASC
                LIMIT 1
                "#,
                [store_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    // ========== Eat-together Operations ==========

    /// Write a post in an existing region
    pub fn insert_eat_together_post(&self, user_id: i64, post: &NewEatTogetherPost, created_at: i64) -> Result<i64> {
        if self.get_region(&post.region_code)?.is_none() {
            return Err(Error::RegionNotFound(post.region_code.clone()));
        }
        self.conn.execute(
            r#"
            INSERT INTO eat_together_posts (user_id, region_code, subject, content, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![user_id, post.region_code, post.subject, post.content, created_at],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// A post with author, region name and reply count
    pub fn get_eat_together_post(&self, post_id: i64) -> Result<Option<EatTogetherPost>> {
        let sql = format!("{EAT_TOGETHER_POST_SELECT} WHERE p.id = ?1");
        self.conn
            .query_row(&sql, [post_id], row_to_eat_together_post)
            .optional()
            .map_err(Into::into)
    }

    /// Newest-first page of posts whose region code starts with `region_prefix`,
    /// strictly older than `more_id` when given
    pub fn list_eat_together_posts(
        &self,
        region_prefix: &str,
        more_id: Option<i64>,
        limit: usize,
    ) -> Result<Vec<EatTogetherPost>> {
        let sql = format!(
            "{EAT_TOGETHER_POST_SELECT}
             WHERE p.region_code LIKE ?1 || '%' AND (?2 IS NULL OR p.id < ?2)
             ORDER BY p.id DESC
             LIMIT ?3"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let posts = stmt
            .query_map(params![region_prefix, more_id, limit as i64], row_to_eat_together_post)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(posts)
    }

    /// Reply to an existing post
    pub fn insert_eat_together_reply(
        &self,
        post_id: i64,
        user_id: i64,
        reply: &NewEatTogetherReply,
        created_at: i64,
    ) -> Result<i64> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM eat_together_posts WHERE id = ?1)",
            [post_id],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(Error::EatTogetherPostNotFound(post_id));
        }

        self.conn.execute(
            "INSERT INTO eat_together_replies (post_id, user_id, content, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![post_id, user_id, reply.content, created_at],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Replies of a post in writing order
    pub fn list_eat_together_replies(&self, post_id: i64) -> Result<Vec<EatTogetherReply>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT r.id, r.post_id, r.user_id, u.nickname, u.profile, r.content, r.created_at
            FROM eat_together_replies r
            JOIN users u ON u.id = r.user_id
            WHERE r.post_id = ?1
            ORDER BY r.id ASC
            "#,
        )?;
        let replies = stmt
            .query_map([post_id], |row| {
                Ok(EatTogetherReply {
                    reply_id: row.get(0)?,
                    post_id: row.get(1)?,
                    user_id: row.get(2)?,
                    nickname: row.get(3)?,
                    profile: row.get(4)?,
                    content: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(replies)
    }

    // ========== Statistics ==========

    fn count_rows(&self, table: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            stores: self.count_rows("stores")?,
            reviews: self.count_rows("reviews")?,
            review_images: self.count_rows("review_images")?,
            likes: self.count_rows("store_likes")?,
            users: self.count_rows("users")?,
            categories: self.count_rows("categories")?,
            regions: self.count_rows("regions")?,
            eat_together_posts: self.count_rows("eat_together_posts")?,
            eat_together_replies: self.count_rows("eat_together_replies")?,
        })
    }
}

fn row_to_store(row: &rusqlite::Row) -> rusqlite::Result<Store> {
    Ok(Store {
        id: row.get(0)?,
        kakao_place_id: row.get(1)?,
        category_id: row.get(2)?,
        region_code: row.get(3)?,
        store_name: row.get(4)?,
        address_name: row.get(5)?,
        road_address_name: row.get(6)?,
        x: row.get(7)?,
        y: row.get(8)?,
        like_cnt: row.get(9)?,
    })
}

fn row_to_category(row: &rusqlite::Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        up_category_id: row.get(1)?,
        category_depth: row.get(2)?,
        category_name: row.get(3)?,
    })
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    let provider_str: String = row.get(1)?;
    let provider: OauthProvider = provider_str.parse().map_err(|e: Error| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(User {
        id: row.get(0)?,
        provider,
        oauth_id: row.get(2)?,
        nickname: row.get(3)?,
        profile: row.get(4)?,
    })
}

fn row_to_eat_together_post(row: &rusqlite::Row) -> rusqlite::Result<EatTogetherPost> {
    Ok(EatTogetherPost {
        post_id: row.get(0)?,
        user_id: row.get(1)?,
        nickname: row.get(2)?,
        profile: row.get(3)?,
        region_code: row.get(4)?,
        region_name: row.get(5)?,
        subject: row.get(6)?,
        content: row.get(7)?,
        reply_cnt: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn row_to_token(row: &rusqlite::Row) -> rusqlite::Result<UserToken> {
    Ok(UserToken {
        user_id: row.get(0)?,
        access_token: row.get(1)?,
        refresh_token: row.get(2)?,
        expires_at: row.get(3)?,
    })
}

/// A store with its activity count inside a ranking window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedStore {
    pub store_id: i64,
    pub store_name: String,
    pub region_name: String,
    pub score: i64,
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DbStats {
    pub stores: usize,
    pub reviews: usize,
    pub review_images: usize,
    pub likes: usize,
    pub users: usize,
    pub categories: usize,
    pub regions: usize,
    pub eat_together_posts: usize,
    pub eat_together_replies: usize,
}

impl DbStats {
    /// Label/value pairs in display order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Stores", self.stores.to_string()),
            ("Reviews", self.reviews.to_string()),
            ("Review images", self.review_images.to_string()),
            ("Likes", self.likes.to_string()),
            ("Users", self.users.to_string()),
            ("Categories", self.categories.to_string()),
            ("Regions", self.regions.to_string()),
            ("Eat-together posts", self.eat_together_posts.to_string()),
            ("Eat-together replies", self.eat_together_replies.to_string()),
        ]
    }
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        for (label, value) in self.rows() {
            writeln!(f, "  {}: {}", label, value)?;
        }
        Ok(())
    }
}
