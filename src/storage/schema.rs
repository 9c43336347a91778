//! Database schema definitions

/// SQL to create the region code table
pub const CREATE_REGIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS regions (
    code TEXT PRIMARY KEY,
    region_name TEXT NOT NULL
)
"#;

/// SQL to create the category adjacency table
pub const CREATE_CATEGORIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    up_category_id INTEGER REFERENCES categories(id),
    category_depth INTEGER NOT NULL,
    category_name TEXT NOT NULL
)
"#;

/// SQL to create the users table
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    provider TEXT NOT NULL,
    oauth_id TEXT NOT NULL,
    nickname TEXT NOT NULL,
    profile TEXT,
    UNIQUE(provider, oauth_id)
)
"#;

/// SQL to create the session token table
pub const CREATE_USER_TOKENS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS user_tokens (
    access_token TEXT PRIMARY KEY,
    refresh_token TEXT NOT NULL UNIQUE,
    user_id INTEGER NOT NULL REFERENCES users(id),
    expires_at INTEGER NOT NULL
)
"#;

/// SQL to create the stores table.
/// One store per provider place.
pub const CREATE_STORES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS stores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    kakao_place_id INTEGER NOT NULL UNIQUE,
    category_id INTEGER NOT NULL REFERENCES categories(id),
    region_code TEXT NOT NULL REFERENCES regions(code),
    store_name TEXT NOT NULL,
    address_name TEXT NOT NULL,
    road_address_name TEXT NOT NULL,
    x TEXT NOT NULL,
    y TEXT NOT NULL,
    like_cnt INTEGER NOT NULL DEFAULT 0
)
"#;

/// SQL to create the reviews table
pub const CREATE_REVIEWS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    store_id INTEGER NOT NULL REFERENCES stores(id),
    user_id INTEGER NOT NULL REFERENCES users(id),
    star_score INTEGER NOT NULL CHECK (star_score BETWEEN 1 AND 5),
    content TEXT NOT NULL,
    revisit_yn INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
)
"#;

/// SQL to create the review image table; `sort_order` keeps upload order
pub const CREATE_REVIEW_IMAGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS review_images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    review_id INTEGER NOT NULL REFERENCES reviews(id),
    image_url TEXT NOT NULL,
    sort_order INTEGER NOT NULL
)
"#;

/// SQL to create the store like table
pub const CREATE_STORE_LIKES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS store_likes (
    store_id INTEGER NOT NULL REFERENCES stores(id),
    user_id INTEGER NOT NULL REFERENCES users(id),
    created_at INTEGER NOT NULL,
    PRIMARY KEY (store_id, user_id)
)
"#;

/// SQL to create the eat-together post table
pub const CREATE_EAT_TOGETHER_POSTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS eat_together_posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    region_code TEXT NOT NULL REFERENCES regions(code),
    subject TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at INTEGER NOT NULL
)
"#;

/// SQL to create the eat-together reply table
pub const CREATE_EAT_TOGETHER_REPLIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS eat_together_replies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id INTEGER NOT NULL REFERENCES eat_together_posts(id),
    user_id INTEGER NOT NULL REFERENCES users(id),
    content TEXT NOT NULL,
    created_at INTEGER NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_categories_up ON categories(up_category_id, category_depth)",
    "CREATE INDEX IF NOT EXISTS idx_categories_depth_name ON categories(category_depth, category_name)",
    "CREATE INDEX IF NOT EXISTS idx_user_tokens_user ON user_tokens(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_stores_region ON stores(region_code)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_store ON reviews(store_id, id)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_created ON reviews(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_review_images_review ON review_images(review_id, sort_order)",
    "CREATE INDEX IF NOT EXISTS idx_store_likes_created ON store_likes(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_eat_together_posts_region ON eat_together_posts(region_code, id)",
    "CREATE INDEX IF NOT EXISTS idx_eat_together_replies_post ON eat_together_replies(post_id, id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_REGIONS_TABLE,
        CREATE_CATEGORIES_TABLE,
        CREATE_USERS_TABLE,
        CREATE_USER_TOKENS_TABLE,
        CREATE_STORES_TABLE,
        CREATE_REVIEWS_TABLE,
        CREATE_REVIEW_IMAGES_TABLE,
        CREATE_STORE_LIKES_TABLE,
        CREATE_EAT_TOGETHER_POSTS_TABLE,
        CREATE_EAT_TOGETHER_REPLIES_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
