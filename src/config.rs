use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when `maps.api_key` / `oauth` keys are unset
pub const KAKAO_API_KEY_ENV: &str = "KAKAO_REST_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OjeommeConfig {
    pub database: Option<String>,
    pub server: ServerConfig,
    pub maps: MapsConfig,
    pub oauth: OauthConfig,
    pub ranking: RankingConfig,
    pub store: StoreConfig,
    pub review: ReviewConfig,
    pub eat_together: EatTogetherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Kakao Local keyword search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapsConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dapi.kakao.com".to_string(),
            api_key: None,
            timeout_ms: 3000,
        }
    }
}

impl MapsConfig {
    /// Configured key, falling back to `KAKAO_REST_API_KEY`
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(KAKAO_API_KEY_ENV).ok())
    }
}

/// Social login provider endpoint and session lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OauthConfig {
    pub kakao_api_base_url: String,
    pub timeout_ms: u64,
    pub access_token_ttl_secs: i64,
}

impl Default for OauthConfig {
    fn default() -> Self {
        Self {
            kakao_api_base_url: "https://kapi.kakao.com".to_string(),
            timeout_ms: 3000,
            access_token_ttl_secs: 60 * 60 * 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Number of stores in today's ranking
    pub size: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { size: 5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub preview_image_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { preview_image_limit: 10 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub page_size: usize,
    pub max_images: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self { page_size: 10, max_images: 5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EatTogetherConfig {
    pub page_size: usize,
}

impl Default for EatTogetherConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("ojeomme.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".ojeomme").join("ojeomme.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<OjeommeConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: OjeommeConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &OjeommeConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: OjeommeConfig = toml::from_str(
            r#"
            database = "data/ojeomme.db"

            [ranking]
            size = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.database.as_deref(), Some("data/ojeomme.db"));
        assert_eq!(config.ranking.size, 10);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.maps.base_url, "https://dapi.kakao.com");
        assert_eq!(config.review.max_images, 5);
        assert_eq!(config.eat_together.page_size, 10);
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ojeomme.toml");

        let mut config = OjeommeConfig::default();
        config.maps.api_key = Some("secret".to_string());
        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.maps.resolved_api_key().as_deref(), Some("secret"));
        assert!(load_config(Some(&dir.path().join("missing.toml"))).unwrap().is_none());
    }

    #[test]
    fn test_ensure_db_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db = default_database_path_in(dir.path());
        ensure_db_dir(&db).unwrap();
        assert!(dir.path().join(".ojeomme").is_dir());
    }
}
