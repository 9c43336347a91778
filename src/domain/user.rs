//! Users and session tokens

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Social login platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OauthProvider {
    Kakao,
}

impl OauthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OauthProvider::Kakao => "kakao",
        }
    }
}

impl FromStr for OauthProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "kakao" => Ok(OauthProvider::Kakao),
            _ => Err(Error::NotSupportOauthProvider(s.to_string())),
        }
    }
}

impl std::fmt::Display for OauthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub provider: OauthProvider,
    /// Account id at the provider
    pub oauth_id: String,
    pub nickname: String,
    pub profile: Option<String>,
}

/// A persisted session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserToken {
    pub user_id: i64,
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp (seconds) after which the access token is rejected
    pub expires_at: i64,
}

impl UserToken {
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// Freshly issued credentials handed to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

impl TokenPair {
    /// Generate a random access/refresh pair valid for `ttl_secs` from `now`.
    pub fn generate(now: i64, ttl_secs: i64) -> Self {
        Self {
            access_token: random_token(),
            refresh_token: random_token(),
            expires_at: now + ttl_secs,
        }
    }

    pub fn into_user_token(self, user_id: i64) -> UserToken {
        UserToken {
            user_id,
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_at,
        }
    }
}

fn random_token() -> String {
    hex::encode(rand::random::<[u8; 32]>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!("kakao".parse::<OauthProvider>().unwrap(), OauthProvider::Kakao);
        assert_eq!("KAKAO".parse::<OauthProvider>().unwrap(), OauthProvider::Kakao);
        assert!(matches!(
            "naver".parse::<OauthProvider>(),
            Err(Error::NotSupportOauthProvider(p)) if p == "naver"
        ));
    }

    #[test]
    fn test_generated_tokens_are_distinct() {
        let pair = TokenPair::generate(1_000, 60);
        assert_eq!(pair.access_token.len(), 64);
        assert_ne!(pair.access_token, pair.refresh_token);
        assert_eq!(pair.expires_at, 1_060);

        let token = pair.into_user_token(7);
        assert!(!token.is_expired(1_059));
        assert!(token.is_expired(1_060));
    }
}
