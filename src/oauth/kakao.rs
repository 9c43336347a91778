//! Kakao user profile lookup (`GET {base_url}/v2/user/me`)

use super::{SocialLogin, SocialProfile};
use crate::config::OauthConfig;
use crate::domain::OauthProvider;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const USER_ME_PATH: &str = "/v2/user/me";

#[derive(Debug, Deserialize)]
struct KakaoUserResponse {
    id: i64,
    #[serde(default)]
    properties: KakaoUserProperties,
}

#[derive(Debug, Default, Deserialize)]
struct KakaoUserProperties {
    nickname: Option<String>,
    profile_image: Option<String>,
}

impl From<KakaoUserResponse> for SocialProfile {
    fn from(user: KakaoUserResponse) -> Self {
        let oauth_id = user.id.to_string();
        SocialProfile {
            provider: OauthProvider::Kakao,
            nickname: user
                .properties
                .nickname
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| format!("kakao-{}", oauth_id)),
            profile: user.properties.profile_image.filter(|p| !p.is_empty()),
            oauth_id,
        }
    }
}

pub struct KakaoOauthClient {
    http: reqwest::Client,
    base_url: String,
}

impl KakaoOauthClient {
    pub fn new(config: &OauthConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::SocialLogin(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.kakao_api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SocialLogin for KakaoOauthClient {
    async fn fetch_profile(&self, provider: OauthProvider, access_token: &str) -> Result<SocialProfile> {
        match provider {
            OauthProvider::Kakao => {}
        }

        let response = self
            .http
            .get(format!("{}{}", self.base_url, USER_ME_PATH))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| Error::SocialLogin(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::SocialLogin(format!("Kakao user API error: {}", status)));
        }

        let user: KakaoUserResponse = response
            .json()
            .await
            .map_err(|e| Error::SocialLogin(format!("undecodable user response: {}", e)))?;

        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_user_response() {
        let user: KakaoUserResponse = serde_json::from_str(
            r#"{"id": 2632890492, "properties": {"nickname": "오점뭐", "profile_image": "http://k.kakaocdn.net/p.jpg"}}"#,
        )
        .unwrap();
        let profile = SocialProfile::from(user);
        assert_eq!(profile.oauth_id, "2632890492");
        assert_eq!(profile.nickname, "오점뭐");
        assert_eq!(profile.profile.as_deref(), Some("http://k.kakaocdn.net/p.jpg"));
    }

    #[test]
    fn test_profile_without_properties() {
        let user: KakaoUserResponse = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        let profile = SocialProfile::from(user);
        assert_eq!(profile.nickname, "kakao-7");
        assert!(profile.profile.is_none());
    }
}
