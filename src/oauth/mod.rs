//! Social login
//!
//! The client obtains a provider access token on its own and hands it to
//! the server, which resolves it to a provider profile through
//! [`SocialLogin`] and then issues an Ojeomme session.

pub mod kakao;

use crate::Result;
use crate::domain::OauthProvider;
use async_trait::async_trait;

pub use kakao::KakaoOauthClient;

/// Account details reported by a social provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialProfile {
    pub provider: OauthProvider,
    pub oauth_id: String,
    pub nickname: String,
    pub profile: Option<String>,
}

/// Resolves provider access tokens to profiles.
///
/// Failures are reported as [`crate::Error::SocialLogin`].
#[async_trait]
pub trait SocialLogin: Send + Sync {
    async fn fetch_profile(&self, provider: OauthProvider, access_token: &str) -> Result<SocialProfile>;
}
