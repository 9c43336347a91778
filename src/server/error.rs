//! API error catalog
//!
//! Every library error maps to exactly one catalog entry. Responses carry
//! the entry's status and its fixed message as a plain-text body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    InvalidRequest,
    NotSupportOauthProvider,
    SocialLogin,
    OauthTokenBeforeExpired,
    UserNotFound,
    UserTokenNotFound,
    Unauthorized,
    StoreNotFound,
    RegionNotFound,
    EatTogetherPostNotFound,
    SearchMaps,
    Internal,
}

impl ApiErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ApiErrorCode::InvalidRequest | ApiErrorCode::OauthTokenBeforeExpired => StatusCode::BAD_REQUEST,
            ApiErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiErrorCode::NotSupportOauthProvider
            | ApiErrorCode::UserNotFound
            | ApiErrorCode::UserTokenNotFound
            | ApiErrorCode::StoreNotFound
            | ApiErrorCode::RegionNotFound
            | ApiErrorCode::EatTogetherPostNotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::SocialLogin | ApiErrorCode::SearchMaps | ApiErrorCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ApiErrorCode::InvalidRequest => "잘못된 요청입니다.",
            ApiErrorCode::NotSupportOauthProvider => "지원하지 않는 소셜 플랫폼입니다.",
            ApiErrorCode::SocialLogin => "소셜 로그인에 실패했습니다.",
            ApiErrorCode::OauthTokenBeforeExpired => "만료되지 않은 토큰입니다.",
            ApiErrorCode::UserNotFound => "회원을 찾을 수 없습니다.",
            ApiErrorCode::UserTokenNotFound => "잘못된 토큰입니다.",
            ApiErrorCode::Unauthorized => "로그인이 필요한 서비스입니다.",
            ApiErrorCode::StoreNotFound => "매장을 찾을 수 없습니다.",
            ApiErrorCode::RegionNotFound => "지역을 찾을 수 없습니다.",
            ApiErrorCode::EatTogetherPostNotFound => "게시글을 찾을 수 없습니다.",
            ApiErrorCode::SearchMaps => "매장을 찾는데 오류가 발생했습니다.\n관리자에게 문의하세요",
            ApiErrorCode::Internal => "서버 오류가 발생했습니다.",
        }
    }
}

impl From<&Error> for ApiErrorCode {
    fn from(error: &Error) -> Self {
        match error {
            Error::InvalidRequest(_) => ApiErrorCode::InvalidRequest,
            Error::NotSupportOauthProvider(_) => ApiErrorCode::NotSupportOauthProvider,
            Error::SocialLogin(_) => ApiErrorCode::SocialLogin,
            Error::OauthTokenBeforeExpired => ApiErrorCode::OauthTokenBeforeExpired,
            Error::UserNotFound(_) => ApiErrorCode::UserNotFound,
            Error::UserTokenNotFound => ApiErrorCode::UserTokenNotFound,
            Error::Unauthorized => ApiErrorCode::Unauthorized,
            Error::StoreNotFound(_) => ApiErrorCode::StoreNotFound,
            Error::RegionNotFound(_) => ApiErrorCode::RegionNotFound,
            Error::EatTogetherPostNotFound(_) => ApiErrorCode::EatTogetherPostNotFound,
            Error::SearchMaps(_) => ApiErrorCode::SearchMaps,
            Error::Storage(_) | Error::Io(_) => ApiErrorCode::Internal,
        }
    }
}

impl IntoResponse for ApiErrorCode {
    fn into_response(self) -> Response {
        (self.status(), self.message()).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let code = ApiErrorCode::from(&self);
        match code {
            ApiErrorCode::Internal | ApiErrorCode::SearchMaps | ApiErrorCode::SocialLogin => {
                tracing::error!("{}", self)
            }
            _ => tracing::debug!("{}", self),
        }
        code.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entries() {
        let store = ApiErrorCode::from(&Error::StoreNotFound(-1));
        assert_eq!(store.status(), StatusCode::NOT_FOUND);
        assert_eq!(store.message(), "매장을 찾을 수 없습니다.");

        let maps = ApiErrorCode::from(&Error::SearchMaps("timeout".to_string()));
        assert_eq!(maps.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(maps.message(), "매장을 찾는데 오류가 발생했습니다.\n관리자에게 문의하세요");

        assert_eq!(ApiErrorCode::from(&Error::Unauthorized).status(), StatusCode::UNAUTHORIZED);
        let post = ApiErrorCode::from(&Error::EatTogetherPostNotFound(3));
        assert_eq!(post.status(), StatusCode::NOT_FOUND);
        assert_eq!(post.message(), "게시글을 찾을 수 없습니다.");
        assert_eq!(ApiErrorCode::from(&Error::OauthTokenBeforeExpired).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_errors_are_internal() {
        let error = Error::Storage(rusqlite::Error::QueryReturnedNoRows);
        let code = ApiErrorCode::from(&error);
        assert_eq!(code, ApiErrorCode::Internal);
        assert_eq!(code.message(), "서버 오류가 발생했습니다.");

        let io = Error::Io(std::io::Error::other("disk"));
        assert_eq!(ApiErrorCode::from(&io), ApiErrorCode::Internal);
    }

    #[test]
    fn test_response_has_plain_message() {
        let response = Error::RegionNotFound("0000".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(
            response.headers()[axum::http::header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
    }
}
