//! "Eat together" board
//!
//! Users post invitations to share a meal inside a region; other users
//! answer with replies. Posts and replies are append-only.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Longest accepted post subject, in characters
pub const MAX_SUBJECT_CHARS: usize = 100;

/// Post payload written by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEatTogetherPost {
    pub region_code: String,
    pub subject: String,
    pub content: String,
}

impl NewEatTogetherPost {
    pub fn validate(&self) -> Result<()> {
        if self.region_code.trim().is_empty() {
            return Err(Error::InvalidRequest("region code is empty".to_string()));
        }
        if self.subject.trim().is_empty() {
            return Err(Error::InvalidRequest("post subject is empty".to_string()));
        }
        if self.subject.chars().count() > MAX_SUBJECT_CHARS {
            return Err(Error::InvalidRequest(format!(
                "post subject is longer than {} characters",
                MAX_SUBJECT_CHARS
            )));
        }
        if self.content.trim().is_empty() {
            return Err(Error::InvalidRequest("post content is empty".to_string()));
        }
        Ok(())
    }
}

/// A post joined with its author, region and reply count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EatTogetherPost {
    pub post_id: i64,
    pub user_id: i64,
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub region_code: String,
    pub region_name: String,
    pub subject: String,
    pub content: String,
    pub reply_cnt: i64,
    /// Unix timestamp (seconds)
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEatTogetherReply {
    pub content: String,
}

impl NewEatTogetherReply {
    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(Error::InvalidRequest("reply content is empty".to_string()));
        }
        Ok(())
    }
}

/// A reply joined with its author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EatTogetherReply {
    pub reply_id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub content: String,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(subject: &str, content: &str) -> NewEatTogetherPost {
        NewEatTogetherPost {
            region_code: "1168010800".to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_post_validation() {
        assert!(post("점심 같이 드실 분", "12시 논현역").validate().is_ok());
        assert!(post(" ", "12시 논현역").validate().is_err());
        assert!(post("점심", "").validate().is_err());
        assert!(post(&"가".repeat(MAX_SUBJECT_CHARS + 1), "내용").validate().is_err());

        let mut no_region = post("점심", "내용");
        no_region.region_code = String::new();
        assert!(matches!(no_region.validate(), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_reply_validation() {
        assert!(NewEatTogetherReply { content: "저요".to_string() }.validate().is_ok());
        assert!(NewEatTogetherReply { content: "  ".to_string() }.validate().is_err());
    }

    #[test]
    fn test_post_json_field_names() {
        let parsed: NewEatTogetherPost =
            serde_json::from_str(r#"{"regionCode": "1168010800", "subject": "점심", "content": "12시"}"#).unwrap();
        assert_eq!(parsed.region_code, "1168010800");
    }
}
