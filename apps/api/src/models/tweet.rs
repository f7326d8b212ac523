use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Tweet {
    pub tweet_id: Uuid,
    #[validate(length(min = 1, max = 256))]
    pub content: String,
    /// Stamped when the payload is parsed, so each request gets its own time.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[validate(nested)]
    pub by: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tweet_json() -> serde_json::Value {
        json!({
            "tweet_id": "9b2d3c1e-4f5a-4b6c-8d7e-0f1a2b3c4d5e",
            "content": "hola mundo",
            "by": {
                "user_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "email": "maria@example.com",
                "first_name": "María",
                "last_name": "López"
            }
        })
    }

    #[test]
    fn test_created_at_defaults_per_parse() {
        let first: Tweet = serde_json::from_value(tweet_json()).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second: Tweet = serde_json::from_value(tweet_json()).unwrap();
        assert!(second.created_at > first.created_at);
        assert!(first.updated_at.is_none());
    }

    #[test]
    fn test_explicit_created_at_kept() {
        let mut value = tweet_json();
        value["created_at"] = json!("2021-09-01T10:00:00Z");
        let tweet: Tweet = serde_json::from_value(value).unwrap();
        assert_eq!(tweet.created_at.to_rfc3339(), "2021-09-01T10:00:00+00:00");
    }

    #[test]
    fn test_content_length_limits() {
        let mut value = tweet_json();
        value["content"] = json!("x".repeat(256));
        let tweet: Tweet = serde_json::from_value(value).unwrap();
        assert!(tweet.validate().is_ok());

        let mut value = tweet_json();
        value["content"] = json!("x".repeat(257));
        let tweet: Tweet = serde_json::from_value(value).unwrap();
        assert!(tweet.validate().is_err());
    }

    #[test]
    fn test_author_is_validated() {
        let mut value = tweet_json();
        value["by"]["email"] = json!("nope");
        let tweet: Tweet = serde_json::from_value(value).unwrap();
        let errors = tweet.validate().unwrap_err();
        assert!(errors.errors().contains_key("by"));
    }

    #[test]
    fn test_serialized_fields_are_strings() {
        let tweet: Tweet = serde_json::from_value(tweet_json()).unwrap();
        let value = serde_json::to_value(&tweet).unwrap();
        assert!(value["tweet_id"].is_string());
        assert!(value["created_at"].is_string());
        assert!(value["by"]["user_id"].is_string());
        assert!(value["updated_at"].is_null());
    }
}
