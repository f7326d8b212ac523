use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::errors::AppError;
use crate::extract::ValidatedJson;
use crate::models::tweet::Tweet;
use crate::shaping::shape_records;
use crate::state::AppState;

/// GET /
pub async fn list_tweets(State(state): State<AppState>) -> Result<Json<Vec<Tweet>>, AppError> {
    let records = state.tweets.list_all().await?;
    Ok(Json(shape_records(records)?))
}

/// POST /post
pub async fn post_tweet(
    State(state): State<AppState>,
    ValidatedJson(tweet): ValidatedJson<Tweet>,
) -> Result<(StatusCode, Json<Tweet>), AppError> {
    state.tweets.append(&tweet).await?;
    info!("Posted tweet {} by {}", tweet.tweet_id, tweet.by.user_id);
    Ok((StatusCode::CREATED, Json(tweet)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::routes::build_twitter_router;
    use crate::routes::test_support::{get, json_request, memory_state, send};
    use crate::state::AppState;
    use crate::store::FileStore;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    fn tweet_json(content: &str) -> Value {
        json!({
            "tweet_id": "9b2d3c1e-4f5a-4b6c-8d7e-0f1a2b3c4d5e",
            "content": content,
            "by": {
                "user_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "email": "maria@example.com",
                "first_name": "María",
                "last_name": "López",
                "birth_date": "1994-02-11"
            }
        })
    }

    #[tokio::test]
    async fn test_post_then_list_round_trip() {
        let state = memory_state();
        let (status, posted) = send(
            build_twitter_router(state.clone()),
            json_request("POST", "/post", tweet_json("hola mundo")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(posted["created_at"].is_string());

        let (status, listed) = send(build_twitter_router(state), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        let tweets = listed.as_array().unwrap();
        assert_eq!(tweets.len(), 1);
        let tweet = &tweets[0];
        assert_eq!(tweet["content"], "hola mundo");
        assert_eq!(tweet["by"]["email"], "maria@example.com");
        assert_eq!(tweet["by"]["first_name"], "María");
        assert_eq!(tweet["by"]["last_name"], "López");
        assert_eq!(tweet["tweet_id"], "9b2d3c1e-4f5a-4b6c-8d7e-0f1a2b3c4d5e");
        assert_eq!(tweet["created_at"], posted["created_at"]);
        assert!(tweet["updated_at"].is_null());
    }

    #[tokio::test]
    async fn test_post_persists_strings_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let users = FileStore::new(dir.path().join("users.json"));
        let tweets = FileStore::new(dir.path().join("tweets.json"));
        users.ensure_exists().await.unwrap();
        tweets.ensure_exists().await.unwrap();
        let state = AppState::new(Arc::new(users), Arc::new(tweets.clone()));

        let (status, _) = send(
            build_twitter_router(state),
            json_request("POST", "/post", tweet_json("guardado en disco")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let raw = std::fs::read_to_string(tweets.path()).unwrap();
        let on_disk: Value = serde_json::from_str(&raw).unwrap();
        let record = &on_disk[0];
        assert!(record["tweet_id"].is_string());
        assert!(record["created_at"].is_string());
        assert!(record["by"]["user_id"].is_string());
        assert_eq!(record["by"]["birth_date"], "1994-02-11");
    }

    #[tokio::test]
    async fn test_post_rejects_empty_content() {
        let state = memory_state();
        let (status, body) = send(
            build_twitter_router(state.clone()),
            json_request("POST", "/post", tweet_json("")),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["fields"][0]["field"], "content");
        assert!(state.tweets.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_reports_nested_author_errors() {
        let mut payload = tweet_json("hola");
        payload["by"]["last_name"] = json!("");
        let (status, body) = send(
            build_twitter_router(memory_state()),
            json_request("POST", "/post", payload),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["fields"][0]["field"], "by.last_name");
    }

    #[tokio::test]
    async fn test_list_fails_when_store_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(
            Arc::new(FileStore::new(dir.path().join("users.json"))),
            Arc::new(FileStore::new(dir.path().join("tweets.json"))),
        );
        let (status, body) = send(build_twitter_router(state), get("/")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "STORE_ERROR");
    }

    #[tokio::test]
    async fn test_tweet_stubs_are_not_implemented() {
        let id = "9b2d3c1e-4f5a-4b6c-8d7e-0f1a2b3c4d5e";
        for (method, uri) in [
            ("GET", format!("/tweets/{id}")),
            ("DELETE", format!("/tweets/{id}/delete")),
            ("PUT", format!("/tweets/{id}/update")),
        ] {
            let (status, _) = send(
                build_twitter_router(memory_state()),
                json_request(method, &uri, json!({})),
            )
            .await;
            assert_eq!(status, StatusCode::NOT_IMPLEMENTED, "{method} {uri}");
        }
    }
}
