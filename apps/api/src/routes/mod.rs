pub mod health;
pub mod tutorial;
pub mod tweets;
pub mod users;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::config::ServiceKind;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

pub fn build_tutorial_router() -> Router {
    Router::new()
        .route(
            "/health",
            get(|| health::health_handler(ServiceKind::Tutorial)),
        )
        .route("/", get(tutorial::home))
        .route("/person/new", post(tutorial::create_person))
        .route("/person/detail", get(tutorial::show_person))
        .route(
            "/person/detail/:person_id",
            get(tutorial::show_person_by_id),
        )
        .route("/person/:person_id", put(tutorial::update_person))
        .route("/login", post(tutorial::login))
        .route("/contact", post(tutorial::contact))
        .route("/post-image", post(tutorial::post_image))
}

pub fn build_twitter_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(|| health::health_handler(ServiceKind::Twitter)),
        )
        // Users
        .route("/signup", post(users::signup))
        .route("/login", post(not_implemented))
        .route("/users", get(users::list_users))
        .route("/users/:user_id", get(not_implemented))
        .route("/users/:user_id/delete", delete(not_implemented))
        .route("/users/:user_id/update", put(not_implemented))
        // Tweets
        .route("/", get(tweets::list_tweets))
        .route("/post", post(tweets::post_tweet))
        .route("/tweets/:tweet_id", get(not_implemented))
        .route("/tweets/:tweet_id/delete", delete(not_implemented))
        .route("/tweets/:tweet_id/update", put(not_implemented))
        .with_state(state)
}
