use std::sync::Arc;

use crate::models::tweet::Tweet;
use crate::models::user::UserRegister;
use crate::store::{RecordStore, Repository};

/// Shared state for the twitter service, injected into handlers via Axum extractors.
/// The stores are the only durable state; nothing else is shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub users: Repository<UserRegister>,
    pub tweets: Repository<Tweet>,
}

impl AppState {
    pub fn new(users: Arc<dyn RecordStore>, tweets: Arc<dyn RecordStore>) -> Self {
        Self {
            users: Repository::new(users),
            tweets: Repository::new(tweets),
        }
    }
}
