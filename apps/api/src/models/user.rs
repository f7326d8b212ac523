use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Public view of a user. Also the shape embedded in every tweet.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct User {
    pub user_id: Uuid,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

/// Signup payload; persisted as-is, returned as `User`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserRegister {
    pub user_id: Uuid,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[validate(length(min = 8))]
    pub password: String,
}

impl From<UserRegister> for User {
    fn from(register: UserRegister) -> Self {
        Self {
            user_id: register.user_id,
            email: register.email,
            first_name: register.first_name,
            last_name: register.last_name,
            birth_date: register.birth_date,
        }
    }
}
