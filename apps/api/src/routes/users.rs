use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::errors::AppError;
use crate::extract::ValidatedJson;
use crate::models::user::{User, UserRegister};
use crate::shaping::shape_records;
use crate::state::AppState;

/// POST /signup
/// Persists the full registration (password included) and answers with the public view.
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(register): ValidatedJson<UserRegister>,
) -> Result<(StatusCode, Json<User>), AppError> {
    state.users.append(&register).await?;
    info!("Registered user {}", register.user_id);
    Ok((StatusCode::CREATED, Json(register.into())))
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let records = state.users.list_all().await?;
    Ok(Json(shape_records(records)?))
}
