//! Handlers for the tutorial service. Nothing here is persisted; each handler
//! demonstrates one way request input is validated before it is used.

use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    http::{HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::errors::{AppError, FieldErrors};
use crate::extract::{
    cookie_value, header_value, ValidatedForm, ValidatedJson, ValidatedPath, ValidatedQuery,
};
use crate::models::person::{
    ContactForm, LoginForm, LoginOut, Person, PersonDetailQuery, PersonIdPath, PersonOut,
    PersonUpdate, UpdatedPerson,
};
use crate::shaping::ensure_valid;

/// Ids answered by `GET /person/detail/:person_id`. Static, not read from any store.
pub const KNOWN_PERSON_IDS: [u64; 5] = [1, 2, 3, 4, 5];

#[derive(Debug, Serialize)]
pub struct ImageInfo {
    #[serde(rename = "Filename")]
    pub filename: String,
    #[serde(rename = "Format")]
    pub format: Option<String>,
    #[serde(rename = "Size (kb)")]
    pub size_kb: f64,
}

/// Size in kilobytes, rounded to two decimals.
pub fn size_in_kb(len: usize) -> f64 {
    (len as f64 / 1024.0 * 100.0).round() / 100.0
}

/// GET /
pub async fn home() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

/// POST /person/new
pub async fn create_person(
    ValidatedJson(person): ValidatedJson<Person>,
) -> (StatusCode, Json<PersonOut>) {
    (StatusCode::CREATED, Json(person.into()))
}

/// GET /person/detail
pub async fn show_person(
    ValidatedQuery(query): ValidatedQuery<PersonDetailQuery>,
) -> Json<Value> {
    // An absent name is keyed as "null", mirroring a JSON-encoded null key.
    let mut body = Map::new();
    body.insert(
        query.name.unwrap_or_else(|| "null".to_string()),
        json!(query.age),
    );
    Json(Value::Object(body))
}

/// GET /person/detail/:person_id
pub async fn show_person_by_id(
    ValidatedPath(path): ValidatedPath<PersonIdPath>,
) -> Result<Json<Value>, AppError> {
    if !KNOWN_PERSON_IDS.contains(&path.person_id) {
        return Err(AppError::NotFound(
            "This person doesn't exist!!!".to_string(),
        ));
    }
    let mut body = Map::new();
    body.insert(path.person_id.to_string(), json!("It exists!"));
    Ok(Json(Value::Object(body)))
}

/// PUT /person/:person_id
pub async fn update_person(
    ValidatedPath(path): ValidatedPath<PersonIdPath>,
    ValidatedJson(update): ValidatedJson<PersonUpdate>,
) -> Json<UpdatedPerson> {
    Json(UpdatedPerson {
        id: path.person_id,
        person: update.person.into(),
        location: update.location,
    })
}

/// POST /login
pub async fn login(
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> Result<Json<LoginOut>, AppError> {
    let out = LoginOut::new(form.username);
    ensure_valid(&out)?;
    Ok(Json(out))
}

/// POST /contact
pub async fn contact(
    headers: HeaderMap,
    ValidatedForm(form): ValidatedForm<ContactForm>,
) -> Json<Option<String>> {
    let user_agent = header_value(&headers, "user-agent");
    let ads = cookie_value(&headers, "ads");
    info!(
        "Contact message from {} {} <{}>",
        form.first_name, form.last_name, form.email
    );
    debug!("Contact user agent: {user_agent:?}, ads cookie: {ads:?}");
    Json(user_agent)
}

/// POST /post-image
pub async fn post_image(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImageInfo>, AppError> {
    let mut multipart = multipart?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let format = field.content_type().map(str::to_string);
        let data: Bytes = field.bytes().await?;
        return Ok(Json(ImageInfo {
            filename,
            format,
            size_kb: size_in_kb(data.len()),
        }));
    }
    Err(AppError::Validation(FieldErrors::single(
        "image",
        "required",
        "multipart field `image` is required",
    )))
}
