use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HairColor {
    White,
    Brown,
    Black,
    Blonde,
    Red,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Country {
    #[serde(rename = "México")]
    Mexico,
    #[serde(rename = "Colombia")]
    Colombia,
    #[serde(rename = "Perú")]
    Peru,
    #[serde(rename = "Venezuela")]
    Venezuela,
    #[serde(rename = "Chile")]
    Chile,
    #[serde(rename = "Argentina")]
    Argentina,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Person {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(range(min = 1, max = 120))]
    pub age: i64,
    #[serde(default)]
    pub hair_color: Option<HairColor>,
    #[serde(default)]
    pub is_married: Option<bool>,
    #[validate(length(min = 8))]
    pub password: String,
}

/// `Person` as returned to clients; the password never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonOut {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub hair_color: Option<HairColor>,
    pub is_married: Option<bool>,
}

impl From<Person> for PersonOut {
    fn from(person: Person) -> Self {
        Self {
            first_name: person.first_name,
            last_name: person.last_name,
            age: person.age,
            hair_color: person.hair_color,
            is_married: person.is_married,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Location {
    #[validate(length(min = 1, max = 50))]
    pub city: String,
    #[validate(length(min = 1, max = 50))]
    pub state: String,
    pub country: Country,
}

/// Body of `PUT /person/:person_id`: both models keyed by name.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PersonUpdate {
    #[validate(nested)]
    pub person: Person,
    #[validate(nested)]
    pub location: Location,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatedPerson {
    pub id: u64,
    #[serde(flatten)]
    pub person: PersonOut,
    #[serde(flatten)]
    pub location: Location,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PersonDetailQuery {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 120))]
    pub age: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PersonIdPath {
    #[validate(range(min = 1))]
    pub person_id: u64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    pub username: String,
    #[allow(dead_code)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginOut {
    #[validate(length(max = 20))]
    pub username: String,
    pub message: String,
}

impl LoginOut {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            message: "Login Successful".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 20))]
    pub first_name: String,
    #[validate(length(min = 1, max = 20))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 20))]
    pub message: String,
}
