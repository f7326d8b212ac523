pub mod person;
pub mod tweet;
pub mod user;
