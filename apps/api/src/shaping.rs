//! Response shaping: outgoing payloads are checked against their declared
//! response type before serialization. Fields the type does not declare
//! (a stored password, for instance) are dropped along the way.

use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::errors::AppError;

/// Re-reads every stored record as `T`, failing the request if any record
/// does not fit the response schema.
pub fn shape_records<T>(records: Vec<Value>) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned + Validate,
{
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let shaped: T = serde_json::from_value(record)
                .map_err(|e| AppError::ResponseShape(format!("record {index}: {e}")))?;
            shaped
                .validate()
                .map_err(|e| AppError::ResponseShape(format!("record {index}: {e}")))?;
            Ok(shaped)
        })
        .collect()
}

/// Validates a handler's own output against its response constraints.
pub fn ensure_valid<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ResponseShape(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::person::LoginOut;
    use crate::models::user::User;
    use serde_json::json;

    #[test]
    fn test_shape_records_strips_undeclared_fields() {
        let records = vec![json!({
            "user_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "email": "maria@example.com",
            "first_name": "María",
            "last_name": "López",
            "birth_date": null,
            "password": "supersecret"
        })];
        let users: Vec<User> = shape_records(records).unwrap();
        let value = serde_json::to_value(&users).unwrap();
        assert!(value[0].get("password").is_none());
        assert_eq!(value[0]["email"], "maria@example.com");
    }

    #[test]
    fn test_shape_records_rejects_mismatched_record() {
        let records = vec![json!({"user_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6"})];
        assert!(matches!(
            shape_records::<User>(records),
            Err(AppError::ResponseShape(_))
        ));
    }

    #[test]
    fn test_shape_records_rejects_record_breaking_constraints() {
        let records = vec![json!({
            "user_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "email": "maria@example.com",
            "first_name": "",
            "last_name": "López"
        })];
        assert!(matches!(
            shape_records::<User>(records),
            Err(AppError::ResponseShape(_))
        ));
    }

    #[test]
    fn test_ensure_valid_flags_long_username() {
        assert!(ensure_valid(&LoginOut::new("short")).is_ok());
        assert!(matches!(
            ensure_valid(&LoginOut::new("x".repeat(30))),
            Err(AppError::ResponseShape(_))
        ));
    }
}
