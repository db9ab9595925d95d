//! Request validation for advertisement payloads.

use crate::error::AppError;
use crate::model::{AdvertisementPatch, NewAdvertisement};
use serde::Serialize;
use serde_json::{Map, Value};

const FIELDS: [&str; 3] = ["headline", "description", "owner"];

/// One entry of the error list returned with a 400.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    fn new(field: &str, msg: &str, kind: &str) -> Self {
        FieldError {
            loc: vec![field.to_string()],
            msg: msg.to_string(),
            kind: kind.to_string(),
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(field, "field required", "value_error.missing")
    }

    fn none_not_allowed(field: &str) -> Self {
        Self::new(field, "none is not an allowed value", "type_error.none.not_allowed")
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// All three fields are required non-empty strings. Reports every failing field.
    pub fn validate_create(body: &Value) -> Result<NewAdvertisement, AppError> {
        let obj = as_object(body)?;
        let mut errors = Vec::new();
        let headline = required(obj, "headline", &mut errors);
        let description = required(obj, "description", &mut errors);
        let owner = required(obj, "owner", &mut errors);
        match (headline, description, owner) {
            (Some(headline), Some(description), Some(owner)) => Ok(NewAdvertisement {
                headline,
                description,
                owner,
            }),
            _ => Err(into_app_error(errors)),
        }
    }

    /// Validate only the known fields present in body; unknown keys are ignored.
    pub fn validate_update(body: &Value) -> Result<AdvertisementPatch, AppError> {
        let obj = as_object(body)?;
        let mut errors = Vec::new();
        let mut patch = AdvertisementPatch::default();
        for field in FIELDS {
            let Some(v) = obj.get(field) else { continue };
            let value = match v {
                Value::Null => {
                    errors.push(FieldError::none_not_allowed(field));
                    continue;
                }
                v => match check_string(field, v) {
                    Ok(s) => s,
                    Err(e) => {
                        errors.push(e);
                        continue;
                    }
                },
            };
            match field {
                "headline" => patch.headline = Some(value),
                "description" => patch.description = Some(value),
                _ => patch.owner = Some(value),
            }
        }
        if !errors.is_empty() {
            return Err(into_app_error(errors));
        }
        Ok(patch)
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, AppError> {
    body.as_object().ok_or_else(|| {
        into_app_error(vec![FieldError::new("__root__", "value is not a valid dict", "type_error.dict")])
    })
}

fn required(obj: &Map<String, Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match obj.get(field) {
        None => {
            errors.push(FieldError::missing(field));
            None
        }
        Some(Value::Null) => {
            errors.push(FieldError::none_not_allowed(field));
            None
        }
        Some(v) => match check_string(field, v) {
            Ok(s) => Some(s),
            Err(e) => {
                errors.push(e);
                None
            }
        },
    }
}

fn check_string(field: &str, v: &Value) -> Result<String, FieldError> {
    match v.as_str() {
        None => Err(FieldError::new(field, "str type expected", "type_error.str")),
        Some("") => Err(FieldError::new(
            field,
            "ensure this value has at least 1 characters",
            "value_error.any_str.min_length",
        )),
        Some(s) => Ok(s.to_string()),
    }
}

fn into_app_error(errors: Vec<FieldError>) -> AppError {
    AppError::Validation(serde_json::to_value(errors).unwrap_or(Value::Null))
}
