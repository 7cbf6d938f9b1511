use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ParkRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(
        required(message = "Missing rfid"),
        length(min = 1, message = "Missing rfid")
    )]
    pub rfid: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub car_id: Option<String>,
}

impl ParkRequest {
    pub fn rfid(&self) -> &str {
        self.rfid.as_deref().unwrap_or_default()
    }

    /// Returns `(username, car_id)` when the request should register the
    /// RFID, `None` when it refers to an existing registration only.
    pub fn registration(&self) -> Result<Option<(&str, &str)>, AppError> {
        let username = non_empty(self.username.as_deref());
        let car_id = non_empty(self.car_id.as_deref());
        match (username, car_id) {
            (Some(username), Some(car_id)) => Ok(Some((username, car_id))),
            (None, None) => Ok(None),
            _ => Err(AppError::Validation(
                "username and car_id must be provided together".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RfidRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(
        required(message = "Missing rfid"),
        length(min = 1, message = "Missing rfid")
    )]
    pub rfid: Option<String>,
}

impl RfidRequest {
    pub fn rfid(&self) -> &str {
        self.rfid.as_deref().unwrap_or_default()
    }
}

// `null`, absent, empty and whitespace-only all read as "no rfid".
fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(non_empty(value.as_deref()).map(str::to_string))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Runs the derived validation and flattens the first failure into an
/// `AppError::Validation`.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), AppError> {
    request
        .validate()
        .map_err(|errors| AppError::Validation(first_message(&errors)))
}

fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid request".to_string())
}
