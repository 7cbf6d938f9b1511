use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Missing headers")]
    MissingHeaders,

    #[error("Unauthorized device")]
    UnknownDevice,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Unauthorized(err.to_string())
    }
}

/// Device id to API key mapping, loaded once at startup and shared read-only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct DeviceWhitelist {
    devices: HashMap<String, String>,
}

impl DeviceWhitelist {
    /// Reads a JSON object of `{"device-id": "api-key"}` pairs.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read device whitelist {}", path.display()))?;
        let whitelist: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid device whitelist {}", path.display()))?;
        Ok(whitelist)
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            devices: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn check(&self, device_id: Option<&str>, api_key: Option<&str>) -> Result<(), AuthError> {
        let (device_id, api_key) = match (device_id, api_key) {
            (Some(d), Some(k)) if !d.is_empty() && !k.is_empty() => (d, k),
            _ => return Err(AuthError::MissingHeaders),
        };

        match self.devices.get(device_id) {
            Some(expected) if expected == api_key => Ok(()),
            _ => Err(AuthError::UnknownDevice),
        }
    }
}
