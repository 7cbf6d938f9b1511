use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use super::DeviceWhitelist;
use crate::constants::API_NAME;
use crate::error::AppError;

pub const DEVICE_ID_HEADER: &str = "x-device-id";
pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects requests whose `X-Device-ID`/`X-API-Key` pair is not whitelisted.
pub async fn require_device(
    State(whitelist): State<Arc<DeviceWhitelist>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let device_id = header_str(&headers, DEVICE_ID_HEADER);

    if let Err(e) = whitelist.check(device_id, header_str(&headers, API_KEY_HEADER)) {
        tracing::warn!(
            "{} Rejected {} {} from device {:?}: {}",
            API_NAME,
            request.method(),
            request.uri().path(),
            device_id,
            e
        );
        return Err(e.into());
    }

    Ok(next.run(request).await)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
