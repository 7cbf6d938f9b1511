use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{
    request::validate_request, ParkOutcome, ParkRequest, RfidRequest, Spot, UserOccupancy,
    UserStatus,
};
use crate::service::ParkingService;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/park", post(park))
        .route("/unpark", post(unpark))
        .route("/status", get(status))
        .route("/query_user", post(query_user))
        .route("/users", get(list_users))
}

async fn park(
    State(service): State<ParkingService>,
    payload: Result<Json<ParkRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    validate_request(&request)?;

    tracing::info!("{} Received park request for rfid: {}", API_NAME, request.rfid());

    let result = service.park(&request).await?;

    let body = match result.outcome {
        ParkOutcome::Parked(spot_id) => json!({
            "message": "Parked successfully",
            "username": result.user.username,
            "car_id": result.user.car_id,
            "spot": spot_id
        }),
        ParkOutcome::AlreadyParked(spot_id) => json!({
            "message": "Car is already parked",
            "spot": spot_id
        }),
        ParkOutcome::NoSpotAvailable => json!({ "message": "No available spot" }),
    };

    Ok(Json(body))
}

async fn unpark(
    State(service): State<ParkingService>,
    payload: Result<Json<RfidRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    validate_request(&request)?;

    tracing::info!("{} Received unpark request for rfid: {}", API_NAME, request.rfid());

    let body = match service.unpark(request.rfid()).await? {
        Some(spot_id) => json!({ "message": "Unparked successfully", "spot": spot_id }),
        None => json!({ "message": "Car is not parked" }),
    };

    Ok(Json(body))
}

async fn status(State(service): State<ParkingService>) -> Result<Json<Vec<Spot>>, AppError> {
    Ok(Json(service.status().await?))
}

async fn query_user(
    State(service): State<ParkingService>,
    payload: Result<Json<RfidRequest>, JsonRejection>,
) -> Result<Json<UserStatus>, AppError> {
    let Json(request) = payload?;
    validate_request(&request)?;

    Ok(Json(service.query_user(request.rfid()).await?))
}

async fn list_users(
    State(service): State<ParkingService>,
) -> Result<Json<Vec<UserOccupancy>>, AppError> {
    Ok(Json(service.list_users().await?))
}
