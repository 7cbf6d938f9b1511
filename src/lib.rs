pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use std::sync::Arc;

use axum::{extract::FromRef, middleware, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use auth::{require_device, DeviceWhitelist};
use handlers::{health, parking};
use service::ParkingService;

#[derive(Clone)]
pub struct AppState {
    pub service: ParkingService,
    pub whitelist: Arc<DeviceWhitelist>,
}

impl AppState {
    pub fn new(service: ParkingService, whitelist: DeviceWhitelist) -> Self {
        Self {
            service,
            whitelist: Arc::new(whitelist),
        }
    }
}

impl FromRef<AppState> for ParkingService {
    fn from_ref(state: &AppState) -> Self {
        state.service.clone()
    }
}

/// Builds the `/api` router. Every route except the health probe sits
/// behind the device whitelist.
pub fn app(state: AppState) -> Router {
    let protected = parking::router().route_layer(middleware::from_fn_with_state(
        state.whitelist.clone(),
        require_device,
    ));

    Router::new()
        .nest("/api", protected.merge(health::router()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
