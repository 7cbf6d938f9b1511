use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Spot {
    pub spot_id: i32,
    pub is_occupied: bool,
    pub occupied_car_id: Option<String>,
}

impl Spot {
    pub fn free(spot_id: i32) -> Self {
        Self {
            spot_id,
            is_occupied: false,
            occupied_car_id: None,
        }
    }
}

/// Result of trying to claim a spot for a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParkOutcome {
    Parked(i32),
    /// The car already holds this spot; nothing was changed.
    AlreadyParked(i32),
    NoSpotAvailable,
}
