use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered RFID and the one car it is paired with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserInfo {
    pub rfid: String,
    pub username: String,
    pub car_id: String,
}

impl UserInfo {
    pub fn new(
        rfid: impl Into<String>,
        username: impl Into<String>,
        car_id: impl Into<String>,
    ) -> Self {
        Self {
            rfid: rfid.into(),
            username: username.into(),
            car_id: car_id.into(),
        }
    }
}

/// One row of the user listing: a user joined to the spot their car occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserOccupancy {
    pub rfid: String,
    pub username: String,
    pub is_parked: bool,
    pub spot_id: Option<i32>,
}

/// Where a single user's car currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatus {
    pub username: String,
    pub car_id: String,
    pub parked: bool,
    pub spot: Option<i32>,
}
