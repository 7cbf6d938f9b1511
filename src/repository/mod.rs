pub mod spot_repo;
pub mod user_repo;

#[cfg(any(test, feature = "test-support"))]
pub mod memory;

use async_trait::async_trait;

use crate::models::{ParkOutcome, Spot, UserInfo, UserOccupancy};

pub use spot_repo::SpotRepository;
pub use user_repo::UserRepository;

#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryStore;

/// Access to the `user_info` table.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts the user unless the RFID is already registered. Returns
    /// whether a row was created; an existing row is left untouched.
    async fn register(&self, user: &UserInfo) -> Result<bool, sqlx::Error>;

    async fn find_by_rfid(&self, rfid: &str) -> Result<Option<UserInfo>, sqlx::Error>;

    /// Every user with the spot their car occupies, ordered by username.
    async fn list_with_occupancy(&self) -> Result<Vec<UserOccupancy>, sqlx::Error>;
}

/// Access to the pre-provisioned `spot` table.
#[async_trait]
pub trait SpotStore: Send + Sync {
    async fn find_by_car(&self, car_id: &str) -> Result<Option<Spot>, sqlx::Error>;

    /// Claims the lowest free spot for `car_id` unless the car already holds one.
    async fn claim_for_car(&self, car_id: &str) -> Result<ParkOutcome, sqlx::Error>;

    /// Frees the spot held by `car_id`, returning its id if there was one.
    async fn release_for_car(&self, car_id: &str) -> Result<Option<i32>, sqlx::Error>;

    async fn list(&self) -> Result<Vec<Spot>, sqlx::Error>;
}
