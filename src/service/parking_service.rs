use std::sync::Arc;

use sqlx::PgPool;

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{ParkOutcome, ParkRequest, Spot, UserInfo, UserOccupancy, UserStatus};
use crate::repository::{SpotRepository, SpotStore, UserRepository, UserStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkResult {
    pub user: UserInfo,
    pub outcome: ParkOutcome,
}

#[derive(Clone)]
pub struct ParkingService {
    users: Arc<dyn UserStore>,
    spots: Arc<dyn SpotStore>,
}

impl ParkingService {
    pub fn new(users: Arc<dyn UserStore>, spots: Arc<dyn SpotStore>) -> Self {
        Self { users, spots }
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(UserRepository::new(pool.clone())),
            Arc::new(SpotRepository::new(pool)),
        )
    }

    async fn resolve_user(&self, rfid: &str, missing: &str) -> Result<UserInfo, AppError> {
        self.users
            .find_by_rfid(rfid)
            .await?
            .ok_or_else(|| AppError::NotFound(missing.to_string()))
    }

    /// Registers the RFID if the request carries a username/car pair, then
    /// claims a free spot for the RFID's car.
    pub async fn park(&self, request: &ParkRequest) -> Result<ParkResult, AppError> {
        let rfid = request.rfid();

        if let Some((username, car_id)) = request.registration()? {
            let created = self
                .users
                .register(&UserInfo::new(rfid, username, car_id))
                .await?;
            if created {
                tracing::info!("{} Registered rfid {} for car {}", API_NAME, rfid, car_id);
            } else {
                tracing::debug!(
                    "{} Rfid {} already registered, keeping existing pairing",
                    API_NAME,
                    rfid
                );
            }
        }

        let user = self.resolve_user(rfid, "RFID not registered").await?;
        let outcome = self.spots.claim_for_car(&user.car_id).await?;

        match outcome {
            ParkOutcome::Parked(spot_id) => {
                tracing::info!("{} Car {} parked in spot {}", API_NAME, user.car_id, spot_id)
            }
            ParkOutcome::AlreadyParked(spot_id) => {
                tracing::info!(
                    "{} Car {} is already parked in spot {}",
                    API_NAME,
                    user.car_id,
                    spot_id
                )
            }
            ParkOutcome::NoSpotAvailable => {
                tracing::warn!("{} No available spot for car {}", API_NAME, user.car_id)
            }
        }

        Ok(ParkResult { user, outcome })
    }

    /// Frees the spot held by the RFID's car. `Ok(None)` means it was not parked.
    pub async fn unpark(&self, rfid: &str) -> Result<Option<i32>, AppError> {
        let user = self.resolve_user(rfid, "User not found").await?;
        let released = self.spots.release_for_car(&user.car_id).await?;

        match released {
            Some(spot_id) => {
                tracing::info!("{} Car {} left spot {}", API_NAME, user.car_id, spot_id)
            }
            None => tracing::info!("{} Car {} is not parked", API_NAME, user.car_id),
        }

        Ok(released)
    }

    pub async fn status(&self) -> Result<Vec<Spot>, AppError> {
        Ok(self.spots.list().await?)
    }

    pub async fn query_user(&self, rfid: &str) -> Result<UserStatus, AppError> {
        let user = self.resolve_user(rfid, "User not found").await?;
        let spot = self.spots.find_by_car(&user.car_id).await?;

        Ok(UserStatus {
            username: user.username,
            car_id: user.car_id,
            parked: spot.is_some(),
            spot: spot.map(|s| s.spot_id),
        })
    }

    pub async fn list_users(&self) -> Result<Vec<UserOccupancy>, AppError> {
        Ok(self.users.list_with_occupancy().await?)
    }
}
