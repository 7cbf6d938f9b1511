//! In-memory stand-ins for the Postgres repositories, used to drive the
//! service and router without a database.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{SpotStore, UserStore};
use crate::models::{ParkOutcome, Spot, UserInfo, UserOccupancy};

#[derive(Default)]
struct State {
    users: BTreeMap<String, UserInfo>,
    spots: BTreeMap<i32, Spot>,
    failing: bool,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spots(spot_ids: impl IntoIterator<Item = i32>) -> Self {
        let store = Self::new();
        {
            let mut state = store.lock();
            for id in spot_ids {
                state.spots.insert(id, Spot::free(id));
            }
        }
        store
    }

    pub fn insert_user(&self, user: UserInfo) {
        self.lock().users.insert(user.rfid.clone(), user);
    }

    /// Marks a spot occupied directly, bypassing the claim logic.
    pub fn occupy(&self, spot_id: i32, car_id: &str) {
        self.lock().spots.insert(
            spot_id,
            Spot {
                spot_id,
                is_occupied: true,
                occupied_car_id: Some(car_id.to_string()),
            },
        );
    }

    /// When set, every store call fails like a dropped connection.
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    pub fn spots(&self) -> Vec<Spot> {
        self.lock().spots.values().cloned().collect()
    }

    pub fn user(&self, rfid: &str) -> Option<UserInfo> {
        self.lock().users.get(rfid).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn checked(&self) -> Result<MutexGuard<'_, State>, sqlx::Error> {
        let state = self.lock();
        if state.failing {
            return Err(sqlx::Error::PoolClosed);
        }
        Ok(state)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn register(&self, user: &UserInfo) -> Result<bool, sqlx::Error> {
        let mut state = self.checked()?;
        if state.users.contains_key(&user.rfid) {
            return Ok(false);
        }
        state.users.insert(user.rfid.clone(), user.clone());
        Ok(true)
    }

    async fn find_by_rfid(&self, rfid: &str) -> Result<Option<UserInfo>, sqlx::Error> {
        Ok(self.checked()?.users.get(rfid).cloned())
    }

    async fn list_with_occupancy(&self) -> Result<Vec<UserOccupancy>, sqlx::Error> {
        let state = self.checked()?;
        let mut rows: Vec<UserOccupancy> = state
            .users
            .values()
            .map(|user| {
                let spot_id = held_by(&state, &user.car_id);
                UserOccupancy {
                    rfid: user.rfid.clone(),
                    username: user.username.clone(),
                    is_parked: spot_id.is_some(),
                    spot_id,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.username.cmp(&b.username).then_with(|| a.rfid.cmp(&b.rfid)));
        Ok(rows)
    }
}

#[async_trait]
impl SpotStore for MemoryStore {
    async fn find_by_car(&self, car_id: &str) -> Result<Option<Spot>, sqlx::Error> {
        let state = self.checked()?;
        Ok(held_by(&state, car_id).and_then(|id| state.spots.get(&id).cloned()))
    }

    async fn claim_for_car(&self, car_id: &str) -> Result<ParkOutcome, sqlx::Error> {
        let mut state = self.checked()?;
        if let Some(spot_id) = held_by(&state, car_id) {
            return Ok(ParkOutcome::AlreadyParked(spot_id));
        }
        let Some(spot) = state.spots.values_mut().find(|s| !s.is_occupied) else {
            return Ok(ParkOutcome::NoSpotAvailable);
        };
        spot.is_occupied = true;
        spot.occupied_car_id = Some(car_id.to_string());
        Ok(ParkOutcome::Parked(spot.spot_id))
    }

    async fn release_for_car(&self, car_id: &str) -> Result<Option<i32>, sqlx::Error> {
        let mut state = self.checked()?;
        let mut released = None;
        for spot in state.spots.values_mut() {
            if spot.occupied_car_id.as_deref() == Some(car_id) {
                spot.is_occupied = false;
                spot.occupied_car_id = None;
                released = released.or(Some(spot.spot_id));
            }
        }
        Ok(released)
    }

    async fn list(&self) -> Result<Vec<Spot>, sqlx::Error> {
        Ok(self.checked()?.spots.values().cloned().collect())
    }
}

fn held_by(state: &State, car_id: &str) -> Option<i32> {
    state
        .spots
        .values()
        .find(|s| s.occupied_car_id.as_deref() == Some(car_id))
        .map(|s| s.spot_id)
}
