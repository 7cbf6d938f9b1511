use async_trait::async_trait;
use sqlx::PgPool;

use super::SpotStore;
use crate::models::{ParkOutcome, Spot};

// The row lock plus the repeated `is_occupied = FALSE` guard make the claim a
// compare-and-set: two cars racing for the same free spot cannot both win.
const CLAIM_FREE_SPOT: &str = "
    UPDATE spot
    SET is_occupied = TRUE, occupied_car_id = $1
    WHERE spot_id = (
        SELECT spot_id FROM spot
        WHERE is_occupied = FALSE
        ORDER BY spot_id
        LIMIT 1
        FOR UPDATE SKIP LOCKED
    )
    AND is_occupied = FALSE
    RETURNING spot_id";

#[derive(Clone)]
pub struct SpotRepository {
    pool: PgPool,
}

impl SpotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SpotStore for SpotRepository {
    async fn find_by_car(&self, car_id: &str) -> Result<Option<Spot>, sqlx::Error> {
        sqlx::query_as::<_, Spot>(
            "SELECT spot_id, is_occupied, occupied_car_id FROM spot
             WHERE occupied_car_id = $1
             ORDER BY spot_id
             LIMIT 1",
        )
        .bind(car_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn claim_for_car(&self, car_id: &str) -> Result<ParkOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        // Serializes claims for the same car until commit, so the held-spot
        // check below cannot be raced by a duplicate request.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(car_id)
            .execute(&mut *tx)
            .await?;

        let held: Option<i32> = sqlx::query_scalar(
            "SELECT spot_id FROM spot WHERE occupied_car_id = $1 ORDER BY spot_id LIMIT 1",
        )
        .bind(car_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(spot_id) = held {
            tx.commit().await?;
            return Ok(ParkOutcome::AlreadyParked(spot_id));
        }

        let claimed: Option<i32> = sqlx::query_scalar(CLAIM_FREE_SPOT)
            .bind(car_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(match claimed {
            Some(spot_id) => ParkOutcome::Parked(spot_id),
            None => ParkOutcome::NoSpotAvailable,
        })
    }

    async fn release_for_car(&self, car_id: &str) -> Result<Option<i32>, sqlx::Error> {
        let released: Vec<i32> = sqlx::query_scalar(
            "UPDATE spot
             SET is_occupied = FALSE, occupied_car_id = NULL
             WHERE occupied_car_id = $1
             RETURNING spot_id",
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(released.into_iter().min())
    }

    async fn list(&self) -> Result<Vec<Spot>, sqlx::Error> {
        sqlx::query_as::<_, Spot>(
            "SELECT spot_id, is_occupied, occupied_car_id FROM spot ORDER BY spot_id",
        )
        .fetch_all(&self.pool)
        .await
    }
}
