use async_trait::async_trait;
use sqlx::PgPool;

use super::UserStore;
use crate::models::{UserInfo, UserOccupancy};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn register(&self, user: &UserInfo) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_info (rfid, username, car_id) VALUES ($1, $2, $3)
             ON CONFLICT (rfid) DO NOTHING",
        )
        .bind(&user.rfid)
        .bind(&user.username)
        .bind(&user.car_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn find_by_rfid(&self, rfid: &str) -> Result<Option<UserInfo>, sqlx::Error> {
        sqlx::query_as::<_, UserInfo>(
            "SELECT rfid, username, car_id FROM user_info WHERE rfid = $1",
        )
        .bind(rfid)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_with_occupancy(&self) -> Result<Vec<UserOccupancy>, sqlx::Error> {
        sqlx::query_as::<_, UserOccupancy>(
            "SELECT u.rfid, u.username, s.spot_id, (s.spot_id IS NOT NULL) AS is_parked
             FROM user_info u
             LEFT JOIN spot s ON u.car_id = s.occupied_car_id
             ORDER BY u.username, u.rfid",
        )
        .fetch_all(&self.pool)
        .await
    }
}
