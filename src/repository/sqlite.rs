//! SQLite Vehicle Repository
//!
//! The durable [`VehicleProvider`] and source of truth for vehicle records.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::VehicleProvider;
use crate::error::{RegistryError, Result};
use crate::models::Vehicle;

/// SQLite implementation of [`VehicleProvider`]
///
/// Uses runtime `sqlx::query` with `.bind()`; timestamps are stored as
/// RFC 3339 text with microsecond precision so lexical order is time order.
#[derive(Debug, Clone)]
pub struct SqliteVehicleRepository {
    pool: SqlitePool,
}

impl SqliteVehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn parse_row(row: &SqliteRow) -> Result<Vehicle> {
        let created_at: String = row.try_get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| RegistryError::Internal(format!("invalid timestamp: {}", e)))?
            .with_timezone(&Utc);

        Ok(Vehicle {
            id: row.try_get("id")?,
            brand: row.try_get("brand")?,
            model: row.try_get("model")?,
            year: row.try_get("year")?,
            created_at,
        })
    }
}

#[async_trait]
impl VehicleProvider for SqliteVehicleRepository {
    async fn list(&self) -> Result<Vec<Vehicle>> {
        let rows = sqlx::query(
            r#"
            SELECT id, brand, model, year, created_at
            FROM vehicles
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::parse_row).collect()
    }

    async fn get_by_id(&self, id: &str) -> Result<Vehicle> {
        let row = sqlx::query(
            r#"
            SELECT id, brand, model, year, created_at
            FROM vehicles
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Self::parse_row(&r),
            None => Err(RegistryError::vehicle_not_found()),
        }
    }

    async fn insert(&self, vehicle: &mut Vehicle) -> Result<()> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO vehicles (id, brand, model, year, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(&self.pool)
        .await?;

        debug!("vehicle inserted: id={}", id);
        vehicle.id = id;
        // Round-trip through the stored precision so cached and re-read copies agree
        vehicle.created_at = truncate_to_micros(created_at);
        Ok(())
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles
            SET brand = ?, model = ?, year = ?
            WHERE id = ?
            "#,
        )
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RegistryError::vehicle_not_found());
        }
        debug!("vehicle updated: id={} rows={}", vehicle.id, result.rows_affected());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RegistryError::vehicle_not_found());
        }
        debug!("vehicle deleted: id={} rows={}", id, result.rows_affected());
        Ok(())
    }
}

fn truncate_to_micros(at: DateTime<Utc>) -> DateTime<Utc> {
    at.with_nanosecond(at.nanosecond() / 1_000 * 1_000)
        .unwrap_or(at)
}
