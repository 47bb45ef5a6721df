//! Postgres-backed booking repository.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | RepositoryError |
//! |------------|----------------------|-----------------|
//! | Database (unique violation) | `23505` | `Duplicate` |
//! | Database (other) | Any other | `Backend` |
//! | PoolClosed / Io / other | N/A | `Backend` |
//!
//! Every statement binds its parameters; nothing is interpolated into SQL.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use hotelbook_bookings::{Booking, BookingRepository, RepositoryError};
use hotelbook_core::HotelId;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id           TEXT PRIMARY KEY,
        hotel_id     BIGINT NOT NULL,
        booking_type TEXT NOT NULL,
        version      BIGINT NOT NULL,
        arrive       TEXT NOT NULL,
        "leave"      TEXT NOT NULL,
        name         TEXT NOT NULL,
        created_at   TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const CREATE_HOTEL_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS bookings_hotel_idx ON bookings (hotel_id, created_at)";

/// Booking repository over a shared SQLx connection pool.
#[derive(Debug, Clone)]
pub struct PostgresBookingRepository {
    pool: Arc<PgPool>,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the `bookings` table and its hotel index if missing.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        sqlx::query(CREATE_HOTEL_INDEX)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    #[instrument(skip_all, fields(booking_id = %booking.id, hotel_id = booking.hotel_id.get()), err)]
    async fn insert(&self, booking: &Booking) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, hotel_id, booking_type, version, arrive, "leave", name)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&booking.id)
        .bind(booking.hotel_id.get())
        .bind(&booking.kind)
        .bind(booking.version)
        .bind(&booking.arrive)
        .bind(&booking.leave)
        .bind(&booking.name)
        .execute(&*self.pool)
        .await
        .map_err(|e| match map_sqlx_error("insert", e) {
            RepositoryError::Duplicate(_) => RepositoryError::Duplicate(booking.id.clone()),
            other => other,
        })?;

        Ok(())
    }

    #[instrument(skip(self), fields(hotel_id = hotel_id.get()), err)]
    async fn list(&self, hotel_id: HotelId) -> Result<Vec<Booking>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, hotel_id, booking_type, version, arrive, "leave", name
            FROM bookings
            WHERE hotel_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(hotel_id.get())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter()
            .map(|row| booking_from_row(row).map_err(|e| map_sqlx_error("list", e)))
            .collect()
    }

    #[instrument(skip(self), fields(hotel_id = hotel_id.get()), err)]
    async fn find_by_id_and_hotel(
        &self,
        hotel_id: HotelId,
        id: &str,
    ) -> Result<Option<Booking>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, hotel_id, booking_type, version, arrive, "leave", name
            FROM bookings
            WHERE hotel_id = $1 AND id = $2
            "#,
        )
        .bind(hotel_id.get())
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id_and_hotel", e))?;

        row.as_ref()
            .map(booking_from_row)
            .transpose()
            .map_err(|e| map_sqlx_error("find_by_id_and_hotel", e))
    }
}

fn booking_from_row(row: &PgRow) -> Result<Booking, sqlx::Error> {
    Ok(Booking {
        kind: row.try_get("booking_type")?,
        id: row.try_get("id")?,
        version: row.try_get("version")?,
        hotel_id: HotelId::new(row.try_get("hotel_id")?),
        arrive: row.try_get("arrive")?,
        leave: row.try_get("leave")?,
        name: row.try_get("name")?,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            if db_err.code().as_deref() == Some("23505") {
                RepositoryError::Duplicate(msg)
            } else {
                RepositoryError::Backend(msg)
            }
        }
        sqlx::Error::PoolClosed => {
            RepositoryError::Backend(format!("connection pool closed in {}", operation))
        }
        _ => RepositoryError::Backend(format!("sqlx error in {}: {}", operation, err)),
    }
}
