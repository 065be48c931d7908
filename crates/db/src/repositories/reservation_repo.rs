//! Repository for the `reservations` table.

use sqlx::{PgConnection, PgExecutor, PgPool};
use villa_core::types::DbId;

use crate::models::reservation::{CreateReservation, Reservation, ReservationDateRange};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, villa_id, check_in_date, check_out_date, people_count, \
    total_price, created_at";

/// Name of the exclusion constraint that forbids overlapping stays per villa.
pub const OVERLAP_CONSTRAINT: &str = "ex_reservations_villa_stay";

/// Provides CRUD operations for reservations.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Serialize bookings for one villa until the surrounding transaction ends.
    ///
    /// Takes a transaction-scoped advisory lock keyed on the villa id, so
    /// concurrent check-then-insert sequences for the same villa run one at
    /// a time. Must be called on a connection inside a transaction.
    pub async fn lock_villa(conn: &mut PgConnection, villa_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(villa_id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Insert a priced reservation, returning the created row.
    ///
    /// Fails with a `23P01` database error naming [`OVERLAP_CONSTRAINT`] if
    /// the stay overlaps an existing reservation for the same villa.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateReservation,
    ) -> Result<Reservation, sqlx::Error> {
        let query = format!(
            "INSERT INTO reservations \
                (user_id, villa_id, check_in_date, check_out_date, people_count, total_price)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(input.user_id)
            .bind(input.villa_id)
            .bind(input.stay.check_in)
            .bind(input.stay.check_out)
            .bind(input.people_count)
            .bind(input.total_price)
            .fetch_one(executor)
            .await
    }

    /// All booked date ranges for a villa, ordered by check-in date.
    pub async fn list_date_ranges_by_villa<'e, E: PgExecutor<'e>>(
        executor: E,
        villa_id: DbId,
    ) -> Result<Vec<ReservationDateRange>, sqlx::Error> {
        sqlx::query_as::<_, ReservationDateRange>(
            "SELECT check_in_date, check_out_date FROM reservations
             WHERE villa_id = $1
             ORDER BY check_in_date, id",
        )
        .bind(villa_id)
        .fetch_all(executor)
        .await
    }

    /// List a user's reservations ordered by check-in date.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations WHERE user_id = $1 ORDER BY check_in_date, id"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a reservation by ID, only if it belongs to `user_id`.
    pub async fn find_by_id_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List every reservation ordered by check-in date.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations ORDER BY check_in_date, id");
        sqlx::query_as::<_, Reservation>(&query).fetch_all(pool).await
    }

    /// Permanently delete a reservation by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
