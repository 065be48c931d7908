//! Repository for the `villas` table.

use sqlx::PgPool;
use villa_core::types::DbId;

use crate::models::villa::{Villa, VillaFilter, VillaInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, city, address, image_url, base_capacity, maximum_capacity, \
    area, bed_count, has_pool, has_cooling_system, base_price_per_night, extra_person_price, \
    rating, created_at, updated_at";

/// Provides CRUD operations for villas.
pub struct VillaRepo;

impl VillaRepo {
    /// Insert a new villa with its uploaded image reference, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &VillaInput,
        image_url: &str,
    ) -> Result<Villa, sqlx::Error> {
        let query = format!(
            "INSERT INTO villas (title, city, address, image_url, base_capacity, \
                maximum_capacity, area, bed_count, has_pool, has_cooling_system, \
                base_price_per_night, extra_person_price, rating)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Villa>(&query)
            .bind(&input.title)
            .bind(&input.city)
            .bind(&input.address)
            .bind(image_url)
            .bind(input.base_capacity)
            .bind(input.maximum_capacity)
            .bind(input.area)
            .bind(input.bed_count)
            .bind(input.has_pool)
            .bind(input.has_cooling_system)
            .bind(input.base_price_per_night)
            .bind(input.extra_person_price)
            .bind(input.rating)
            .fetch_one(pool)
            .await
    }

    /// Find a villa by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Villa>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM villas WHERE id = $1");
        sqlx::query_as::<_, Villa>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List villas matching every filter that is set, ordered by id.
    pub async fn list(pool: &PgPool, filter: &VillaFilter) -> Result<Vec<Villa>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM villas
             WHERE ($1::TEXT IS NULL OR city = $1)
               AND ($2::INTEGER IS NULL OR maximum_capacity >= $2)
               AND ($3::NUMERIC IS NULL OR base_price_per_night <= $3)
             ORDER BY id"
        );
        sqlx::query_as::<_, Villa>(&query)
            .bind(filter.city())
            .bind(filter.min_capacity)
            .bind(filter.max_price)
            .fetch_all(pool)
            .await
    }

    /// Replace every mutable field of a villa.
    ///
    /// When `image_url` is `None` the current image reference is kept.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &VillaInput,
        image_url: Option<&str>,
    ) -> Result<Option<Villa>, sqlx::Error> {
        let query = format!(
            "UPDATE villas SET
                title = $2,
                city = $3,
                address = $4,
                image_url = COALESCE($5, image_url),
                base_capacity = $6,
                maximum_capacity = $7,
                area = $8,
                bed_count = $9,
                has_pool = $10,
                has_cooling_system = $11,
                base_price_per_night = $12,
                extra_person_price = $13,
                rating = $14,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Villa>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.city)
            .bind(&input.address)
            .bind(image_url)
            .bind(input.base_capacity)
            .bind(input.maximum_capacity)
            .bind(input.area)
            .bind(input.bed_count)
            .bind(input.has_pool)
            .bind(input.has_cooling_system)
            .bind(input.base_price_per_night)
            .bind(input.extra_person_price)
            .bind(input.rating)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a villa by ID. Returns `true` if a row was removed.
    ///
    /// Reservations referencing the villa are left in place.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM villas WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
