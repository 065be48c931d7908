//! Villa entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use villa_core::error::CoreError;
use villa_core::pricing::VillaRates;
use villa_core::types::{DbId, Money, Timestamp};
use villa_core::villa::{
    validate_area, validate_bed_count, validate_capacity, validate_price, validate_rating,
    validate_required_text,
};

/// A villa row from the `villas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Villa {
    pub id: DbId,
    pub title: String,
    pub city: String,
    pub address: String,
    /// URL returned by the media service for the villa's image.
    pub image_url: String,
    pub base_capacity: i32,
    pub maximum_capacity: i32,
    pub area: f64,
    pub bed_count: i32,
    pub has_pool: bool,
    pub has_cooling_system: bool,
    pub base_price_per_night: Money,
    pub extra_person_price: Money,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Villa {
    /// The booking-relevant slice of this villa.
    pub fn rates(&self) -> VillaRates {
        VillaRates {
            base_capacity: self.base_capacity,
            maximum_capacity: self.maximum_capacity,
            base_price_per_night: self.base_price_per_night,
            extra_person_price: self.extra_person_price,
        }
    }
}

/// Mutable villa fields, used for both create and full-replace update.
///
/// The image reference is supplied separately after upload.
#[derive(Debug, Clone, Deserialize)]
pub struct VillaInput {
    pub title: String,
    pub city: String,
    pub address: String,
    pub base_capacity: i32,
    pub maximum_capacity: i32,
    pub area: f64,
    pub bed_count: i32,
    #[serde(default)]
    pub has_pool: bool,
    #[serde(default)]
    pub has_cooling_system: bool,
    pub base_price_per_night: Money,
    pub extra_person_price: Money,
    #[serde(default)]
    pub rating: f64,
}

impl VillaInput {
    /// Check every field constraint, reporting the first violation.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_required_text(&self.title, "title")?;
        validate_required_text(&self.city, "city")?;
        validate_required_text(&self.address, "address")?;
        validate_capacity(self.base_capacity, self.maximum_capacity)?;
        validate_area(self.area)?;
        validate_bed_count(self.bed_count)?;
        validate_price(self.base_price_per_night, "base_price_per_night")?;
        validate_price(self.extra_person_price, "extra_person_price")?;
        validate_rating(self.rating)
    }
}

/// Optional, conjunctive listing filters (`?city=&min_capacity=&max_price=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VillaFilter {
    /// Exact city match.
    pub city: Option<String>,
    /// Villas whose `maximum_capacity` is at least this many guests.
    pub min_capacity: Option<i32>,
    /// Villas whose `base_price_per_night` is at most this amount.
    pub max_price: Option<Money>,
}

impl VillaFilter {
    /// The city to match, treating a blank `?city=` as no filter.
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().filter(|city| !city.trim().is_empty())
    }
}
