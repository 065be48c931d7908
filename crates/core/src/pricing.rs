//! Reservation pricing and conflict engine.
//!
//! Pure functions evaluated inline while a reservation is being created:
//! head-count and capacity checks, overlap detection against the stays
//! already booked for a villa, and the total price quote.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::stay::StayDates;
use crate::types::{DbId, Money, MAX_MONEY};

/// The subset of a villa record that drives booking rules.
///
/// Deserializes directly from the Villa Directory's villa JSON; unrelated
/// fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VillaRates {
    pub base_capacity: i32,
    pub maximum_capacity: i32,
    pub base_price_per_night: Money,
    pub extra_person_price: Money,
}

/// Reject head counts below one guest.
pub fn ensure_head_count(people_count: i32) -> Result<(), CoreError> {
    if people_count < 1 {
        return Err(CoreError::Validation(format!(
            "people_count must be at least 1, got {people_count}"
        )));
    }
    Ok(())
}

/// Reject parties larger than the villa's maximum capacity.
pub fn ensure_capacity(rates: &VillaRates, people_count: i32) -> Result<(), CoreError> {
    if people_count > rates.maximum_capacity {
        return Err(CoreError::CapacityExceeded {
            requested: people_count,
            maximum: rates.maximum_capacity,
        });
    }
    Ok(())
}

/// Return the first booked stay that overlaps `candidate`, if any.
pub fn find_conflict<'a>(candidate: &StayDates, booked: &'a [StayDates]) -> Option<&'a StayDates> {
    booked.iter().find(|existing| existing.overlaps(candidate))
}

/// Fail with [`CoreError::DateConflict`] when `candidate` overlaps any stay
/// already booked for `villa_id`.
pub fn ensure_available(
    villa_id: DbId,
    candidate: &StayDates,
    booked: &[StayDates],
) -> Result<(), CoreError> {
    match find_conflict(candidate, booked) {
        Some(_) => Err(CoreError::DateConflict { villa_id }),
        None => Ok(()),
    }
}

/// Guests above the villa's base capacity, charged the extra-person rate.
pub fn extra_people(rates: &VillaRates, people_count: i32) -> i32 {
    (people_count - rates.base_capacity).max(0)
}

/// Total price for a stay:
/// `base_price * nights + extra_people * extra_person_price * nights`.
pub fn quote_total(rates: &VillaRates, stay: &StayDates, people_count: i32) -> Money {
    let nights = Decimal::from(stay.nights());
    let extra = Decimal::from(extra_people(rates, people_count));
    rates.base_price_per_night * nights + extra * rates.extra_person_price * nights
}

/// Reject a quote too large for the ledger's `total_price` column.
pub fn ensure_storable_total(total: Money) -> Result<(), CoreError> {
    if total > MAX_MONEY {
        return Err(CoreError::Validation(format!(
            "total price {total} exceeds the maximum of {MAX_MONEY}; shorten the stay"
        )));
    }
    Ok(())
}
