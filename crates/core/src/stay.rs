//! Half-open stay intervals.
//!
//! A stay covers the nights from `check_in` up to, but not including,
//! `check_out`. Two stays that merely touch (one checks out the day the
//! other checks in) do not overlap.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A validated `[check_in, check_out)` date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayDates {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayDates {
    /// Build a stay, rejecting ranges where check-in is not strictly before
    /// check-out.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, CoreError> {
        if check_in >= check_out {
            return Err(CoreError::InvalidDateOrder {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Number of nights in the stay. Always at least 1.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Half-open overlap test.
    pub fn overlaps(&self, other: &StayDates) -> bool {
        other.check_in < self.check_out && other.check_out > self.check_in
    }
}
