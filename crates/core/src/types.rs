/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts are stored as `NUMERIC(12,2)`.
pub type Money = rust_decimal::Decimal;

/// Decimal places kept by the money columns.
pub const MONEY_SCALE: u32 = 2;

/// Largest amount a `NUMERIC(12,2)` column holds: 9,999,999,999.99.
// 999_999_999_999 = 0xE8_D4A5_0FFF, at scale MONEY_SCALE.
pub const MAX_MONEY: Money = rust_decimal::Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, MONEY_SCALE);
