pub mod reservation;
pub mod villa;
