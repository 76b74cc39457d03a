use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The three bookable periods of a consultation day, in display order.
pub const DAY_PERIODS: [&str; 3] = ["Morning", "Afternoon", "Evening"];

/// A bookable (doctor, date, period) triple. Exactly three exist per doctor
/// per date, synthesized on the first query for that date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub doctor_id: Uuid,
    /// Calendar date as sent by clients, `YYYY-MM-DD`.
    pub date: String,
    pub time: String,
    pub period: String,
    pub is_booked: bool,
}

#[derive(Debug, Error)]
pub enum SlotError {
    #[error("Slot not found")]
    NotFound,

    #[error("Slot already booked")]
    AlreadyBooked,

    #[error("Database error: {0}")]
    Database(String),
}
