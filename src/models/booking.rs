//! Booking and attendance models.

use serde::{Deserialize, Serialize};

/// Booking lifecycle status as tracked by the core API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    #[serde(rename = "BOOKED")]
    Booked,
    #[serde(rename = "ATTENDED")]
    Attended,
    #[serde(rename = "CANCELLED")]
    Cancelled,
    #[serde(rename = "NO_SHOW")]
    NoShow,
}

/// A member's reservation for one class occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: u64,
    pub member: u64,
    pub fitness_class: u64,
    pub status: BookingStatus,
    pub booked_at: String,
}

/// A present/absent mark against a booking, recorded by staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    pub booking_id: u64,
    pub present: bool,
    pub marked_by: u64,
    pub marked_at: String,
}
