//! Fitness class model.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A scheduled fitness class occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessClass {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    /// Instructor user id; the core may embed the full user on detail reads
    pub instructor: u64,
    pub capacity: u32,
    pub price_cents: i64,
    pub duration_minutes: u32,
    pub start_datetime: String,
    pub end_datetime: String,
    pub location: Option<String>,
    pub is_active: bool,
}

/// Payload for creating a class (staff/admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClassCreate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub instructor: u64,
    #[validate(range(min = 1, max = 1000))]
    pub capacity: u32,
    #[validate(range(min = 0))]
    pub price_cents: i64,
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: u32,
    pub start_datetime: String,
    pub end_datetime: String,
    #[validate(length(max = 200))]
    pub location: Option<String>,
}

/// Payload for updating a class. Absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ClassUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub instructor: Option<u64>,
    #[validate(range(min = 1, max = 1000))]
    pub capacity: Option<u32>,
    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: Option<u32>,
    pub start_datetime: Option<String>,
    pub end_datetime: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub is_active: Option<bool>,
}
