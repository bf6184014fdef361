//! Member feedback model.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A member's review of a class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: u64,
    pub member: u64,
    pub fitness_class: u64,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: String,
}

/// Payload for submitting feedback.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackCreate {
    pub fitness_class: u64,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}
