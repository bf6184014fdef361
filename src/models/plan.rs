//! Membership plan and subscription models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A recurring membership plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipPlan {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub duration_days: u32,
    pub price_cents: i64,
    pub is_active: bool,
    pub created_by: Option<u64>,
    pub created_at: Option<String>,
}

/// Payload for creating a plan (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlanCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 1, max = 3660))]
    pub duration_days: u32,
    #[validate(range(min = 0))]
    pub price_cents: i64,
}

/// Payload for updating a plan. Absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PlanUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 1, max = 3660))]
    pub duration_days: Option<u32>,
    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,
    pub is_active: Option<bool>,
}

/// A member's enrollment in a plan, created through checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: u64,
    pub member: u64,
    pub plan: u64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_active: bool,
}
