// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed client for the studio core REST API.
//!
//! Two request disciplines share one `reqwest::Client`:
//! - anonymous: login and token refresh only
//! - bearer: everything else, with the access token supplied per call
//!
//! Callers read the access token from the session store at call time; this
//! client never holds one.

use crate::error::AppError;
use crate::models::{
    Attendance, Booking, BookingStatus, ClassCreate, ClassUpdate, Feedback, FeedbackCreate,
    FitnessClass, Invoice, InvoiceCreate, MembershipPlan, PaymentInitiate, PaymentSession,
    PlanCreate, PlanUpdate, Subscription, TokenPair, User, UserCreate, UserUpdate,
};
use serde::Deserialize;

/// Studio core API client.
#[derive(Clone)]
pub struct CoreClient {
    http: reqwest::Client,
    /// None in mock mode; every call then fails deterministically.
    base_url: Option<String>,
}

impl CoreClient {
    /// Create a new client against the given base URL.
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Some(base_url),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All upstream operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
        }
    }

    fn endpoint(&self, path: &str) -> Result<String, AppError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| AppError::CoreApi("core API not reachable (offline mode)".to_string()))?;
        Ok(format!("{}/{}", base, path))
    }

    // ─── Auth (anonymous) ────────────────────────────────────────

    /// Exchange credentials for a token pair. POST auth/jwt/create.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let url = self.endpoint("auth/jwt/create")?;
        let body = serde_json::json!({ "email": email, "password": password });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::CoreApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Exchange a refresh token for a new pair. POST auth/jwt/refresh.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let url = self.endpoint("auth/jwt/refresh")?;
        let body = serde_json::json!({ "refresh": refresh_token });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::CoreApi(format!("Token refresh request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Fetch the profile behind an access token. GET auth/users/me.
    pub async fn current_user(&self, access_token: &str) -> Result<User, AppError> {
        let url = self.endpoint("auth/users/me")?;
        self.get_json(&url, access_token).await
    }

    // ─── Users ───────────────────────────────────────────────────

    pub async fn list_users(&self, access_token: &str) -> Result<Vec<User>, AppError> {
        let url = self.endpoint("users")?;
        self.get_json(&url, access_token).await
    }

    pub async fn get_user(&self, access_token: &str, id: u64) -> Result<User, AppError> {
        let url = self.endpoint(&format!("users/{}", id))?;
        self.get_json(&url, access_token).await
    }

    pub async fn create_user(&self, access_token: &str, user: &UserCreate) -> Result<User, AppError> {
        let url = self.endpoint("users")?;
        self.post_json(&url, access_token, user).await
    }

    pub async fn update_user(
        &self,
        access_token: &str,
        id: u64,
        update: &UserUpdate,
    ) -> Result<User, AppError> {
        let url = self.endpoint(&format!("users/{}", id))?;
        self.patch_json(&url, access_token, update).await
    }

    pub async fn delete_user(&self, access_token: &str, id: u64) -> Result<(), AppError> {
        let url = self.endpoint(&format!("users/{}", id))?;
        self.delete(&url, access_token).await
    }

    // ─── Fitness classes ─────────────────────────────────────────

    pub async fn list_classes(&self, access_token: &str) -> Result<Vec<FitnessClass>, AppError> {
        let url = self.endpoint("fitness-classes")?;
        self.get_json(&url, access_token).await
    }

    pub async fn get_class(&self, access_token: &str, id: u64) -> Result<FitnessClass, AppError> {
        let url = self.endpoint(&format!("fitness-classes/{}", id))?;
        self.get_json(&url, access_token).await
    }

    pub async fn create_class(
        &self,
        access_token: &str,
        class: &ClassCreate,
    ) -> Result<FitnessClass, AppError> {
        let url = self.endpoint("fitness-classes")?;
        self.post_json(&url, access_token, class).await
    }

    pub async fn update_class(
        &self,
        access_token: &str,
        id: u64,
        update: &ClassUpdate,
    ) -> Result<FitnessClass, AppError> {
        let url = self.endpoint(&format!("fitness-classes/{}", id))?;
        self.patch_json(&url, access_token, update).await
    }

    pub async fn delete_class(&self, access_token: &str, id: u64) -> Result<(), AppError> {
        let url = self.endpoint(&format!("fitness-classes/{}", id))?;
        self.delete(&url, access_token).await
    }

    // ─── Bookings & attendance ───────────────────────────────────

    /// List bookings, optionally scoped to one member.
    pub async fn list_bookings(
        &self,
        access_token: &str,
        member: Option<u64>,
    ) -> Result<Vec<Booking>, AppError> {
        let url = self.endpoint("bookings")?;
        let mut request = self.http.get(&url).bearer_auth(access_token);
        if let Some(member) = member {
            request = request.query(&[("member", member.to_string())]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| AppError::CoreApi(e.to_string()))?;
        self.check_response_json(response).await
    }

    pub async fn get_booking(&self, access_token: &str, id: u64) -> Result<Booking, AppError> {
        let url = self.endpoint(&format!("bookings/{}", id))?;
        self.get_json(&url, access_token).await
    }

    /// Create a booking for a member in a class. The core assigns the id.
    pub async fn create_booking(
        &self,
        access_token: &str,
        member: u64,
        fitness_class: u64,
    ) -> Result<Booking, AppError> {
        let url = self.endpoint("bookings")?;
        let body = serde_json::json!({ "member": member, "fitness_class": fitness_class });
        self.post_json(&url, access_token, &body).await
    }

    /// Update a booking's status (cancel, mark attended/no-show).
    pub async fn set_booking_status(
        &self,
        access_token: &str,
        id: u64,
        status: BookingStatus,
    ) -> Result<Booking, AppError> {
        let url = self.endpoint(&format!("bookings/{}", id))?;
        let body = serde_json::json!({ "status": status });
        self.patch_json(&url, access_token, &body).await
    }

    pub async fn delete_booking(&self, access_token: &str, id: u64) -> Result<(), AppError> {
        let url = self.endpoint(&format!("bookings/{}", id))?;
        self.delete(&url, access_token).await
    }

    /// Record a present/absent mark against a booking. POST attendances.
    pub async fn create_attendance(
        &self,
        access_token: &str,
        booking_id: u64,
        present: bool,
        marked_by: u64,
    ) -> Result<Attendance, AppError> {
        let url = self.endpoint("attendances")?;
        let body = serde_json::json!({
            "booking_id": booking_id,
            "present": present,
            "marked_by": marked_by,
        });
        self.post_json(&url, access_token, &body).await
    }

    // ─── Membership plans & subscriptions ────────────────────────

    pub async fn list_plans(&self, access_token: &str) -> Result<Vec<MembershipPlan>, AppError> {
        let url = self.endpoint("membership-plans")?;
        self.get_json(&url, access_token).await
    }

    pub async fn get_plan(&self, access_token: &str, id: u64) -> Result<MembershipPlan, AppError> {
        let url = self.endpoint(&format!("membership-plans/{}", id))?;
        self.get_json(&url, access_token).await
    }

    pub async fn create_plan(
        &self,
        access_token: &str,
        plan: &PlanCreate,
    ) -> Result<MembershipPlan, AppError> {
        let url = self.endpoint("membership-plans")?;
        self.post_json(&url, access_token, plan).await
    }

    pub async fn update_plan(
        &self,
        access_token: &str,
        id: u64,
        update: &PlanUpdate,
    ) -> Result<MembershipPlan, AppError> {
        let url = self.endpoint(&format!("membership-plans/{}", id))?;
        self.patch_json(&url, access_token, update).await
    }

    pub async fn delete_plan(&self, access_token: &str, id: u64) -> Result<(), AppError> {
        let url = self.endpoint(&format!("membership-plans/{}", id))?;
        self.delete(&url, access_token).await
    }

    pub async fn list_subscriptions(
        &self,
        access_token: &str,
        member: Option<u64>,
    ) -> Result<Vec<Subscription>, AppError> {
        let url = self.endpoint("subscriptions")?;
        let mut request = self.http.get(&url).bearer_auth(access_token);
        if let Some(member) = member {
            request = request.query(&[("member", member.to_string())]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| AppError::CoreApi(e.to_string()))?;
        self.check_response_json(response).await
    }

    /// Enroll a member in a plan. The core assigns the id.
    pub async fn create_subscription(
        &self,
        access_token: &str,
        member: u64,
        plan: u64,
    ) -> Result<Subscription, AppError> {
        let url = self.endpoint("subscriptions")?;
        let body = serde_json::json!({ "member": member, "plan": plan });
        self.post_json(&url, access_token, &body).await
    }

    // ─── Feedback ────────────────────────────────────────────────

    pub async fn list_feedback(&self, access_token: &str) -> Result<Vec<Feedback>, AppError> {
        let url = self.endpoint("feedbacks")?;
        self.get_json(&url, access_token).await
    }

    pub async fn create_feedback(
        &self,
        access_token: &str,
        member: u64,
        feedback: &FeedbackCreate,
    ) -> Result<Feedback, AppError> {
        let url = self.endpoint("feedbacks")?;
        let body = serde_json::json!({
            "member": member,
            "fitness_class": feedback.fitness_class,
            "rating": feedback.rating,
            "comment": feedback.comment,
        });
        self.post_json(&url, access_token, &body).await
    }

    pub async fn delete_feedback(&self, access_token: &str, id: u64) -> Result<(), AppError> {
        let url = self.endpoint(&format!("feedbacks/{}", id))?;
        self.delete(&url, access_token).await
    }

    // ─── Billing ─────────────────────────────────────────────────

    /// Create an invoice for a booking or subscription. POST invoices.
    pub async fn create_invoice(
        &self,
        access_token: &str,
        invoice: &InvoiceCreate,
    ) -> Result<Invoice, AppError> {
        let url = self.endpoint("invoices")?;
        self.post_json(&url, access_token, invoice).await
    }

    /// Start a payment session; the core returns an external redirect URL.
    pub async fn initiate_payment(
        &self,
        access_token: &str,
        payment: &PaymentInitiate,
    ) -> Result<PaymentSession, AppError> {
        let url = self.endpoint("payments/initiate")?;
        self.post_json(&url, access_token, payment).await
    }

    // ─── Request plumbing ────────────────────────────────────────

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::CoreApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    async fn post_json<B: serde::Serialize + ?Sized, T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        access_token: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::CoreApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    async fn patch_json<B: serde::Serialize + ?Sized, T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        access_token: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .patch(url)
            .bearer_auth(access_token)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::CoreApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    async fn delete(&self, url: &str, access_token: &str) -> Result<(), AppError> {
        let response = self
            .http
            .delete(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::CoreApi(e.to_string()))?;

        self.check_response(response).await
    }

    /// Check response status and return error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<(), AppError> {
        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::status_error(response).await)
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AppError::CoreApi(format!("JSON parse error: {}", e)))
    }

    /// Map a non-2xx upstream response to an error, with the 401/429 markers.
    async fn status_error(response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!("Core API rate limit hit (429)");
            return AppError::CoreApi(AppError::CORE_RATE_LIMIT.to_string());
        }

        if status.as_u16() == 401 {
            return AppError::CoreApi(AppError::CORE_AUTH_ERROR.to_string());
        }

        AppError::CoreApi(format!("HTTP {}: {}", status, body))
    }
}
