// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Checkout saga: domain record, then invoice, then payment initiation.
//!
//! The three upstream calls run strictly in order. If a step fails the saga
//! stops there and records the failure; nothing is compensated. A booking or
//! subscription created by step 1 stays created. Reconciliation is the core
//! API's job, and the saga record is the audit trail.

use crate::error::AppError;
use crate::models::{
    Booking, Invoice, InvoiceCreate, PaymentInitiate, PaymentKind, PaymentSession, Subscription,
};
use crate::services::core_api::CoreClient;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::future::Future;
use uuid::Uuid;

/// The upstream calls the saga drives, in the order it drives them.
///
/// `CoreClient` is the production implementation; tests script per-step
/// outcomes through their own implementations.
pub trait CheckoutBackend: Sync {
    fn create_booking(
        &self,
        access_token: &str,
        member: u64,
        fitness_class: u64,
    ) -> impl Future<Output = Result<Booking, AppError>> + Send;

    fn create_subscription(
        &self,
        access_token: &str,
        member: u64,
        plan: u64,
    ) -> impl Future<Output = Result<Subscription, AppError>> + Send;

    fn create_invoice(
        &self,
        access_token: &str,
        invoice: &InvoiceCreate,
    ) -> impl Future<Output = Result<Invoice, AppError>> + Send;

    fn initiate_payment(
        &self,
        access_token: &str,
        payment: &PaymentInitiate,
    ) -> impl Future<Output = Result<PaymentSession, AppError>> + Send;
}

impl CheckoutBackend for CoreClient {
    async fn create_booking(
        &self,
        access_token: &str,
        member: u64,
        fitness_class: u64,
    ) -> Result<Booking, AppError> {
        CoreClient::create_booking(self, access_token, member, fitness_class).await
    }

    async fn create_subscription(
        &self,
        access_token: &str,
        member: u64,
        plan: u64,
    ) -> Result<Subscription, AppError> {
        CoreClient::create_subscription(self, access_token, member, plan).await
    }

    async fn create_invoice(
        &self,
        access_token: &str,
        invoice: &InvoiceCreate,
    ) -> Result<Invoice, AppError> {
        CoreClient::create_invoice(self, access_token, invoice).await
    }

    async fn initiate_payment(
        &self,
        access_token: &str,
        payment: &PaymentInitiate,
    ) -> Result<PaymentSession, AppError> {
        CoreClient::initiate_payment(self, access_token, payment).await
    }
}

/// What is being paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CheckoutTarget {
    /// Book one class occurrence
    Class(u64),
    /// Subscribe to a membership plan
    Plan(u64),
}

impl CheckoutTarget {
    fn payment_kind(&self) -> PaymentKind {
        match self {
            CheckoutTarget::Class(_) => PaymentKind::ClassBooking,
            CheckoutTarget::Plan(_) => PaymentKind::PlanSubscription,
        }
    }
}

/// The saga's three steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SagaStep {
    CreateRecord,
    Invoice,
    InitiatePayment,
}

/// Saga state machine. Terminal states are `PaymentInitiated` and `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SagaState {
    Pending,
    RecordCreated {
        record_id: u64,
    },
    Invoiced {
        record_id: u64,
        invoice_number: String,
    },
    PaymentInitiated {
        record_id: u64,
        invoice_number: String,
        payment_url: String,
    },
    Failed {
        step: SagaStep,
        reason: String,
    },
}

impl SagaState {
    /// The next step to execute, or None if the saga is terminal.
    pub fn next_step(&self) -> Option<SagaStep> {
        match self {
            SagaState::Pending => Some(SagaStep::CreateRecord),
            SagaState::RecordCreated { .. } => Some(SagaStep::Invoice),
            SagaState::Invoiced { .. } => Some(SagaStep::InitiatePayment),
            SagaState::PaymentInitiated { .. } | SagaState::Failed { .. } => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next_step().is_none()
    }

    /// Redirect URL, present only once payment initiation succeeded.
    pub fn payment_url(&self) -> Option<&str> {
        match self {
            SagaState::PaymentInitiated { payment_url, .. } => Some(payment_url),
            _ => None,
        }
    }
}

/// One checkout attempt, queryable by the session that started it.
#[derive(Debug, Clone, Serialize)]
pub struct SagaRecord {
    pub id: Uuid,
    #[serde(skip)]
    pub session_id: Uuid,
    pub target: CheckoutTarget,
    pub state: SagaState,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Runs checkout sagas and keeps their records.
pub struct CheckoutService {
    sagas: DashMap<Uuid, SagaRecord>,
    /// Duplicate-submission guard, per (session, target).
    in_flight: DashMap<(Uuid, CheckoutTarget), ()>,
}

impl Default for CheckoutService {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutService {
    pub fn new() -> Self {
        Self {
            sagas: DashMap::new(),
            in_flight: DashMap::new(),
        }
    }

    /// Run a full checkout for the given member and target.
    ///
    /// Returns the final saga record: `PaymentInitiated` on success, `Failed`
    /// at the step that broke the chain otherwise. A second submission for
    /// the same (session, target) while one is running gets `Conflict`.
    pub async fn run<B: CheckoutBackend>(
        &self,
        core: &B,
        access_token: &str,
        session_id: Uuid,
        member_id: u64,
        target: CheckoutTarget,
    ) -> Result<SagaRecord, AppError> {
        let key = (session_id, target);
        if self.in_flight.insert(key, ()).is_some() {
            return Err(AppError::Conflict(
                "checkout already in progress for this item".to_string(),
            ));
        }
        let _guard = InFlightGuard {
            in_flight: &self.in_flight,
            key,
        };

        let saga_id = Uuid::new_v4();
        let now = Utc::now();
        let mut record = SagaRecord {
            id: saga_id,
            session_id,
            target,
            state: SagaState::Pending,
            started_at: now,
            updated_at: now,
        };
        self.sagas.insert(saga_id, record.clone());

        while let Some(step) = record.state.next_step() {
            let next_state = self
                .execute_step(core, access_token, member_id, target, step, &record.state)
                .await;

            record.state = match next_state {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(
                        saga_id = %saga_id,
                        step = ?step,
                        error = %e,
                        "Checkout step failed, aborting chain without compensation"
                    );
                    // Keep the raw upstream message so callers can still
                    // recognize the exact auth-failure marker.
                    let reason = match e {
                        AppError::CoreApi(msg) => msg,
                        other => other.to_string(),
                    };
                    SagaState::Failed { step, reason }
                }
            };
            record.updated_at = Utc::now();
            self.sagas.insert(saga_id, record.clone());
        }

        if let SagaState::PaymentInitiated { record_id, .. } = &record.state {
            tracing::info!(
                saga_id = %saga_id,
                record_id,
                "Checkout complete, handing payment URL to browser"
            );
        }

        Ok(record)
    }

    async fn execute_step<B: CheckoutBackend>(
        &self,
        core: &B,
        access_token: &str,
        member_id: u64,
        target: CheckoutTarget,
        step: SagaStep,
        state: &SagaState,
    ) -> Result<SagaState, AppError> {
        match (step, state) {
            (SagaStep::CreateRecord, SagaState::Pending) => {
                let record_id = match target {
                    CheckoutTarget::Class(class_id) => {
                        core.create_booking(access_token, member_id, class_id).await?.id
                    }
                    CheckoutTarget::Plan(plan_id) => {
                        core.create_subscription(access_token, member_id, plan_id)
                            .await?
                            .id
                    }
                };
                Ok(SagaState::RecordCreated { record_id })
            }
            (SagaStep::Invoice, SagaState::RecordCreated { record_id }) => {
                let invoice = core
                    .create_invoice(
                        access_token,
                        &InvoiceCreate {
                            reference_id: *record_id,
                            payment_kind: target.payment_kind(),
                        },
                    )
                    .await?;
                Ok(SagaState::Invoiced {
                    record_id: *record_id,
                    invoice_number: invoice.number,
                })
            }
            (
                SagaStep::InitiatePayment,
                SagaState::Invoiced {
                    record_id,
                    invoice_number,
                },
            ) => {
                let session = core
                    .initiate_payment(
                        access_token,
                        &PaymentInitiate {
                            invoice_number: invoice_number.clone(),
                        },
                    )
                    .await?;
                Ok(SagaState::PaymentInitiated {
                    record_id: *record_id,
                    invoice_number: invoice_number.clone(),
                    payment_url: session.payment_url,
                })
            }
            _ => Err(AppError::Internal(anyhow::anyhow!(
                "saga step {:?} does not apply to current state",
                step
            ))),
        }
    }

    /// Look up a saga record, scoped to the session that started it.
    pub fn get(&self, saga_id: Uuid, session_id: Uuid) -> Option<SagaRecord> {
        self.sagas
            .get(&saga_id)
            .filter(|r| r.session_id == session_id)
            .map(|r| r.clone())
    }

    /// Drop saga records whose last update is older than `ttl`.
    ///
    /// Records live only in memory; the periodic sweep keeps the map bounded
    /// on a long-running gateway. Returns the number dropped.
    pub fn evict_stale(&self, ttl: chrono::Duration) -> usize {
        let cutoff = Utc::now() - ttl;
        let before = self.sagas.len();
        self.sagas.retain(|_, r| r.updated_at > cutoff);
        before - self.sagas.len()
    }
}

/// Releases the duplicate-submission guard when the saga finishes.
struct InFlightGuard<'a> {
    in_flight: &'a DashMap<(Uuid, CheckoutTarget), ()>,
    key: (Uuid, CheckoutTarget),
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.remove(&self.key);
    }
}
