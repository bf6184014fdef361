//! Invoice and payment-session models, used transiently during checkout.

use serde::{Deserialize, Serialize};

/// Tag the core API uses to route an invoice to the right ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentKind {
    #[serde(rename = "class_booking")]
    ClassBooking,
    #[serde(rename = "plan_subscription")]
    PlanSubscription,
}

/// Request body for `invoices` create.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceCreate {
    /// Id of the booking or subscription being billed
    pub reference_id: u64,
    pub payment_kind: PaymentKind,
}

/// Billing record returned by the core API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub number: String,
    pub amount_cents: i64,
}

/// Request body for `payments/initiate`.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentInitiate {
    pub invoice_number: String,
}

/// External payment session; the browser navigates to `payment_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    pub payment_url: String,
}
