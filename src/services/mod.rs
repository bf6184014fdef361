// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session, checkout, and core API access.

pub mod checkout;
pub mod core_api;
pub mod session;

pub use checkout::{CheckoutBackend, CheckoutService, CheckoutTarget, SagaRecord, SagaState, SagaStep};
pub use core_api::CoreClient;
pub use session::{SessionEntry, SessionStore};
