// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod billing;
pub mod booking;
pub mod class;
pub mod feedback;
pub mod plan;
pub mod user;

pub use billing::{Invoice, InvoiceCreate, PaymentInitiate, PaymentKind, PaymentSession};
pub use booking::{Attendance, Booking, BookingStatus};
pub use class::{ClassCreate, ClassUpdate, FitnessClass};
pub use feedback::{Feedback, FeedbackCreate};
pub use plan::{MembershipPlan, PlanCreate, PlanUpdate, Subscription};
pub use user::{Role, TokenPair, User, UserCreate, UserUpdate};
