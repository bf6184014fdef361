// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitdesk: gateway for fitness-studio management dashboards.
//!
//! This crate fronts the studio core REST API for the browser dashboards:
//! it owns sessions, role gating, list filtering, and the checkout saga.

pub mod config;
pub mod error;
pub mod filter;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{CheckoutService, CoreClient, SessionStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    pub core: CoreClient,
    pub checkout: CheckoutService,
}
