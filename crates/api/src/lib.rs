// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation surface of the shift scheduling engine.
//!
//! [`ShiftScheduler`] is what an outer service (HTTP handlers, a UI backend)
//! calls. It translates request DTOs into core commands, runs them
//! atomically against the database, and translates every failure into an
//! [`ApiError`] whose [`ApiError::status_code`] and
//! [`ApiError::is_retryable`] tell the caller how to respond.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod error;
mod request_response;
mod scheduler;

#[cfg(test)]
mod tests;

pub use config::{
    ConfigError, DatabaseConfig, ENV_BUSY_TIMEOUT_MS, ENV_DATABASE_PATH, ENV_TRANSITION_POLICY,
    SchedulerConfig,
};
pub use error::{
    ApiError, RuleConflict, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use request_response::{
    ApiResult, AssignmentResponse, AuditEntry, CellOccupancyResponse, CreateTemplateRequest,
    DeleteTemplateResponse, PlaceAdHocAssignmentRequest, PlaceAssignmentRequest,
    TemplateResponse, TransitionAssignmentRequest, UpdateTemplateRequest,
};
pub use scheduler::ShiftScheduler;
