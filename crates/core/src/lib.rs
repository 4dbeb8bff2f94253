// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

//! Shift scheduling core.
//!
//! Everything here is a pure function of a [`ScheduleState`] snapshot and the
//! [`Directory`] collaborator. Mutations are expressed as [`Command`]s and
//! produce a new state, the [`ScheduleChange`] to persist and exactly one
//! audit event. Callers are responsible for making the load, apply and
//! persist sequence atomic.

mod apply;
mod command;
mod directory;
mod error;
mod projector;
mod registry;
mod state;

#[cfg(test)]
mod tests;

use shiftplan_domain::{Branch, BranchId, DomainError, Employee, EmployeeId};

pub use apply::apply;
pub use command::Command;
pub use directory::{Directory, DirectoryError, StaticDirectory};
pub use error::CoreError;
pub use projector::{ProjectedAssignment, ProjectedDay, WeeklyProjection, project_week, week_start};
pub use registry::{CellOccupancy, cell_occupancy, get_assignment, list_assignments, list_templates};
pub use state::{ScheduleChange, ScheduleState, TransitionResult};

/// Looks up a branch, failing if the directory does not know it.
///
/// This is a read-only validation that does not create audit events.
///
/// # Errors
///
/// Returns `DomainError::BranchNotFound` if the branch does not exist, or
/// `CoreError::DirectoryUnavailable` if the lookup itself fails.
pub fn require_branch<D>(directory: &D, branch_id: BranchId) -> Result<Branch, CoreError>
where
    D: Directory + ?Sized,
{
    directory
        .branch(branch_id)?
        .ok_or(CoreError::DomainViolation(DomainError::BranchNotFound(
            branch_id,
        )))
}

/// Looks up an employee, failing if the directory does not know them.
///
/// The employee is returned whatever their active flag; callers decide
/// whether an inactive employee is acceptable.
///
/// # Errors
///
/// Returns `DomainError::EmployeeNotFound` if the employee does not exist, or
/// `CoreError::DirectoryUnavailable` if the lookup itself fails.
pub fn require_employee<D>(directory: &D, employee_id: EmployeeId) -> Result<Employee, CoreError>
where
    D: Directory + ?Sized,
{
    directory
        .employee(employee_id)?
        .ok_or(CoreError::DomainViolation(DomainError::EmployeeNotFound(
            employee_id,
        )))
}
