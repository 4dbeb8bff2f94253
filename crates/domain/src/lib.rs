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

mod error;
mod operational_state;
mod schedule_time;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use operational_state::{OperationalState, TransitionPolicy};
pub use schedule_time::{ShiftDay, TimeWindow, format_time_of_day, parse_time_of_day};
pub use types::{
    AdHocSlot, AssignmentId, Branch, BranchId, Employee, EmployeeId, ShiftAssignment,
    ShiftTemplate, TemplateId,
};
pub use validation::{
    cell_occupancy, find_double_booking, validate_capacity, validate_capacity_change,
    validate_employee_placeable, validate_max_staff, validate_no_double_booking, validate_role,
    validate_template_deletable, validate_template_name,
};
