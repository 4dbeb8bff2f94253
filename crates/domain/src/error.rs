// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::operational_state::OperationalState;
use crate::schedule_time::{ShiftDay, TimeWindow, format_time_of_day};
use crate::types::{AssignmentId, BranchId, EmployeeId, TemplateId};
use time::{Date, Time};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A slot's start time is not strictly before its end time.
    InvalidRange {
        /// The requested start time.
        start: Time,
        /// The requested end time.
        end: Time,
    },
    /// A template capacity below one was requested.
    InvalidCapacity {
        /// The rejected capacity.
        max_staff: i64,
    },
    /// Day number outside Monday (1) through Friday (5).
    InvalidDayOfWeek(u8),
    /// A wall-clock value could not be parsed.
    InvalidTimeOfDay {
        /// The rejected input.
        value: String,
        /// The parser message.
        error: String,
    },
    /// Template name is empty or invalid.
    InvalidName(String),
    /// Role is empty or invalid.
    InvalidRole(String),
    /// Unknown operational state name.
    InvalidOperationalState(String),
    /// Unknown transition policy name.
    InvalidTransitionPolicy(String),
    /// Branch does not exist in the directory.
    BranchNotFound(BranchId),
    /// Template does not exist.
    TemplateNotFound(TemplateId),
    /// Employee does not exist in the directory.
    EmployeeNotFound(EmployeeId),
    /// Assignment does not exist.
    AssignmentNotFound(AssignmentId),
    /// Employee exists but may not be scheduled.
    EmployeeInactive {
        /// The employee.
        employee_id: EmployeeId,
        /// The employee's display name.
        display_name: String,
    },
    /// The template's cell is already full.
    CapacityExceeded {
        /// The template whose cell is full.
        template_id: TemplateId,
        /// Number of assignments currently in the cell.
        occupancy: usize,
        /// The cell's capacity.
        max_staff: u32,
    },
    /// The employee already works an overlapping slot that day.
    DoubleBooked {
        /// The employee being placed.
        employee_id: EmployeeId,
        /// The day of both slots.
        day: ShiftDay,
        /// The window that was requested.
        requested: TimeWindow,
        /// The existing assignment that overlaps.
        conflicting_assignment_id: AssignmentId,
        /// The existing assignment's window.
        conflicting_window: TimeWindow,
    },
    /// The operational state change is not permitted.
    InvalidTransition {
        /// Current state.
        from: OperationalState,
        /// Requested state.
        to: OperationalState,
        /// Why the change is refused.
        reason: String,
    },
    /// Template is still referenced by assignments that are not completed.
    TemplateInUse {
        /// The template.
        template_id: TemplateId,
        /// Number of assignments still open in the cell.
        open_assignments: usize,
    },
    /// A calendar date computation left the supported range.
    DateOutOfRange(Date),
    /// An identifier sequence ran past `i64::MAX`.
    IdentifierOverflow {
        /// Name of the exhausted sequence.
        sequence: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(
                    f,
                    "Invalid time range: start {} must be before end {}",
                    format_time_of_day(*start),
                    format_time_of_day(*end)
                )
            }
            Self::InvalidCapacity { max_staff } => {
                write!(f, "Invalid capacity: {max_staff}. Must be at least 1")
            }
            Self::InvalidDayOfWeek(day) => {
                write!(
                    f,
                    "Invalid day of week: {day}. Must be between 1 (Monday) and 5 (Friday)"
                )
            }
            Self::InvalidTimeOfDay { value, error } => {
                write!(f, "Invalid time of day '{value}': {error}")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidRole(msg) => write!(f, "Invalid role: {msg}"),
            Self::InvalidOperationalState(state) => {
                write!(f, "Invalid operational state: {state}")
            }
            Self::InvalidTransitionPolicy(policy) => {
                write!(f, "Invalid transition policy: {policy}")
            }
            Self::BranchNotFound(id) => write!(f, "Branch {id} not found"),
            Self::TemplateNotFound(id) => write!(f, "Shift template {id} not found"),
            Self::EmployeeNotFound(id) => write!(f, "Employee {id} not found"),
            Self::AssignmentNotFound(id) => write!(f, "Assignment {id} not found"),
            Self::EmployeeInactive {
                employee_id,
                display_name,
            } => {
                write!(
                    f,
                    "Employee '{display_name}' ({employee_id}) is inactive and cannot be scheduled"
                )
            }
            Self::CapacityExceeded {
                template_id,
                occupancy,
                max_staff,
            } => {
                write!(
                    f,
                    "Shift template {template_id} is full: {occupancy} of {max_staff} places taken"
                )
            }
            Self::DoubleBooked {
                employee_id,
                day,
                requested,
                conflicting_assignment_id,
                conflicting_window,
            } => {
                write!(
                    f,
                    "Employee {employee_id} is already booked on {day} {conflicting_window} \
                     (assignment {conflicting_assignment_id}), which overlaps {requested}"
                )
            }
            Self::InvalidTransition { from, to, reason } => {
                write!(f, "Invalid transition from {from} to {to}: {reason}")
            }
            Self::TemplateInUse {
                template_id,
                open_assignments,
            } => {
                write!(
                    f,
                    "Shift template {template_id} cannot be deleted: {open_assignments} assignment(s) not yet completed"
                )
            }
            Self::DateOutOfRange(date) => {
                write!(f, "Date {date} is outside the supported calendar range")
            }
            Self::IdentifierOverflow { sequence } => {
                write!(f, "Identifier sequence '{sequence}' is exhausted")
            }
        }
    }
}

impl std::error::Error for DomainError {}
