// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use shiftplan::CoreError;
use shiftplan_domain::{AssignmentId, DomainError, TemplateId, TimeWindow, format_time_of_day};
use shiftplan_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated. One of `employee_active`,
        /// `cell_capacity`, `no_double_booking`,
        /// `operational_state_transition` or `template_in_use`.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
        /// What the request collided with, for the capacity and
        /// double-booking rules.
        conflict: Option<RuleConflict>,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Another writer got there first. The operation may be retried.
    ConcurrentModification {
        /// A description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

/// The existing schedule entry a rejected placement collided with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleConflict {
    /// The template's cell has no place left.
    CellFull {
        template_id: TemplateId,
        occupancy: usize,
        max_staff: u32,
    },
    /// The employee already works an overlapping slot that day.
    Overlap {
        assignment_id: AssignmentId,
        window: TimeWindow,
    },
}

impl ApiError {
    /// The HTTP status class an outer handler should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput { .. } => 400,
            Self::ResourceNotFound { .. } => 404,
            Self::DomainRuleViolation { .. } | Self::ConcurrentModification { .. } => 409,
            Self::Internal { .. } => 500,
        }
    }

    /// Returns true if repeating the same request may succeed.
    ///
    /// Only write conflicts qualify; a violated rule stays violated.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification { .. })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message, .. } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ConcurrentModification { message } => {
                write!(f, "Concurrent modification: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidRange { start, end } => ApiError::InvalidInput {
            field: String::from("time_range"),
            message: format!(
                "Start time {} must be before end time {}",
                format_time_of_day(start),
                format_time_of_day(end)
            ),
        },
        DomainError::InvalidCapacity { max_staff } => ApiError::InvalidInput {
            field: String::from("max_staff"),
            message: format!("Capacity must be at least 1, got {max_staff}"),
        },
        DomainError::InvalidDayOfWeek(day) => ApiError::InvalidInput {
            field: String::from("day_of_week"),
            message: format!("Day {day} is not between 1 (Monday) and 5 (Friday)"),
        },
        DomainError::InvalidTimeOfDay { value, error } => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("Failed to parse time '{value}': {error}"),
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidRole(msg) => ApiError::InvalidInput {
            field: String::from("role"),
            message: msg,
        },
        DomainError::InvalidOperationalState(state) => ApiError::InvalidInput {
            field: String::from("state"),
            message: format!("Unknown operational state '{state}'"),
        },
        DomainError::InvalidTransitionPolicy(policy) => ApiError::InvalidInput {
            field: String::from("transition_policy"),
            message: format!("Unknown transition policy '{policy}'"),
        },
        DomainError::DateOutOfRange(date) => ApiError::InvalidInput {
            field: String::from("week_of"),
            message: format!("Date {date} is outside the supported calendar range"),
        },
        DomainError::BranchNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Branch"),
            message: format!("Branch {id} does not exist"),
        },
        DomainError::TemplateNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Shift template"),
            message: format!("Shift template {id} does not exist"),
        },
        DomainError::EmployeeNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {id} does not exist"),
        },
        DomainError::AssignmentNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Assignment"),
            message: format!("Assignment {id} does not exist"),
        },
        DomainError::EmployeeInactive {
            employee_id,
            display_name,
        } => ApiError::DomainRuleViolation {
            rule: String::from("employee_active"),
            message: format!(
                "Employee '{display_name}' ({employee_id}) is inactive and cannot be scheduled"
            ),
            conflict: None,
        },
        DomainError::CapacityExceeded {
            template_id,
            occupancy,
            max_staff,
        } => ApiError::DomainRuleViolation {
            rule: String::from("cell_capacity"),
            message: format!(
                "Shift template {template_id} is full: {occupancy} of {max_staff} places taken"
            ),
            conflict: Some(RuleConflict::CellFull {
                template_id,
                occupancy,
                max_staff,
            }),
        },
        DomainError::DoubleBooked {
            employee_id,
            day,
            requested,
            conflicting_assignment_id,
            conflicting_window,
        } => ApiError::DomainRuleViolation {
            rule: String::from("no_double_booking"),
            message: format!(
                "Employee {employee_id} already works {day} {conflicting_window} \
                 (assignment {conflicting_assignment_id}), which overlaps {requested}"
            ),
            conflict: Some(RuleConflict::Overlap {
                assignment_id: conflicting_assignment_id,
                window: conflicting_window,
            }),
        },
        DomainError::InvalidTransition { from, to, reason } => ApiError::DomainRuleViolation {
            rule: String::from("operational_state_transition"),
            message: format!("Cannot move from {from} to {to}: {reason}"),
            conflict: None,
        },
        DomainError::TemplateInUse {
            template_id,
            open_assignments,
        } => ApiError::DomainRuleViolation {
            rule: String::from("template_in_use"),
            message: format!(
                "Shift template {template_id} still has {open_assignments} assignment(s) not yet completed"
            ),
            conflict: None,
        },
        DomainError::IdentifierOverflow { sequence } => ApiError::Internal {
            message: format!("Identifier sequence '{sequence}' is exhausted"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::DirectoryUnavailable(msg) => ApiError::Internal {
            message: format!("Directory unavailable: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Lock contention and stale writes become the retryable
/// [`ApiError::ConcurrentModification`]; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ConcurrentModification(msg) => {
            ApiError::ConcurrentModification { message: msg }
        }
        PersistenceError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message: format!("Audit event {id} does not exist"),
        },
        other => ApiError::Internal {
            message: format!("Persistence error: {other}"),
        },
    }
}
