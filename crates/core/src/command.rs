// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftplan_domain::{
    AssignmentId, BranchId, EmployeeId, OperationalState, ShiftDay, TemplateId,
};
use time::{OffsetDateTime, Time};

/// A command represents scheduler intent as data only.
///
/// Commands are the only way to request schedule changes. Raw values such as
/// times and capacities are validated when the command is applied, not when
/// it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Define a new recurring weekly slot.
    CreateTemplate {
        branch_id: BranchId,
        name: String,
        day: ShiftDay,
        start: Time,
        end: Time,
        /// The role expected to fill the slot.
        role: String,
        /// Requested capacity; must be at least one.
        max_staff: i64,
    },
    /// Edit the descriptive fields or capacity of a template.
    ///
    /// The day and window are fixed once a template exists. `None` leaves a
    /// field unchanged.
    UpdateTemplate {
        template_id: TemplateId,
        name: Option<String>,
        role: Option<String>,
        max_staff: Option<i64>,
    },
    /// Remove a template whose assignments are all completed.
    DeleteTemplate { template_id: TemplateId },
    /// Place an employee into a template's cell.
    PlaceAssignment {
        template_id: TemplateId,
        employee_id: EmployeeId,
        /// Overrides the template role for this placement.
        role: Option<String>,
        notes: Option<String>,
        placed_at: OffsetDateTime,
    },
    /// Place an employee into a standalone slot with no capacity bound.
    PlaceAdHocAssignment {
        employee_id: EmployeeId,
        branch_id: BranchId,
        day: ShiftDay,
        start: Time,
        end: Time,
        role: String,
        notes: Option<String>,
        placed_at: OffsetDateTime,
    },
    /// Delete an assignment, freeing its place in the cell.
    RemoveAssignment { assignment_id: AssignmentId },
    /// Move an assignment to a new operational state.
    TransitionAssignment {
        assignment_id: AssignmentId,
        target: OperationalState,
    },
}

impl Command {
    /// The command name recorded in audit actions.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateTemplate { .. } => "CreateTemplate",
            Self::UpdateTemplate { .. } => "UpdateTemplate",
            Self::DeleteTemplate { .. } => "DeleteTemplate",
            Self::PlaceAssignment { .. } => "PlaceAssignment",
            Self::PlaceAdHocAssignment { .. } => "PlaceAdHocAssignment",
            Self::RemoveAssignment { .. } => "RemoveAssignment",
            Self::TransitionAssignment { .. } => "TransitionAssignment",
        }
    }
}
