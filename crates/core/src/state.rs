// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftplan_audit::AuditEvent;
use shiftplan_domain::{
    AssignmentId, BranchId, DomainError, Employee, EmployeeId, OperationalState, ShiftAssignment,
    ShiftDay, ShiftTemplate, TemplateId,
};

/// A consistent snapshot of every template and assignment.
///
/// Double-booking spans branches, so the snapshot is not branch scoped.
/// Identifier counters travel with the snapshot so that ids are never reused,
/// even after the records holding them are deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleState {
    pub templates: Vec<ShiftTemplate>,
    pub assignments: Vec<ShiftAssignment>,
    /// The id the next created template receives.
    pub next_template_id: i64,
    /// The id the next placed assignment receives.
    pub next_assignment_id: i64,
}

impl ScheduleState {
    /// Creates an empty schedule whose ids start at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            templates: Vec::new(),
            assignments: Vec::new(),
            next_template_id: 1,
            next_assignment_id: 1,
        }
    }

    #[must_use]
    pub fn template(&self, template_id: TemplateId) -> Option<&ShiftTemplate> {
        self.templates
            .iter()
            .find(|template| template.template_id == template_id)
    }

    #[must_use]
    pub fn assignment(&self, assignment_id: AssignmentId) -> Option<&ShiftAssignment> {
        self.assignments
            .iter()
            .find(|assignment| assignment.assignment_id == assignment_id)
    }

    /// Returns the occupants of a template's cell, first placed first.
    ///
    /// Ties on `placed_at` fall back to the assignment id.
    #[must_use]
    pub fn occupants(&self, template_id: TemplateId) -> Vec<&ShiftAssignment> {
        let mut occupants: Vec<&ShiftAssignment> = self
            .assignments
            .iter()
            .filter(|assignment| assignment.occupies(template_id))
            .collect();
        occupants.sort_by_key(|assignment| (assignment.placed_at, assignment.assignment_id));
        occupants
    }

    /// Number of templates defined for a branch.
    #[must_use]
    pub fn template_count(&self, branch_id: BranchId) -> usize {
        self.templates
            .iter()
            .filter(|template| template.branch_id == branch_id)
            .count()
    }

    /// Number of assignments an employee holds on a day, across branches.
    #[must_use]
    pub fn day_load(&self, employee_id: EmployeeId, day: ShiftDay) -> usize {
        self.assignments
            .iter()
            .filter(|assignment| assignment.employee_id == employee_id && assignment.day == day)
            .count()
    }

    pub(crate) fn allocate_template_id(&mut self) -> Result<TemplateId, DomainError> {
        let id: i64 = self.next_template_id;
        self.next_template_id = id.checked_add(1).ok_or(DomainError::IdentifierOverflow {
            sequence: "shift_templates",
        })?;
        Ok(TemplateId::new(id))
    }

    pub(crate) fn allocate_assignment_id(&mut self) -> Result<AssignmentId, DomainError> {
        let id: i64 = self.next_assignment_id;
        self.next_assignment_id = id.checked_add(1).ok_or(DomainError::IdentifierOverflow {
            sequence: "shift_assignments",
        })?;
        Ok(AssignmentId::new(id))
    }
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self::new()
    }
}

/// The record-level effect of one applied command.
///
/// Persistence writes exactly this delta rather than diffing whole states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleChange {
    TemplateCreated(ShiftTemplate),
    TemplateUpdated {
        before: ShiftTemplate,
        after: ShiftTemplate,
    },
    /// The template is gone; `orphaned` completed assignments lost their
    /// template reference and remain for history.
    TemplateDeleted {
        template: ShiftTemplate,
        orphaned: Vec<AssignmentId>,
    },
    AssignmentPlaced {
        assignment: ShiftAssignment,
        /// The directory record the placement was validated against.
        employee: Employee,
    },
    AssignmentRemoved(ShiftAssignment),
    AssignmentTransitioned {
        assignment: ShiftAssignment,
        from: OperationalState,
    },
}

impl ScheduleChange {
    /// The branch whose schedule changed.
    #[must_use]
    pub const fn branch_id(&self) -> BranchId {
        match self {
            Self::TemplateCreated(template)
            | Self::TemplateUpdated {
                after: template, ..
            }
            | Self::TemplateDeleted { template, .. } => template.branch_id,
            Self::AssignmentPlaced { assignment, .. }
            | Self::AssignmentRemoved(assignment)
            | Self::AssignmentTransitioned { assignment, .. } => assignment.branch_id,
        }
    }

    /// Returns true if the placement's role differs from the employee's
    /// directory role. Roles are advisory, so this never blocks a placement.
    #[must_use]
    pub fn has_role_mismatch(&self) -> bool {
        match self {
            Self::AssignmentPlaced {
                assignment,
                employee,
            } => !assignment.role.eq_ignore_ascii_case(&employee.role),
            _ => false,
        }
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: ScheduleState,
    /// The delta to persist.
    pub change: ScheduleChange,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
