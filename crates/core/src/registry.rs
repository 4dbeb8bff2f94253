// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries over templates and assignments.

use crate::error::CoreError;
use crate::state::ScheduleState;
use serde::{Deserialize, Serialize};
use shiftplan_domain::{
    AssignmentId, BranchId, DomainError, ShiftAssignment, ShiftDay, ShiftTemplate, TemplateId,
};
use time::{OffsetDateTime, Time};

/// Day, start, end, placement time, id.
pub(crate) type ScheduleKey = (ShiftDay, Time, Time, OffsetDateTime, AssignmentId);

/// A template's cell and who currently occupies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellOccupancy {
    pub template: ShiftTemplate,
    /// Occupants, first placed first.
    pub occupants: Vec<ShiftAssignment>,
    /// Places still free.
    pub remaining: u32,
}

/// Lists templates, optionally restricted to one branch.
///
/// Order is `(day, start, name)`, with the template id as a final tie-break
/// so the listing is fully deterministic.
#[must_use]
pub fn list_templates(state: &ScheduleState, branch_id: Option<BranchId>) -> Vec<ShiftTemplate> {
    let mut templates: Vec<ShiftTemplate> = state
        .templates
        .iter()
        .filter(|template| branch_id.is_none_or(|branch_id| template.branch_id == branch_id))
        .cloned()
        .collect();
    templates.sort_by(|a, b| {
        (a.day, a.window.start(), &a.name, a.template_id).cmp(&(
            b.day,
            b.window.start(),
            &b.name,
            b.template_id,
        ))
    });
    templates
}

/// Reports the occupancy of a template's cell.
///
/// # Errors
///
/// Returns `DomainError::TemplateNotFound` if the template does not exist.
pub fn cell_occupancy(
    state: &ScheduleState,
    template_id: TemplateId,
) -> Result<CellOccupancy, CoreError> {
    let template: &ShiftTemplate = state
        .template(template_id)
        .ok_or(DomainError::TemplateNotFound(template_id))?;

    let occupants: Vec<ShiftAssignment> = state
        .occupants(template_id)
        .into_iter()
        .cloned()
        .collect();
    let remaining: u32 = u32::try_from(occupants.len())
        .map_or(0, |taken| template.max_staff.saturating_sub(taken));

    Ok(CellOccupancy {
        template: template.clone(),
        occupants,
        remaining,
    })
}

/// Fetches a single assignment.
///
/// # Errors
///
/// Returns `DomainError::AssignmentNotFound` if the assignment does not exist.
pub fn get_assignment(
    state: &ScheduleState,
    assignment_id: AssignmentId,
) -> Result<ShiftAssignment, CoreError> {
    state
        .assignment(assignment_id)
        .cloned()
        .ok_or(CoreError::DomainViolation(DomainError::AssignmentNotFound(
            assignment_id,
        )))
}

/// Lists a branch's assignments by day and time, then placement order.
#[must_use]
pub fn list_assignments(state: &ScheduleState, branch_id: BranchId) -> Vec<ShiftAssignment> {
    let mut assignments: Vec<ShiftAssignment> = state
        .assignments
        .iter()
        .filter(|assignment| assignment.branch_id == branch_id)
        .cloned()
        .collect();
    assignments.sort_by_key(schedule_order);
    assignments
}

/// Sort key shared by listings and the weekly projection.
pub(crate) const fn schedule_order(assignment: &ShiftAssignment) -> ScheduleKey {
    (
        assignment.day,
        assignment.window.start(),
        assignment.window.end(),
        assignment.placed_at,
        assignment.assignment_id,
    )
}
