// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry days as numbers, times of day as `HH:MM` text and states
//! as their upper-case names, the way an outer handler receives them.
//! Responses render them the same way.

use serde::{Deserialize, Serialize};
use shiftplan_audit::AuditEvent;
use shiftplan_domain::{
    AssignmentId, BranchId, EmployeeId, ShiftAssignment, ShiftTemplate, TemplateId,
    format_time_of_day,
};
use time::OffsetDateTime;

/// API request to create a recurring shift template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    pub branch_id: BranchId,
    pub name: String,
    /// 1 (Monday) through 5 (Friday).
    pub day_of_week: u8,
    /// `HH:MM`, 24h.
    pub start_time: String,
    /// `HH:MM`, 24h.
    pub end_time: String,
    pub role: String,
    pub max_staff: i64,
}

/// API request to edit a template. Absent fields are left unchanged.
///
/// The day and time window cannot be edited.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub max_staff: Option<i64>,
}

/// API request to place an employee into a template's cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceAssignmentRequest {
    pub template_id: TemplateId,
    pub employee_id: EmployeeId,
    /// Overrides the template's role for this placement.
    pub role: Option<String>,
    pub notes: Option<String>,
}

/// API request to place an employee into a standalone slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceAdHocAssignmentRequest {
    pub employee_id: EmployeeId,
    pub branch_id: BranchId,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub role: String,
    pub notes: Option<String>,
}

/// API request to change an assignment's operational state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionAssignmentRequest {
    pub assignment_id: AssignmentId,
    /// `INACTIVE`, `ACTIVE`, `ASSIST`, `BREAK` or `COMPLETED`.
    pub state: String,
}

/// A template as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateResponse {
    pub template_id: TemplateId,
    pub branch_id: BranchId,
    pub name: String,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub role: String,
    pub max_staff: u32,
}

impl From<&ShiftTemplate> for TemplateResponse {
    fn from(template: &ShiftTemplate) -> Self {
        Self {
            template_id: template.template_id,
            branch_id: template.branch_id,
            name: template.name.clone(),
            day_of_week: template.day.number(),
            start_time: format_time_of_day(template.window.start()),
            end_time: format_time_of_day(template.window.end()),
            role: template.role.clone(),
            max_staff: template.max_staff,
        }
    }
}

/// An assignment as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub assignment_id: AssignmentId,
    /// `None` for ad-hoc placements and orphaned history.
    pub template_id: Option<TemplateId>,
    pub employee_id: EmployeeId,
    pub branch_id: BranchId,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub role: String,
    pub notes: Option<String>,
    pub operational_state: String,
    #[serde(with = "time::serde::rfc3339")]
    pub placed_at: OffsetDateTime,
}

impl From<&ShiftAssignment> for AssignmentResponse {
    fn from(assignment: &ShiftAssignment) -> Self {
        Self {
            assignment_id: assignment.assignment_id,
            template_id: assignment.template_id,
            employee_id: assignment.employee_id,
            branch_id: assignment.branch_id,
            day_of_week: assignment.day.number(),
            start_time: format_time_of_day(assignment.window.start()),
            end_time: format_time_of_day(assignment.window.end()),
            role: assignment.role.clone(),
            notes: assignment.notes.clone(),
            operational_state: assignment.operational_state.as_str().to_string(),
            placed_at: assignment.placed_at,
        }
    }
}

/// API response for a template deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTemplateResponse {
    pub template_id: TemplateId,
    /// Completed assignments that lost their template reference.
    pub orphaned_assignment_ids: Vec<AssignmentId>,
}

/// API response for a cell occupancy query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellOccupancyResponse {
    pub template: TemplateResponse,
    /// Occupants, first placed first.
    pub occupants: Vec<AssignmentResponse>,
    pub remaining: u32,
}

/// One entry of a branch's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub event_id: i64,
    pub event: AuditEvent,
}

/// The outcome of a successful mutation.
///
/// Every mutation records exactly one audit event, committed together with
/// the change it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The operation's response payload.
    pub response: T,
    /// Identifier of the committed audit event.
    pub event_id: i64,
    /// The audit event that was committed.
    pub audit_event: AuditEvent,
}
