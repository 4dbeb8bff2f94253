// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversions to and from domain values.
//!
//! Times of day are stored as `HH:MM` text and placement timestamps as
//! RFC 3339, so the database stays readable with the `sqlite3` shell.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use shiftplan_audit::{Action, Actor, Cause, StateSnapshot};
use shiftplan_domain::{
    AssignmentId, BranchId, EmployeeId, OperationalState, ShiftAssignment, ShiftDay,
    ShiftTemplate, TemplateId, TimeWindow, format_time_of_day,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::{shift_assignments, shift_templates};
use crate::error::PersistenceError;

/// JSON form of an [`Actor`] in the `actor_json` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

impl From<&Actor> for ActorData {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            actor_type: actor.actor_type.clone(),
        }
    }
}

impl From<ActorData> for Actor {
    fn from(data: ActorData) -> Self {
        Self::new(data.id, data.actor_type)
    }
}

/// JSON form of a [`Cause`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

impl From<&Cause> for CauseData {
    fn from(cause: &Cause) -> Self {
        Self {
            id: cause.id.clone(),
            description: cause.description.clone(),
        }
    }
}

impl From<CauseData> for Cause {
    fn from(data: CauseData) -> Self {
        Self::new(data.id, data.description)
    }
}

/// JSON form of an [`Action`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

impl From<&Action> for ActionData {
    fn from(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            details: action.details.clone(),
        }
    }
}

impl From<ActionData> for Action {
    fn from(data: ActionData) -> Self {
        Self::new(data.name, data.details)
    }
}

/// JSON form of a before or after [`StateSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

impl From<&StateSnapshot> for StateSnapshotData {
    fn from(snapshot: &StateSnapshot) -> Self {
        Self {
            data: snapshot.data.clone(),
        }
    }
}

impl From<StateSnapshotData> for StateSnapshot {
    fn from(data: StateSnapshotData) -> Self {
        Self::new(data.data)
    }
}

/// A `shift_templates` row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = shift_templates)]
#[diesel(primary_key(template_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TemplateRow {
    pub template_id: i64,
    pub branch_id: i64,
    pub name: String,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub role: String,
    pub max_staff: i32,
}

impl TemplateRow {
    /// # Errors
    ///
    /// Returns an error if `max_staff` does not fit the column.
    pub fn from_domain(template: &ShiftTemplate) -> Result<Self, PersistenceError> {
        Ok(Self {
            template_id: template.template_id.value(),
            branch_id: template.branch_id.value(),
            name: template.name.clone(),
            day_of_week: i32::from(template.day.number()),
            start_time: format_time_of_day(template.window.start()),
            end_time: format_time_of_day(template.window.end()),
            role: template.role.clone(),
            max_staff: i32::try_from(template.max_staff).map_err(|_| {
                PersistenceError::SerializationError(format!(
                    "max_staff {} does not fit in the database column",
                    template.max_staff
                ))
            })?,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the stored values violate a domain rule.
    pub fn into_domain(self) -> Result<ShiftTemplate, PersistenceError> {
        let day: ShiftDay = parse_day(self.day_of_week)?;
        let window: TimeWindow = TimeWindow::parse(&self.start_time, &self.end_time)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let max_staff: u32 = u32::try_from(self.max_staff).map_err(|_| {
            PersistenceError::ReconstructionError(format!(
                "Template {} has negative max_staff {}",
                self.template_id, self.max_staff
            ))
        })?;

        Ok(ShiftTemplate::new(
            TemplateId::new(self.template_id),
            BranchId::new(self.branch_id),
            self.name,
            day,
            window,
            self.role,
            max_staff,
        ))
    }
}

/// A `shift_assignments` row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = shift_assignments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssignmentRow {
    pub assignment_id: i64,
    pub template_id: Option<i64>,
    pub employee_id: i64,
    pub branch_id: i64,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub role: String,
    pub notes: Option<String>,
    pub operational_state: String,
    pub placed_at: String,
}

impl AssignmentRow {
    /// # Errors
    ///
    /// Returns an error if the placement timestamp cannot be formatted.
    pub fn from_domain(assignment: &ShiftAssignment) -> Result<Self, PersistenceError> {
        Ok(Self {
            assignment_id: assignment.assignment_id.value(),
            template_id: assignment.template_id.map(TemplateId::value),
            employee_id: assignment.employee_id.value(),
            branch_id: assignment.branch_id.value(),
            day_of_week: i32::from(assignment.day.number()),
            start_time: format_time_of_day(assignment.window.start()),
            end_time: format_time_of_day(assignment.window.end()),
            role: assignment.role.clone(),
            notes: assignment.notes.clone(),
            operational_state: assignment.operational_state.as_str().to_string(),
            placed_at: assignment
                .placed_at
                .format(&Rfc3339)
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the stored values violate a domain rule.
    pub fn into_domain(self) -> Result<ShiftAssignment, PersistenceError> {
        let day: ShiftDay = parse_day(self.day_of_week)?;
        let window: TimeWindow = TimeWindow::parse(&self.start_time, &self.end_time)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let operational_state: OperationalState = self
            .operational_state
            .parse()
            .map_err(|e: shiftplan_domain::DomainError| {
                PersistenceError::ReconstructionError(e.to_string())
            })?;
        let placed_at: OffsetDateTime = OffsetDateTime::parse(&self.placed_at, &Rfc3339)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        Ok(ShiftAssignment {
            assignment_id: AssignmentId::new(self.assignment_id),
            template_id: self.template_id.map(TemplateId::new),
            employee_id: EmployeeId::new(self.employee_id),
            branch_id: BranchId::new(self.branch_id),
            day,
            window,
            role: self.role,
            notes: self.notes,
            operational_state,
            placed_at,
        })
    }
}

fn parse_day(day_of_week: i32) -> Result<ShiftDay, PersistenceError> {
    u8::try_from(day_of_week)
        .ok()
        .and_then(|number| ShiftDay::from_number(number).ok())
        .ok_or_else(|| {
            PersistenceError::ReconstructionError(format!("Invalid stored day_of_week {day_of_week}"))
        })
}
