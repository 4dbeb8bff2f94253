// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writes. Every function here expects to run inside the caller's
//! transaction; none of them opens one.

pub mod audit;
pub mod schedule;

use diesel::SqliteConnection;
use shiftplan::{ScheduleChange, TransitionResult};
use tracing::debug;

use crate::error::PersistenceError;
use crate::queries::schedule::{ASSIGNMENT_SEQUENCE, TEMPLATE_SEQUENCE};

pub use audit::persist_audit_event;

/// Persists a transition result: the record change, the advanced id
/// sequences and the audit event.
///
/// # Returns
///
/// The event ID assigned to the audit event.
///
/// # Errors
///
/// Returns an error if any write fails. A record that disappeared or changed
/// underneath the write surfaces as
/// [`PersistenceError::ConcurrentModification`].
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<i64, PersistenceError> {
    match &result.change {
        ScheduleChange::TemplateCreated(template) => {
            schedule::insert_template(conn, template)?;
        }
        ScheduleChange::TemplateUpdated { after, .. } => {
            schedule::update_template(conn, after)?;
        }
        ScheduleChange::TemplateDeleted { template, orphaned } => {
            schedule::delete_template(conn, template.template_id, orphaned.len())?;
        }
        ScheduleChange::AssignmentPlaced { assignment, .. } => {
            schedule::insert_assignment(conn, assignment)?;
        }
        ScheduleChange::AssignmentRemoved(assignment) => {
            schedule::delete_assignment(conn, assignment.assignment_id)?;
        }
        ScheduleChange::AssignmentTransitioned { assignment, from } => {
            schedule::update_operational_state(
                conn,
                assignment.assignment_id,
                *from,
                assignment.operational_state,
            )?;
        }
    }

    schedule::advance_sequence(conn, TEMPLATE_SEQUENCE, result.new_state.next_template_id)?;
    schedule::advance_sequence(
        conn,
        ASSIGNMENT_SEQUENCE,
        result.new_state.next_assignment_id,
    )?;

    let event_id: i64 = persist_audit_event(conn, &result.audit_event)?;
    debug!(
        event_id,
        action = %result.audit_event.action.name,
        "Persisted schedule change"
    );
    Ok(event_id)
}
