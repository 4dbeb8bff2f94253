// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Template and assignment writes.
//!
//! Updates and deletes check the affected row count. The core validated the
//! change against a snapshot; if the row is no longer there, or no longer in
//! the expected state, the snapshot was stale.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftplan_domain::{AssignmentId, OperationalState, ShiftAssignment, ShiftTemplate, TemplateId};

use crate::data_models::{AssignmentRow, TemplateRow};
use crate::diesel_schema::{id_sequences, shift_assignments, shift_templates};
use crate::error::PersistenceError;

fn expect_one_row(affected: usize, what: &str) -> Result<(), PersistenceError> {
    if affected == 1 {
        Ok(())
    } else {
        Err(PersistenceError::ConcurrentModification(format!(
            "{what} was changed by another writer"
        )))
    }
}

/// Inserts a new template.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_template(
    conn: &mut SqliteConnection,
    template: &ShiftTemplate,
) -> Result<(), PersistenceError> {
    let row: TemplateRow = TemplateRow::from_domain(template)?;
    diesel::insert_into(shift_templates::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}

/// Overwrites a template's stored fields.
///
/// # Errors
///
/// Returns an error if the update fails or the template no longer exists.
pub fn update_template(
    conn: &mut SqliteConnection,
    template: &ShiftTemplate,
) -> Result<(), PersistenceError> {
    let row: TemplateRow = TemplateRow::from_domain(template)?;
    let affected: usize = diesel::update(
        shift_templates::table.filter(shift_templates::template_id.eq(row.template_id)),
    )
    .set(&row)
    .execute(conn)?;
    expect_one_row(affected, &format!("Shift template {}", template.template_id))
}

/// Deletes a template, orphaning the completed assignments that still
/// reference it.
///
/// # Arguments
///
/// * `expected_orphans` - How many assignments the core expects to orphan
///
/// # Errors
///
/// Returns an error if the delete fails, or the cell no longer holds exactly
/// the assignments the core saw.
pub fn delete_template(
    conn: &mut SqliteConnection,
    template_id: TemplateId,
    expected_orphans: usize,
) -> Result<(), PersistenceError> {
    let orphaned: usize = diesel::update(
        shift_assignments::table
            .filter(shift_assignments::template_id.eq(template_id.value()))
            .filter(shift_assignments::operational_state.eq(OperationalState::Completed.as_str())),
    )
    .set(shift_assignments::template_id.eq(None::<i64>))
    .execute(conn)?;
    if orphaned != expected_orphans {
        return Err(PersistenceError::ConcurrentModification(format!(
            "Shift template {template_id} occupancy changed during deletion"
        )));
    }

    // Any remaining reference is an open assignment; the foreign key would
    // silently null it, so refuse instead
    let remaining: i64 = shift_assignments::table
        .filter(shift_assignments::template_id.eq(template_id.value()))
        .count()
        .get_result(conn)?;
    if remaining > 0 {
        return Err(PersistenceError::ConcurrentModification(format!(
            "Shift template {template_id} gained open assignments during deletion"
        )));
    }

    let affected: usize = diesel::delete(
        shift_templates::table.filter(shift_templates::template_id.eq(template_id.value())),
    )
    .execute(conn)?;
    expect_one_row(affected, &format!("Shift template {template_id}"))
}

/// Inserts a new assignment.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_assignment(
    conn: &mut SqliteConnection,
    assignment: &ShiftAssignment,
) -> Result<(), PersistenceError> {
    let row: AssignmentRow = AssignmentRow::from_domain(assignment)?;
    diesel::insert_into(shift_assignments::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}

/// Deletes an assignment.
///
/// # Errors
///
/// Returns an error if the delete fails or the assignment is already gone.
pub fn delete_assignment(
    conn: &mut SqliteConnection,
    assignment_id: AssignmentId,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::delete(
        shift_assignments::table
            .filter(shift_assignments::assignment_id.eq(assignment_id.value())),
    )
    .execute(conn)?;
    expect_one_row(affected, &format!("Assignment {assignment_id}"))
}

/// Moves an assignment from `from` to `to`.
///
/// The update only matches while the stored state is still `from`.
///
/// # Errors
///
/// Returns an error if the update fails or the stored state has moved on.
pub fn update_operational_state(
    conn: &mut SqliteConnection,
    assignment_id: AssignmentId,
    from: OperationalState,
    to: OperationalState,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        shift_assignments::table
            .filter(shift_assignments::assignment_id.eq(assignment_id.value()))
            .filter(shift_assignments::operational_state.eq(from.as_str())),
    )
    .set(shift_assignments::operational_state.eq(to.as_str()))
    .execute(conn)?;
    expect_one_row(affected, &format!("Assignment {assignment_id}"))
}

/// Raises an id sequence to `next_value`.
///
/// Sequences only move forward; a lower value is ignored.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn advance_sequence(
    conn: &mut SqliteConnection,
    sequence_name: &str,
    next_value: i64,
) -> Result<(), PersistenceError> {
    diesel::update(
        id_sequences::table
            .filter(id_sequences::sequence_name.eq(sequence_name))
            .filter(id_sequences::next_value.lt(next_value)),
    )
    .set(id_sequences::next_value.eq(next_value))
    .execute(conn)?;
    Ok(())
}
