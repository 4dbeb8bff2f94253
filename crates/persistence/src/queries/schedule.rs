// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Loading the schedule snapshot.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftplan::ScheduleState;
use shiftplan_domain::{ShiftAssignment, ShiftTemplate};

use crate::data_models::{AssignmentRow, TemplateRow};
use crate::diesel_schema::{id_sequences, shift_assignments, shift_templates};
use crate::error::PersistenceError;

pub const TEMPLATE_SEQUENCE: &str = "shift_templates";
pub const ASSIGNMENT_SEQUENCE: &str = "shift_assignments";

/// Loads every template, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn load_templates(conn: &mut SqliteConnection) -> Result<Vec<ShiftTemplate>, PersistenceError> {
    shift_templates::table
        .order(shift_templates::template_id.asc())
        .select(TemplateRow::as_select())
        .load::<TemplateRow>(conn)?
        .into_iter()
        .map(TemplateRow::into_domain)
        .collect()
}

/// Loads every assignment, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn load_assignments(
    conn: &mut SqliteConnection,
) -> Result<Vec<ShiftAssignment>, PersistenceError> {
    shift_assignments::table
        .order(shift_assignments::assignment_id.asc())
        .select(AssignmentRow::as_select())
        .load::<AssignmentRow>(conn)?
        .into_iter()
        .map(AssignmentRow::into_domain)
        .collect()
}

/// Reads the next value of an id sequence.
///
/// # Errors
///
/// Returns an error if the sequence row is missing.
pub fn next_sequence_value(
    conn: &mut SqliteConnection,
    sequence_name: &str,
) -> Result<i64, PersistenceError> {
    id_sequences::table
        .filter(id_sequences::sequence_name.eq(sequence_name))
        .select(id_sequences::next_value)
        .first::<i64>(conn)
        .optional()?
        .ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "Id sequence '{sequence_name}' is missing"
            ))
        })
}

/// Loads the full schedule snapshot.
///
/// Callers needing a consistent view must run this inside a transaction.
///
/// # Errors
///
/// Returns an error if any query fails or a row is malformed.
pub fn load_state(conn: &mut SqliteConnection) -> Result<ScheduleState, PersistenceError> {
    Ok(ScheduleState {
        templates: load_templates(conn)?,
        assignments: load_assignments(conn)?,
        next_template_id: next_sequence_value(conn, TEMPLATE_SEQUENCE)?,
        next_assignment_id: next_sequence_value(conn, ASSIGNMENT_SEQUENCE)?,
    })
}
