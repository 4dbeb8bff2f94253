// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftplan_audit::AuditEvent;

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Appends an audit event and returns the id the database assigned it.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let event_id: i64 = diesel::insert_into(audit_events::table)
        .values((
            audit_events::branch_id.eq(event.branch_id.value()),
            audit_events::actor_json.eq(serde_json::to_string(&ActorData::from(&event.actor))?),
            audit_events::cause_json.eq(serde_json::to_string(&CauseData::from(&event.cause))?),
            audit_events::action_json.eq(serde_json::to_string(&ActionData::from(&event.action))?),
            audit_events::before_snapshot_json
                .eq(serde_json::to_string(&StateSnapshotData::from(&event.before))?),
            audit_events::after_snapshot_json
                .eq(serde_json::to_string(&StateSnapshotData::from(&event.after))?),
        ))
        .returning(audit_events::event_id)
        .get_result(conn)?;

    Ok(event_id)
}
