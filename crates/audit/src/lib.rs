// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Audit records for schedule changes.
//!
//! Every successful change to templates or assignments yields exactly one
//! [`AuditEvent`]. Rejected operations yield none.

use serde::{Deserialize, Serialize};
use shiftplan_domain::BranchId;

#[cfg(test)]
mod tests;

/// The scheduler, manager or system process that requested a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "manager", "scheduler", "system").
    pub actor_type: String,
}

impl Actor {
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Why a change was requested, typically the originating request id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    pub id: String,
    pub description: String,
}

impl Cause {
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// What was changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The command name (e.g., "`PlaceAssignment`").
    pub name: String,
    /// Human-readable summary of the change.
    pub details: Option<String>,
}

impl Action {
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A compact textual summary of the affected schedule state.
///
/// Snapshots describe the touched cell or record (for example
/// `template=4,occupancy=1/2`), not the whole schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable record of one committed schedule change.
///
/// Captures who (actor), why (cause), what (action), the affected state
/// before and after, and the branch the change belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
    /// The branch whose schedule changed.
    pub branch_id: BranchId,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - Who initiated the change
    /// * `cause` - Why it was initiated
    /// * `action` - What was changed
    /// * `before` - Affected state before the change
    /// * `after` - Affected state after the change
    /// * `branch_id` - The branch whose schedule changed
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        branch_id: BranchId,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
            branch_id,
        }
    }
}
