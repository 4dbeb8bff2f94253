// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operational state of an assignment and its transition rules.
//!
//! The state tracks what an employee is doing during a placed shift. It is
//! independent of placement: changing it never affects capacity or
//! double-booking bookkeeping.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Real-time status of an assignment during its shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationalState {
    /// Placed but not yet started.
    #[default]
    Inactive,
    /// Working the slot.
    Active,
    /// Temporarily helping another station.
    Assist,
    /// On break.
    Break,
    /// Shift finished for the day.
    Completed,
}

impl OperationalState {
    pub const ALL: [Self; 5] = [
        Self::Inactive,
        Self::Active,
        Self::Assist,
        Self::Break,
        Self::Completed,
    ];

    /// Returns the stored and displayed name of the state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "INACTIVE",
            Self::Active => "ACTIVE",
            Self::Assist => "ASSIST",
            Self::Break => "BREAK",
            Self::Completed => "COMPLETED",
        }
    }

    /// Returns true if the shift is over for the day.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Checks whether `self -> target` is permitted under `policy`.
    ///
    /// Guarded transitions:
    /// - `INACTIVE` → `ACTIVE`
    /// - `ACTIVE` → `BREAK` | `ASSIST` | `COMPLETED`
    /// - `BREAK` → `ACTIVE` | `COMPLETED`
    /// - `ASSIST` → `ACTIVE` | `COMPLETED`
    /// - `COMPLETED` → `INACTIVE` (only with `GuardedWithReopen`)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self, policy: TransitionPolicy) -> bool {
        match policy {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Guarded => Self::is_guarded_edge(*self, target),
            TransitionPolicy::GuardedWithReopen => {
                Self::is_guarded_edge(*self, target)
                    || matches!((self, target), (Self::Completed, Self::Inactive))
            }
        }
    }

    const fn is_guarded_edge(from: Self, to: Self) -> bool {
        matches!(
            (from, to),
            (Self::Inactive, Self::Active)
                | (Self::Active, Self::Break | Self::Assist | Self::Completed)
                | (Self::Break | Self::Assist, Self::Active | Self::Completed)
        )
    }

    /// Validates a transition, explaining why it is refused.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if the policy forbids it.
    pub fn validate_transition(
        &self,
        target: Self,
        policy: TransitionPolicy,
    ) -> Result<(), DomainError> {
        if self.can_transition_to(target, policy) {
            return Ok(());
        }

        let reason: &str = if *self == target {
            "assignment is already in this state"
        } else if self.is_terminal() {
            "assignment has already been completed"
        } else {
            "transition not permitted by operational state rules"
        };

        Err(DomainError::InvalidTransition {
            from: *self,
            to: target,
            reason: reason.to_string(),
        })
    }
}

impl FromStr for OperationalState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INACTIVE" => Ok(Self::Inactive),
            "ACTIVE" => Ok(Self::Active),
            "ASSIST" => Ok(Self::Assist),
            "BREAK" => Ok(Self::Break),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidOperationalState(s.to_string())),
        }
    }
}

impl std::fmt::Display for OperationalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How strictly operational state changes are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Only the edges of the operational state graph are allowed.
    #[default]
    Guarded,
    /// As `Guarded`, plus `COMPLETED → INACTIVE` to correct a mistaken completion.
    GuardedWithReopen,
    /// Any state may be overwritten with any other.
    Permissive,
}

impl TransitionPolicy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Guarded => "guarded",
            Self::GuardedWithReopen => "guarded_with_reopen",
            Self::Permissive => "permissive",
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guarded" => Ok(Self::Guarded),
            "guarded_with_reopen" => Ok(Self::GuardedWithReopen),
            "permissive" => Ok(Self::Permissive),
            _ => Err(DomainError::InvalidTransitionPolicy(s.to_string())),
        }
    }
}

impl std::fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
