// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::operational_state::OperationalState;
use crate::schedule_time::{ShiftDay, TimeWindow};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Declares a transparent numeric identifier.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a branch, owned by the external directory.
    BranchId
);
id_type!(
    /// Identifier of an employee, owned by the external directory.
    EmployeeId
);
id_type!(
    /// Identifier of a recurring shift template.
    TemplateId
);
id_type!(
    /// Identifier of a single placement of an employee.
    AssignmentId
);

/// A restaurant branch as seen by the scheduler.
///
/// Read-only: branches are owned by the external directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub branch_id: BranchId,
    pub name: String,
}

impl Branch {
    #[must_use]
    pub const fn new(branch_id: BranchId, name: String) -> Self {
        Self { branch_id, name }
    }
}

/// An employee as seen by the scheduler.
///
/// Only active employees may be placed into shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub display_name: String,
    /// Free-form role such as "waiter", "chef" or "manager".
    pub role: String,
    pub active: bool,
}

impl Employee {
    #[must_use]
    pub const fn new(
        employee_id: EmployeeId,
        display_name: String,
        role: String,
        active: bool,
    ) -> Self {
        Self {
            employee_id,
            display_name,
            role,
            active,
        }
    }
}

/// A recurring weekly work slot for one branch.
///
/// The cell identified by `template_id` holds at most `max_staff` occupants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    pub template_id: TemplateId,
    pub branch_id: BranchId,
    pub name: String,
    pub day: ShiftDay,
    pub window: TimeWindow,
    /// The role expected to fill this slot. Advisory only.
    pub role: String,
    pub max_staff: u32,
}

impl ShiftTemplate {
    /// Creates a template from already-validated parts.
    #[must_use]
    pub const fn new(
        template_id: TemplateId,
        branch_id: BranchId,
        name: String,
        day: ShiftDay,
        window: TimeWindow,
        role: String,
        max_staff: u32,
    ) -> Self {
        Self {
            template_id,
            branch_id,
            name,
            day,
            window,
            role,
            max_staff,
        }
    }
}

/// The slot of an assignment that is not bound to any template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdHocSlot {
    pub branch_id: BranchId,
    pub day: ShiftDay,
    pub window: TimeWindow,
    pub role: String,
}

/// The placement of one employee into one slot.
///
/// Template-bound assignments copy their template's day and window at
/// placement time. `template_id` is `None` for ad-hoc placements and for
/// completed assignments whose template has since been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub assignment_id: AssignmentId,
    pub template_id: Option<TemplateId>,
    pub employee_id: EmployeeId,
    pub branch_id: BranchId,
    pub day: ShiftDay,
    pub window: TimeWindow,
    pub role: String,
    pub notes: Option<String>,
    pub operational_state: OperationalState,
    /// When the placement was made; orders the occupants of a cell.
    pub placed_at: OffsetDateTime,
}

impl ShiftAssignment {
    /// Creates an assignment occupying `template`'s cell.
    ///
    /// The assignment starts `INACTIVE` and takes the template's role unless
    /// `role` overrides it.
    #[must_use]
    pub fn from_template(
        assignment_id: AssignmentId,
        template: &ShiftTemplate,
        employee_id: EmployeeId,
        role: Option<String>,
        notes: Option<String>,
        placed_at: OffsetDateTime,
    ) -> Self {
        Self {
            assignment_id,
            template_id: Some(template.template_id),
            employee_id,
            branch_id: template.branch_id,
            day: template.day,
            window: template.window,
            role: role.unwrap_or_else(|| template.role.clone()),
            notes,
            operational_state: OperationalState::Inactive,
            placed_at,
        }
    }

    /// Creates a standalone assignment with no template and no capacity bound.
    #[must_use]
    pub fn ad_hoc(
        assignment_id: AssignmentId,
        slot: AdHocSlot,
        employee_id: EmployeeId,
        notes: Option<String>,
        placed_at: OffsetDateTime,
    ) -> Self {
        Self {
            assignment_id,
            template_id: None,
            employee_id,
            branch_id: slot.branch_id,
            day: slot.day,
            window: slot.window,
            role: slot.role,
            notes,
            operational_state: OperationalState::Inactive,
            placed_at,
        }
    }

    /// Returns true if this assignment occupies the given template's cell.
    #[must_use]
    pub fn occupies(&self, template_id: TemplateId) -> bool {
        self.template_id == Some(template_id)
    }

    /// Returns true if the assignment currently references a template.
    #[must_use]
    pub const fn is_template_bound(&self) -> bool {
        self.template_id.is_some()
    }
}
