// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The weekly projection of a branch's schedule.
//!
//! Templates recur every week, so the projection is the same set of
//! assignments for any week. `week_of` only fixes the calendar date shown
//! against each day.

use crate::directory::Directory;
use crate::error::CoreError;
use crate::registry::schedule_order;
use crate::require_branch;
use crate::state::ScheduleState;
use serde::{Deserialize, Serialize};
use shiftplan_domain::{Branch, BranchId, DomainError, EmployeeId, ShiftAssignment, ShiftDay};
use std::collections::{BTreeMap, HashMap};
use time::{Date, Duration};

/// An assignment with the names a reader needs next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedAssignment {
    pub assignment: ShiftAssignment,
    /// `None` if the directory no longer knows the employee.
    pub employee_name: Option<String>,
    /// `None` for ad-hoc and orphaned assignments.
    pub template_name: Option<String>,
}

/// One working day of a projected week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedDay {
    pub day: ShiftDay,
    pub date: Date,
    /// Ordered by start, end, placement time, then id.
    pub assignments: Vec<ProjectedAssignment>,
}

/// A branch's schedule for one Monday-to-Friday week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyProjection {
    pub branch: Branch,
    /// The Monday of the projected week.
    pub week_start: Date,
    /// Every working day is present, even when empty.
    pub days: BTreeMap<ShiftDay, ProjectedDay>,
}

impl WeeklyProjection {
    /// Returns the projection for one day.
    #[must_use]
    pub fn day(&self, day: ShiftDay) -> Option<&ProjectedDay> {
        self.days.get(&day)
    }

    /// Total assignments across the week.
    #[must_use]
    pub fn assignment_count(&self) -> usize {
        self.days.values().map(|day| day.assignments.len()).sum()
    }
}

/// Returns the Monday of the week containing `week_of`.
///
/// # Errors
///
/// Returns `DomainError::DateOutOfRange` at the edge of the calendar.
pub fn week_start(week_of: Date) -> Result<Date, DomainError> {
    let back: i64 = i64::from(week_of.weekday().number_days_from_monday());
    week_of
        .checked_sub(Duration::days(back))
        .ok_or(DomainError::DateOutOfRange(week_of))
}

/// Projects a branch's assignments onto the week containing `week_of`.
///
/// Pure read: the state is not modified and no audit event is produced.
/// Employee names are looked up once per employee.
///
/// # Errors
///
/// Returns an error if:
/// - The branch does not exist (`DomainError::BranchNotFound`)
/// - The directory cannot be consulted
/// - The week lies at the edge of the supported calendar
pub fn project_week<D>(
    state: &ScheduleState,
    directory: &D,
    branch_id: BranchId,
    week_of: Date,
) -> Result<WeeklyProjection, CoreError>
where
    D: Directory + ?Sized,
{
    let branch: Branch = require_branch(directory, branch_id)?;
    let monday: Date = week_start(week_of)?;

    let mut days: BTreeMap<ShiftDay, ProjectedDay> = BTreeMap::new();
    for day in ShiftDay::ALL {
        let date: Date = monday
            .checked_add(Duration::days(day.offset_from_monday()))
            .ok_or(DomainError::DateOutOfRange(monday))?;
        days.insert(
            day,
            ProjectedDay {
                day,
                date,
                assignments: Vec::new(),
            },
        );
    }

    let mut branch_assignments: Vec<&ShiftAssignment> = state
        .assignments
        .iter()
        .filter(|assignment| assignment.branch_id == branch_id)
        .collect();
    branch_assignments.sort_by_key(|assignment| schedule_order(assignment));

    let mut names: HashMap<EmployeeId, Option<String>> = HashMap::new();
    for assignment in branch_assignments {
        let employee_name: Option<String> = match names.get(&assignment.employee_id) {
            Some(name) => name.clone(),
            None => {
                let name: Option<String> = directory
                    .employee(assignment.employee_id)?
                    .map(|employee| employee.display_name);
                names.insert(assignment.employee_id, name.clone());
                name
            }
        };
        let template_name: Option<String> = assignment
            .template_id
            .and_then(|template_id| state.template(template_id))
            .map(|template| template.name.clone());

        if let Some(projected_day) = days.get_mut(&assignment.day) {
            projected_day.assignments.push(ProjectedAssignment {
                assignment: assignment.clone(),
                employee_name,
                template_name,
            });
        }
    }

    Ok(WeeklyProjection {
        branch,
        week_start: monday,
        days,
    })
}
