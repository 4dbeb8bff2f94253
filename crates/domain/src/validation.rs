// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::schedule_time::{ShiftDay, TimeWindow};
use crate::types::{AssignmentId, Employee, EmployeeId, ShiftAssignment, ShiftTemplate, TemplateId};

/// Validates a template name.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is blank.
pub fn validate_template_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Template name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a slot role.
///
/// Roles are free-form; only blank values are rejected.
///
/// # Errors
///
/// Returns `DomainError::InvalidRole` if the role is blank.
pub fn validate_role(role: &str) -> Result<(), DomainError> {
    if role.trim().is_empty() {
        return Err(DomainError::InvalidRole(String::from(
            "Role cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a requested template capacity and narrows it.
///
/// # Errors
///
/// Returns `DomainError::InvalidCapacity` if `max_staff < 1` or it does not
/// fit in a `u32`.
pub fn validate_max_staff(max_staff: i64) -> Result<u32, DomainError> {
    if max_staff < 1 {
        return Err(DomainError::InvalidCapacity { max_staff });
    }
    u32::try_from(max_staff).map_err(|_| DomainError::InvalidCapacity { max_staff })
}

/// Validates that an employee may be placed into a shift.
///
/// # Errors
///
/// Returns `DomainError::EmployeeInactive` if the employee is not active.
pub fn validate_employee_placeable(employee: &Employee) -> Result<(), DomainError> {
    if !employee.active {
        return Err(DomainError::EmployeeInactive {
            employee_id: employee.employee_id,
            display_name: employee.display_name.clone(),
        });
    }
    Ok(())
}

/// Counts the assignments occupying a template's cell.
///
/// Every bound assignment counts, whatever its operational state: there is
/// no cancelled state, removal is deletion.
#[must_use]
pub fn cell_occupancy(template_id: TemplateId, assignments: &[ShiftAssignment]) -> usize {
    assignments
        .iter()
        .filter(|assignment| assignment.occupies(template_id))
        .count()
}

/// Validates that one more employee fits into the template's cell.
///
/// # Returns
///
/// The current occupancy, before the new placement.
///
/// # Errors
///
/// Returns `DomainError::CapacityExceeded` if the cell is full.
pub fn validate_capacity(
    template: &ShiftTemplate,
    assignments: &[ShiftAssignment],
) -> Result<usize, DomainError> {
    let occupancy: usize = cell_occupancy(template.template_id, assignments);

    // Rule: occupancy never exceeds max_staff
    if occupancy >= usize::try_from(template.max_staff).unwrap_or(usize::MAX) {
        return Err(DomainError::CapacityExceeded {
            template_id: template.template_id,
            occupancy,
            max_staff: template.max_staff,
        });
    }

    Ok(occupancy)
}

/// Validates that a template's capacity may be changed to `max_staff`.
///
/// Capacity may shrink only down to the current occupancy; occupants are
/// never evicted by an edit.
///
/// # Errors
///
/// Returns `DomainError::CapacityExceeded` if the cell already holds more
/// than `max_staff` assignments.
pub fn validate_capacity_change(
    template_id: TemplateId,
    max_staff: u32,
    assignments: &[ShiftAssignment],
) -> Result<(), DomainError> {
    let occupancy: usize = cell_occupancy(template_id, assignments);
    if occupancy > usize::try_from(max_staff).unwrap_or(usize::MAX) {
        return Err(DomainError::CapacityExceeded {
            template_id,
            occupancy,
            max_staff,
        });
    }
    Ok(())
}

/// Finds an existing assignment of `employee_id` on `day` whose window
/// overlaps `window`.
///
/// The scan spans all branches and templates. When several overlap, the one
/// with the earliest start is reported.
#[must_use]
pub fn find_double_booking<'a>(
    employee_id: EmployeeId,
    day: ShiftDay,
    window: &TimeWindow,
    assignments: &'a [ShiftAssignment],
) -> Option<&'a ShiftAssignment> {
    assignments
        .iter()
        .filter(|existing| existing.employee_id == employee_id && existing.day == day)
        .filter(|existing| existing.window.overlaps(window))
        .min_by_key(|existing| (existing.window.start(), existing.assignment_id))
}

/// Validates that placing `employee_id` into `window` on `day` would not
/// double-book them.
///
/// # Errors
///
/// Returns `DomainError::DoubleBooked` naming the conflicting assignment.
pub fn validate_no_double_booking(
    employee_id: EmployeeId,
    day: ShiftDay,
    window: &TimeWindow,
    assignments: &[ShiftAssignment],
) -> Result<(), DomainError> {
    if let Some(conflict) = find_double_booking(employee_id, day, window, assignments) {
        return Err(DomainError::DoubleBooked {
            employee_id,
            day,
            requested: *window,
            conflicting_assignment_id: conflict.assignment_id,
            conflicting_window: conflict.window,
        });
    }
    Ok(())
}

/// Validates that a template may be deleted.
///
/// # Returns
///
/// The completed assignments that will lose their template reference.
///
/// # Errors
///
/// Returns `DomainError::TemplateInUse` if any assignment in the cell is not
/// yet completed.
pub fn validate_template_deletable(
    template_id: TemplateId,
    assignments: &[ShiftAssignment],
) -> Result<Vec<AssignmentId>, DomainError> {
    let (completed, open): (Vec<&ShiftAssignment>, Vec<&ShiftAssignment>) = assignments
        .iter()
        .filter(|assignment| assignment.occupies(template_id))
        .partition(|assignment| assignment.operational_state.is_terminal());

    if !open.is_empty() {
        return Err(DomainError::TemplateInUse {
            template_id,
            open_assignments: open.len(),
        });
    }

    Ok(completed
        .into_iter()
        .map(|assignment| assignment.assignment_id)
        .collect())
}
