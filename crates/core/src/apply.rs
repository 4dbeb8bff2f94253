// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::directory::Directory;
use crate::error::CoreError;
use crate::state::{ScheduleChange, ScheduleState, TransitionResult};
use crate::{require_branch, require_employee};
use shiftplan_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use shiftplan_domain::{
    AdHocSlot, AssignmentId, BranchId, DomainError, Employee, ShiftAssignment, ShiftTemplate,
    TemplateId, TimeWindow, TransitionPolicy, cell_occupancy, validate_capacity,
    validate_capacity_change, validate_employee_placeable, validate_max_staff,
    validate_no_double_booking, validate_role, validate_template_deletable,
    validate_template_name,
};

/// Everything a command arm decides; the audit event is assembled afterwards.
struct Outcome {
    new_state: ScheduleState,
    change: ScheduleChange,
    details: String,
    before: StateSnapshot,
    after: StateSnapshot,
}

/// Applies a command to the current schedule, producing a new state and audit event.
///
/// This is a pure function: the input state is never modified and nothing is
/// persisted. The directory is consulted for branch and employee lookups
/// only.
///
/// # Arguments
///
/// * `state` - The current schedule (immutable)
/// * `directory` - Branch and employee lookups
/// * `policy` - How strictly operational state changes are checked
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state, the change and the audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command violates a domain rule (range, capacity, double-booking, transition)
/// - A referenced template, assignment, branch or employee does not exist
/// - The directory cannot be consulted
#[allow(clippy::too_many_lines)]
pub fn apply<D>(
    state: &ScheduleState,
    directory: &D,
    policy: TransitionPolicy,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError>
where
    D: Directory + ?Sized,
{
    let action_name: &'static str = command.name();

    let outcome: Outcome = match command {
        Command::CreateTemplate {
            branch_id,
            name,
            day,
            start,
            end,
            role,
            max_staff,
        } => {
            validate_template_name(&name)?;
            validate_role(&role)?;
            let window: TimeWindow = TimeWindow::new(start, end)?;
            let max_staff: u32 = validate_max_staff(max_staff)?;
            require_branch(directory, branch_id)?;

            let mut new_state: ScheduleState = state.clone();
            let template_id: TemplateId = new_state.allocate_template_id()?;
            let template: ShiftTemplate = ShiftTemplate::new(
                template_id,
                branch_id,
                name,
                day,
                window,
                role,
                max_staff,
            );
            new_state.templates.push(template.clone());

            Outcome {
                details: format!(
                    "Created template {template_id} '{}' on {day} {window} for {} {}(s)",
                    template.name, template.max_staff, template.role
                ),
                before: template_count_snapshot(state, branch_id),
                after: template_count_snapshot(&new_state, branch_id),
                new_state,
                change: ScheduleChange::TemplateCreated(template),
            }
        }
        Command::UpdateTemplate {
            template_id,
            name,
            role,
            max_staff,
        } => {
            let before: ShiftTemplate = find_template(state, template_id)?.clone();
            let mut after: ShiftTemplate = before.clone();

            if let Some(name) = name {
                validate_template_name(&name)?;
                after.name = name;
            }
            if let Some(role) = role {
                validate_role(&role)?;
                after.role = role;
            }
            if let Some(max_staff) = max_staff {
                let max_staff: u32 = validate_max_staff(max_staff)?;
                validate_capacity_change(template_id, max_staff, &state.assignments)?;
                after.max_staff = max_staff;
            }

            let mut new_state: ScheduleState = state.clone();
            if let Some(slot) = new_state
                .templates
                .iter_mut()
                .find(|template| template.template_id == template_id)
            {
                *slot = after.clone();
            }

            Outcome {
                details: format!("Updated template {template_id}"),
                before: template_snapshot(&before),
                after: template_snapshot(&after),
                new_state,
                change: ScheduleChange::TemplateUpdated { before, after },
            }
        }
        Command::DeleteTemplate { template_id } => {
            let template: ShiftTemplate = find_template(state, template_id)?.clone();
            let orphaned: Vec<AssignmentId> =
                validate_template_deletable(template_id, &state.assignments)?;

            let mut new_state: ScheduleState = state.clone();
            new_state
                .templates
                .retain(|existing| existing.template_id != template_id);
            for assignment in &mut new_state.assignments {
                if assignment.occupies(template_id) {
                    assignment.template_id = None;
                }
            }

            Outcome {
                details: format!(
                    "Deleted template {template_id} '{}', orphaning {} completed assignment(s)",
                    template.name,
                    orphaned.len()
                ),
                before: template_count_snapshot(state, template.branch_id),
                after: template_count_snapshot(&new_state, template.branch_id),
                new_state,
                change: ScheduleChange::TemplateDeleted { template, orphaned },
            }
        }
        Command::PlaceAssignment {
            template_id,
            employee_id,
            role,
            notes,
            placed_at,
        } => {
            // Order matters: each failure kind is reported before the next check runs
            let template: &ShiftTemplate = find_template(state, template_id)?;
            let employee: Employee = require_employee(directory, employee_id)?;
            validate_employee_placeable(&employee)?;
            validate_capacity(template, &state.assignments)?;
            validate_no_double_booking(
                employee_id,
                template.day,
                &template.window,
                &state.assignments,
            )?;
            if let Some(role) = &role {
                validate_role(role)?;
            }

            let mut new_state: ScheduleState = state.clone();
            let assignment_id: AssignmentId = new_state.allocate_assignment_id()?;
            let assignment: ShiftAssignment = ShiftAssignment::from_template(
                assignment_id,
                template,
                employee_id,
                role,
                notes,
                placed_at,
            );
            new_state.assignments.push(assignment.clone());

            Outcome {
                details: format!(
                    "Placed '{}' ({employee_id}) into template {template_id} as assignment {assignment_id}",
                    employee.display_name
                ),
                before: occupancy_snapshot(state, template),
                after: occupancy_snapshot(&new_state, template),
                new_state,
                change: ScheduleChange::AssignmentPlaced {
                    assignment,
                    employee,
                },
            }
        }
        Command::PlaceAdHocAssignment {
            employee_id,
            branch_id,
            day,
            start,
            end,
            role,
            notes,
            placed_at,
        } => {
            let window: TimeWindow = TimeWindow::new(start, end)?;
            validate_role(&role)?;
            require_branch(directory, branch_id)?;
            let employee: Employee = require_employee(directory, employee_id)?;
            validate_employee_placeable(&employee)?;
            validate_no_double_booking(employee_id, day, &window, &state.assignments)?;

            let mut new_state: ScheduleState = state.clone();
            let assignment_id: AssignmentId = new_state.allocate_assignment_id()?;
            let slot: AdHocSlot = AdHocSlot {
                branch_id,
                day,
                window,
                role,
            };
            let assignment: ShiftAssignment =
                ShiftAssignment::ad_hoc(assignment_id, slot, employee_id, notes, placed_at);
            new_state.assignments.push(assignment.clone());

            Outcome {
                details: format!(
                    "Placed '{}' ({employee_id}) ad hoc on {day} {window} as assignment {assignment_id}",
                    employee.display_name
                ),
                before: day_load_snapshot(state, &assignment),
                after: day_load_snapshot(&new_state, &assignment),
                new_state,
                change: ScheduleChange::AssignmentPlaced {
                    assignment,
                    employee,
                },
            }
        }
        Command::RemoveAssignment { assignment_id } => {
            let assignment: ShiftAssignment = find_assignment(state, assignment_id)?.clone();

            let mut new_state: ScheduleState = state.clone();
            new_state
                .assignments
                .retain(|existing| existing.assignment_id != assignment_id);

            let (before, after) = match assignment
                .template_id
                .and_then(|template_id| state.template(template_id))
            {
                Some(template) => (
                    occupancy_snapshot(state, template),
                    occupancy_snapshot(&new_state, template),
                ),
                None => (
                    day_load_snapshot(state, &assignment),
                    day_load_snapshot(&new_state, &assignment),
                ),
            };

            Outcome {
                details: format!(
                    "Removed assignment {assignment_id} of employee {} on {} {}",
                    assignment.employee_id, assignment.day, assignment.window
                ),
                before,
                after,
                new_state,
                change: ScheduleChange::AssignmentRemoved(assignment),
            }
        }
        Command::TransitionAssignment {
            assignment_id,
            target,
        } => {
            let current: &ShiftAssignment = find_assignment(state, assignment_id)?;
            let from = current.operational_state;
            from.validate_transition(target, policy)?;

            let mut updated: ShiftAssignment = current.clone();
            updated.operational_state = target;

            let mut new_state: ScheduleState = state.clone();
            if let Some(slot) = new_state
                .assignments
                .iter_mut()
                .find(|assignment| assignment.assignment_id == assignment_id)
            {
                *slot = updated.clone();
            }

            Outcome {
                details: format!("Assignment {assignment_id} moved from {from} to {target}"),
                before: StateSnapshot::new(format!("assignment={assignment_id},state={from}")),
                after: StateSnapshot::new(format!("assignment={assignment_id},state={target}")),
                new_state,
                change: ScheduleChange::AssignmentTransitioned {
                    assignment: updated,
                    from,
                },
            }
        }
    };

    let branch_id: BranchId = outcome.change.branch_id();
    let action: Action = Action::new(String::from(action_name), Some(outcome.details));
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        outcome.before,
        outcome.after,
        branch_id,
    );

    Ok(TransitionResult {
        new_state: outcome.new_state,
        change: outcome.change,
        audit_event,
    })
}

fn find_template(
    state: &ScheduleState,
    template_id: TemplateId,
) -> Result<&ShiftTemplate, CoreError> {
    state
        .template(template_id)
        .ok_or(CoreError::DomainViolation(DomainError::TemplateNotFound(
            template_id,
        )))
}

fn find_assignment(
    state: &ScheduleState,
    assignment_id: AssignmentId,
) -> Result<&ShiftAssignment, CoreError> {
    state
        .assignment(assignment_id)
        .ok_or(CoreError::DomainViolation(DomainError::AssignmentNotFound(
            assignment_id,
        )))
}

fn template_count_snapshot(state: &ScheduleState, branch_id: BranchId) -> StateSnapshot {
    StateSnapshot::new(format!(
        "branch={branch_id},templates_count={}",
        state.template_count(branch_id)
    ))
}

fn template_snapshot(template: &ShiftTemplate) -> StateSnapshot {
    StateSnapshot::new(format!(
        "template={},name={},role={},max_staff={}",
        template.template_id, template.name, template.role, template.max_staff
    ))
}

fn occupancy_snapshot(state: &ScheduleState, template: &ShiftTemplate) -> StateSnapshot {
    StateSnapshot::new(format!(
        "template={},occupancy={}/{}",
        template.template_id,
        cell_occupancy(template.template_id, &state.assignments),
        template.max_staff
    ))
}

fn day_load_snapshot(state: &ScheduleState, assignment: &ShiftAssignment) -> StateSnapshot {
    StateSnapshot::new(format!(
        "employee={},day={},assignments_count={}",
        assignment.employee_id,
        assignment.day.number(),
        state.day_load(assignment.employee_id, assignment.day)
    ))
}
