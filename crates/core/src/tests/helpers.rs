// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Command, CoreError, Directory, DirectoryError, ScheduleState, StaticDirectory,
    TransitionResult, apply,
};
use shiftplan_audit::{Actor, Cause};
use shiftplan_domain::{
    AssignmentId, Branch, BranchId, Employee, EmployeeId, OperationalState, ShiftDay,
    TemplateId, TransitionPolicy,
};
use time::macros::datetime;
use time::{Duration, OffsetDateTime, Time};

pub const BRANCH: BranchId = BranchId::new(1);
pub const OTHER_BRANCH: BranchId = BranchId::new(2);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("manager-7"), String::from("manager"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-101"), String::from("Weekly rota"))
}

/// Branches 1 and 2; employees 1-5 active waiters, 6 inactive, 7 a chef.
pub fn create_test_directory() -> StaticDirectory {
    let names: [&str; 5] = ["Ana", "Bruno", "Carla", "Diego", "Elena"];
    let mut directory: StaticDirectory = StaticDirectory::new()
        .with_branch(Branch::new(BRANCH, String::from("Centro")))
        .with_branch(Branch::new(OTHER_BRANCH, String::from("Norte")));
    for (id, name) in (1..).zip(names) {
        directory = directory.with_employee(Employee::new(
            EmployeeId::new(id),
            String::from(name),
            String::from("waiter"),
            true,
        ));
    }
    directory
        .with_employee(Employee::new(
            EmployeeId::new(6),
            String::from("Fabio"),
            String::from("waiter"),
            false,
        ))
        .with_employee(Employee::new(
            EmployeeId::new(7),
            String::from("Gloria"),
            String::from("chef"),
            true,
        ))
}

/// A directory whose every lookup fails.
pub struct UnavailableDirectory;

impl Directory for UnavailableDirectory {
    fn employee(&self, _employee_id: EmployeeId) -> Result<Option<Employee>, DirectoryError> {
        Err(DirectoryError::new("directory offline"))
    }

    fn branch(&self, _branch_id: BranchId) -> Result<Option<Branch>, DirectoryError> {
        Err(DirectoryError::new("directory offline"))
    }
}

pub fn hm(hour: u8, minute: u8) -> Time {
    Time::from_hms(hour, minute, 0).unwrap()
}

/// Placement timestamps one minute apart, so cell order is predictable.
pub fn placed_at(sequence: i64) -> OffsetDateTime {
    datetime!(2026-03-02 08:00 UTC) + Duration::minutes(sequence)
}

pub fn create_template_command(day: ShiftDay, start: Time, end: Time, max_staff: i64) -> Command {
    Command::CreateTemplate {
        branch_id: BRANCH,
        name: format!("{day} {}", start.hour()),
        day,
        start,
        end,
        role: String::from("waiter"),
        max_staff,
    }
}

pub fn place_command(template_id: i64, employee_id: i64, sequence: i64) -> Command {
    Command::PlaceAssignment {
        template_id: TemplateId::new(template_id),
        employee_id: EmployeeId::new(employee_id),
        role: None,
        notes: None,
        placed_at: placed_at(sequence),
    }
}

pub fn transition_command(assignment_id: i64, target: OperationalState) -> Command {
    Command::TransitionAssignment {
        assignment_id: AssignmentId::new(assignment_id),
        target,
    }
}

/// Applies a command under the guarded policy.
pub fn try_apply(
    state: &ScheduleState,
    directory: &StaticDirectory,
    command: Command,
) -> Result<TransitionResult, CoreError> {
    try_apply_with(state, directory, TransitionPolicy::Guarded, command)
}

pub fn try_apply_with(
    state: &ScheduleState,
    directory: &StaticDirectory,
    policy: TransitionPolicy,
    command: Command,
) -> Result<TransitionResult, CoreError> {
    apply(
        state,
        directory,
        policy,
        command,
        create_test_actor(),
        create_test_cause(),
    )
}

/// Applies a command that is expected to succeed and returns the new state.
pub fn commit(state: &ScheduleState, directory: &StaticDirectory, command: Command) -> ScheduleState {
    try_apply(state, directory, command).unwrap().new_state
}

/// A schedule with one Monday 09:00-13:00 template of the given capacity.
pub fn state_with_template(directory: &StaticDirectory, max_staff: i64) -> ScheduleState {
    commit(
        &ScheduleState::new(),
        directory,
        create_template_command(ShiftDay::Monday, hm(9, 0), hm(13, 0), max_staff),
    )
}
