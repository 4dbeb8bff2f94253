// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use shiftplan::StaticDirectory;
use shiftplan_audit::{Actor, Cause};
use shiftplan_domain::{AssignmentId, Branch, BranchId, Employee, EmployeeId, TemplateId};
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

use crate::{
    ApiResult, AssignmentResponse, CreateTemplateRequest, PlaceAssignmentRequest,
    SchedulerConfig, ShiftScheduler, TemplateResponse, TransitionAssignmentRequest,
};

pub const BRANCH: BranchId = BranchId::new(1);
pub const OTHER_BRANCH: BranchId = BranchId::new(2);

/// Employees 1-8 are active waiters.
pub const WAITERS: i64 = 8;
pub const INACTIVE_EMPLOYEE: EmployeeId = EmployeeId::new(9);
pub const CHEF: EmployeeId = EmployeeId::new(10);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("manager-42"), String::from("manager"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_test_directory() -> StaticDirectory {
    let mut directory: StaticDirectory = StaticDirectory::new()
        .with_branch(Branch::new(BRANCH, String::from("Centro")))
        .with_branch(Branch::new(OTHER_BRANCH, String::from("Norte")));
    for id in 1..=WAITERS {
        directory = directory.with_employee(Employee::new(
            EmployeeId::new(id),
            format!("Waiter {id}"),
            String::from("waiter"),
            true,
        ));
    }
    directory
        .with_employee(Employee::new(
            INACTIVE_EMPLOYEE,
            String::from("Former Waiter"),
            String::from("waiter"),
            false,
        ))
        .with_employee(Employee::new(
            CHEF,
            String::from("Head Chef"),
            String::from("chef"),
            true,
        ))
}

pub fn create_test_scheduler() -> ShiftScheduler<StaticDirectory> {
    ShiftScheduler::open(SchedulerConfig::default(), create_test_directory()).unwrap()
}

pub fn template_request(
    day_of_week: u8,
    start: &str,
    end: &str,
    max_staff: i64,
) -> CreateTemplateRequest {
    CreateTemplateRequest {
        branch_id: BRANCH,
        name: format!("Day {day_of_week} {start}"),
        day_of_week,
        start_time: String::from(start),
        end_time: String::from(end),
        role: String::from("waiter"),
        max_staff,
    }
}

/// Creates a template through the scheduler and returns it.
pub fn create_template<D: shiftplan::Directory>(
    scheduler: &ShiftScheduler<D>,
    day_of_week: u8,
    start: &str,
    end: &str,
    max_staff: i64,
) -> TemplateResponse {
    scheduler
        .create_template(
            template_request(day_of_week, start, end, max_staff),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap()
        .response
}

pub fn place_request(template_id: TemplateId, employee_id: i64) -> PlaceAssignmentRequest {
    PlaceAssignmentRequest {
        template_id,
        employee_id: EmployeeId::new(employee_id),
        role: None,
        notes: None,
    }
}

pub fn place<D: shiftplan::Directory>(
    scheduler: &ShiftScheduler<D>,
    template_id: TemplateId,
    employee_id: i64,
) -> Result<ApiResult<AssignmentResponse>, crate::ApiError> {
    scheduler.place_assignment(
        place_request(template_id, employee_id),
        create_test_actor(),
        create_test_cause(),
    )
}

pub fn transition<D: shiftplan::Directory>(
    scheduler: &ShiftScheduler<D>,
    assignment_id: AssignmentId,
    state: &str,
) -> Result<ApiResult<AssignmentResponse>, crate::ApiError> {
    scheduler.transition_assignment(
        TransitionAssignmentRequest {
            assignment_id,
            state: String::from(state),
        },
        create_test_actor(),
        create_test_cause(),
    )
}

/// A fresh database file inside a temporary directory.
///
/// The directory, and any `-wal`/`-shm` files beside the database, are
/// removed when the returned `TempDir` is dropped.
pub fn database_file() -> (TempDir, PathBuf) {
    let dir: TempDir = tempdir().unwrap();
    let path: PathBuf = dir.path().join("db.sqlite");
    (dir, path)
}
