// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use crate::{Persistence, PersistenceError};
use shiftplan::{Command, CoreError, StaticDirectory, TransitionResult, apply};
use shiftplan_audit::{Actor, Cause};
use shiftplan_domain::{
    Branch, BranchId, Employee, EmployeeId, ShiftDay, TemplateId, TransitionPolicy,
};
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};
use time::macros::datetime;
use time::{Duration, OffsetDateTime, Time};

pub const BRANCH: BranchId = BranchId::new(1);
pub const OTHER_BRANCH: BranchId = BranchId::new(2);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("manager"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

/// Branches 1 and 2 with three active waiters.
pub fn create_test_directory() -> StaticDirectory {
    StaticDirectory::new()
        .with_branch(Branch::new(BRANCH, String::from("Centro")))
        .with_branch(Branch::new(OTHER_BRANCH, String::from("Norte")))
        .with_employee(waiter(1, "Ana"))
        .with_employee(waiter(2, "Bruno"))
        .with_employee(waiter(3, "Carla"))
}

fn waiter(id: i64, name: &str) -> Employee {
    Employee::new(
        EmployeeId::new(id),
        String::from(name),
        String::from("waiter"),
        true,
    )
}

pub fn hm(hour: u8, minute: u8) -> Time {
    Time::from_hms(hour, minute, 0).unwrap()
}

pub fn placed_at(sequence: i64) -> OffsetDateTime {
    datetime!(2026-03-02 08:00 UTC) + Duration::minutes(sequence)
}

pub fn create_template_command(branch_id: BranchId, day: ShiftDay, max_staff: i64) -> Command {
    Command::CreateTemplate {
        branch_id,
        name: format!("{day} lunch"),
        day,
        start: hm(11, 0),
        end: hm(15, 0),
        role: String::from("waiter"),
        max_staff,
    }
}

pub fn place_command(template_id: i64, employee_id: i64, sequence: i64) -> Command {
    Command::PlaceAssignment {
        template_id: TemplateId::new(template_id),
        employee_id: EmployeeId::new(employee_id),
        role: None,
        notes: Some(String::from("covering")),
        placed_at: placed_at(sequence),
    }
}

/// Either half of a failed load-apply-persist cycle.
#[derive(Debug)]
pub enum TestError {
    Core(CoreError),
    Persistence(PersistenceError),
}

impl From<CoreError> for TestError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<PersistenceError> for TestError {
    fn from(err: PersistenceError) -> Self {
        Self::Persistence(err)
    }
}

/// Loads, applies and persists a command in one immediate transaction.
pub fn execute(
    persistence: &mut Persistence,
    directory: &StaticDirectory,
    command: Command,
) -> Result<(TransitionResult, i64), TestError> {
    persistence.transaction(|tx| -> Result<(TransitionResult, i64), TestError> {
        let state = tx.load_state()?;
        let result: TransitionResult = apply(
            &state,
            directory,
            TransitionPolicy::Guarded,
            command,
            create_test_actor(),
            create_test_cause(),
        )?;
        let event_id: i64 = tx.persist_transition(&result)?;
        Ok((result, event_id))
    })
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
