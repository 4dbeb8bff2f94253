// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use super::{BRANCH, create_template_command, create_test_directory, database_file, execute};
use crate::{DEFAULT_BUSY_TIMEOUT_MS, Persistence};
use shiftplan::ScheduleState;
use shiftplan_domain::ShiftDay;

#[test]
fn test_persistence_initialization() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert_eq!(persistence.busy_timeout_ms(), DEFAULT_BUSY_TIMEOUT_MS);
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_fresh_database_is_empty_with_sequences_at_one() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let state: ScheduleState = persistence.snapshot().unwrap();

    assert_eq!(state, ScheduleState::new());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let directory = create_test_directory();
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    execute(
        &mut db1,
        &directory,
        create_template_command(BRANCH, ShiftDay::Monday, 2),
    )
    .unwrap();

    assert_eq!(db1.snapshot().unwrap().templates.len(), 1);
    assert!(db2.snapshot().unwrap().templates.is_empty());
}

#[test]
fn test_second_connection_shares_in_memory_database() {
    let directory = create_test_directory();
    let mut first = Persistence::new_in_memory().unwrap();
    let mut second = first.connect_again().unwrap();

    execute(
        &mut first,
        &directory,
        create_template_command(BRANCH, ShiftDay::Monday, 2),
    )
    .unwrap();

    assert_eq!(second.database_url(), first.database_url());
    assert_eq!(second.snapshot().unwrap().templates.len(), 1);
    assert!(second.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_file_database_survives_reopen() {
    let (_dir, path) = database_file();
    let directory = create_test_directory();

    {
        let mut persistence = Persistence::new_with_file(&path).unwrap();
        execute(
            &mut persistence,
            &directory,
            create_template_command(BRANCH, ShiftDay::Tuesday, 3),
        )
        .unwrap();
    }

    // Reopening runs migrations again; already-applied ones are skipped
    let mut reopened = Persistence::new_with_file(&path).unwrap();
    let state: ScheduleState = reopened.snapshot().unwrap();

    assert_eq!(state.templates.len(), 1);
    assert_eq!(state.templates[0].day, ShiftDay::Tuesday);
    assert_eq!(state.next_template_id, 2);
}

#[test]
fn test_busy_timeout_can_be_changed() {
    let mut persistence = Persistence::new_in_memory_with_timeout(250).unwrap();
    assert_eq!(persistence.busy_timeout_ms(), 250);

    persistence.set_busy_timeout(0).unwrap();

    assert_eq!(persistence.busy_timeout_ms(), 0);
}
