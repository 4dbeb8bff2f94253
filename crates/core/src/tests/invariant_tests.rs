// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Randomised operation sequences against the placement invariants.

use crate::tests::helpers::{
    BRANCH, commit, create_template_command, create_test_directory, hm, place_command,
    placed_at, transition_command, try_apply,
};
use crate::{Command, ScheduleState, StaticDirectory, TransitionResult};
use proptest::prelude::*;
use shiftplan_domain::{
    AssignmentId, EmployeeId, OperationalState, ShiftAssignment, ShiftDay, TemplateId,
    cell_occupancy,
};

#[derive(Debug, Clone)]
enum Op {
    Place { template: i64, employee: i64 },
    PlaceAdHoc {
        employee: i64,
        monday: bool,
        start_hour: u8,
        hours: u8,
    },
    Remove { pick: usize },
    Transition { pick: usize, target: OperationalState },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (1..=4_i64, 1..=5_i64)
            .prop_map(|(template, employee)| Op::Place { template, employee }),
        2 => (1..=5_i64, any::<bool>(), 6..=18_u8, 1..=5_u8).prop_map(
            |(employee, monday, start_hour, hours)| Op::PlaceAdHoc {
                employee,
                monday,
                start_hour,
                hours,
            }
        ),
        2 => any::<usize>().prop_map(|pick| Op::Remove { pick }),
        1 => (any::<usize>(), proptest::sample::select(OperationalState::ALL.to_vec()))
            .prop_map(|(pick, target)| Op::Transition { pick, target }),
    ]
}

/// Four overlapping templates on Monday and Tuesday with the given capacities.
fn seeded_state(directory: &StaticDirectory, capacities: &[i64]) -> ScheduleState {
    let slots: [(ShiftDay, u8, u8); 4] = [
        (ShiftDay::Monday, 9, 13),
        (ShiftDay::Monday, 12, 16),
        (ShiftDay::Monday, 16, 20),
        (ShiftDay::Tuesday, 9, 17),
    ];
    let mut state: ScheduleState = ScheduleState::new();
    for ((day, start, end), max_staff) in slots.into_iter().zip(capacities) {
        state = commit(
            &state,
            directory,
            create_template_command(day, hm(start, 0), hm(end, 0), *max_staff),
        );
    }
    state
}

fn pick_assignment(state: &ScheduleState, pick: usize) -> Option<AssignmentId> {
    if state.assignments.is_empty() {
        return None;
    }
    Some(state.assignments[pick % state.assignments.len()].assignment_id)
}

fn to_command(state: &ScheduleState, op: &Op, sequence: i64) -> Option<Command> {
    match *op {
        Op::Place { template, employee } => Some(place_command(template, employee, sequence)),
        Op::PlaceAdHoc {
            employee,
            monday,
            start_hour,
            hours,
        } => Some(Command::PlaceAdHocAssignment {
            employee_id: EmployeeId::new(employee),
            branch_id: BRANCH,
            day: if monday {
                ShiftDay::Monday
            } else {
                ShiftDay::Tuesday
            },
            start: hm(start_hour, 0),
            end: hm(start_hour + hours, 0),
            role: String::from("runner"),
            notes: None,
            placed_at: placed_at(sequence),
        }),
        Op::Remove { pick } => {
            pick_assignment(state, pick).map(|assignment_id| Command::RemoveAssignment {
                assignment_id,
            })
        }
        Op::Transition { pick, target } => pick_assignment(state, pick)
            .map(|assignment_id| transition_command(assignment_id.value(), target)),
    }
}

fn assert_capacity_holds(state: &ScheduleState) {
    for template in &state.templates {
        let occupancy: usize = cell_occupancy(template.template_id, &state.assignments);
        assert!(
            occupancy <= usize::try_from(template.max_staff).unwrap(),
            "template {} holds {occupancy} of {}",
            template.template_id,
            template.max_staff
        );
    }
}

fn assert_no_overlap(state: &ScheduleState) {
    for (i, a) in state.assignments.iter().enumerate() {
        for b in &state.assignments[i + 1..] {
            let clash: bool =
                a.employee_id == b.employee_id && a.day == b.day && a.window.overlaps(&b.window);
            assert!(
                !clash,
                "assignments {} and {} double-book employee {}",
                a.assignment_id, b.assignment_id, a.employee_id
            );
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn invariants_hold_after_any_sequence(
        capacities in proptest::collection::vec(1..=3_i64, 4),
        ops in proptest::collection::vec(op_strategy(), 1..40),
    ) {
        let directory: StaticDirectory = create_test_directory();
        let mut state: ScheduleState = seeded_state(&directory, &capacities);

        for (sequence, op) in (0_i64..).zip(&ops) {
            let Some(command) = to_command(&state, op, sequence) else {
                continue;
            };
            if let Ok(transition) = try_apply(&state, &directory, command) {
                state = transition.new_state;
            }
            assert_capacity_holds(&state);
            assert_no_overlap(&state);
        }
    }

    #[test]
    fn failed_commands_change_nothing(
        capacities in proptest::collection::vec(1..=2_i64, 4),
        ops in proptest::collection::vec(op_strategy(), 1..40),
    ) {
        let directory: StaticDirectory = create_test_directory();
        let mut state: ScheduleState = seeded_state(&directory, &capacities);

        for (sequence, op) in (0_i64..).zip(&ops) {
            let Some(command) = to_command(&state, op, sequence) else {
                continue;
            };
            let before: ScheduleState = state.clone();
            match try_apply(&state, &directory, command) {
                Ok(transition) => state = transition.new_state,
                Err(_) => prop_assert_eq!(&state, &before),
            }
        }
    }

    #[test]
    fn place_then_remove_round_trips(
        template in 1..=4_i64,
        employee in 1..=5_i64,
        ops in proptest::collection::vec(op_strategy(), 0..20),
    ) {
        let directory: StaticDirectory = create_test_directory();
        let mut state: ScheduleState = seeded_state(&directory, &[3, 3, 3, 3]);
        for (sequence, op) in (0_i64..).zip(&ops) {
            if let Some(command) = to_command(&state, op, sequence) {
                if let Ok(transition) = try_apply(&state, &directory, command) {
                    state = transition.new_state;
                }
            }
        }

        let placed: Result<TransitionResult, _> =
            try_apply(&state, &directory, place_command(template, employee, 100));
        prop_assume!(placed.is_ok());
        let placed: TransitionResult = placed.unwrap();
        let assignment: &ShiftAssignment = placed.new_state.assignments.last().unwrap();

        let removed: TransitionResult = try_apply(
            &placed.new_state,
            &directory,
            Command::RemoveAssignment { assignment_id: assignment.assignment_id },
        )
        .unwrap();

        prop_assert_eq!(&removed.new_state.assignments, &state.assignments);
        prop_assert_eq!(
            cell_occupancy(TemplateId::new(template), &removed.new_state.assignments),
            cell_occupancy(TemplateId::new(template), &state.assignments)
        );
        // The employee's day is free again for the same slot
        prop_assert!(
            try_apply(&removed.new_state, &directory, place_command(template, employee, 101)).is_ok()
        );
    }
}
