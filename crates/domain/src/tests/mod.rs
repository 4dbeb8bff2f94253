// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod types;

use crate::{
    AssignmentId, BranchId, EmployeeId, OperationalState, ShiftAssignment, ShiftDay,
    ShiftTemplate, TemplateId, TimeWindow,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn window(start: &str, end: &str) -> TimeWindow {
    TimeWindow::parse(start, end).unwrap()
}

pub fn placed_at() -> OffsetDateTime {
    datetime!(2026-03-02 08:00 UTC)
}

pub fn create_test_template(
    id: i64,
    day: ShiftDay,
    start: &str,
    end: &str,
    max_staff: u32,
) -> ShiftTemplate {
    ShiftTemplate::new(
        TemplateId::new(id),
        BranchId::new(1),
        format!("Slot {id}"),
        day,
        window(start, end),
        String::from("waiter"),
        max_staff,
    )
}

pub fn create_test_assignment(
    id: i64,
    template: &ShiftTemplate,
    employee_id: i64,
    state: OperationalState,
) -> ShiftAssignment {
    let mut assignment: ShiftAssignment = ShiftAssignment::from_template(
        AssignmentId::new(id),
        template,
        EmployeeId::new(employee_id),
        None,
        None,
        placed_at(),
    );
    assignment.operational_state = state;
    assignment
}
