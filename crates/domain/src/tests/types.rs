// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_template, placed_at, window};
use crate::{
    AdHocSlot, AssignmentId, BranchId, EmployeeId, OperationalState, ShiftAssignment, ShiftDay,
    ShiftTemplate, TemplateId, TimeWindow,
};
use time::macros::time;

#[test]
fn test_template_bound_assignment_copies_slot() {
    let template: ShiftTemplate = create_test_template(3, ShiftDay::Wednesday, "09:00", "13:00", 2);
    let assignment: ShiftAssignment = ShiftAssignment::from_template(
        AssignmentId::new(1),
        &template,
        EmployeeId::new(42),
        None,
        Some(String::from("covers bar")),
        placed_at(),
    );

    assert_eq!(assignment.template_id, Some(TemplateId::new(3)));
    assert_eq!(assignment.branch_id, template.branch_id);
    assert_eq!(assignment.day, ShiftDay::Wednesday);
    assert_eq!(assignment.window, template.window);
    assert_eq!(assignment.role, "waiter");
    assert_eq!(assignment.notes.as_deref(), Some("covers bar"));
    assert_eq!(assignment.operational_state, OperationalState::Inactive);
    assert!(assignment.occupies(TemplateId::new(3)));
    assert!(!assignment.occupies(TemplateId::new(4)));
    assert!(assignment.is_template_bound());
}

#[test]
fn test_role_override_replaces_template_role() {
    let template: ShiftTemplate = create_test_template(3, ShiftDay::Monday, "09:00", "13:00", 2);
    let assignment: ShiftAssignment = ShiftAssignment::from_template(
        AssignmentId::new(1),
        &template,
        EmployeeId::new(42),
        Some(String::from("runner")),
        None,
        placed_at(),
    );

    assert_eq!(assignment.role, "runner");
}

#[test]
fn test_ad_hoc_assignment_has_no_template() {
    let slot: AdHocSlot = AdHocSlot {
        branch_id: BranchId::new(2),
        day: ShiftDay::Friday,
        window: window("18:00", "22:00"),
        role: String::from("chef"),
    };
    let assignment: ShiftAssignment = ShiftAssignment::ad_hoc(
        AssignmentId::new(8),
        slot,
        EmployeeId::new(5),
        None,
        placed_at(),
    );

    assert_eq!(assignment.template_id, None);
    assert!(!assignment.is_template_bound());
    assert_eq!(assignment.branch_id, BranchId::new(2));
    assert_eq!(assignment.role, "chef");
    assert_eq!(assignment.operational_state, OperationalState::Inactive);
}

#[test]
fn test_ids_serialize_transparently() {
    let json: String = serde_json::to_string(&TemplateId::new(12)).unwrap();
    assert_eq!(json, "12");

    let parsed: EmployeeId = serde_json::from_str("7").unwrap();
    assert_eq!(parsed, EmployeeId::new(7));
}

#[test]
fn test_state_serializes_upper_case() {
    let json: String = serde_json::to_string(&OperationalState::Break).unwrap();
    assert_eq!(json, "\"BREAK\"");
}

#[test]
fn test_window_deserialization_enforces_range() {
    let window: TimeWindow = window("09:00", "13:00");
    let json: String = serde_json::to_string(&window).unwrap();
    let parsed: TimeWindow = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, window);

    let inverted: serde_json::Value = serde_json::json!({
        "start": time!(13:00),
        "end": time!(9:00),
    });
    assert!(serde_json::from_value::<TimeWindow>(inverted).is_err());
}
