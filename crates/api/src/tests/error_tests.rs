// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, RuleConflict, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
use shiftplan::CoreError;
use shiftplan_domain::{
    AssignmentId, DomainError, EmployeeId, OperationalState, ShiftDay, TemplateId, TimeWindow,
};
use shiftplan_persistence::PersistenceError;
use time::macros::time;

#[test]
fn test_status_codes_by_class() {
    let not_found: ApiError =
        translate_domain_error(DomainError::TemplateNotFound(TemplateId::new(3)));
    let invalid: ApiError = translate_domain_error(DomainError::InvalidCapacity { max_staff: 0 });
    let violated: ApiError = translate_domain_error(DomainError::InvalidTransition {
        from: OperationalState::Completed,
        to: OperationalState::Active,
        reason: String::from("assignment has already been completed"),
    });
    let conflict: ApiError = translate_persistence_error(PersistenceError::ConcurrentModification(
        String::from("database is locked"),
    ));
    let internal: ApiError = translate_persistence_error(PersistenceError::DatabaseError(
        String::from("disk I/O error"),
    ));

    assert_eq!(not_found.status_code(), 404);
    assert_eq!(invalid.status_code(), 400);
    assert_eq!(violated.status_code(), 409);
    assert_eq!(conflict.status_code(), 409);
    assert_eq!(internal.status_code(), 500);
}

#[test]
fn test_only_concurrent_modification_is_retryable() {
    let conflict: ApiError = ApiError::from(PersistenceError::ConcurrentModification(
        String::from("database is locked"),
    ));
    let capacity: ApiError = translate_domain_error(DomainError::CapacityExceeded {
        template_id: TemplateId::new(1),
        occupancy: 2,
        max_staff: 2,
    });

    assert!(conflict.is_retryable());
    assert!(!capacity.is_retryable());
}

#[test]
fn test_double_booking_names_the_conflict() {
    let err: ApiError = translate_domain_error(DomainError::DoubleBooked {
        employee_id: EmployeeId::new(4),
        day: ShiftDay::Tuesday,
        requested: TimeWindow::new(time!(12:00), time!(16:00)).unwrap(),
        conflicting_assignment_id: AssignmentId::new(17),
        conflicting_window: TimeWindow::new(time!(09:00), time!(13:00)).unwrap(),
    });

    match err {
        ApiError::DomainRuleViolation {
            rule,
            message,
            conflict,
        } => {
            assert_eq!(rule, "no_double_booking");
            assert_eq!(
                conflict,
                Some(RuleConflict::Overlap {
                    assignment_id: AssignmentId::new(17),
                    window: TimeWindow::new(time!(09:00), time!(13:00)).unwrap(),
                })
            );
            assert!(message.contains("assignment 17"), "{message}");
            assert!(message.contains("09:00"), "{message}");
        }
        other => panic!("unexpected translation: {other}"),
    }
}

#[test]
fn test_directory_failure_is_internal() {
    let err: ApiError =
        translate_core_error(CoreError::DirectoryUnavailable(String::from("timeout")));

    assert_eq!(err.status_code(), 500);
    assert!(!err.is_retryable());
}
