// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The shift scheduler: every public operation of the engine.
//!
//! Mutations run as one immediate database transaction: the snapshot is
//! loaded, the command is validated and applied against it, and the change
//! plus its audit event are written before the transaction commits. Two
//! writers on the same database therefore never validate against the same
//! snapshot.

use std::sync::{Mutex, MutexGuard};

use shiftplan::{
    CellOccupancy, Command, Directory, ScheduleChange, ScheduleState, TransitionResult,
    WeeklyProjection, apply,
};
use shiftplan_audit::{Actor, Cause};
use shiftplan_domain::{
    AssignmentId, BranchId, OperationalState, ShiftAssignment, ShiftDay, TemplateId,
    parse_time_of_day,
};
use shiftplan_persistence::Persistence;
use time::{Date, OffsetDateTime, Time};
use tracing::{debug, info, warn};

use crate::config::{DatabaseConfig, SchedulerConfig};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    ApiResult, AssignmentResponse, AuditEntry, CellOccupancyResponse, CreateTemplateRequest,
    DeleteTemplateResponse, PlaceAdHocAssignmentRequest, PlaceAssignmentRequest,
    TemplateResponse, TransitionAssignmentRequest, UpdateTemplateRequest,
};

/// The scheduling engine over one database connection and one directory.
///
/// Operations take `&self`; the connection is guarded internally, so a
/// scheduler can be shared between threads. Because that connection sits
/// behind one mutex, operations on the same scheduler (reads included) run
/// one at a time.
///
/// For reads that run in parallel, open one scheduler per worker on the
/// same database file, for example with [`Persistence::connect_again`] and
/// [`ShiftScheduler::new`]. Each reads its own consistent snapshot, and
/// writers across all of them serialize through the database's write lock.
pub struct ShiftScheduler<D: Directory> {
    persistence: Mutex<Persistence>,
    directory: D,
    config: SchedulerConfig,
}

impl<D: Directory> std::fmt::Debug for ShiftScheduler<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShiftScheduler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<D: Directory> ShiftScheduler<D> {
    /// Opens the database described by `config` and builds a scheduler on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(config: SchedulerConfig, directory: D) -> Result<Self, ApiError> {
        let persistence: Persistence = match &config.database {
            DatabaseConfig::InMemory => {
                Persistence::new_in_memory_with_timeout(config.busy_timeout_ms)?
            }
            DatabaseConfig::File { path } => {
                Persistence::new_with_file_and_timeout(path, config.busy_timeout_ms)?
            }
        };
        info!(
            database = persistence.database_url(),
            policy = %config.transition_policy,
            "Shift scheduler opened"
        );
        Ok(Self::new(persistence, directory, config))
    }

    /// Builds a scheduler on an already opened database.
    #[must_use]
    pub const fn new(persistence: Persistence, directory: D, config: SchedulerConfig) -> Self {
        Self {
            persistence: Mutex::new(persistence),
            directory,
            config,
        }
    }

    #[must_use]
    pub const fn directory(&self) -> &D {
        &self.directory
    }

    #[must_use]
    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Creates a recurring shift template.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed (`InvalidRange`,
    /// `InvalidCapacity`, bad day or time), the branch is unknown, or the
    /// write conflicts with another writer.
    pub fn create_template(
        &self,
        request: CreateTemplateRequest,
        actor: Actor,
        cause: Cause,
    ) -> Result<ApiResult<TemplateResponse>, ApiError> {
        let command: Command = Command::CreateTemplate {
            branch_id: request.branch_id,
            name: request.name,
            day: parse_day(request.day_of_week)?,
            start: parse_time("start_time", &request.start_time)?,
            end: parse_time("end_time", &request.end_time)?,
            role: request.role,
            max_staff: request.max_staff,
        };

        let (result, event_id) = self.execute(command, actor, cause)?;
        match &result.change {
            ScheduleChange::TemplateCreated(template) => {
                info!(
                    template_id = %template.template_id,
                    branch_id = %template.branch_id,
                    day = %template.day,
                    window = %template.window,
                    max_staff = template.max_staff,
                    "Shift template created"
                );
                Ok(finish(TemplateResponse::from(template), event_id, result))
            }
            other => Err(unexpected_change("create_template", other)),
        }
    }

    /// Edits a template's name, role or capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not exist, a field is invalid,
    /// or the new capacity is below the current occupancy.
    pub fn update_template(
        &self,
        template_id: TemplateId,
        request: UpdateTemplateRequest,
        actor: Actor,
        cause: Cause,
    ) -> Result<ApiResult<TemplateResponse>, ApiError> {
        let command: Command = Command::UpdateTemplate {
            template_id,
            name: request.name,
            role: request.role,
            max_staff: request.max_staff,
        };

        let (result, event_id) = self.execute(command, actor, cause)?;
        match &result.change {
            ScheduleChange::TemplateUpdated { after, .. } => {
                info!(template_id = %after.template_id, "Shift template updated");
                Ok(finish(TemplateResponse::from(after), event_id, result))
            }
            other => Err(unexpected_change("update_template", other)),
        }
    }

    /// Deletes a template whose assignments are all completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not exist or still has
    /// assignments that are not completed (`TemplateInUse`).
    pub fn delete_template(
        &self,
        template_id: TemplateId,
        actor: Actor,
        cause: Cause,
    ) -> Result<ApiResult<DeleteTemplateResponse>, ApiError> {
        let (result, event_id) =
            self.execute(Command::DeleteTemplate { template_id }, actor, cause)?;
        match &result.change {
            ScheduleChange::TemplateDeleted { template, orphaned } => {
                info!(
                    template_id = %template.template_id,
                    orphaned = orphaned.len(),
                    "Shift template deleted"
                );
                let response: DeleteTemplateResponse = DeleteTemplateResponse {
                    template_id: template.template_id,
                    orphaned_assignment_ids: orphaned.clone(),
                };
                Ok(finish(response, event_id, result))
            }
            other => Err(unexpected_change("delete_template", other)),
        }
    }

    /// Lists templates, optionally for one branch, ordered by day, start
    /// time and name.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule cannot be read.
    pub fn list_templates(
        &self,
        branch_id: Option<BranchId>,
    ) -> Result<Vec<TemplateResponse>, ApiError> {
        let state: ScheduleState = self.snapshot()?;
        Ok(shiftplan::list_templates(&state, branch_id)
            .iter()
            .map(TemplateResponse::from)
            .collect())
    }

    /// Places an employee into a template's cell.
    ///
    /// A role that differs from the employee's directory role is accepted
    /// and logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the template or employee does not exist, the
    /// employee is inactive, the cell is full (`CapacityExceeded`), the
    /// employee already works an overlapping slot that day (`DoubleBooked`),
    /// or the write conflicts with another writer.
    pub fn place_assignment(
        &self,
        request: PlaceAssignmentRequest,
        actor: Actor,
        cause: Cause,
    ) -> Result<ApiResult<AssignmentResponse>, ApiError> {
        let command: Command = Command::PlaceAssignment {
            template_id: request.template_id,
            employee_id: request.employee_id,
            role: request.role,
            notes: request.notes,
            placed_at: OffsetDateTime::now_utc(),
        };
        self.place(command, actor, cause)
    }

    /// Places an employee into a standalone slot with no capacity bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed, the branch or employee
    /// does not exist, the employee is inactive, or the slot overlaps
    /// another of the employee's assignments that day.
    pub fn place_ad_hoc_assignment(
        &self,
        request: PlaceAdHocAssignmentRequest,
        actor: Actor,
        cause: Cause,
    ) -> Result<ApiResult<AssignmentResponse>, ApiError> {
        let command: Command = Command::PlaceAdHocAssignment {
            employee_id: request.employee_id,
            branch_id: request.branch_id,
            day: parse_day(request.day_of_week)?,
            start: parse_time("start_time", &request.start_time)?,
            end: parse_time("end_time", &request.end_time)?,
            role: request.role,
            notes: request.notes,
            placed_at: OffsetDateTime::now_utc(),
        };
        self.place(command, actor, cause)
    }

    fn place(
        &self,
        command: Command,
        actor: Actor,
        cause: Cause,
    ) -> Result<ApiResult<AssignmentResponse>, ApiError> {
        let (result, event_id) = self.execute(command, actor, cause)?;
        match &result.change {
            ScheduleChange::AssignmentPlaced {
                assignment,
                employee,
            } => {
                if result.change.has_role_mismatch() {
                    warn!(
                        assignment_id = %assignment.assignment_id,
                        employee_id = %employee.employee_id,
                        slot_role = %assignment.role,
                        employee_role = %employee.role,
                        "Employee placed into a slot for a different role"
                    );
                }
                info!(
                    assignment_id = %assignment.assignment_id,
                    employee_id = %assignment.employee_id,
                    template_id = ?assignment.template_id.map(TemplateId::value),
                    day = %assignment.day,
                    window = %assignment.window,
                    "Assignment placed"
                );
                Ok(finish(AssignmentResponse::from(assignment), event_id, result))
            }
            other => Err(unexpected_change("place_assignment", other)),
        }
    }

    /// Removes an assignment, freeing its place in the cell.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment does not exist.
    pub fn remove_assignment(
        &self,
        assignment_id: AssignmentId,
        actor: Actor,
        cause: Cause,
    ) -> Result<ApiResult<AssignmentResponse>, ApiError> {
        let (result, event_id) =
            self.execute(Command::RemoveAssignment { assignment_id }, actor, cause)?;
        match &result.change {
            ScheduleChange::AssignmentRemoved(assignment) => {
                info!(assignment_id = %assignment.assignment_id, "Assignment removed");
                Ok(finish(AssignmentResponse::from(assignment), event_id, result))
            }
            other => Err(unexpected_change("remove_assignment", other)),
        }
    }

    /// Changes an assignment's operational state under the configured
    /// transition policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the state name is unknown, the assignment does
    /// not exist, or the policy forbids the move (`InvalidTransition`).
    pub fn transition_assignment(
        &self,
        request: TransitionAssignmentRequest,
        actor: Actor,
        cause: Cause,
    ) -> Result<ApiResult<AssignmentResponse>, ApiError> {
        let target: OperationalState = request.state.parse().map_err(translate_domain_error)?;
        let command: Command = Command::TransitionAssignment {
            assignment_id: request.assignment_id,
            target,
        };

        let (result, event_id) = self.execute(command, actor, cause)?;
        match &result.change {
            ScheduleChange::AssignmentTransitioned { assignment, from } => {
                info!(
                    assignment_id = %assignment.assignment_id,
                    from = %from,
                    to = %assignment.operational_state,
                    "Assignment transitioned"
                );
                Ok(finish(AssignmentResponse::from(assignment), event_id, result))
            }
            other => Err(unexpected_change("transition_assignment", other)),
        }
    }

    /// Returns a template's occupants, first placed first.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not exist.
    pub fn cell_occupancy(
        &self,
        template_id: TemplateId,
    ) -> Result<CellOccupancyResponse, ApiError> {
        let state: ScheduleState = self.snapshot()?;
        let cell: CellOccupancy =
            shiftplan::cell_occupancy(&state, template_id).map_err(translate_core_error)?;
        Ok(CellOccupancyResponse {
            template: TemplateResponse::from(&cell.template),
            occupants: cell.occupants.iter().map(AssignmentResponse::from).collect(),
            remaining: cell.remaining,
        })
    }

    /// Looks up one assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment does not exist.
    pub fn get_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<AssignmentResponse, ApiError> {
        let state: ScheduleState = self.snapshot()?;
        let assignment: ShiftAssignment =
            shiftplan::get_assignment(&state, assignment_id).map_err(translate_core_error)?;
        Ok(AssignmentResponse::from(&assignment))
    }

    /// Lists a branch's assignments in schedule order.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule cannot be read.
    pub fn list_assignments(
        &self,
        branch_id: BranchId,
    ) -> Result<Vec<AssignmentResponse>, ApiError> {
        let state: ScheduleState = self.snapshot()?;
        Ok(shiftplan::list_assignments(&state, branch_id)
            .iter()
            .map(AssignmentResponse::from)
            .collect())
    }

    /// Projects a branch's schedule onto the Monday-to-Friday dates of the
    /// week containing `week_of`.
    ///
    /// # Errors
    ///
    /// Returns an error if the branch does not exist or the directory cannot
    /// be consulted.
    pub fn project_week(
        &self,
        branch_id: BranchId,
        week_of: Date,
    ) -> Result<WeeklyProjection, ApiError> {
        let state: ScheduleState = self.snapshot()?;
        let projection: WeeklyProjection =
            shiftplan::project_week(&state, &self.directory, branch_id, week_of)
                .map_err(translate_core_error)?;
        debug!(
            branch_id = %branch_id,
            week_start = %projection.week_start,
            assignments = projection.assignment_count(),
            "Projected week"
        );
        Ok(projection)
    }

    /// Returns a branch's audit trail, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the trail cannot be read.
    pub fn audit_trail(&self, branch_id: BranchId) -> Result<Vec<AuditEntry>, ApiError> {
        let mut persistence = self.lock()?;
        Ok(persistence
            .list_audit_events(branch_id)?
            .into_iter()
            .map(|(event_id, event)| AuditEntry { event_id, event })
            .collect())
    }

    /// Loads, validates, applies and persists one command atomically.
    fn execute(
        &self,
        command: Command,
        actor: Actor,
        cause: Cause,
    ) -> Result<(TransitionResult, i64), ApiError> {
        let action: &'static str = command.name();
        let mut persistence = self.lock()?;

        let outcome: Result<(TransitionResult, i64), ApiError> =
            persistence.transaction(|tx| -> Result<(TransitionResult, i64), ApiError> {
                let state: ScheduleState = tx.load_state()?;
                let result: TransitionResult = apply(
                    &state,
                    &self.directory,
                    self.config.transition_policy,
                    command,
                    actor,
                    cause,
                )
                .map_err(translate_core_error)?;
                let event_id: i64 = tx.persist_transition(&result)?;
                Ok((result, event_id))
            });

        if let Err(err) = &outcome {
            debug!(
                action,
                error = %err,
                retryable = err.is_retryable(),
                "Operation rejected"
            );
        }
        outcome
    }

    fn snapshot(&self) -> Result<ScheduleState, ApiError> {
        Ok(self.lock()?.snapshot()?)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Persistence>, ApiError> {
        self.persistence.lock().map_err(|_| ApiError::Internal {
            message: String::from("Persistence lock poisoned"),
        })
    }
}

fn finish<T>(response: T, event_id: i64, result: TransitionResult) -> ApiResult<T> {
    ApiResult {
        response,
        event_id,
        audit_event: result.audit_event,
    }
}

fn unexpected_change(operation: &str, change: &ScheduleChange) -> ApiError {
    ApiError::Internal {
        message: format!("{operation} produced an unexpected change: {change:?}"),
    }
}

fn parse_day(day_of_week: u8) -> Result<ShiftDay, ApiError> {
    ShiftDay::from_number(day_of_week).map_err(translate_domain_error)
}

fn parse_time(field: &str, value: &str) -> Result<Time, ApiError> {
    parse_time_of_day(value).map_err(|err| match translate_domain_error(err) {
        ApiError::InvalidInput { message, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        other => other,
    })
}

