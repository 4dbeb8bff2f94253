// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The read-only directory of branches and employees.
//!
//! Branches and employees are owned elsewhere. The scheduler only needs
//! point lookups, so the seam is a small trait that outer services implement
//! over whatever store they use.

use shiftplan_domain::{Branch, BranchId, Employee, EmployeeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A directory lookup failed for reasons unrelated to the requested record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryError {
    pub message: String,
}

impl DirectoryError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DirectoryError {}

/// Point lookups of branches and employees.
///
/// `Ok(None)` means the record does not exist. `Err` is reserved for the
/// lookup itself failing.
pub trait Directory {
    /// Fetches an employee by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be consulted.
    fn employee(&self, employee_id: EmployeeId) -> Result<Option<Employee>, DirectoryError>;

    /// Fetches a branch by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be consulted.
    fn branch(&self, branch_id: BranchId) -> Result<Option<Branch>, DirectoryError>;
}

impl<T: Directory + ?Sized> Directory for &T {
    fn employee(&self, employee_id: EmployeeId) -> Result<Option<Employee>, DirectoryError> {
        (**self).employee(employee_id)
    }

    fn branch(&self, branch_id: BranchId) -> Result<Option<Branch>, DirectoryError> {
        (**self).branch(branch_id)
    }
}

impl<T: Directory + ?Sized> Directory for Arc<T> {
    fn employee(&self, employee_id: EmployeeId) -> Result<Option<Employee>, DirectoryError> {
        (**self).employee(employee_id)
    }

    fn branch(&self, branch_id: BranchId) -> Result<Option<Branch>, DirectoryError> {
        (**self).branch(branch_id)
    }
}

/// An in-memory directory.
///
/// Suitable for embedding services that mirror their directory into the
/// process, and for tests. Records can be changed through a shared
/// reference, so an employee may be deactivated while a scheduler holds the
/// directory.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    branches: RwLock<HashMap<BranchId, Branch>>,
    employees: RwLock<HashMap<EmployeeId, Employee>>,
}

impl StaticDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a branch, replacing any with the same id.
    #[must_use]
    pub fn with_branch(mut self, branch: Branch) -> Self {
        let branches: &mut HashMap<BranchId, Branch> = self
            .branches
            .get_mut()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        branches.insert(branch.branch_id, branch);
        self
    }

    /// Adds an employee, replacing any with the same id.
    #[must_use]
    pub fn with_employee(mut self, employee: Employee) -> Self {
        let employees: &mut HashMap<EmployeeId, Employee> = self
            .employees
            .get_mut()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        employees.insert(employee.employee_id, employee);
        self
    }

    /// Inserts or replaces an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory lock is poisoned.
    pub fn upsert_employee(&self, employee: Employee) -> Result<(), DirectoryError> {
        let mut employees = self
            .employees
            .write()
            .map_err(|_| DirectoryError::new("employee table lock poisoned"))?;
        employees.insert(employee.employee_id, employee);
        Ok(())
    }

    /// Changes an employee's active flag.
    ///
    /// # Returns
    ///
    /// `false` if the employee is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory lock is poisoned.
    pub fn set_employee_active(
        &self,
        employee_id: EmployeeId,
        active: bool,
    ) -> Result<bool, DirectoryError> {
        let mut employees = self
            .employees
            .write()
            .map_err(|_| DirectoryError::new("employee table lock poisoned"))?;
        match employees.get_mut(&employee_id) {
            Some(employee) => {
                employee.active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Directory for StaticDirectory {
    fn employee(&self, employee_id: EmployeeId) -> Result<Option<Employee>, DirectoryError> {
        let employees = self
            .employees
            .read()
            .map_err(|_| DirectoryError::new("employee table lock poisoned"))?;
        Ok(employees.get(&employee_id).cloned())
    }

    fn branch(&self, branch_id: BranchId) -> Result<Option<Branch>, DirectoryError> {
        let branches = self
            .branches
            .read()
            .map_err(|_| DirectoryError::new("branch table lock poisoned"))?;
        Ok(branches.get(&branch_id).cloned())
    }
}
