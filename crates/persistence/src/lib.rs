// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the shift scheduler.
//!
//! Templates, assignments, id sequences and the audit trail live in a single
//! `SQLite` database accessed through Diesel.
//!
//! ## Write path
//!
//! Every mutation runs inside [`Persistence::transaction`], which opens the
//! transaction with `BEGIN IMMEDIATE`. The write lock is therefore taken
//! before the snapshot is read, so validating a command against the snapshot
//! and persisting its result form one atomic check-and-insert. A writer that
//! cannot obtain the lock within the configured busy timeout fails with
//! [`PersistenceError::ConcurrentModification`].
//!
//! ## In-memory databases
//!
//! [`Persistence::new_in_memory`] creates a uniquely named shared-cache
//! database, so further connections from [`Persistence::connect_again`] see
//! the same data. The database lives as long as any connection to it.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

use diesel::SqliteConnection;
use diesel::prelude::*;
use shiftplan::{ScheduleState, TransitionResult};
use shiftplan_audit::AuditEvent;
use shiftplan_domain::BranchId;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// How long a writer waits for the write lock unless told otherwise.
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

/// Carries either a database failure or the caller's own error out of a
/// Diesel transaction closure.
enum TxAbort<E> {
    Db(diesel::result::Error),
    Caller(E),
}

impl<E> From<diesel::result::Error> for TxAbort<E> {
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(err)
    }
}

/// Persistence adapter owning one `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
    database_url: String,
    busy_timeout_ms: u32,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("database_url", &self.database_url)
            .field("busy_timeout_ms", &self.busy_timeout_ms)
            .finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a new persistence adapter with a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        Self::new_in_memory_with_timeout(DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// Creates a new in-memory persistence adapter with a custom busy timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory_with_timeout(busy_timeout_ms: u32) -> Result<Self, PersistenceError> {
        // Unique shared-cache name per call so tests are isolated
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let database_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection =
            backend::sqlite::initialize_database(&database_url, busy_timeout_ms)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn,
            database_url,
            busy_timeout_ms,
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if missing and migrated to the current schema.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        Self::new_with_file_and_timeout(path, DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// Creates a file-based persistence adapter with a custom busy timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file_and_timeout<P: AsRef<Path>>(
        path: P,
        busy_timeout_ms: u32,
    ) -> Result<Self, PersistenceError> {
        let database_url: String = path
            .as_ref()
            .to_str()
            .ok_or_else(|| {
                PersistenceError::InitializationError("Invalid database path".to_string())
            })?
            .to_string();

        let mut conn: SqliteConnection =
            backend::sqlite::initialize_database(&database_url, busy_timeout_ms)?;

        // WAL lets snapshot reads proceed while another connection writes
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn,
            database_url,
            busy_timeout_ms,
        })
    }

    /// Opens a second connection to the same database.
    ///
    /// Each connection is an independent writer; the two serialize through
    /// the database's write lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn connect_again(&self) -> Result<Self, PersistenceError> {
        let mut conn: SqliteConnection =
            backend::sqlite::connect(&self.database_url, self.busy_timeout_ms)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn,
            database_url: self.database_url.clone(),
            busy_timeout_ms: self.busy_timeout_ms,
        })
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    #[must_use]
    pub const fn busy_timeout_ms(&self) -> u32 {
        self.busy_timeout_ms
    }

    /// Verifies that foreign key enforcement is enabled on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Changes how long this connection waits for the write lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the setting cannot be applied.
    pub fn set_busy_timeout(&mut self, busy_timeout_ms: u32) -> Result<(), PersistenceError> {
        backend::sqlite::set_busy_timeout(&mut self.conn, busy_timeout_ms)?;
        self.busy_timeout_ms = busy_timeout_ms;
        Ok(())
    }

    /// Runs `f` inside an immediate write transaction.
    ///
    /// The transaction commits if `f` returns `Ok` and rolls back otherwise.
    /// Errors from `f` are returned unchanged; database failures, including
    /// a failure to obtain the write lock, are converted through
    /// [`PersistenceError`].
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or the converted database error.
    pub fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        E: From<PersistenceError>,
        F: FnOnce(&mut ScheduleTransaction<'_>) -> Result<T, E>,
    {
        let result: Result<T, TxAbort<E>> = self.conn.immediate_transaction(|conn| {
            let mut tx: ScheduleTransaction<'_> = ScheduleTransaction { conn };
            f(&mut tx).map_err(TxAbort::Caller)
        });

        match result {
            Ok(value) => Ok(value),
            Err(TxAbort::Caller(err)) => Err(err),
            Err(TxAbort::Db(err)) => {
                let err: PersistenceError = PersistenceError::from(err);
                debug!(error = %err, "Schedule transaction aborted by the database");
                Err(E::from(err))
            }
        }
    }

    /// Loads a consistent snapshot of the schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read.
    pub fn snapshot(&mut self) -> Result<ScheduleState, PersistenceError> {
        self.conn.transaction(queries::schedule::load_state)
    }

    /// Persists a transition result in its own write transaction.
    ///
    /// Prefer [`Persistence::transaction`] when the result was computed from
    /// a snapshot: only then is the snapshot guaranteed to be current.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<i64, PersistenceError> {
        self.transaction(|tx| tx.persist_transition(result))
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves a branch's audit trail, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or an event cannot be deserialized.
    pub fn list_audit_events(
        &mut self,
        branch_id: BranchId,
    ) -> Result<Vec<(i64, AuditEvent)>, PersistenceError> {
        queries::audit::list_audit_events(&mut self.conn, branch_id)
    }
}

/// The view of the database available inside [`Persistence::transaction`].
pub struct ScheduleTransaction<'a> {
    conn: &'a mut SqliteConnection,
}

impl ScheduleTransaction<'_> {
    /// Loads the schedule as seen by this transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails or a row is malformed.
    pub fn load_state(&mut self) -> Result<ScheduleState, PersistenceError> {
        queries::schedule::load_state(self.conn)
    }

    /// Writes a transition result and its audit event.
    ///
    /// # Returns
    ///
    /// The event ID assigned to the audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_transition(self.conn, result)
    }
}
