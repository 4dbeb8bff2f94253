// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduler configuration.
//!
//! Configuration can be built in code, read from JSON, or taken from
//! `SHIFTPLAN_*` environment variables. Anything left unset keeps its default.

use serde::{Deserialize, Serialize};
use shiftplan_domain::TransitionPolicy;
use shiftplan_persistence::DEFAULT_BUSY_TIMEOUT_MS;
use std::path::PathBuf;
use thiserror::Error;

/// Path of the `SQLite` database file. Unset means in-memory.
pub const ENV_DATABASE_PATH: &str = "SHIFTPLAN_DATABASE_PATH";
/// One of `guarded`, `guarded_with_reopen` or `permissive`.
pub const ENV_TRANSITION_POLICY: &str = "SHIFTPLAN_TRANSITION_POLICY";
/// Milliseconds a writer waits for the database write lock.
pub const ENV_BUSY_TIMEOUT_MS: &str = "SHIFTPLAN_BUSY_TIMEOUT_MS";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("Invalid configuration document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// An environment variable holds an unusable value.
    #[error("Invalid value '{value}' for {variable}: {reason}")]
    InvalidVariable {
        variable: &'static str,
        value: String,
        reason: String,
    },
}

/// Where the schedule is stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatabaseConfig {
    /// A private in-memory database, gone when the scheduler is dropped.
    #[default]
    InMemory,
    /// A database file, created and migrated on first use.
    File {
        /// Path to the database file.
        path: PathBuf,
    },
}

/// Settings for a [`crate::ShiftScheduler`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub database: DatabaseConfig,
    pub transition_policy: TransitionPolicy,
    /// How long a writer waits for the write lock before the operation fails
    /// with a retryable conflict.
    pub busy_timeout_ms: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::InMemory,
            transition_policy: TransitionPolicy::Guarded,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl SchedulerConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidDocument` if the JSON is malformed or a
    /// field has the wrong shape.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds a configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidVariable` if a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|variable| std::env::var(variable).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidVariable` if a variable is set to an
    /// unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = Self::default();

        if let Some(path) = lookup(ENV_DATABASE_PATH) {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidVariable {
                    variable: ENV_DATABASE_PATH,
                    value: path,
                    reason: String::from("path cannot be empty"),
                });
            }
            config.database = DatabaseConfig::File {
                path: PathBuf::from(path),
            };
        }

        if let Some(policy) = lookup(ENV_TRANSITION_POLICY) {
            config.transition_policy =
                policy
                    .parse()
                    .map_err(|err: shiftplan_domain::DomainError| {
                        ConfigError::InvalidVariable {
                            variable: ENV_TRANSITION_POLICY,
                            value: policy.clone(),
                            reason: err.to_string(),
                        }
                    })?;
        }

        if let Some(timeout) = lookup(ENV_BUSY_TIMEOUT_MS) {
            config.busy_timeout_ms =
                timeout
                    .trim()
                    .parse()
                    .map_err(|err: std::num::ParseIntError| ConfigError::InvalidVariable {
                        variable: ENV_BUSY_TIMEOUT_MS,
                        value: timeout.clone(),
                        reason: err.to_string(),
                    })?;
        }

        Ok(config)
    }
}
