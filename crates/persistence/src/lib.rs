// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Procure request portal.
//!
//! This crate provides database persistence for requests, the
//! status-history ledger, load-balancing settings, the user directory,
//! and assignment bookkeeping. It is built on Diesel and supports
//! multiple database backends.
//!
//! ## Database Backend Support
//!
//! - **`SQLite`** (default) — development, unit tests, and integration
//!   tests; always available, no external infrastructure
//! - **`MariaDB`/`MySQL`** — compiled by default, validated via explicit
//!   opt-in tests only
//!
//! To run `MySQL` validation tests:
//! ```bash
//! cargo xtask test-mariadb
//! ```
//!
//! This starts a `MariaDB` container via `Docker`, runs migrations,
//! executes the backend validation tests marked `#[ignore]`, and cleans
//! the container up afterwards.
//!
//! ### Migration Strategy
//!
//! `SQL` syntax differs between backends, so two schema-equivalent
//! migration directories are maintained: `migrations/` (`SQLite`) and
//! `migrations_mysql/` (`MySQL`/`MariaDB`).
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against `SQLite` only
//! - Backend validation tests are explicitly marked `#[ignore]`
//! - External database tests never run automatically
//! - All infrastructure is orchestrated by `xtask`, not embedded in tests

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

use diesel::{MysqlConnection, SqliteConnection};
use procure_audit::StatusChange;
use procure_domain::{Department, LoadBalancingSettings, Officer, Request, SplinterMatch};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Macro to generate monomorphic backend-specific query/mutation functions.
///
/// This macro generates two separate functions from a single function body:
/// - One suffixed with `_sqlite` taking `&mut SqliteConnection`
/// - One suffixed with `_mysql` taking `&mut MysqlConnection`
///
/// This approach is required because Diesel's type system requires concrete
/// backend types at compile time and cannot handle generic backend functions.
///
/// # Constraints
///
/// - The macro ONLY duplicates function bodies and substitutes connection types
/// - No logic, branching, or dispatch occurs within the macro
/// - Backend dispatch happens exclusively in the Persistence adapter
/// - The generated functions are completely monomorphic
macro_rules! backend_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident (
            $conn:ident : &mut _
            $(, $param:ident : $param_ty:ty)* $(,)?
        ) -> $ret:ty
        $body:block
    ) => {
        pastey::paste! {
            // Generate SQLite version
            $(#[$meta])*
            $vis fn [<$name _sqlite>] (
                $conn: &mut SqliteConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body

            // Generate MySQL version
            $(#[$meta])*
            $vis fn [<$name _mysql>] (
                $conn: &mut MysqlConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body
        }
    };
}

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{AssignmentLogRow, NewRequestRow, OfficerPerformanceRow};
pub use error::PersistenceError;
pub use mutations::{REPAIR_PASS_COUNT, RepairPass, RepairSummary, SettingsUpdate};

use backend::PersistenceBackend;

/// Internal enum for backend-specific database connections.
///
/// This enum allows the persistence adapter to work with either `SQLite`
/// or `MySQL` backends while maintaining a single public API.
pub enum BackendConnection {
    Sqlite(SqliteConnection),
    Mysql(MysqlConnection),
}

/// Persistence adapter for the request portal.
///
/// Backend selection happens once at construction time and is
/// transparent to callers.
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a new persistence adapter with a `MySQL`/`MariaDB` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_mysql(database_url: &str) -> Result<Self, PersistenceError> {
        let mut conn: MysqlConnection = backend::mysql::initialize_database(database_url)?;
        backend::mysql::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Mysql(conn),
        })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => conn.verify_foreign_key_enforcement(),
            BackendConnection::Mysql(conn) => conn.verify_foreign_key_enforcement(),
        }
    }

    // ========================================================================
    // Directory
    // ========================================================================

    /// Creates a department and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_department(&mut self, name: &str) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::create_department_sqlite(conn, name),
            BackendConnection::Mysql(conn) => mutations::create_department_mysql(conn, name),
        }
    }

    /// Creates a user and returns their id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_user(
        &mut self,
        login_name: &str,
        display_name: &str,
        role: &str,
        department_id: Option<i64>,
        created_at: &str,
    ) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::create_user_sqlite(
                conn,
                login_name,
                display_name,
                role,
                department_id,
                created_at,
            ),
            BackendConnection::Mysql(conn) => mutations::create_user_mysql(
                conn,
                login_name,
                display_name,
                role,
                department_id,
                created_at,
            ),
        }
    }

    /// Disables a user, removing them from the officer pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist.
    pub fn disable_user(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::disable_user_sqlite(conn, user_id),
            BackendConnection::Mysql(conn) => mutations::disable_user_mysql(conn, user_id),
        }
    }

    /// Lists all departments, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_departments(&mut self) -> Result<Vec<Department>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::list_departments_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::list_departments_mysql(conn),
        }
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Inserts a new request row and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_request(&mut self, row: &NewRequestRow) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::insert_request_sqlite(conn, row),
            BackendConnection::Mysql(conn) => mutations::insert_request_mysql(conn, row),
        }
    }

    /// Retrieves a request by id.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if the row does not exist and
    /// `UnknownStatus` if its stored status is outside the canonical set.
    pub fn get_request(&mut self, request_id: i64) -> Result<Request, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::get_request_sqlite(conn, request_id),
            BackendConnection::Mysql(conn) => queries::get_request_mysql(conn, request_id),
        }
    }

    /// Lists a requester's requests, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored status is outside
    /// the canonical set.
    pub fn list_requests_for_requester(
        &mut self,
        requester_id: i64,
    ) -> Result<Vec<Request>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::list_requests_for_requester_sqlite(conn, requester_id)
            }
            BackendConnection::Mysql(conn) => {
                queries::list_requests_for_requester_mysql(conn, requester_id)
            }
        }
    }

    /// Writes a new status for a request.
    ///
    /// Only the boundary layer's lifecycle coordinator calls this, after
    /// validating the transition.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if the row does not exist.
    pub fn update_request_status(
        &mut self,
        request_id: i64,
        new_status: &str,
        updated_at: &str,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::update_request_status_sqlite(conn, request_id, new_status, updated_at)
            }
            BackendConnection::Mysql(conn) => {
                mutations::update_request_status_mysql(conn, request_id, new_status, updated_at)
            }
        }
    }

    /// Records the officer currently responsible for a request.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` if the row does not exist.
    pub fn assign_request(
        &mut self,
        request_id: i64,
        officer_id: i64,
        updated_at: &str,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::assign_request_sqlite(conn, request_id, officer_id, updated_at)
            }
            BackendConnection::Mysql(conn) => {
                mutations::assign_request_mysql(conn, request_id, officer_id, updated_at)
            }
        }
    }

    // ========================================================================
    // Status history
    // ========================================================================

    /// Appends one status-history entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn append_status_history(
        &mut self,
        request_id: i64,
        status: &str,
        changed_by: Option<i64>,
        comment: Option<&str>,
        changed_at: &str,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::append_status_history_sqlite(
                conn, request_id, status, changed_by, comment, changed_at,
            ),
            BackendConnection::Mysql(conn) => mutations::append_status_history_mysql(
                conn, request_id, status, changed_by, comment, changed_at,
            ),
        }
    }

    /// Retrieves a request's status history in transition order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_status_history(
        &mut self,
        request_id: i64,
    ) -> Result<Vec<StatusChange>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::get_status_history_sqlite(conn, request_id),
            BackendConnection::Mysql(conn) => queries::get_status_history_mysql(conn, request_id),
        }
    }

    // ========================================================================
    // Status repair
    // ========================================================================

    /// Repairs invalid and legacy status values in storage.
    ///
    /// Runs exactly eight unconditional passes; see
    /// `mutations::repair` for the pass order.
    ///
    /// # Errors
    ///
    /// Returns an error if any update fails.
    pub fn repair_statuses(&mut self) -> Result<RepairSummary, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::repair_statuses_sqlite(conn),
            BackendConnection::Mysql(conn) => mutations::repair_statuses_mysql(conn),
        }
    }

    // ========================================================================
    // Load-balancing settings
    // ========================================================================

    /// Retrieves the authoritative load-balancing settings row, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_load_balancing_settings(
        &mut self,
    ) -> Result<Option<LoadBalancingSettings>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::get_load_balancing_settings_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::get_load_balancing_settings_mysql(conn),
        }
    }

    /// Creates or updates the authoritative settings row.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_load_balancing_settings(
        &mut self,
        update: &SettingsUpdate<'_>,
        updated_by: Option<i64>,
        updated_at: &str,
    ) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::upsert_load_balancing_settings_sqlite(conn, update, updated_by, updated_at)
            }
            BackendConnection::Mysql(conn) => {
                mutations::upsert_load_balancing_settings_mysql(conn, update, updated_by, updated_at)
            }
        }
    }

    /// Atomically advances the round-robin counter by 1, returning the
    /// pre-increment value that drives the current selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings row does not exist.
    pub fn advance_round_robin_counter(
        &mut self,
        settings_id: i64,
    ) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::advance_round_robin_counter_sqlite(conn, settings_id)
            }
            BackendConnection::Mysql(conn) => {
                mutations::advance_round_robin_counter_mysql(conn, settings_id)
            }
        }
    }

    /// Resets the round-robin counter to zero (explicit admin action).
    ///
    /// # Errors
    ///
    /// Returns an error if the settings row does not exist.
    pub fn reset_round_robin_counter(
        &mut self,
        settings_id: i64,
        updated_by: Option<i64>,
        updated_at: &str,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::reset_round_robin_counter_sqlite(conn, settings_id, updated_by, updated_at)
            }
            BackendConnection::Mysql(conn) => {
                mutations::reset_round_robin_counter_mysql(conn, settings_id, updated_by, updated_at)
            }
        }
    }

    // ========================================================================
    // Officer pool
    // ========================================================================

    /// Lists all enabled users holding the procurement-reviewer role.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_officers(&mut self) -> Result<Vec<Officer>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::list_officers_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::list_officers_mysql(conn),
        }
    }

    /// Counts the requests currently assigned to an officer in
    /// procurement review.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_active_reviews(&mut self, officer_id: i64) -> Result<i64, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::count_active_reviews_sqlite(conn, officer_id),
            BackendConnection::Mysql(conn) => queries::count_active_reviews_mysql(conn, officer_id),
        }
    }

    // ========================================================================
    // Splintering window
    // ========================================================================

    /// Finds prior requests contributing to a splintering sum.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_splinter_matches(
        &mut self,
        requester_id: Option<i64>,
        department_id: Option<i64>,
        window_start: &str,
    ) -> Result<Vec<SplinterMatch>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::find_splinter_matches_sqlite(
                conn,
                requester_id,
                department_id,
                window_start,
            ),
            BackendConnection::Mysql(conn) => queries::find_splinter_matches_mysql(
                conn,
                requester_id,
                department_id,
                window_start,
            ),
        }
    }

    // ========================================================================
    // Assignment bookkeeping
    // ========================================================================

    /// Records one auto-assignment in the assignment log.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_assignment_log(
        &mut self,
        request_id: i64,
        officer_id: i64,
        strategy: &str,
        assigned_at: &str,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::insert_assignment_log_sqlite(
                conn, request_id, officer_id, strategy, assigned_at,
            ),
            BackendConnection::Mysql(conn) => mutations::insert_assignment_log_mysql(
                conn, request_id, officer_id, strategy, assigned_at,
            ),
        }
    }

    /// Upserts the performance counters for an officer receiving an
    /// assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn record_officer_assignment(
        &mut self,
        officer_id: i64,
        assigned_at: &str,
    ) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::record_officer_assignment_sqlite(conn, officer_id, assigned_at)
            }
            BackendConnection::Mysql(conn) => {
                mutations::record_officer_assignment_mysql(conn, officer_id, assigned_at)
            }
        }
    }

    /// Retrieves the assignment log for a request, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_assignment_log(
        &mut self,
        request_id: i64,
    ) -> Result<Vec<AssignmentLogRow>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::get_assignment_log_sqlite(conn, request_id),
            BackendConnection::Mysql(conn) => queries::get_assignment_log_mysql(conn, request_id),
        }
    }

    /// Retrieves an officer's performance counters, if any exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_officer_performance(
        &mut self,
        officer_id: i64,
    ) -> Result<Option<OfficerPerformanceRow>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::get_officer_performance_sqlite(conn, officer_id)
            }
            BackendConnection::Mysql(conn) => {
                queries::get_officer_performance_mysql(conn, officer_id)
            }
        }
    }
}
