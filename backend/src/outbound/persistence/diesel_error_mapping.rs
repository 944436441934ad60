//! Mapping from Diesel failures to student store port errors.
//!
//! Database-reported messages (for example `numeric field overflow`) are kept
//! because the registration page shows them to the submitter. Everything else
//! collapses to a short generic message, with the detail logged at debug
//! level.

use diesel::result::{ConnectionError, DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::StudentStoreError;

use super::connection::ConnectionSettingsError;

/// Map a missing or malformed setting to a connection error.
pub fn map_settings_error(error: ConnectionSettingsError) -> StudentStoreError {
    StudentStoreError::connection(error.to_string())
}

/// Map a failed connection attempt.
pub fn map_connection_error(error: ConnectionError) -> StudentStoreError {
    debug!(%error, "database connection attempt failed");
    let message = match error {
        ConnectionError::BadConnection(message) => message,
        ConnectionError::InvalidConnectionUrl(message) => {
            format!("invalid connection url: {message}")
        }
        other => other.to_string(),
    };
    StudentStoreError::connection(message.trim().to_owned())
}

fn log_diesel_error(error: &DieselError, operation: &str) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            %operation,
            "diesel operation failed"
        ),
    }
}

/// Map a Diesel error raised while writing through `build`.
///
/// A connection lost after it was established stays in the write category;
/// only failures to open a connection are [`StudentStoreError::Connection`].
fn map_write_error(
    error: DieselError,
    operation: &str,
    build: impl FnOnce(String) -> StudentStoreError,
) -> StudentStoreError {
    log_diesel_error(&error, operation);

    match error {
        DieselError::DatabaseError(_, info) => build(info.message().to_owned()),
        DieselError::NotFound => build("no row returned".to_owned()),
        DieselError::QueryBuilderError(_) => build("database query error".to_owned()),
        _ => build("database error".to_owned()),
    }
}

/// Map a failure of the `CREATE TABLE IF NOT EXISTS` statement.
pub fn map_schema_error(error: DieselError) -> StudentStoreError {
    map_write_error(error, "ensure students table", |message| {
        StudentStoreError::schema(message)
    })
}

/// Map a failure of the row insert.
pub fn map_insert_error(error: DieselError) -> StudentStoreError {
    map_write_error(error, "insert student", |message| {
        StudentStoreError::insert(message)
    })
}

/// True when a concurrent session created the table between our existence
/// check and our own create; PostgreSQL reports this as a unique violation on
/// its catalog rather than honouring `IF NOT EXISTS`.
pub fn is_concurrent_create(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}
