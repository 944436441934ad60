//! Driven port for student persistence.
//!
//! Storage access is split in two: [`StudentStore`] hands out a
//! [`StudentStoreSession`], which owns exactly one backend connection for the
//! lifetime of a single registration. Dropping the session releases the
//! connection, so every exit path of the caller releases it exactly once.

use async_trait::async_trait;

use crate::domain::{NewStudent, RegisteredStudent};

use super::define_port_error;

define_port_error! {
    /// Errors raised by student store adapters.
    pub enum StudentStoreError {
        /// The backend could not be reached, rejected credentials, or is not
        /// configured.
        Connection { message: String } => "student store connection failed: {message}",
        /// Creating or verifying the `students` table failed.
        Schema { message: String } => "student store schema setup failed: {message}",
        /// The row could not be written.
        Insert { message: String } => "student store insert failed: {message}",
    }
}

/// Factory for per-request storage sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Acquire a fresh connection to the backend.
    ///
    /// No retry is attempted; a failure is reported immediately as
    /// [`StudentStoreError::Connection`].
    async fn connect(&self) -> Result<Box<dyn StudentStoreSession>, StudentStoreError>;
}

/// A single acquired connection.
///
/// Implementations must release the underlying connection on drop.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentStoreSession: Send {
    /// Create the `students` table when it is absent and commit the change.
    ///
    /// Must succeed without touching existing rows when the table exists.
    async fn ensure_schema(&mut self) -> Result<(), StudentStoreError>;

    /// Insert one registration and commit it, returning the storage-assigned
    /// identifier and timestamp.
    async fn insert(&mut self, student: &NewStudent)
    -> Result<RegisteredStudent, StudentStoreError>;
}
