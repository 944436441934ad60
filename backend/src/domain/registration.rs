//! Student registration use-case.
//!
//! [`RegistrationService`] runs one submission through
//! `connect → coerce → ensure schema → insert`, returning at the first
//! failure. The store session is a local value, so it is dropped, and its
//! connection released, whichever step returns.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use super::ports::{RegistrationCommand, RegistrationReceipt, StudentStore, StudentStoreError};
use super::{NewStudent, StudentSubmission, StudentValidationError};

/// Failures surfaced by a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The store could not be reached; nothing was attempted.
    #[error("database connection failed: {message}")]
    Connection { message: String },
    /// A field was missing or could not be coerced; nothing was written.
    #[error(transparent)]
    Validation(#[from] StudentValidationError),
    /// The `students` table could not be created or verified.
    #[error("could not prepare the students table: {message}")]
    Schema { message: String },
    /// The row could not be written.
    #[error("could not save the registration: {message}")]
    Insert { message: String },
}

impl RegistrationError {
    /// True when the failure happened before a connection was available.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

impl From<StudentStoreError> for RegistrationError {
    fn from(error: StudentStoreError) -> Self {
        match error {
            StudentStoreError::Connection { message } => Self::Connection { message },
            StudentStoreError::Schema { message } => Self::Schema { message },
            StudentStoreError::Insert { message } => Self::Insert { message },
        }
    }
}

/// Registration service backed by a [`StudentStore`].
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use registration::config::DatabaseSettings;
/// use registration::domain::RegistrationService;
/// use registration::outbound::persistence::{ConnectionSettings, DieselStudentStore};
///
/// let settings = DatabaseSettings {
///     host: Some("localhost".to_owned()),
///     port: None,
///     user: Some("admin".to_owned()),
///     password: Some("secret".to_owned()),
///     name: Some("studentdb".to_owned()),
/// };
/// let store = DieselStudentStore::new(ConnectionSettings::from(&settings));
/// let service = RegistrationService::new(Arc::new(store));
/// # let _ = service;
/// ```
#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn StudentStore>,
}

impl RegistrationService {
    /// Create a service over the given store.
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    async fn run(
        &self,
        submission: &StudentSubmission,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        let mut session = self.store.connect().await?;
        let student = NewStudent::try_from(submission)?;
        session.ensure_schema().await?;
        let registered = session.insert(&student).await?;
        Ok(RegistrationReceipt {
            student,
            registered,
        })
    }
}

#[async_trait]
impl RegistrationCommand for RegistrationService {
    async fn register(
        &self,
        submission: &StudentSubmission,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        let outcome = self.run(submission).await;
        match &outcome {
            Ok(receipt) => info!(
                student_id = %receipt.registered.id,
                name = receipt.student.name(),
                "student registered"
            ),
            Err(error) => warn!(%error, "student registration failed"),
        }
        outcome
    }
}
