//! Driving port for the student registration use-case.
//!
//! Inbound adapters call this port with the raw submission; they never see
//! the store or its connection lifecycle. HTTP handler tests substitute a
//! double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{NewStudent, RegisteredStudent, RegistrationError, StudentSubmission};

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationReceipt {
    /// The coerced values that were stored.
    pub student: NewStudent,
    /// Storage-assigned identifier and timestamp.
    pub registered: RegisteredStudent,
}

/// Domain use-case port for registering a student.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Validate and persist one submission.
    async fn register(
        &self,
        submission: &StudentSubmission,
    ) -> Result<RegistrationReceipt, RegistrationError>;
}
