//! Domain primitives and the registration use-case.
//!
//! Purpose: define the student registration model, its validation rules, and
//! the ports through which inbound and outbound adapters reach it. Nothing in
//! here knows about HTTP or SQL.
//!
//! Public surface:
//! - `StudentSubmission`: raw form fields in arrival order.
//! - `NewStudent`: coerced values ready for storage.
//! - `RegisteredStudent` / `StudentId`: storage-assigned attributes.
//! - `RegistrationService` / `RegistrationError`: the use-case and its
//!   failure taxonomy.

pub mod ports;
pub mod registration;
pub mod student;

pub use self::registration::{RegistrationError, RegistrationService};
pub use self::student::{
    ADDRESS_FIELD, AGE_FIELD, NAME_FIELD, NewStudent, PERCENTAGE_FIELD, QUALIFICATION_FIELD,
    RegisteredStudent, StudentId, StudentSubmission, StudentValidationError, YEAR_FIELD,
};
