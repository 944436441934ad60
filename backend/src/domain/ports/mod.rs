//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod registration_command;
mod student_store;

#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::{RegistrationCommand, RegistrationReceipt};
#[cfg(test)]
pub use student_store::{MockStudentStore, MockStudentStoreSession};
pub use student_store::{StudentStore, StudentStoreError, StudentStoreSession};
