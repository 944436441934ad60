//! PostgreSQL persistence adapter using Diesel with `diesel-async`.
//!
//! - **Thin adapter**: [`DieselStudentStore`] only translates between the
//!   `students` table and domain types. Validation lives in the domain.
//! - **Scoped connections**: one connection per registration, opened on
//!   demand and closed when the session is dropped. No pool is kept and no
//!   connection is attempted at startup.
//! - **Typed errors**: Diesel failures map to [`StudentStoreError`]
//!   variants, keeping server-reported messages for the error banner.
//!
//! [`StudentStoreError`]: crate::domain::ports::StudentStoreError
//!
//! # Example
//!
//! ```no_run
//! use registration::outbound::persistence::{ConnectionSettings, DieselStudentStore};
//!
//! let settings = ConnectionSettings::new()
//!     .with_host("localhost")
//!     .with_user("admin")
//!     .with_password("secret")
//!     .with_database("studentdb");
//! let store = DieselStudentStore::new(settings);
//! # let _ = store;
//! ```

mod connection;
mod diesel_error_mapping;
mod diesel_student_store;

pub use connection::{ConnectionSettings, ConnectionSettingsError, DEFAULT_PORT};
pub use diesel_student_store::DieselStudentStore;
