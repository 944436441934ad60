//! HTTP inbound adapter serving the registration page.

pub mod form;
pub mod registration;
pub mod state;

pub use registration::{index, register};
