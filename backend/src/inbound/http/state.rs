//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on the registration port and stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::RegistrationCommand;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration use-case.
    pub registration: Arc<dyn RegistrationCommand>,
}

impl HttpState {
    /// Construct state around a registration port.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use registration::domain::RegistrationService;
    /// use registration::inbound::http::state::HttpState;
    /// use registration::outbound::persistence::{ConnectionSettings, DieselStudentStore};
    ///
    /// let store = DieselStudentStore::new(ConnectionSettings::new());
    /// let state = HttpState::new(Arc::new(RegistrationService::new(Arc::new(store))));
    /// let _registration = state.registration.clone();
    /// ```
    pub fn new(registration: Arc<dyn RegistrationCommand>) -> Self {
        Self { registration }
    }
}
