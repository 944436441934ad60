//! HTTP server configuration object.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use registration::domain::ports::RegistrationCommand;

/// Port the registration page is served on.
pub const DEFAULT_PORT: u16 = 5000;

/// Everything needed to start the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) registration: Arc<dyn RegistrationCommand>,
}

impl ServerConfig {
    /// Serve `registration` on all interfaces at [`DEFAULT_PORT`].
    #[must_use]
    pub fn new(registration: Arc<dyn RegistrationCommand>) -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            registration,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
