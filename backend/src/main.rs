//! Student registration entry-point: loads database settings, wires the
//! registration service, and serves the form.

mod server;

use std::sync::Arc;

use color_eyre::eyre::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use registration::config::DatabaseSettings;
use registration::domain::RegistrationService;
use registration::outbound::persistence::{ConnectionSettings, DieselStudentStore};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DatabaseSettings::from_env().wrap_err("reading DB_* settings")?;
    let store = DieselStudentStore::new(ConnectionSettings::from(&settings));
    let registration = Arc::new(RegistrationService::new(Arc::new(store)));

    let config = ServerConfig::new(registration);
    let bind_addr = config.bind_addr();
    let server = create_server(config).wrap_err_with(|| format!("binding {bind_addr}"))?;
    info!(%bind_addr, "student registration listening");
    server.await.wrap_err("serving HTTP")
}
