//! Botiquin: a Spanish-language pharmacy assistant action server.
//!
//! The dialogue manager keeps the conversation; this service executes
//! the custom actions behind it. A webhook receives the action name
//! and conversation tracker, the action consults small reference
//! tables of symptoms and over-the-counter medications, and the
//! responses go back as rendered text or template references.

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub mod actions; // action registry and the five dialogue actions
pub mod api; // HTTP surface: router, endpoints, wire types
pub mod config; // env-driven runtime configuration
pub mod matcher; // lenient query-to-key resolution
pub mod menu; // top-level menu routing
pub mod reference; // symptom and medication stores
pub mod responder; // user-facing message rendering
pub mod text; // normalization helpers

use crate::actions::ActionRegistry;
use crate::config::{APP_NAME, APP_VERSION};
use crate::reference::ReferenceData;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Reference(#[from] reference::ReferenceError),

    #[error(transparent)]
    Serve(#[from] api::server::ServeError),
}

/// Wire everything together and serve until shutdown.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", APP_NAME, APP_VERSION);

    let reference = ReferenceData::load(
        config::symptoms_file().as_deref(),
        config::medications_file().as_deref(),
    )?;
    tracing::info!(
        symptoms = reference.symptoms.len(),
        medications = reference.medications.len(),
        "reference stores ready"
    );

    let registry = Arc::new(ActionRegistry::new(reference));
    let addr = config::bind_addr()?;
    api::server::serve(addr, registry).await?;
    Ok(())
}
