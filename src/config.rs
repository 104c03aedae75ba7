//! Runtime configuration from environment variables.
//!
//! Every knob has a default; the server starts with no environment at
//! all. `BOTIQUIN_HOST` and `BOTIQUIN_PORT` pick the bind address,
//! `BOTIQUIN_SYMPTOMS_FILE` and `BOTIQUIN_MEDICATIONS_FILE` swap the
//! built-in reference tables for external JSON.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

pub const APP_NAME: &str = "Botiquin";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Conventional action-server port.
pub const DEFAULT_PORT: u16 = 5055;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {name}={value}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Bind address from `BOTIQUIN_HOST` and `BOTIQUIN_PORT`.
pub fn bind_addr() -> Result<SocketAddr, ConfigError> {
    let host = std::env::var("BOTIQUIN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let ip = parse_host(&host)?;

    let port = match std::env::var("BOTIQUIN_PORT") {
        Ok(raw) => parse_port(&raw)?,
        Err(_) => DEFAULT_PORT,
    };

    Ok(SocketAddr::new(ip, port))
}

fn parse_host(raw: &str) -> Result<IpAddr, ConfigError> {
    raw.parse().map_err(|err| ConfigError::Invalid {
        name: "BOTIQUIN_HOST",
        value: raw.to_string(),
        reason: format!("{err}"),
    })
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.parse().map_err(|err| ConfigError::Invalid {
        name: "BOTIQUIN_PORT",
        value: raw.to_string(),
        reason: format!("{err}"),
    })
}

/// Path to an external symptom table, if configured.
pub fn symptoms_file() -> Option<PathBuf> {
    std::env::var_os("BOTIQUIN_SYMPTOMS_FILE").map(PathBuf::from)
}

/// Path to an external medication table, if configured.
pub fn medications_file() -> Option<PathBuf> {
    std::env::var_os("BOTIQUIN_MEDICATIONS_FILE").map(PathBuf::from)
}

/// Default `RUST_LOG`-style filter when the variable is unset.
pub fn default_log_filter() -> &'static str {
    "botiquin=info,tower_http=warn"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_identity() {
        assert_eq!(APP_NAME, "Botiquin");
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn log_filter_scopes_own_crate() {
        assert!(default_log_filter().starts_with("botiquin="));
    }

    #[test]
    fn default_bind_uses_conventional_port() {
        // Env-dependent; only meaningful when the variables are unset,
        // which is the normal test environment.
        if std::env::var_os("BOTIQUIN_PORT").is_none() {
            let addr = bind_addr().unwrap();
            assert_eq!(addr.port(), DEFAULT_PORT);
        }
    }

    #[test]
    fn valid_host_and_port_parse() {
        assert_eq!(parse_host("127.0.0.1").unwrap(), IpAddr::from([127, 0, 0, 1]));
        assert_eq!(parse_port("8080").unwrap(), 8080);
    }

    #[test]
    fn invalid_host_is_an_error_naming_the_variable() {
        let err = parse_host("not-an-ip").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { name: "BOTIQUIN_HOST", ref value, .. } if value == "not-an-ip",
        ));
    }

    #[test]
    fn out_of_range_port_is_an_error_naming_the_variable() {
        let err = parse_port("99999").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { name: "BOTIQUIN_PORT", ref value, .. } if value == "99999",
        ));
    }
}
