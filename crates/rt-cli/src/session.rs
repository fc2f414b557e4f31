//! Opening a live session from configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use rt_client::{Credentials, HttpTransport, Replicon, SessionExecutor};

use crate::Config;

/// Returns a configured value, treating blank strings as missing.
fn required<'a>(value: Option<&'a str>, what: &str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .with_context(|| {
            let var = what.to_uppercase().replace(' ', "_");
            format!("missing {what} (set RT_{var} or config.toml)")
        })
}

/// Validates credentials and names, then resolves the client and user.
///
/// Every configuration check runs before the first request is sent.
pub fn connect(config: &Config) -> Result<Replicon<HttpTransport>> {
    let username = required(config.username.as_deref(), "username")?;
    let password = config
        .password
        .as_deref()
        .filter(|value| !value.is_empty())
        .context("missing password (set RT_PASSWORD or config.toml)")?;
    let client_name = required(config.client_name.as_deref(), "client name")?;

    let credentials = Credentials {
        username: username.to_string(),
        password: password.to_string(),
    };
    let transport = HttpTransport::new(
        &config.endpoint,
        credentials,
        Duration::from_secs(config.timeout_secs),
    )
    .context("failed to create HTTP transport")?;

    Replicon::connect(SessionExecutor::new(transport), client_name, username)
        .context("failed to connect")
}
