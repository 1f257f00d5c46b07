//! Session bootstrap — logs in and verifies the session before any command
//! does real work.
//!
//! Wraps client construction, login, and the capability check into a single
//! `create_session` call that produces a ready-to-use [`DeskSession`].

use std::sync::Arc;

use broker_api::{Broker, BrokerConfig};
use tracing::info;

use crate::error::DeskError;

/// An authenticated connection to the brokerage API.
pub struct DeskSession {
    /// Shared API client; holds the session cookie.
    pub api: Arc<Broker>,
    /// Operator email as confirmed by the server.
    pub email: String,
    /// Whether the session carries the administrator capability.
    pub is_admin: bool,
}

/// Log in and verify the session.
///
/// This:
/// 1. Creates the API client for `api_url`.
/// 2. Logs in with the operator credentials.
/// 3. Re-checks the session via the check-auth endpoint.
///
/// The admin check here is a capability gate, not a security boundary — the
/// server enforces authorization on every call. Checking up front just avoids
/// starting a console that could never work.
///
/// # Errors
///
/// Returns [`DeskError::LoginFailed`] when the server rejects the
/// credentials, [`DeskError::NotAuthenticated`] when no session exists after
/// login, or [`DeskError::Api`] for transport-level failures.
pub async fn create_session(
    api_url: &str,
    email: &str,
    password: &str,
) -> Result<DeskSession, DeskError> {
    let api = Arc::new(Broker::new(BrokerConfig {
        api_url: api_url.to_string(),
    })?);

    let resp = api.login(email, password).await?;
    if !resp.success {
        return Err(DeskError::LoginFailed(
            resp.message.unwrap_or_else(|| "login rejected".into()),
        ));
    }

    let auth = api.check_auth().await?;
    if !auth.authenticated {
        return Err(DeskError::NotAuthenticated);
    }

    let confirmed = auth
        .user
        .as_ref()
        .and_then(|u| u.email.clone())
        .unwrap_or_else(|| email.to_string());
    let is_admin = auth.is_admin();

    info!(operator = %confirmed, admin = is_admin, "session established");

    Ok(DeskSession {
        api,
        email: confirmed,
        is_admin,
    })
}

impl DeskSession {
    /// Fail unless the session has administrator capability.
    pub fn require_admin(&self) -> Result<(), DeskError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(DeskError::AdminRequired)
        }
    }
}
