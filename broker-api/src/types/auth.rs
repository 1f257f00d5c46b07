use serde::{Deserialize, Serialize};

/// Answer from `/api/check-auth`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl AuthStatus {
    /// The "no session" answer (the server signals it with a 401).
    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }

    /// Whether the session carries the administrator capability.
    pub fn is_admin(&self) -> bool {
        self.authenticated && self.user.as_ref().is_some_and(|u| u.is_admin)
    }
}

/// The user half of a session answer. Admin sessions carry only an email;
/// regular sessions embed the full profile, of which we keep what the
/// console needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Generic `{success, message}` acknowledgement returned by mutating
/// endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAck {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Answer from `/api/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<SessionUser>,
}
