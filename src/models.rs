use serde::{Deserialize, Serialize};

/// Wire shape shared by every endpoint that answers with a single
/// human-readable message, success and error bodies alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Outcome of a username uniqueness check. The status carries the
/// branching information; the message is display text only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Taken,
    Invalid,
    Error,
}

impl Availability {
    /// Whether the outcome should be rendered in a positive style.
    pub fn is_positive(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub status: Availability,
    pub message: String,
}

/// Sign-up form input. Must pass schema validation before any
/// submission is attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpData {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
}

/// Body of `GET /auth/session`. `user` is null when no valid session
/// exists; the endpoint never answers with an error for that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: Option<SessionUser>,
}
