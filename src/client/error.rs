use std::fmt;

/// Where a failed call went wrong: the transport itself, or a response
/// the server answered with a non-success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Server(u16),
}

/// One error shape for every client-side failure. Transport errors carry
/// no server message; structured server errors carry the body's message
/// so it can be surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

impl ClientError {
    pub fn network() -> Self {
        ClientError {
            kind: ErrorKind::Network,
            message: None,
        }
    }

    pub fn server(status: u16, message: Option<String>) -> Self {
        ClientError {
            kind: ErrorKind::Server(status),
            message,
        }
    }

    /// The server-supplied message when present, else the fallback.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.message) {
            (ErrorKind::Network, _) => write!(f, "network error"),
            (ErrorKind::Server(status), Some(message)) => write!(f, "server error {}: {}", status, message),
            (ErrorKind::Server(status), None) => write!(f, "server error {}", status),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(_: reqwest::Error) -> Self {
        ClientError::network()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_server_message_over_fallback() {
        let err = ClientError::server(409, Some("Username already taken".to_string()));
        assert_eq!(err.message_or("fallback"), "Username already taken");
    }

    #[test]
    fn network_errors_fall_back() {
        let err = ClientError::network();
        assert_eq!(err.message_or("fallback"), "fallback");
    }
}
