use crate::models::Session;

use super::error::ClientError;

/// Capability handed to the navigation bar instead of a global session
/// context: read the current session, end it.
pub trait SessionProvider {
    async fn get_session(&self) -> Result<Option<Session>, ClientError>;
    async fn sign_out(&self) -> Result<(), ClientError>;
}

/// What the navigation bar renders. Exactly two states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavView {
    SignedIn { display_name: String },
    SignedOut,
}

/// Pure projection of session data into a view. Display name prefers
/// the username and falls back to the email.
pub fn nav_view(session: Option<&Session>) -> NavView {
    match session {
        Some(session) => NavView::SignedIn {
            display_name: session
                .user
                .username
                .clone()
                .or_else(|| session.user.email.clone())
                .unwrap_or_default(),
        },
        None => NavView::SignedOut,
    }
}

pub struct Navbar<P> {
    provider: P,
    session: Option<Session>,
}

impl<P: SessionProvider> Navbar<P> {
    pub fn new(provider: P) -> Self {
        Navbar {
            provider,
            session: None,
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.session = self.provider.get_session().await?;
        Ok(())
    }

    pub fn view(&self) -> NavView {
        nav_view(self.session.as_ref())
    }

    /// Delegates entirely to the provider; local state only mirrors the
    /// result.
    pub async fn log_out(&mut self) -> Result<(), ClientError> {
        self.provider.sign_out().await?;
        self.session = None;
        Ok(())
    }
}
