//! Back-office portal collaborators: authentication and the rendered listing.

pub mod http;
pub mod wait;

use crate::errors::AppResult;
use std::fmt;

pub use http::{HttpPortal, HttpSession};
pub use wait::{Readiness, Waited, wait_until};

/// One login for the portal. The email doubles as the source tag of every
/// event collected under it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Authentication + listing access.
///
/// Failures are reported as `AppError::Session`; the caller decides whether a
/// failed session aborts the run.
pub trait Portal {
    type Session;

    /// Open a fresh authenticated context for `credential`.
    fn sign_in(&mut self, credential: &Credential) -> AppResult<Self::Session>;

    /// Return the listing page as currently rendered for `session`.
    fn fetch_listing(&mut self, session: &Self::Session) -> AppResult<String>;
}
