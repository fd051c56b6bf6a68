//! HTTP implementation of the portal: one cookie jar per session.

use super::{Credential, Portal};
use crate::config::PortalConfig;
use crate::errors::{AppError, AppResult};
use reqwest::Url;
use reqwest::blocking::Client;
use std::time::Duration;

pub struct HttpPortal {
    cfg: PortalConfig,
    login_url: Url,
}

/// An authenticated client. Dropping it discards the session cookies.
pub struct HttpSession {
    http: Client,
    user: String,
}

fn session_error(user: &str, reason: impl ToString) -> AppError {
    AppError::Session {
        user: user.to_string(),
        reason: reason.to_string(),
    }
}

impl HttpPortal {
    pub fn new(cfg: &PortalConfig) -> AppResult<Self> {
        let login_url = Url::parse(&cfg.login_url)
            .map_err(|e| AppError::Configuration(format!("portal.login_url: {e}")))?;
        Url::parse(&cfg.events_url)
            .map_err(|e| AppError::Configuration(format!("portal.events_url: {e}")))?;

        Ok(Self {
            cfg: cfg.clone(),
            login_url,
        })
    }

    fn client(&self) -> reqwest::Result<Client> {
        Client::builder()
            .cookie_store(true)
            .user_agent(self.cfg.user_agent.clone())
            .timeout(Duration::from_secs(self.cfg.request_timeout_secs))
            .build()
    }
}

impl Portal for HttpPortal {
    type Session = HttpSession;

    fn sign_in(&mut self, credential: &Credential) -> AppResult<HttpSession> {
        let user = credential.email.as_str();
        let http = self.client().map_err(|e| session_error(user, e))?;

        // The sign-in page sets the cookies the form post expects.
        http.get(self.login_url.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| session_error(user, format!("sign-in page: {e}")))?;

        let resp = http
            .post(self.login_url.clone())
            .form(&[
                (self.cfg.email_field.as_str(), user),
                (self.cfg.password_field.as_str(), credential.password()),
            ])
            .send()
            .map_err(|e| session_error(user, format!("sign-in request: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(session_error(user, format!("sign-in returned {status}")));
        }

        // Rejected logins land back on the sign-in form.
        if resp.url().path() == self.login_url.path() {
            return Err(session_error(user, "credentials rejected"));
        }

        Ok(HttpSession {
            http,
            user: user.to_string(),
        })
    }

    fn fetch_listing(&mut self, session: &HttpSession) -> AppResult<String> {
        session
            .http
            .get(&self.cfg.events_url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| session_error(&session.user, format!("events page: {e}")))
    }
}
