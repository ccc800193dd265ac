//! Optional sign-in. The identity service is an external collaborator:
//! this module only holds the session seam and a credentials-file provider
//! for the binary. Task API calls never carry the identity.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no stored credentials at {}", .0.display())]
    MissingCredentials(PathBuf),
    #[error("could not read credentials: {0}")]
    Io(#[from] std::io::Error),
    #[error("credentials file is not valid: {0}")]
    Invalid(#[from] toml::de::Error),
}

/// Seam to the external identity service. `login` runs whatever flow the
/// provider implements and yields the signed-in user or a failure.
pub trait IdentityProvider {
    fn login(&self) -> Result<User, AuthError>;

    /// Invalidate whatever the provider holds; the session clears its own
    /// user regardless.
    fn logout(&self) {}
}

/// Current sign-in state. A failed login is logged and leaves the session
/// exactly as it was; logout always clears the user.
pub struct Session {
    provider: Box<dyn IdentityProvider>,
    user: Option<User>,
}

impl Session {
    pub fn new(provider: Box<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            user: None,
        }
    }

    pub fn login(&mut self) -> bool {
        match self.provider.login() {
            Ok(user) => {
                info!(user = %user.display_name, "signed in");
                self.user = Some(user);
                true
            }
            Err(error) => {
                warn!(error = %error, "sign-in failed");
                false
            }
        }
    }

    pub fn logout(&mut self) {
        self.provider.logout();
        if self.user.take().is_some() {
            info!("signed out");
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Reads a TOML credentials file written by an out-of-band sign-in
/// (id, display_name, optional email).
pub struct FileIdentityProvider {
    path: PathBuf,
}

impl FileIdentityProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl IdentityProvider for FileIdentityProvider {
    fn login(&self) -> Result<User, AuthError> {
        if !self.path.exists() {
            return Err(AuthError::MissingCredentials(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path)?;
        let user: User = toml::from_str(&content)?;
        Ok(user)
    }
}
