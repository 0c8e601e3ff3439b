//! Typed login failures and their user-facing messages.
//!
//! The hosted backend reports sign-in failures as English message strings;
//! this module maps them to a closed taxonomy and to the Spanish copy the
//! dashboard shows. Login failures are surfaced once and never retried.

use thiserror::Error;

/// Why a sign-in attempt failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email not confirmed")]
    EmailNotConfirmed,

    #[error("rate limited")]
    RateLimited,

    /// Anything the taxonomy does not recognize, with the backend's message
    /// preserved for logs.
    #[error("login failed: {0}")]
    Other(String),
}

impl LoginError {
    /// Classify a backend error message.
    pub fn from_backend_message(message: &str) -> Self {
        let lowered = message.to_lowercase();
        if lowered.contains("invalid login credentials") {
            LoginError::InvalidCredentials
        } else if lowered.contains("email not confirmed") {
            LoginError::EmailNotConfirmed
        } else if lowered.contains("rate limit") || lowered.contains("too many requests") {
            LoginError::RateLimited
        } else {
            LoginError::Other(message.to_string())
        }
    }

    /// The Spanish template shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoginError::InvalidCredentials => {
                "Credenciales incorrectas. Verifica tu correo y contraseña."
            }
            LoginError::EmailNotConfirmed => {
                "Debes confirmar tu correo electrónico antes de iniciar sesión."
            }
            LoginError::RateLimited => {
                "Demasiados intentos. Espera unos minutos e intenta de nuevo."
            }
            LoginError::Other(_) => "No se pudo iniciar sesión. Intenta de nuevo más tarde.",
        }
    }
}
