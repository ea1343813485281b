//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// A closed set of failure kinds produced by entity construction, credential
/// checks and identifier parsing. Infrastructure concerns (storage, transport)
/// have their own error types in the crates that own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A name was empty.
    #[error("name is required")]
    NameRequired,

    /// A price was exactly zero.
    #[error("price is required")]
    PriceRequired,

    /// A price was negative or not a finite number.
    #[error("invalid price")]
    InvalidPrice,

    /// An email was empty.
    #[error("email is required")]
    EmailRequired,

    /// A plaintext password was empty.
    #[error("password is required")]
    PasswordRequired,

    /// Authentication failed.
    ///
    /// Returned both for unknown accounts and for wrong passwords.
    #[error("invalid credentials")]
    CredentialInvalid,

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The password hasher could not produce a digest (misconfiguration).
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn hashing(msg: impl Into<String>) -> Self {
        Self::Hashing(msg.into())
    }

    /// Stable machine-readable code, used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NameRequired => "name_required",
            DomainError::PriceRequired => "price_required",
            DomainError::InvalidPrice => "invalid_price",
            DomainError::EmailRequired => "email_required",
            DomainError::PasswordRequired => "password_required",
            DomainError::CredentialInvalid => "credential_invalid",
            DomainError::InvalidId(_) => "invalid_id",
            DomainError::Hashing(_) => "hashing_failed",
        }
    }

    /// Whether the error is caused by caller input (as opposed to misconfiguration).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::NameRequired
                | DomainError::PriceRequired
                | DomainError::InvalidPrice
                | DomainError::EmailRequired
                | DomainError::PasswordRequired
                | DomainError::InvalidId(_)
        )
    }
}
