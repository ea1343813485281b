//! Login protocol: credential check followed by token issuance.

use std::sync::OnceLock;

use thiserror::Error;

use catalog_core::DomainError;

use crate::password::{CredentialHasher, PasswordDigest};
use crate::token::{AccessToken, TokenError, TokenIssuer};
use crate::user::User;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// Always `DomainError::CredentialInvalid`.
    #[error(transparent)]
    Credential(#[from] DomainError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Authenticate a looked-up account and mint a token.
///
/// `found` is the result of the email lookup. A missing account and a wrong
/// password produce the same `CredentialInvalid` error, and both paths run one
/// password verification.
pub fn authenticate(
    found: Option<&User>,
    candidate: &str,
    issuer: &TokenIssuer,
) -> Result<AccessToken, LoginError> {
    let Some(user) = found else {
        if let Some(digest) = dummy_digest() {
            let _ = digest.verify(candidate);
        }
        return Err(DomainError::CredentialInvalid.into());
    };

    if !user.validate_password(candidate) {
        return Err(DomainError::CredentialInvalid.into());
    }

    Ok(issuer.issue(user)?)
}

fn dummy_digest() -> Option<&'static PasswordDigest> {
    static DUMMY: OnceLock<Option<PasswordDigest>> = OnceLock::new();
    DUMMY
        .get_or_init(|| CredentialHasher::default().hash("dummy-password").ok())
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::fast_hasher;
    use crate::token::{JwtValidator, SigningConfig};
    use chrono::Utc;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SigningConfig::new("test-secret", 300)).unwrap()
    }

    fn john() -> User {
        User::new_with_hasher(&fast_hasher(), "John Doe", "john@mail.com", "123456").unwrap()
    }

    #[test]
    fn correct_password_yields_token_for_user() {
        let user = john();
        let issuer = issuer();

        let token = authenticate(Some(&user), "123456", &issuer).unwrap();
        let claims = issuer.validate(&token.token, Utc::now()).unwrap();
        assert_eq!(claims.sub, user.id_typed());
    }

    #[test]
    fn unknown_account_and_wrong_password_are_indistinguishable() {
        let user = john();
        let issuer = issuer();

        let unknown = authenticate(None, "123456", &issuer).unwrap_err();
        let wrong = authenticate(Some(&user), "1234561", &issuer).unwrap_err();

        assert_eq!(unknown, wrong);
        assert_eq!(unknown, LoginError::Credential(DomainError::CredentialInvalid));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[test]
    fn empty_candidate_is_rejected() {
        let user = john();
        let err = authenticate(Some(&user), "", &issuer()).unwrap_err();
        assert_eq!(err, LoginError::Credential(DomainError::CredentialInvalid));
    }
}
