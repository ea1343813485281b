//! Signed, expiring access tokens (HS256 JWT).

use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use catalog_core::UserId;

use crate::claims::{AccessClaims, TokenValidationError, validate_claims};
use crate::user::User;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Secret or TTL unusable; a startup-time misconfiguration.
    #[error("invalid signing configuration: {0}")]
    InvalidSigningConfig(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    /// Bad signature, wrong algorithm, or undecodable payload.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Key material and lifetime used to mint tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningConfig {
    pub secret: Vec<u8>,
    pub ttl_seconds: u64,
}

impl SigningConfig {
    pub fn new(secret: impl Into<Vec<u8>>, ttl_seconds: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_seconds,
        }
    }
}

impl core::fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

/// A freshly minted token together with its key claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub subject: UserId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Token verification seam used by transports.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError>;
}

/// HS256 verifier: signature first, then the claim time window.
#[derive(Clone)]
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by `validate_claims` against the caller's clock.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.key, &self.validation)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

impl core::fmt::Debug for Hs256JwtValidator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256JwtValidator").finish_non_exhaustive()
    }
}

/// Mints access tokens for verified users.
///
/// The signing context is fixed at construction; issuing is a pure function of
/// the user and the clock reading.
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    ttl: Duration,
    validator: Hs256JwtValidator,
}

impl TokenIssuer {
    pub fn new(config: SigningConfig) -> Result<Self, TokenError> {
        if config.secret.is_empty() {
            return Err(TokenError::InvalidSigningConfig("secret must not be empty".into()));
        }
        if config.ttl_seconds == 0 {
            return Err(TokenError::InvalidSigningConfig("ttl must be positive".into()));
        }
        let ttl = i64::try_from(config.ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| TokenError::InvalidSigningConfig("ttl out of range".into()))?;

        Ok(Self {
            key: EncodingKey::from_secret(&config.secret),
            ttl,
            validator: Hs256JwtValidator::new(&config.secret),
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user`, valid from now for the configured TTL.
    pub fn issue(&self, user: &User) -> Result<AccessToken, TokenError> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token with an explicit issuance time.
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<AccessToken, TokenError> {
        let issued_at = now.trunc_subsecs(0);
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Signing("expiry overflows".into()))?;

        let claims = AccessClaims {
            sub: user.id_typed(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(AccessToken {
            token,
            subject: claims.sub,
            issued_at,
            expires_at,
        })
    }

    pub fn validator(&self) -> &Hs256JwtValidator {
        &self.validator
    }
}

impl JwtValidator for TokenIssuer {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError> {
        self.validator.validate(token, now)
    }
}

impl core::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::fast_hasher;

    fn user() -> User {
        User::new_with_hasher(&fast_hasher(), "John Doe", "john@mail.com", "123456").unwrap()
    }

    fn issuer(ttl: u64) -> TokenIssuer {
        TokenIssuer::new(SigningConfig::new("test-secret", ttl)).unwrap()
    }

    #[test]
    fn issued_token_carries_subject_and_expiry() {
        let user = user();
        let issuer = issuer(300);
        let before = Utc::now();

        let token = issuer.issue(&user).unwrap();
        let claims = issuer.validate(&token.token, Utc::now()).unwrap();

        assert_eq!(claims.sub, user.id_typed());
        assert_eq!(token.subject, user.id_typed());
        assert_eq!(claims.exp - claims.iat, 300);

        let expected = before + Duration::seconds(300);
        let drift = (token.expires_at - expected).num_seconds().abs();
        assert!(drift <= 2, "expiry drifted by {drift}s");
    }

    #[test]
    fn issuance_is_deterministic_for_a_fixed_clock() {
        let user = user();
        let issuer = issuer(60);
        let now = Utc::now();

        let a = issuer.issue_at(&user, now).unwrap();
        let b = issuer.issue_at(&user, now).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn expired_token_is_rejected() {
        let user = user();
        let issuer = issuer(60);
        let now = Utc::now();

        let token = issuer.issue_at(&user, now).unwrap();
        let err = issuer
            .validate(&token.token, now + Duration::seconds(61))
            .unwrap_err();
        assert_eq!(err, TokenError::Claims(TokenValidationError::Expired));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let user = user();
        let token = issuer(60).issue(&user).unwrap();

        let other = TokenIssuer::new(SigningConfig::new("other-secret", 60)).unwrap();
        let err = other.validate(&token.token, Utc::now()).unwrap_err();
        assert!(matches!(err, TokenError::InvalidToken(_)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let err = issuer(60).validate("not.a.jwt", Utc::now()).unwrap_err();
        assert!(matches!(err, TokenError::InvalidToken(_)));
    }

    #[test]
    fn invalid_signing_config_fails_fast() {
        assert!(matches!(
            TokenIssuer::new(SigningConfig::new(Vec::new(), 60)),
            Err(TokenError::InvalidSigningConfig(_))
        ));
        assert!(matches!(
            TokenIssuer::new(SigningConfig::new("secret", 0)),
            Err(TokenError::InvalidSigningConfig(_))
        ));
        assert!(matches!(
            TokenIssuer::new(SigningConfig::new("secret", u64::MAX)),
            Err(TokenError::InvalidSigningConfig(_))
        ));
    }

    #[test]
    fn debug_hides_secret() {
        let shown = format!("{:?}", SigningConfig::new("hunter2", 60));
        assert!(!shown.contains("hunter2"));
    }
}
