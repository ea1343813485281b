use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use catalog_core::UserId;

/// Access-token claims (transport-agnostic).
///
/// Timestamps are unix seconds, as registered in RFC 7519.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the authenticated user.
    pub sub: UserId,

    /// Issued-at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,
}

impl AccessClaims {
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate the claim time window against `now`.
///
/// Signature verification happens before this, in the token layer.
pub fn validate_claims(claims: &AccessClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(iat: i64, exp: i64) -> AccessClaims {
        AccessClaims {
            sub: UserId::new(),
            iat,
            exp,
        }
    }

    fn at(ts: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(ts, 0).unwrap()
    }

    #[test]
    fn window_is_half_open() {
        let c = claims(1_000, 1_300);
        assert_eq!(validate_claims(&c, at(1_000)), Ok(()));
        assert_eq!(validate_claims(&c, at(1_299)), Ok(()));
        assert_eq!(validate_claims(&c, at(1_300)), Err(TokenValidationError::Expired));
        assert_eq!(validate_claims(&c, at(999)), Err(TokenValidationError::NotYetValid));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let c = claims(1_300, 1_300);
        assert_eq!(
            validate_claims(&c, at(1_300)),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn serializes_registered_claim_names() {
        let c = claims(10, 20);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["sub"], c.sub.to_string());
        assert_eq!(json["iat"], 10);
        assert_eq!(json["exp"], 20);
        assert_eq!(c.expires_at(), Some(at(20)));
    }
}
