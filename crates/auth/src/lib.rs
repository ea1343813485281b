//! `catalog-auth` - credential hashing, user accounts and access tokens.
//!
//! No HTTP or storage in here: every operation is synchronous and free of IO.

pub mod claims;
pub mod login;
pub mod password;
pub mod token;
pub mod user;

pub use claims::{AccessClaims, TokenValidationError, validate_claims};
pub use login::{LoginError, authenticate};
pub use password::{CredentialHasher, PasswordDigest, verify};
pub use token::{AccessToken, Hs256JwtValidator, JwtValidator, SigningConfig, TokenError, TokenIssuer};
pub use user::User;
