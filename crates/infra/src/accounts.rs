//! User registration and login over a `UserRepository`.
//!
//! Hashing and verification are CPU-bound, so they run on tokio's blocking
//! pool instead of the request worker.

use std::sync::Arc;

use catalog_auth::{AccessToken, CredentialHasher, TokenIssuer, User, authenticate};

use crate::error::ServiceError;
use crate::repository::UserRepository;

#[derive(Debug, Clone)]
pub struct AccountService<U> {
    users: U,
    hasher: CredentialHasher,
    issuer: Arc<TokenIssuer>,
}

impl<U> AccountService<U>
where
    U: UserRepository,
{
    pub fn new(users: U, hasher: CredentialHasher, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            users,
            hasher,
            issuer,
        }
    }

    pub fn issuer(&self) -> &Arc<TokenIssuer> {
        &self.issuer
    }

    /// Validate, hash and store a new account.
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<User, ServiceError> {
        let hasher = self.hasher.clone();
        let user = tokio::task::spawn_blocking(move || {
            User::new_with_hasher(&hasher, name, email, &password)
        })
        .await??;

        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id_typed(), "user registered");
        Ok(user)
    }

    /// Exchange email + password for an access token.
    ///
    /// Unknown email and wrong password both fail with `CredentialInvalid`.
    pub async fn login(&self, email: &str, password: String) -> Result<AccessToken, ServiceError> {
        let found = self.users.find_by_email(email).await?;

        let issuer = Arc::clone(&self.issuer);
        let outcome =
            tokio::task::spawn_blocking(move || authenticate(found.as_ref(), &password, &issuer))
                .await?;

        match outcome {
            Ok(token) => {
                tracing::info!(user_id = %token.subject, "access token issued");
                Ok(token)
            }
            Err(e) => {
                tracing::warn!(error = %e, "login rejected");
                Err(e.into())
            }
        }
    }
}
