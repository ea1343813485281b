//! User entity for account registration and login.

use catalog_core::{DomainError, DomainResult, Entity, UserId};

use crate::password::{CredentialHasher, PasswordDigest};

/// User entity.
///
/// # Invariants
/// - `name` and `email` are never empty.
/// - The password is only ever held as a digest; plaintext is dropped during
///   construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    password: PasswordDigest,
}

impl User {
    /// Validate and construct a user, hashing the password with the default profile.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: &str,
    ) -> DomainResult<Self> {
        Self::new_with_hasher(&CredentialHasher::default(), name, email, password)
    }

    /// Validate and construct a user with an explicit hasher.
    pub fn new_with_hasher(
        hasher: &CredentialHasher,
        name: impl Into<String>,
        email: impl Into<String>,
        password: &str,
    ) -> DomainResult<Self> {
        let name = name.into();
        let email = email.into();

        if name.is_empty() {
            return Err(DomainError::NameRequired);
        }
        if email.is_empty() {
            return Err(DomainError::EmailRequired);
        }
        if password.is_empty() {
            return Err(DomainError::PasswordRequired);
        }

        let password = hasher.hash(password)?;

        Ok(Self {
            id: UserId::new(),
            name,
            email,
            password,
        })
    }

    /// Rehydrate a user read back from storage (digest kept as stored).
    pub fn restore(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        password: PasswordDigest,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password,
        }
    }

    /// Compare a candidate plaintext against the stored digest.
    pub fn validate_password(&self, candidate: &str) -> bool {
        self.password.verify(candidate)
    }

    pub fn id_typed(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::fast_hasher;

    fn john() -> User {
        User::new_with_hasher(&fast_hasher(), "John Doe", "john@mail.com", "123456").unwrap()
    }

    #[test]
    fn new_user() {
        let user = john();
        assert!(!user.id().to_string().is_empty());
        assert!(!user.password_digest().as_str().is_empty());
        assert_eq!(user.name(), "John Doe");
        assert_eq!(user.email(), "john@mail.com");
    }

    #[test]
    fn validate_password() {
        let user = john();
        assert!(user.validate_password("123456"));
        assert!(!user.validate_password("1234561"));
        assert_ne!(user.password_digest().as_str(), "123456");
    }

    #[test]
    fn validate_password_is_idempotent() {
        let user = john();
        for candidate in ["123456", "wrong", ""] {
            let first = user.validate_password(candidate);
            let second = user.validate_password(candidate);
            assert_eq!(first, second, "candidate {candidate:?}");
        }
    }

    #[test]
    fn user_with_default_hasher() {
        let user = User::new("Jane", "jane@mail.com", "s3cret").unwrap();
        assert!(user.validate_password("s3cret"));
    }

    #[test]
    fn construction_checks_in_order() {
        let hasher = fast_hasher();
        assert_eq!(
            User::new_with_hasher(&hasher, "", "", "").unwrap_err(),
            DomainError::NameRequired
        );
        assert_eq!(
            User::new_with_hasher(&hasher, "John", "", "").unwrap_err(),
            DomainError::EmailRequired
        );
        assert_eq!(
            User::new_with_hasher(&hasher, "John", "john@mail.com", "").unwrap_err(),
            DomainError::PasswordRequired
        );
    }

    #[test]
    fn restored_user_keeps_digest() {
        let original = john();
        let restored = User::restore(
            original.id_typed(),
            original.name(),
            original.email(),
            PasswordDigest::from_stored(original.password_digest().as_str()),
        );

        assert_eq!(restored, original);
        assert!(restored.validate_password("123456"));
    }

    #[test]
    fn debug_never_shows_digest() {
        let user = john();
        let shown = format!("{user:?}");
        assert!(!shown.contains(user.password_digest().as_str()));
    }
}
