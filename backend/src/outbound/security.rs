//! Argon2id password hashing.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use tracing::warn;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// [`PasswordHasher`] producing argon2id PHC strings with default parameters.
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(err) => {
                warn!(error = %err, "stored password hash is malformed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new()
    }

    #[rstest]
    fn hashes_are_salted_phc_strings(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("admin123").expect("hash");
        let second = hasher.hash("admin123").expect("hash");
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("admin123", true)]
    #[case("admin124", false)]
    #[case("", false)]
    fn verify_accepts_only_the_original(
        hasher: Argon2PasswordHasher,
        #[case] attempt: &str,
        #[case] accepted: bool,
    ) {
        let stored = hasher.hash("admin123").expect("hash");
        assert_eq!(hasher.verify(attempt, &stored), accepted);
    }

    #[rstest]
    fn malformed_hashes_never_verify(hasher: Argon2PasswordHasher) {
        assert!(!hasher.verify("admin123", "admin123"));
    }
}
