use std::sync::LazyLock;

use argon2::{
    password_hash::{
        rand_core::OsRng,
        Error::{self, Password},
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};

use crate::config::PasswordPolicyConfig;

/// Hashes the password with Argon2 and a fresh salt, returning the PHC string.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Checks a password against a PHC string produced by [`hash_password`].
pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed_hash = PasswordHash::new(hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Compared against when no account matches a login, so both paths do the
/// same argon2 work.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("no-such-account-password").ok());

/// Runs a full verification against a throwaway hash. Always `false`.
pub fn verify_dummy_password(password: &str) -> bool {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
    false
}

/// Returns the first policy rule the password breaks, as a user-facing message.
pub fn check_strength(policy: &PasswordPolicyConfig, password: &str) -> Result<(), String> {
    if password.chars().count() < policy.min_length {
        return Err(format!(
            "Password must be at least {} characters long",
            policy.min_length
        ));
    }
    if policy.require_letter && !password.chars().any(char::is_alphabetic) {
        return Err("Password must contain at least one letter".to_owned());
    }
    if policy.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit".to_owned());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let hash = hash_password("Secret123!").expect("Failed to hash password");

        assert!(verify_password("Secret123!", &hash).expect("Failed to verify password"));
        assert!(!verify_password("secret123!", &hash).expect("Failed to verify password"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let first = hash_password("same_password1").unwrap();
        let second = hash_password("same_password1").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same_password1", &second).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("whatever", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_dummy_verification_hashes_and_never_matches() {
        let hash = DUMMY_HASH.as_deref().expect("Dummy hash should be computed");

        assert!(PasswordHash::new(hash).is_ok());
        assert!(!verify_dummy_password("no-such-account-password"));
        assert!(!verify_dummy_password("Secret123!"));
    }

    #[test]
    fn test_strength_policy() {
        let policy = PasswordPolicyConfig::default();

        assert!(check_strength(&policy, "Secret123!").is_ok());
        assert!(check_strength(&policy, "Sh0rt").unwrap_err().contains("at least 8"));
        assert!(check_strength(&policy, "12345678").unwrap_err().contains("letter"));
        assert!(check_strength(&policy, "abcdefgh").unwrap_err().contains("digit"));

        let relaxed = PasswordPolicyConfig {
            min_length: 4,
            require_letter: false,
            require_digit: false,
        };
        assert!(check_strength(&relaxed, "abcd").is_ok());
    }
}
