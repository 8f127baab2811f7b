//! Password utilities

use argon2::Argon2;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;

/// Generate a new random password
pub fn generate() -> String {
    SaltString::generate(&mut OsRng).to_string()
}

/// Hash a given password into a PHC string
pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = Argon2::default();

    let hashed_password = argon2.hash_password(password.as_bytes(), &salt)?;

    Ok(hashed_password.to_string())
}

/// Check if a given string is a usable PHC password hash
pub fn is_valid_hash(hashed_password: &str) -> bool {
    PasswordHash::new(hashed_password).is_ok()
}

/// Verify a given password against a given hash
///
/// An unparsable hash never verifies
pub fn verify(hashed_password: &str, password: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hashed_password) else {
        return false;
    };

    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed_password = hash("verysecret").unwrap();

        assert!(is_valid_hash(&hashed_password));
        assert!(verify(&hashed_password, "verysecret"));
        assert!(!verify(&hashed_password, "notsosecret"));
    }

    #[test]
    fn test_verify_with_garbage_hash() {
        assert!(!is_valid_hash("not-a-hash"));
        assert!(!verify("not-a-hash", "verysecret"));
    }

    #[test]
    fn test_generate() {
        assert_ne!(generate(), generate());
    }
}
