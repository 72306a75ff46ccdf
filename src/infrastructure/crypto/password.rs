//! Password hashing
//!
//! The directory never stores or logs a plaintext credential; only the
//! bcrypt hash reaches the store.

use bcrypt::{hash, verify, DEFAULT_COST};

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted_and_verifiable() {
        let hashed = hash_password("directory-pw-1").unwrap();

        assert_ne!(hashed, "directory-pw-1");
        assert!(verify_password("directory-pw-1", &hashed).unwrap());
        assert!(!verify_password("directory-pw-2", &hashed).unwrap());
    }
}
