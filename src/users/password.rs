use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Salt and salted hash derived from one plaintext password. The salt is
/// persisted alongside the hash and regenerated whenever the password changes.
#[derive(Debug, Clone)]
pub struct Credential {
    pub salt: String,
    pub hash: String,
}

/// Generates a fresh random salt and hashes `plain` with it.
pub fn derive(plain: &str) -> anyhow::Result<Credential> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(Credential {
        salt: salt.as_str().to_owned(),
        hash,
    })
}

/// Recomputes the hash over `plain` with the salt embedded in `hash` and
/// compares via argon2's constant-time verifier.
pub fn verify(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
