/// Password hashing using PBKDF2-HMAC-SHA256
///
/// Each password gets its own random salt. The derived key and the salt are
/// stored side by side (`users.password_hash`, `users.password_salt`).
///
/// # Parameters
///
/// - **Iterations**: 120 000
/// - **Salt**: 16 bytes from the OS RNG
/// - **Output**: 32-byte derived key
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hashed = hash_password("super_secret_password_123")?;
///
/// assert!(verify_password("super_secret_password_123", &hashed.hash, &hashed.salt)?);
/// assert!(!verify_password("wrong_password", &hashed.hash, &hashed.salt)?);
/// # Ok(())
/// # }
/// ```

use hmac::Hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// PBKDF2 iteration count
pub const ITERATIONS: u32 = 120_000;

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes
pub const HASH_LEN: usize = 32;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Key derivation failed
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Stored salt is unusable
    #[error("Invalid password salt: {0}")]
    InvalidSalt(String),
}

/// A derived password hash together with the salt it was derived with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword {
    /// Derived key (`HASH_LEN` bytes)
    pub hash: Vec<u8>,

    /// Random salt (`SALT_LEN` bytes)
    pub salt: Vec<u8>,
}

fn derive(password: &str, salt: &[u8]) -> Result<[u8; HASH_LEN], PasswordError> {
    let mut out = [0u8; HASH_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, ITERATIONS, &mut out)
        .map_err(|e| PasswordError::HashError(format!("Key derivation failed: {}", e)))?;
    Ok(out)
}

/// Hashes a password with a fresh random salt
///
/// # Errors
///
/// Returns `PasswordError::HashError` if key derivation fails
pub fn hash_password(password: &str) -> Result<HashedPassword, PasswordError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let hash = derive(password, &salt)?;

    Ok(HashedPassword {
        hash: hash.to_vec(),
        salt: salt.to_vec(),
    })
}

/// Verifies a password against a stored hash and salt
///
/// The comparison is constant-time. A stored hash of the wrong length never
/// matches.
///
/// # Returns
///
/// `Ok(true)` if the password matches, `Ok(false)` otherwise
///
/// # Errors
///
/// Returns `PasswordError::InvalidSalt` for an empty salt
pub fn verify_password(
    password: &str,
    stored_hash: &[u8],
    stored_salt: &[u8],
) -> Result<bool, PasswordError> {
    if stored_salt.is_empty() {
        return Err(PasswordError::InvalidSalt("salt is empty".to_string()));
    }

    let attempted = derive(password, stored_salt)?;

    // Slices of different length compare unequal
    Ok(bool::from(attempted.as_slice().ct_eq(stored_hash)))
}
