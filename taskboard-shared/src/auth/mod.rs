/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: PBKDF2-HMAC-SHA256 password hashing and verification
/// - [`jwt`]: JWT token issuance and validation
/// - [`middleware`]: Bearer token extraction and the per-request auth context
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::password::{hash_password, verify_password};
/// use taskboard_shared::auth::jwt::{issue_token, validate_token, JwtSettings};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hashed = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hashed.hash, &hashed.salt)?);
///
/// let settings = JwtSettings::new("a-signing-key-that-is-at-least-32-bytes");
/// let issued = issue_token(Uuid::new_v4(), "user@example.com", &settings)?;
/// let claims = validate_token(&issued.token, &settings)?;
/// assert_eq!(claims.email, "user@example.com");
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
