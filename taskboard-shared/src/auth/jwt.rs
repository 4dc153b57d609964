/// JWT token issuance and validation
///
/// Tokens are signed with HS256 (HMAC-SHA256) and carry the user id and email.
///
/// # Validation
///
/// Every protected request checks:
/// - Signature
/// - Issuer and audience
/// - Expiration (`exp`) and not-before (`nbf`)
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::{issue_token, validate_token, JwtSettings};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = JwtSettings::new("your-secret-key-at-least-32-bytes-long");
/// let user_id = Uuid::new_v4();
///
/// let issued = issue_token(user_id, "user@example.com", &settings)?;
/// let claims = validate_token(&issued.token, &settings)?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default token issuer
pub const DEFAULT_ISSUER: &str = "taskboard-api";

/// Default token audience
pub const DEFAULT_AUDIENCE: &str = "taskboard-web";

/// Default token lifetime in minutes
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 60;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Issuer did not match
    #[error("Invalid issuer")]
    InvalidIssuer,

    /// Audience did not match
    #[error("Invalid audience")]
    InvalidAudience,
}

/// Signing key and claim expectations shared by issuance and validation
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtSettings {
    /// HMAC signing key
    ///
    /// Should be at least 32 bytes. Generate with: `openssl rand -hex 32`
    pub key: String,

    /// Value written to and required in `iss`
    pub issuer: String,

    /// Value written to and required in `aud`
    pub audience: String,

    /// Token lifetime in minutes
    pub expiration_minutes: i64,
}

impl JwtSettings {
    /// Creates settings with the default issuer, audience and lifetime
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
        }
    }

    /// Token lifetime as a duration
    pub fn lifetime(&self) -> Duration {
        Duration::minutes(self.expiration_minutes)
    }
}

// The signing key never goes to logs.
impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

/// JWT claims
///
/// # Standard Claims
///
/// - `sub`: Subject (user ID)
/// - `iss`: Issuer
/// - `aud`: Audience
/// - `iat`: Issued at timestamp
/// - `nbf`: Not before timestamp
/// - `exp`: Expiration timestamp
///
/// # Custom Claims
///
/// - `email`: The user's normalized email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - User ID
    pub sub: Uuid,

    /// User email (custom claim)
    pub email: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims expiring after the configured lifetime
    pub fn new(user_id: Uuid, email: &str, settings: &JwtSettings) -> Self {
        Self::with_expiration(user_id, email, settings, settings.lifetime())
    }

    /// Creates claims with a custom lifetime
    ///
    /// A negative duration produces already-expired claims, which is handy in
    /// tests.
    pub fn with_expiration(
        user_id: Uuid,
        email: &str,
        settings: &JwtSettings,
        expires_in: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            email: email.to_string(),
            iss: settings.issuer.clone(),
            aud: settings.audience.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Expiration as a UTC timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// A signed token together with its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWS string
    pub token: String,

    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Signs claims with HS256
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails
pub fn create_token(claims: &Claims, settings: &JwtSettings) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(settings.key.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Issues a token for a user with the configured lifetime
pub fn issue_token(
    user_id: Uuid,
    email: &str,
    settings: &JwtSettings,
) -> Result<IssuedToken, JwtError> {
    let claims = Claims::new(user_id, email, settings);
    let token = create_token(&claims, settings)?;

    Ok(IssuedToken {
        token,
        expires_at: claims.expires_at(),
    })
}

/// Validates a token and extracts its claims
///
/// # Errors
///
/// - `JwtError::Expired` if `exp` has passed
/// - `JwtError::InvalidIssuer` / `JwtError::InvalidAudience` on claim mismatch
/// - `JwtError::ValidationError` for bad signatures and malformed tokens
pub fn validate_token(token: &str, settings: &JwtSettings) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(settings.key.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[settings.issuer.as_str()]);
    validation.set_audience(&[settings.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => JwtError::Expired,
        ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        ErrorKind::InvalidAudience => JwtError::InvalidAudience,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
