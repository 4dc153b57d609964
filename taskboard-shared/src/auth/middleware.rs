/// Bearer token authentication
///
/// Extracts `Authorization: Bearer <token>`, validates the token and builds
/// the [`AuthContext`] that handlers read from request extensions. The HTTP
/// layer that calls [`authenticate`] decides how failures are rendered.
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap, HeaderValue};
/// use taskboard_shared::auth::jwt::{issue_token, JwtSettings};
/// use taskboard_shared::auth::middleware::authenticate;
/// use uuid::Uuid;
///
/// let settings = JwtSettings::new("your-secret-key-at-least-32-bytes-long");
/// let issued = issue_token(Uuid::new_v4(), "user@example.com", &settings).unwrap();
///
/// let mut headers = HeaderMap::new();
/// let value = format!("Bearer {}", issued.token);
/// headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
///
/// let auth = authenticate(&headers, &settings).unwrap();
/// assert_eq!(auth.email, "user@example.com");
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, JwtError, JwtSettings};

/// Authenticated user, added to request extensions
///
/// Every owner-scoped query takes its owner id from here, never from the
/// request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID (token subject)
    pub user_id: Uuid,

    /// Email claim
    pub email: String,
}

/// Error type for authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Authorization header is not a bearer token
    #[error("{0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("{0}")]
    InvalidToken(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
            JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
            JwtError::InvalidAudience => AuthError::InvalidToken("Invalid audience".to_string()),
            _ => AuthError::InvalidToken("Invalid token".to_string()),
        }
    }
}

/// Validates the bearer token in `headers` and builds the auth context
///
/// # Errors
///
/// - `AuthError::MissingCredentials` if there is no usable Authorization header
/// - `AuthError::InvalidFormat` if the scheme is not `Bearer`
/// - `AuthError::InvalidToken` if validation fails
pub fn authenticate(headers: &HeaderMap, settings: &JwtSettings) -> Result<AuthContext, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    // The auth scheme is case-insensitive (RFC 7235)
    let token = auth_header
        .trim_start()
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
        .map(|(_, token)| token.trim())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, settings).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        AuthError::from(e)
    })?;

    Ok(AuthContext {
        user_id: claims.sub,
        email: claims.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_token, issue_token, Claims};
    use axum::http::HeaderValue;
    use chrono::Duration;

    fn settings() -> JwtSettings {
        JwtSettings::new("test-secret-key-at-least-32-bytes-long")
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_authenticate_valid_token() {
        let user_id = Uuid::new_v4();
        let issued = issue_token(user_id, "a@example.com", &settings()).unwrap();

        let context = authenticate(&bearer(&issued.token), &settings()).unwrap();
        assert_eq!(context.user_id, user_id);
        assert_eq!(context.email, "a@example.com");
    }

    #[test]
    fn test_authenticate_missing_header() {
        let result = authenticate(&HeaderMap::new(), &settings());
        assert!(matches!(result, Err(AuthError::MissingCredentials)));
    }

    #[test]
    fn test_authenticate_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));

        let result = authenticate(&headers, &settings());
        assert!(matches!(result, Err(AuthError::InvalidFormat(_))));
    }

    #[test]
    fn test_authenticate_scheme_ignores_case() {
        let user_id = Uuid::new_v4();
        let issued = issue_token(user_id, "a@example.com", &settings()).unwrap();

        for scheme in ["bearer", "BEARER", "BeArEr"] {
            let mut headers = HeaderMap::new();
            headers.insert(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("{} {}", scheme, issued.token)).unwrap(),
            );

            let context = authenticate(&headers, &settings()).unwrap();
            assert_eq!(context.user_id, user_id);
        }

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer"));
        let result = authenticate(&headers, &settings());
        assert!(matches!(result, Err(AuthError::InvalidFormat(_))));
    }

    #[test]
    fn test_authenticate_expired_token() {
        let claims = Claims::with_expiration(
            Uuid::new_v4(),
            "a@example.com",
            &settings(),
            Duration::minutes(-90),
        );
        let token = create_token(&claims, &settings()).unwrap();

        match authenticate(&bearer(&token), &settings()) {
            Err(AuthError::InvalidToken(msg)) => assert_eq!(msg, "Token expired"),
            other => panic!("expected expired token error, got {:?}", other),
        }
    }
}
