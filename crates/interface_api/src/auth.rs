//! Session tokens
//!
//! Sessions are HS256 JWTs carrying the user id and role. The role in the
//! token is what the gate sees for the lifetime of the token.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind as JwtErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::UserId;
use domain_identity::{Caller, Role};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// `"owner"` or `"admin"`
    pub role: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Creates a session token
pub fn create_token(
    user_id: UserId,
    role: Role,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = SessionClaims {
        sub: user_id.to_string(),
        role: role.as_str().to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Signing(e.to_string()))
}

/// Validates a session token and resolves the caller it identifies
///
/// Tokens with an unknown role or a malformed subject are invalid.
pub fn validate_token(token: &str, secret: &str) -> Result<Caller, AuthError> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        JwtErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    let claims = token_data.claims;
    let user_id = claims.sub.parse::<UserId>().map_err(|_| AuthError::InvalidToken)?;
    let role = claims.role.parse::<Role>().map_err(|_| AuthError::InvalidToken)?;

    Ok(Caller::authenticated(user_id, role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_resolves_caller() {
        let user_id = UserId::new_v7();
        let token = create_token(user_id, Role::Admin, SECRET, 60).unwrap();

        let caller = validate_token(&token, SECRET).unwrap();
        assert_eq!(caller, Caller::authenticated(user_id, Role::Admin));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = create_token(UserId::new(), Role::Owner, SECRET, 60).unwrap();
        assert!(matches!(validate_token(&token, "other"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: UserId::new().to_string(),
            role: "owner".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();

        assert!(matches!(validate_token(&token, SECRET), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: UserId::new().to_string(),
            role: "superuser".to_string(),
            exp: now + 3600,
            iat: now,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();

        assert!(matches!(validate_token(&token, SECRET), Err(AuthError::InvalidToken)));
    }

    proptest! {
        #[test]
        fn arbitrary_strings_never_authenticate(token in "[A-Za-z0-9_.-]{0,200}") {
            prop_assert!(validate_token(&token, SECRET).is_err());
        }

        #[test]
        fn tampered_signature_is_rejected(index in 0usize..40, replacement in "[A-Za-z0-9]") {
            let token = create_token(UserId::new_v7(), Role::Owner, SECRET, 60).unwrap();
            let signature_start = token.rfind('.').unwrap() + 1;
            // The final character carries padding bits, so leave it alone
            let position = signature_start + index % (token.len() - signature_start - 1);
            prop_assume!(token[position..position + 1] != replacement);

            let mut tampered = token.clone();
            tampered.replace_range(position..position + 1, &replacement);
            prop_assert!(validate_token(&tampered, SECRET).is_err());
        }
    }
}
