use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Claims included in our backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's email
    pub sub: String,
    /// Internal user identifier
    pub user_id: Uuid,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Uniform rejection for any bad bearer token. Callers cannot tell
/// malformed, tampered and expired tokens apart from this value; the
/// rejection reason is recorded in logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidToken;

impl fmt::Display for InvalidToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid or expired token")
    }
}

impl std::error::Error for InvalidToken {}

/// Mint an HS256 JWT access token with the configured TTL.
pub fn mint_access_token(
    email: &str,
    user_id: Uuid,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let exp = iat + security.token_ttl_secs;

    let claims = Claims {
        sub: email.to_string(),
        user_id,
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a JWT and return its claims.
///
/// Checks structure, signature and expiry; every failure collapses into
/// `InvalidToken`. Claims must only be read off the returned value.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, InvalidToken> {
    // Default Validation already checks exp; pin algorithm to configured algorithm.
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(reason = ?e.kind(), "rejected bearer token");
        InvalidToken
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use uuid::Uuid;

    use super::{mint_access_token, verify_access_token, InvalidToken};
    use crate::state::security_config::SecurityConfig;

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let security = SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes());

        let email = "test@example.com";
        let user_id = Uuid::new_v4();
        let now = SystemTime::now();

        let token = mint_access_token(email, user_id, now, &security).unwrap();
        let claims = verify_access_token(&token, &security).unwrap();

        assert_eq!(claims.sub, email);
        assert_eq!(claims.user_id, user_id);
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(claims.exp, claims.iat + security.token_ttl_secs);
    }

    #[test]
    fn test_expired_token() {
        let security = SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes());

        // Minted two TTLs ago, so well past expiry
        let past = SystemTime::now()
            - Duration::from_secs(2 * security.token_ttl_secs as u64);

        let token = mint_access_token("test@example.com", Uuid::new_v4(), past, &security).unwrap();
        let result = verify_access_token(&token, &security);

        assert_eq!(result.unwrap_err(), InvalidToken);
    }

    #[test]
    fn test_bad_signature() {
        // Mint with secret A, verify with secret B
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let security_b = SecurityConfig::new("secret-B".as_bytes());

        let token =
            mint_access_token("test@example.com", Uuid::new_v4(), SystemTime::now(), &security_a)
                .unwrap();

        assert_eq!(verify_access_token(&token, &security_b).unwrap_err(), InvalidToken);
    }

    #[test]
    fn test_tampered_token() {
        let security = SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes());

        let token =
            mint_access_token("test@example.com", Uuid::new_v4(), SystemTime::now(), &security)
                .unwrap();

        // Flip one character in the payload segment
        let mut tampered: Vec<char> = token.chars().collect();
        let mid = token.len() / 2;
        tampered[mid] = if tampered[mid] == 'A' { 'B' } else { 'A' };
        let tampered: String = tampered.into_iter().collect();

        assert!(verify_access_token(&tampered, &security).is_err());
    }

    #[test]
    fn test_malformed_token() {
        let security = SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes());

        // Structural garbage and an empty string both yield the same uniform result
        assert_eq!(
            verify_access_token("not-a-jwt", &security).unwrap_err(),
            InvalidToken
        );
        assert_eq!(verify_access_token("", &security).unwrap_err(), InvalidToken);
    }
}
