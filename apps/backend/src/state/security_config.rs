use jsonwebtoken::Algorithm;

use crate::auth::policy::PasswordPolicy;

/// Process-wide security settings: signing secret, token TTL and password
/// policy. Built once at startup and immutable thereafter.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// Access-token TTL in seconds; also returned to clients as `expires_in`
    pub token_ttl_secs: i64,
    /// Password strength policy applied at signup
    pub password_policy: PasswordPolicy,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl_secs: 3600,
            password_policy: PasswordPolicy::default(),
        }
    }

    pub fn with_token_ttl(mut self, token_ttl_secs: i64) -> Self {
        self.token_ttl_secs = token_ttl_secs;
        self
    }

    pub fn with_password_policy(mut self, password_policy: PasswordPolicy) -> Self {
        self.password_policy = password_policy;
        self
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
