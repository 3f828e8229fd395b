//! Authentication ports.

use uuid::Uuid;

use crate::domain::{Claim, Role, User};

/// Claims embedded in session tokens.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub role: Role,
    pub fullname: String,
    pub email: String,
    pub exp: i64,
}

impl TokenClaims {
    /// The part of the claims that authorization decisions run on.
    pub fn claim(&self) -> Claim {
        Claim {
            user_id: self.user_id,
            role: self.role,
        }
    }
}

/// Token service trait for session token operations.
pub trait TokenService: Send + Sync {
    /// Issue a session token carrying the user's identity and role.
    fn issue_token(&self, user: &User) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of issued tokens in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
