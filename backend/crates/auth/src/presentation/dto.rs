//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{token::TokenPair, user::User};

// ============================================================================
// Register / Login
// ============================================================================

/// Register and login request
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    pub login: String,
    pub password: String,
}

/// Register and login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: i64,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

// ============================================================================
// Refresh / Logout
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

// ============================================================================
// Users
// ============================================================================

/// Public user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub login: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.value(),
            login: user.login.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
