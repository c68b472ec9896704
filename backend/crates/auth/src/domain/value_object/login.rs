//! Login Value Object
//!
//! ログイン名はユーザーを一意に識別する文字列。
//!
//! ## 不変条件
//! - 前後の空白は除去される
//! - 長さ: 3〜64文字
//! - 空白文字・制御文字は不可

use serde::Serialize;
use std::fmt;

use crate::error::{AuthError, AuthResult};

pub const LOGIN_MIN_LENGTH: usize = 3;
pub const LOGIN_MAX_LENGTH: usize = 64;

/// Unique account login
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Login(String);

impl Login {
    pub fn new(raw: impl AsRef<str>) -> AuthResult<Self> {
        let trimmed = raw.as_ref().trim();
        let len = trimmed.chars().count();

        if len < LOGIN_MIN_LENGTH || len > LOGIN_MAX_LENGTH {
            return Err(AuthError::InvalidLogin(format!(
                "login must be between {} and {} characters",
                LOGIN_MIN_LENGTH, LOGIN_MAX_LENGTH
            )));
        }

        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(AuthError::InvalidLogin(
                "login must not contain whitespace or control characters".to_string(),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Wrap a value read back from the database
    pub(crate) fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_login() {
        let login = Login::new("  tom_the_cat ").unwrap();
        assert_eq!(login.as_str(), "tom_the_cat");
    }

    #[test]
    fn test_length_bounds() {
        assert!(Login::new("ab").is_err());
        assert!(Login::new("abc").is_ok());
        assert!(Login::new("x".repeat(LOGIN_MAX_LENGTH)).is_ok());
        assert!(Login::new("x".repeat(LOGIN_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert!(Login::new("ねこ猫").is_ok());
    }

    #[test]
    fn test_rejects_inner_whitespace() {
        let err = Login::new("tom cat").unwrap_err();
        assert!(matches!(err, AuthError::InvalidLogin(_)));
        assert!(Login::new("tom\u{0007}cat").is_err());
    }
}
