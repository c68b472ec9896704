//! Cat Profile Value Objects
//!
//! 猫のプロフィール項目（名前・年齢・説明）。
//!
//! ## 不変条件
//! - 名前: 前後の空白を除去後、1〜100文字
//! - 年齢: 0〜100
//! - 説明: 1000文字以内

use serde::Serialize;
use std::fmt;

use crate::error::{CatsError, CatsResult};

pub const NAME_MAX_LENGTH: usize = 100;
pub const AGE_MAX: i32 = 100;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CatName(String);

impl CatName {
    pub fn new(raw: impl AsRef<str>) -> CatsResult<Self> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(CatsError::Validation("name must not be empty".to_string()));
        }
        if trimmed.chars().count() > NAME_MAX_LENGTH {
            return Err(CatsError::Validation(format!(
                "name must be at most {} characters",
                NAME_MAX_LENGTH
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub(crate) fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CatAge(i32);

impl CatAge {
    pub fn new(value: i32) -> CatsResult<Self> {
        if !(0..=AGE_MAX).contains(&value) {
            return Err(CatsError::Validation(format!(
                "age must be between 0 and {}",
                AGE_MAX
            )));
        }
        Ok(Self(value))
    }

    /// Parse a multipart text field
    pub fn parse(raw: &str) -> CatsResult<Self> {
        let value = raw
            .trim()
            .parse::<i32>()
            .map_err(|_| CatsError::Validation("age must be an integer".to_string()))?;
        Self::new(value)
    }

    pub(crate) fn from_db(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CatDescription(String);

impl CatDescription {
    pub fn new(raw: impl Into<String>) -> CatsResult<Self> {
        let raw = raw.into();
        if raw.chars().count() > DESCRIPTION_MAX_LENGTH {
            return Err(CatsError::Validation(format!(
                "description must be at most {} characters",
                DESCRIPTION_MAX_LENGTH
            )));
        }
        Ok(Self(raw))
    }

    pub(crate) fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
