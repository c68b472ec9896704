//! User Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{UserId, login::Login, user_password::UserPassword};

/// Registered user
///
/// The password hash never leaves the auth context; profile responses are
/// built from `id`, `login` and `created_at` only.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub login: Login,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
}
