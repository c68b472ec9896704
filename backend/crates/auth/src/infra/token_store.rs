//! Redis Token Store
//!
//! One Redis set per (user, token kind), keyed `user:{id}:{kind}s`, with
//! a TTL equal to the lifetime of that kind of token.

use std::time::Duration;

use redis::AsyncCommands;
use redis::Script;
use redis::aio::ConnectionManager;

use crate::domain::repository::TokenStore;
use crate::domain::value_object::{UserId, token_kind::TokenKind};
use crate::error::AuthResult;

/// Remove `ARGV[1]`, add `ARGV[2]` and reset the TTL, but only when
/// `ARGV[1]` is still a member. Runs atomically on the server.
const REPLACE_SCRIPT: &str = r#"
if redis.call('SREM', KEYS[1], ARGV[1]) == 0 then
    return 0
end
redis.call('SADD', KEYS[1], ARGV[2])
redis.call('EXPIRE', KEYS[1], ARGV[3])
return 1
"#;

/// Redis-backed token store
///
/// `ConnectionManager` reconnects on its own and is cheap to clone, so
/// every call works on its own handle.
#[derive(Clone)]
pub struct RedisTokenStore {
    conn: ConnectionManager,
    replace_script: Script,
}

impl RedisTokenStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self {
            conn,
            replace_script: Script::new(REPLACE_SCRIPT),
        }
    }

    /// Open a managed connection to `url`
    pub async fn connect(url: &str) -> AuthResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self::new(conn))
    }
}

fn ttl_secs(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX).max(1)
}

impl TokenStore for RedisTokenStore {
    async fn add(
        &self,
        user_id: UserId,
        kind: TokenKind,
        token: &str,
        ttl: Duration,
    ) -> AuthResult<()> {
        let key = kind.store_key(user_id);
        let mut conn = self.conn.clone();

        redis::pipe()
            .atomic()
            .sadd(&key, token)
            .ignore()
            .expire(&key, ttl_secs(ttl))
            .ignore()
            .query_async::<()>(&mut conn)
            .await?;

        Ok(())
    }

    async fn contains(&self, user_id: UserId, kind: TokenKind, token: &str) -> AuthResult<bool> {
        let mut conn = self.conn.clone();
        let is_member: bool = conn.sismember(kind.store_key(user_id), token).await?;
        Ok(is_member)
    }

    async fn replace(
        &self,
        user_id: UserId,
        kind: TokenKind,
        old: &str,
        new: &str,
        ttl: Duration,
    ) -> AuthResult<bool> {
        let mut conn = self.conn.clone();

        let swapped: i32 = self
            .replace_script
            .key(kind.store_key(user_id))
            .arg(old)
            .arg(new)
            .arg(ttl_secs(ttl))
            .invoke_async(&mut conn)
            .await?;

        Ok(swapped == 1)
    }

    async fn remove(&self, user_id: UserId, kind: TokenKind, token: &str) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        let _: i64 = conn.srem(kind.store_key(user_id), token).await?;
        Ok(())
    }

    async fn remove_all(&self, user_id: UserId) -> AuthResult<()> {
        let mut conn = self.conn.clone();
        let _: i64 = conn
            .del(&[
                TokenKind::Access.store_key(user_id),
                TokenKind::Refresh.store_key(user_id),
            ])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_secs_floor() {
        assert_eq!(ttl_secs(Duration::from_millis(10)), 1);
        assert_eq!(ttl_secs(Duration::from_secs(300)), 300);
    }
}
