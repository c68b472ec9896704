//! Unit tests for Auth crate
//! Use cases and router exercised against in-memory fakes.

#[cfg(test)]
mod fakes {
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use chrono::Utc;
    use kernel::error::app_error::{AppError, AppResult};

    use crate::domain::entity::user::User;
    use crate::domain::repository::{TokenStore, UserRepository, UserResourcePurger};
    use crate::domain::value_object::{
        UserId, login::Login, token_kind::TokenKind, user_password::UserPassword,
    };
    use crate::error::{AuthError, AuthResult};

    #[derive(Clone, Default)]
    pub struct InMemoryUsers {
        users: Arc<Mutex<Vec<User>>>,
        pub create_calls: Arc<Mutex<usize>>,
    }

    impl InMemoryUsers {
        pub fn len(&self) -> usize {
            self.users.lock().unwrap().len()
        }
    }

    impl UserRepository for InMemoryUsers {
        async fn create(&self, login: &Login, password_hash: &UserPassword) -> AuthResult<User> {
            *self.create_calls.lock().unwrap() += 1;
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.login == *login) {
                return Err(AuthError::LoginTaken);
            }
            let next_id = users.iter().map(|u| u.id.value()).max().unwrap_or(0) + 1;
            let user = User {
                id: UserId::from_i64(next_id),
                login: login.clone(),
                password_hash: password_hash.clone(),
                created_at: Utc::now(),
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.id == user_id).cloned())
        }

        async fn find_by_login(&self, login: &Login) -> AuthResult<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.login == *login).cloned())
        }

        async fn list(&self) -> AuthResult<Vec<User>> {
            Ok(self.users.lock().unwrap().clone())
        }

        async fn update_password(
            &self,
            user_id: UserId,
            password_hash: &UserPassword,
        ) -> AuthResult<()> {
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or(AuthError::UserNotFound)?;
            user.password_hash = password_hash.clone();
            Ok(())
        }

        async fn delete(&self, user_id: UserId) -> AuthResult<()> {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|u| u.id != user_id);
            if users.len() == before {
                return Err(AuthError::UserNotFound);
            }
            Ok(())
        }
    }

    type TokenSets = HashMap<(UserId, TokenKind), HashSet<String>>;

    #[derive(Clone, Default)]
    pub struct InMemoryTokens {
        sets: Arc<Mutex<TokenSets>>,
    }

    impl InMemoryTokens {
        pub fn count(&self, user_id: UserId, kind: TokenKind) -> usize {
            self.sets
                .lock()
                .unwrap()
                .get(&(user_id, kind))
                .map_or(0, HashSet::len)
        }
    }

    impl TokenStore for InMemoryTokens {
        async fn add(
            &self,
            user_id: UserId,
            kind: TokenKind,
            token: &str,
            _ttl: Duration,
        ) -> AuthResult<()> {
            self.sets
                .lock()
                .unwrap()
                .entry((user_id, kind))
                .or_default()
                .insert(token.to_string());
            Ok(())
        }

        async fn contains(&self, user_id: UserId, kind: TokenKind, token: &str) -> AuthResult<bool> {
            Ok(self
                .sets
                .lock()
                .unwrap()
                .get(&(user_id, kind))
                .is_some_and(|set| set.contains(token)))
        }

        async fn replace(
            &self,
            user_id: UserId,
            kind: TokenKind,
            old: &str,
            new: &str,
            _ttl: Duration,
        ) -> AuthResult<bool> {
            let mut sets = self.sets.lock().unwrap();
            let set = sets.entry((user_id, kind)).or_default();
            if !set.remove(old) {
                return Ok(false);
            }
            set.insert(new.to_string());
            Ok(true)
        }

        async fn remove(&self, user_id: UserId, kind: TokenKind, token: &str) -> AuthResult<()> {
            if let Some(set) = self.sets.lock().unwrap().get_mut(&(user_id, kind)) {
                set.remove(token);
            }
            Ok(())
        }

        async fn remove_all(&self, user_id: UserId) -> AuthResult<()> {
            let mut sets = self.sets.lock().unwrap();
            sets.remove(&(user_id, TokenKind::Access));
            sets.remove(&(user_id, TokenKind::Refresh));
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    pub struct RecordingPurger {
        pub purged: Arc<Mutex<Vec<UserId>>>,
        pub fail: bool,
    }

    impl UserResourcePurger for RecordingPurger {
        async fn purge_user_resources(&self, user_id: UserId) -> AppResult<()> {
            if self.fail {
                return Err(AppError::service_unavailable("object storage unreachable"));
            }
            self.purged.lock().unwrap().push(user_id);
            Ok(())
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use super::fakes::*;
    use crate::application::*;
    use crate::domain::repository::{TokenStore, UserRepository};
    use crate::domain::value_object::{UserId, login::Login, token_kind::TokenKind};
    use crate::error::AuthError;

    struct Harness {
        users: Arc<InMemoryUsers>,
        tokens: Arc<InMemoryTokens>,
        codec: Arc<TokenCodec>,
        config: Arc<AuthConfig>,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_config(AuthConfig::with_random_secret())
        }

        fn with_config(config: AuthConfig) -> Self {
            Self {
                users: Arc::new(InMemoryUsers::default()),
                tokens: Arc::new(InMemoryTokens::default()),
                codec: Arc::new(TokenCodec::new(&config)),
                config: Arc::new(config),
            }
        }

        async fn register(&self, login: &str, password: &str) -> Result<RegisterOutput, AuthError> {
            RegisterUseCase::new(
                self.users.clone(),
                self.tokens.clone(),
                self.codec.clone(),
                self.config.clone(),
            )
            .execute(RegisterInput {
                login: login.to_string(),
                password: password.to_string(),
            })
            .await
        }

        async fn login(&self, login: &str, password: &str) -> Result<LoginOutput, AuthError> {
            LoginUseCase::new(
                self.users.clone(),
                self.tokens.clone(),
                self.codec.clone(),
                self.config.clone(),
            )
            .execute(LoginInput {
                login: login.to_string(),
                password: password.to_string(),
            })
            .await
        }
    }

    #[tokio::test]
    async fn test_register_issues_and_records_refresh_token() {
        let h = Harness::new();
        let out = h.register("alice", "hunter22").await.unwrap();

        assert_eq!(out.user_id.value(), 1);
        assert!(
            h.tokens
                .contains(out.user_id, TokenKind::Refresh, &out.tokens.refresh_token)
                .await
                .unwrap()
        );
        // Access tokens are not tracked by default
        assert_eq!(h.tokens.count(out.user_id, TokenKind::Access), 0);

        let claims = h.codec.parse(&out.tokens.access_token).unwrap();
        assert_eq!(claims.user_id, out.user_id);
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[tokio::test]
    async fn test_register_duplicate_login() {
        let h = Harness::new();
        h.register("alice", "hunter22").await.unwrap();

        let err = h.register("alice", "another1").await.unwrap_err();
        assert!(matches!(err, AuthError::LoginTaken));
        assert_eq!(h.users.len(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_long_password_before_repository() {
        let h = Harness::new();
        let err = h.register("alice", &"a".repeat(72)).await.unwrap_err();

        assert!(matches!(err, AuthError::PasswordValidation(_)));
        assert_eq!(*h.users.create_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_register_rejects_bad_login() {
        let h = Harness::new();
        let err = h.register("a b", "hunter22").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidLogin(_)));
    }

    #[tokio::test]
    async fn test_login_success_and_failures() {
        let h = Harness::new();
        let registered = h.register("alice", "hunter22").await.unwrap();

        let out = h.login("alice", "hunter22").await.unwrap();
        assert_eq!(out.user_id, registered.user_id);
        assert_eq!(h.tokens.count(out.user_id, TokenKind::Refresh), 2);

        let wrong_password = h.login("alice", "hunter23").await.unwrap_err();
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));

        let unknown = h.login("bob", "hunter22").await.unwrap_err();
        assert!(matches!(unknown, AuthError::InvalidCredentials));

        let empty = h.login("alice", "").await.unwrap_err();
        assert!(matches!(empty, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_refresh_rotates_and_old_token_dies() {
        let h = Harness::new();
        let out = h.register("alice", "hunter22").await.unwrap();
        let refresh = RefreshUseCase::new(h.tokens.clone(), h.codec.clone());

        let rotated = refresh.execute(&out.tokens.refresh_token).await.unwrap();
        assert_ne!(rotated.refresh_token, out.tokens.refresh_token);
        assert_eq!(h.tokens.count(out.user_id, TokenKind::Refresh), 1);

        let reuse = refresh.execute(&out.tokens.refresh_token).await.unwrap_err();
        assert!(matches!(reuse, AuthError::TokenRevoked));

        refresh.execute(&rotated.refresh_token).await.unwrap();
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let h = Harness::new();
        let out = h.register("alice", "hunter22").await.unwrap();

        let err = RefreshUseCase::new(h.tokens.clone(), h.codec.clone())
            .execute(&out.tokens.access_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WrongTokenKind));
    }

    #[tokio::test]
    async fn test_concurrent_refresh_single_winner() {
        let h = Harness::new();
        let out = h.register("alice", "hunter22").await.unwrap();

        let first = RefreshUseCase::new(h.tokens.clone(), h.codec.clone());
        let second = RefreshUseCase::new(h.tokens.clone(), h.codec.clone());
        let token = out.tokens.refresh_token.clone();

        let (a, b) = tokio::join!(first.execute(&token), second.execute(&token));

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        assert_eq!(h.tokens.count(out.user_id, TokenKind::Refresh), 1);
    }

    #[tokio::test]
    async fn test_logout_revokes_refresh_token() {
        let h = Harness::new();
        let out = h.register("alice", "hunter22").await.unwrap();

        LogoutUseCase::new(h.tokens.clone())
            .execute(
                out.user_id,
                &out.tokens.refresh_token,
                &out.tokens.access_token,
            )
            .await
            .unwrap();

        let err = RefreshUseCase::new(h.tokens.clone(), h.codec.clone())
            .execute(&out.tokens.refresh_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::TokenRevoked));
    }

    #[tokio::test]
    async fn test_authenticate_without_tracking() {
        let h = Harness::new();
        let out = h.register("alice", "hunter22").await.unwrap();
        let auth = AuthenticateUseCase::new(h.tokens.clone(), h.codec.clone());

        let user = auth.execute(&out.tokens.access_token).await.unwrap();
        assert_eq!(user.user_id, out.user_id);

        let err = auth.execute(&out.tokens.refresh_token).await.unwrap_err();
        assert!(matches!(err, AuthError::WrongTokenKind));

        let err = auth.execute("not-a-jwt").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_authenticate_with_tracking_honours_logout() {
        let h = Harness::with_config(AuthConfig {
            track_access_tokens: true,
            ..AuthConfig::with_random_secret()
        });
        let out = h.register("alice", "hunter22").await.unwrap();
        let auth = AuthenticateUseCase::new(h.tokens.clone(), h.codec.clone());

        auth.execute(&out.tokens.access_token).await.unwrap();

        LogoutUseCase::new(h.tokens.clone())
            .execute(
                out.user_id,
                &out.tokens.refresh_token,
                &out.tokens.access_token,
            )
            .await
            .unwrap();

        let err = auth.execute(&out.tokens.access_token).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenRevoked));
    }

    #[tokio::test]
    async fn test_change_password() {
        let h = Harness::new();
        let out = h.register("alice", "hunter22").await.unwrap();

        ChangePasswordUseCase::new(h.users.clone(), h.config.clone())
            .execute(out.user_id, "correct-horse".to_string())
            .await
            .unwrap();

        assert!(matches!(
            h.login("alice", "hunter22").await.unwrap_err(),
            AuthError::InvalidCredentials
        ));
        h.login("alice", "correct-horse").await.unwrap();

        let err = ChangePasswordUseCase::new(h.users.clone(), h.config.clone())
            .execute(out.user_id, String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordValidation(_)));
    }

    #[tokio::test]
    async fn test_get_and_list_users() {
        let h = Harness::new();
        let alice = h.register("alice", "hunter22").await.unwrap();
        h.register("bob", "hunter22").await.unwrap();

        let user = GetUserUseCase::new(h.users.clone())
            .execute(alice.user_id)
            .await
            .unwrap();
        assert_eq!(user.login.as_str(), "alice");

        let missing = GetUserUseCase::new(h.users.clone())
            .execute(UserId::from_i64(99))
            .await
            .unwrap_err();
        assert!(matches!(missing, AuthError::UserNotFound));

        let all = ListUsersUseCase::new(h.users.clone()).execute().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_user_purges_then_deletes() {
        let h = Harness::new();
        let out = h.register("alice", "hunter22").await.unwrap();
        let purger = Arc::new(RecordingPurger::default());

        DeleteUserUseCase::new(h.users.clone(), h.tokens.clone(), purger.clone())
            .execute(out.user_id)
            .await
            .unwrap();

        assert_eq!(*purger.purged.lock().unwrap(), vec![out.user_id]);
        assert_eq!(h.users.len(), 0);
        assert_eq!(h.tokens.count(out.user_id, TokenKind::Refresh), 0);
        let login = Login::new("alice").unwrap();
        assert!(h.users.find_by_login(&login).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_user_keeps_row_when_purge_fails() {
        let h = Harness::new();
        let out = h.register("alice", "hunter22").await.unwrap();
        let purger = Arc::new(RecordingPurger {
            fail: true,
            ..Default::default()
        });

        let err = DeleteUserUseCase::new(h.users.clone(), h.tokens.clone(), purger)
            .execute(out.user_id)
            .await
            .unwrap_err();

        assert_eq!(err.status_code().as_u16(), 503);
        assert_eq!(h.users.len(), 1);
        assert_eq!(h.tokens.count(out.user_id, TokenKind::Refresh), 1);
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::fakes::*;
    use crate::application::config::AuthConfig;
    use crate::presentation::router::auth_router_generic;

    fn app(config: AuthConfig, purger: RecordingPurger) -> Router {
        Router::new().nest(
            "/api",
            auth_router_generic(
                InMemoryUsers::default(),
                InMemoryTokens::default(),
                purger,
                config,
            ),
        )
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn register(app: &Router, login: &str) -> Value {
        let (status, body) = send(
            app,
            json_request(
                "POST",
                "/api/register",
                json!({"login": login, "password": "hunter22"}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn test_register_and_me() {
        let app = app(AuthConfig::with_random_secret(), RecordingPurger::default());
        let body = register(&app, "alice").await;

        assert_eq!(body["id"], 1);
        let access = body["access_token"].as_str().unwrap();
        assert!(body["refresh_token"].is_string());

        let (status, me) = send(&app, get("/api/auth/user/me", Some(access))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["login"], "alice");
        assert!(me.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_register_conflict_and_bad_body() {
        let app = app(AuthConfig::with_random_secret(), RecordingPurger::default());
        register(&app, "alice").await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/register",
                json!({"login": "alice", "password": "hunter22"}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "login already exists");

        let (status, body) = send(
            &app,
            json_request("POST", "/api/register", json!({"login": "bob"}), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("invalid input"));
    }

    #[tokio::test]
    async fn test_protected_routes_require_bearer() {
        let app = app(AuthConfig::with_random_secret(), RecordingPurger::default());

        let (status, body) = send(&app, get("/api/auth/user/me", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Authorization header required");

        let req = Request::builder()
            .uri("/api/auth/user/all")
            .header(header::AUTHORIZATION, "Token abc")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid authorization header format");

        let (status, _) = send(&app, get("/api/auth/user/me", Some("garbage"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh_token_cannot_authenticate() {
        let app = app(AuthConfig::with_random_secret(), RecordingPurger::default());
        let body = register(&app, "alice").await;
        let refresh = body["refresh_token"].as_str().unwrap();

        let (status, body) = send(&app, get("/api/auth/user/me", Some(refresh))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid token type");
    }

    #[tokio::test]
    async fn test_get_user_by_id() {
        let app = app(AuthConfig::with_random_secret(), RecordingPurger::default());
        let body = register(&app, "alice").await;
        let access = body["access_token"].as_str().unwrap();

        let (status, user) = send(&app, get("/api/auth/user/id/1", Some(access))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(user["login"], "alice");

        let (status, _) = send(&app, get("/api/auth/user/id/abc", Some(access))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, get("/api/auth/user/id/0", Some(access))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, get("/api/auth/user/id/42", Some(access))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "user not found");
    }

    #[tokio::test]
    async fn test_refresh_and_logout_flow() {
        let app = app(AuthConfig::with_random_secret(), RecordingPurger::default());
        let body = register(&app, "alice").await;
        let refresh = body["refresh_token"].as_str().unwrap().to_string();

        let (status, pair) = send(
            &app,
            json_request(
                "POST",
                "/api/refresh",
                json!({"refresh_token": refresh}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let new_access = pair["access_token"].as_str().unwrap().to_string();
        let new_refresh = pair["refresh_token"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/refresh",
                json!({"refresh_token": refresh}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "token does not exist");

        let (status, _) = send(
            &app,
            json_request(
                "DELETE",
                "/api/auth/logout",
                json!({"refresh_token": new_refresh}),
                Some(&new_access),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/refresh",
                json!({"refresh_token": new_refresh}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_delete_account_with_tracking() {
        let purger = RecordingPurger::default();
        let config = AuthConfig {
            track_access_tokens: true,
            ..AuthConfig::with_random_secret()
        };
        let app = app(config, purger.clone());
        let body = register(&app, "alice").await;
        let access = body["access_token"].as_str().unwrap().to_string();

        let req = Request::builder()
            .method("DELETE")
            .uri("/api/auth/user/delete")
            .header(header::AUTHORIZATION, format!("Bearer {}", access))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(purger.purged.lock().unwrap().len(), 1);

        let (status, _) = send(&app, get("/api/auth/user/me", Some(&access))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/login",
                json!({"login": "alice", "password": "hunter22"}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_change_password_route() {
        let app = app(AuthConfig::with_random_secret(), RecordingPurger::default());
        let body = register(&app, "alice").await;
        let access = body["access_token"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            json_request(
                "PATCH",
                "/api/auth/user/password",
                json!({"password": "correct-horse"}),
                Some(&access),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/login",
                json!({"login": "alice", "password": "correct-horse"}),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
    }
}
