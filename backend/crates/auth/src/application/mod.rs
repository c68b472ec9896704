//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod change_password;
pub mod config;
pub mod delete_user;
pub mod issue_session;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod token;
pub mod users;

// Re-exports
pub use authenticate::{AuthenticateUseCase, AuthenticatedUser};
pub use change_password::ChangePasswordUseCase;
pub use config::AuthConfig;
pub use delete_user::DeleteUserUseCase;
pub use issue_session::IssueSessionUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use refresh::RefreshUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token::TokenCodec;
pub use users::{GetUserUseCase, ListUsersUseCase};
