//! Port for account and session calls.
//!
//! Session bookkeeping (the token and whether one is held) belongs to the
//! adapter; the controller only asks whether a session exists and, on a
//! forced re-login, tells the adapter to forget it without a network call.

use async_trait::async_trait;

use crate::domain::{ApiResult, LoginCredentials, SignupDetails, User, UserUpdate};

/// Account and session operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Fetch the signed-in account.
    async fn get(&self) -> ApiResult<User>;

    /// Update account attributes and return the stored account.
    async fn put(&self, update: &UserUpdate) -> ApiResult<User>;

    /// Open a session.
    async fn login(&self, credentials: &LoginCredentials) -> ApiResult<()>;

    /// Close the session on the server and locally.
    async fn logout(&self) -> ApiResult<()>;

    /// Create an account and open a session for it.
    async fn signup(&self, details: &SignupDetails) -> ApiResult<User>;

    /// Whether a session token is currently held.
    fn is_authenticated(&self) -> bool;

    /// Drop the local session without contacting the server.
    fn destroy_session(&self);
}
