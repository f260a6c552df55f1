//! Authentication hook for the remote login endpoint.
//!
//! The session store never talks to the network. Something else exchanges
//! credentials for a token and only then calls
//! [`SessionStore::login`](crate::SessionStore::login). That something is
//! an [`Authenticator`]: the HTTP client in production, a canned answer in
//! tests.

use stride_protocol::{Credentials, LoginResponse};

use crate::SessionError;

/// Exchanges credentials for an access token and user record.
///
/// # Example
///
/// ```rust
/// use stride_protocol::{Credentials, LoginResponse, UserId, UserRecord};
/// use stride_session::{Authenticator, SessionError};
///
/// /// Accepts one hard-coded account. Only for demos.
/// struct DemoAuthenticator;
///
/// impl Authenticator for DemoAuthenticator {
///     async fn authenticate(
///         &self,
///         credentials: &Credentials,
///     ) -> Result<LoginResponse, SessionError> {
///         if credentials.password != "demo" {
///             return Err(SessionError::AuthFailed("wrong password".into()));
///         }
///         Ok(LoginResponse {
///             access_token: "demo-token".into(),
///             user: UserRecord {
///                 id: UserId(1),
///                 name: "Demo".into(),
///                 email: credentials.email.clone(),
///             },
///         })
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Validates the credentials against the backend.
    ///
    /// # Returns
    /// - `Ok(LoginResponse)`: here is the token and who it belongs to
    /// - `Err(SessionError::AuthFailed)`: wrong email or password
    /// - `Err(SessionError::Unreachable)`: the backend could not answer
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<LoginResponse, SessionError>> + Send;
}
