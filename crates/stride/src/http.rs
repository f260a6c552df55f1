//! HTTP client for the backend's login and sign-up endpoints.

use stride_protocol::{Codec, Credentials, ErrorBody, JsonCodec, LoginResponse, Registration};
use stride_session::{Authenticator, SessionError};

use crate::{DashboardConfig, StrideError};

/// Message used when a rejected login carries no usable `message`.
pub const DEFAULT_AUTH_FAILURE: &str = "invalid email or password";

/// Message used when a rejected sign-up carries no usable `message`.
pub const DEFAULT_REGISTER_FAILURE: &str = "could not create the account";

/// Posts `{email, password}` as JSON and reads back `{access_token, user}`.
///
/// | Response                      | Result                              |
/// |-------------------------------|-------------------------------------|
/// | 2xx with a login body         | `Ok(LoginResponse)`                 |
/// | 2xx with anything else        | `Err(Unreachable)`                  |
/// | non-2xx                       | `Err(AuthFailed(body.message))`     |
/// | connection/transport failure  | `Err(Unreachable)`                  |
///
/// It also creates accounts, see [`register`](Self::register).
#[derive(Debug, Clone)]
pub struct HttpAuthenticator {
    client: reqwest::Client,
    endpoint: String,
    register_endpoint: String,
}

impl HttpAuthenticator {
    /// Logs in at `endpoint` and registers at `{endpoint}/register`, the
    /// production backend's layout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Reuses an existing client (connection pool, timeouts, proxies).
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let register_endpoint = format!("{}/register", endpoint.trim_end_matches('/'));
        Self {
            client,
            endpoint,
            register_endpoint,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.login_url()).register_endpoint(config.register_url())
    }

    /// Overrides the sign-up URL.
    pub fn register_endpoint(mut self, url: impl Into<String>) -> Self {
        self.register_endpoint = url.into();
        self
    }

    /// The URL logins are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Creates an account. Does not sign in.
    ///
    /// # Errors
    /// - [`StrideError::Protocol`]: the confirmation doesn't match the
    ///   password. Nothing is sent.
    /// - [`StrideError::Registration`]: the backend answered non-2xx.
    /// - [`StrideError::Session`] with [`SessionError::Unreachable`]: the
    ///   backend could not be reached.
    pub async fn register(&self, registration: &Registration) -> Result<(), StrideError> {
        registration.validate()?;
        tracing::debug!(
            endpoint = %self.register_endpoint,
            email = %registration.email,
            role = %registration.role,
            "posting registration"
        );

        let response = self
            .client
            .post(&self.register_endpoint)
            .json(registration)
            .send()
            .await
            .map_err(|e| SessionError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(email = %registration.email, "account created");
            return Ok(());
        }

        tracing::info!(%status, "registration rejected");
        Err(StrideError::Registration(
            rejection_message(response, DEFAULT_REGISTER_FAILURE).await,
        ))
    }
}

impl Authenticator for HttpAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginResponse, SessionError> {
        tracing::debug!(endpoint = %self.endpoint, email = %credentials.email, "posting login");

        let response = self
            .client
            .post(&self.endpoint)
            .json(credentials)
            .send()
            .await
            .map_err(|e| SessionError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<LoginResponse>()
                .await
                .map_err(|e| SessionError::Unreachable(format!("malformed login response: {e}")));
        }

        tracing::info!(%status, "login rejected");
        Err(SessionError::AuthFailed(
            rejection_message(response, DEFAULT_AUTH_FAILURE).await,
        ))
    }
}

/// The backend's `message`, or `fallback`. The body is only a hint: HTML
/// error pages and empty bodies get the fallback.
async fn rejection_message(response: reqwest::Response, fallback: &str) -> String {
    let body = response.text().await.unwrap_or_default();
    JsonCodec
        .decode_str::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
