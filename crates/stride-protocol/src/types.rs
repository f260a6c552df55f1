//! Core wire types.
//!
//! Everything here is either sent to / received from the remote auth
//! endpoint, or serialized into a storage scope next to the token.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Identifier of a dashboard user, as assigned by the backend.
///
/// Newtype over `u64` so it can't be confused with athlete or plan ids,
/// which the backend also hands out as plain integers. Serialized as the
/// bare number (`#[serde(transparent)]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// The user record stored next to the token.
///
/// The record may lag behind the token or be missing entirely. Only the
/// token decides whether a session is authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Auth endpoint bodies
// ---------------------------------------------------------------------------

/// Login request body: `{"email": ..., "password": ...}`.
///
/// `Debug` is implemented by hand so passwords never end up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Creates credentials from anything string-like.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login response: `{"access_token": ..., "user": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserRecord,
}

impl LoginResponse {
    /// Checks protocol-level rules that serde can't express.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] if the token is empty. An
    /// empty token would be stored and then read back as "logged out".
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.access_token.is_empty() {
            return Err(ProtocolError::InvalidMessage(
                "login response carried an empty access_token".into(),
            ));
        }
        Ok(())
    }
}

/// Sign-up request body for the register endpoint.
///
/// Field names match the backend (`password_confirmation`). New accounts
/// default to the athlete role, `"aluno"`. Passwords are redacted from
/// `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub role: String,
}

impl Registration {
    /// Role given to accounts created from the sign-up form.
    pub const DEFAULT_ROLE: &'static str = "aluno";

    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        password_confirmation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            password_confirmation: password_confirmation.into(),
            role: Self::DEFAULT_ROLE.to_string(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Checks the form before anything is sent.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] when the confirmation does
    /// not match the password.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.password != self.password_confirmation {
            return Err(ProtocolError::InvalidMessage(
                "password confirmation does not match".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("password_confirmation", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Error body returned by the backend on a failed request.
///
/// Every field is optional: the backend sometimes answers with an HTML page
/// or an empty body, in which case callers fall back to a generic message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> UserRecord {
        UserRecord {
            id: UserId(1),
            name: "Ana".into(),
            email: "ana@example.com".into(),
        }
    }

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId(42).to_string(), "U-42");
    }

    #[test]
    fn test_user_id_serializes_as_bare_number() {
        let json = serde_json::to_value(UserId(9)).unwrap();
        assert_eq!(json, serde_json::json!(9));
    }

    #[test]
    fn test_credentials_json_format() {
        let creds = Credentials::new("ana@example.com", "s3cret");
        let json = serde_json::to_value(&creds).unwrap();

        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["password"], "s3cret");
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("ana@example.com", "s3cret");
        let printed = format!("{creds:?}");

        assert!(printed.contains("ana@example.com"));
        assert!(!printed.contains("s3cret"));
    }

    #[test]
    fn test_registration_json_uses_backend_field_names() {
        let reg = Registration::new("Ana", "ana@example.com", "pw", "pw");
        let json = serde_json::to_value(&reg).unwrap();

        assert_eq!(json["password_confirmation"], "pw");
        assert_eq!(json["role"], "aluno");
        assert!(reg.validate().is_ok());

        let coach = reg.with_role("treinador");
        assert_eq!(coach.role, "treinador");
    }

    #[test]
    fn test_registration_validate_rejects_mismatched_confirmation() {
        let reg = Registration::new("Ana", "ana@example.com", "pw", "pW");

        assert!(matches!(reg.validate(), Err(ProtocolError::InvalidMessage(_))));
    }

    #[test]
    fn test_registration_debug_redacts_passwords() {
        let reg = Registration::new("Ana", "ana@example.com", "s3cret", "s3cret");

        assert!(!format!("{reg:?}").contains("s3cret"));
    }

    #[test]
    fn test_login_response_parses_backend_shape() {
        let body = r#"{
            "access_token": "abc123",
            "user": {"id": 1, "name": "Ana", "email": "ana@example.com"}
        }"#;

        let resp: LoginResponse = serde_json::from_str(body).unwrap();

        assert_eq!(resp.access_token, "abc123");
        assert_eq!(resp.user, ana());
    }

    #[test]
    fn test_login_response_validate_rejects_empty_token() {
        let resp = LoginResponse {
            access_token: String::new(),
            user: ana(),
        };

        assert!(matches!(
            resp.validate(),
            Err(ProtocolError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_error_body_tolerates_missing_message() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message, None);

        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"Credenciais inválidas"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Credenciais inválidas"));
    }
}
