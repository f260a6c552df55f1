//! Codec trait and implementations for serializing wire values.
//!
//! Browser storage only holds strings, while the auth endpoint speaks
//! JSON over HTTP. Both go through a [`Codec`] so the session store never
//! calls `serde_json` directly and tests can swap the format.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust values to bytes and decode them back.
///
/// `Send + Sync + 'static` because the codec lives inside the session
/// store, which is shared between every observer of a tab.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or do not
    /// match the expected shape.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;

    /// Encodes a value into a storage-friendly string.
    ///
    /// # Errors
    /// Returns `ProtocolError::InvalidMessage` if the codec produced bytes
    /// that are not UTF-8 (binary codecs cannot be stored as text).
    fn encode_to_string<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        let bytes = self.encode(value)?;
        String::from_utf8(bytes)
            .map_err(|e| ProtocolError::InvalidMessage(format!("codec output is not UTF-8: {e}")))
    }

    /// Decodes a value from a string previously produced by
    /// [`encode_to_string`](Self::encode_to_string).
    ///
    /// # Errors
    /// Same as [`decode`](Self::decode).
    fn decode_str<T: DeserializeOwned>(&self, data: &str) -> Result<T, ProtocolError> {
        self.decode(data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// JSON is what the dashboard always stored under the `user` key, so any
/// record written by the web build can be read back here and vice versa.
///
/// ## Example
///
/// ```rust
/// use stride_protocol::{Codec, JsonCodec, UserId, UserRecord};
///
/// let codec = JsonCodec;
/// let user = UserRecord {
///     id: UserId(7),
///     name: "Ana".into(),
///     email: "ana@example.com".into(),
/// };
///
/// let stored = codec.encode_to_string(&user).unwrap();
/// let decoded: UserRecord = codec.decode_str(&stored).unwrap();
/// assert_eq!(user, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{UserId, UserRecord};

    #[test]
    fn test_encode_to_string_produces_plain_json() {
        let user = UserRecord {
            id: UserId(3),
            name: "Bruno".into(),
            email: "bruno@example.com".into(),
        };

        let stored = JsonCodec.encode_to_string(&user).unwrap();

        assert_eq!(
            stored,
            r#"{"id":3,"name":"Bruno","email":"bruno@example.com"}"#
        );
    }

    #[test]
    fn test_decode_str_garbage_returns_decode_error() {
        let result: Result<UserRecord, _> = JsonCodec.decode_str("[object Object]");

        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_str_missing_field_returns_decode_error() {
        let result: Result<UserRecord, _> = JsonCodec.decode_str(r#"{"id":1,"name":"x"}"#);

        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }
}
