//! Response envelope decoding.
//!
//! Every body the API returns, success or failure, wraps its payload in a
//! single top-level `"response"` key.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// The `{"response": T}` wrapper around every payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The wrapped payload
    pub response: T,
}

impl<T> Envelope<T> {
    /// Unwrap the payload.
    pub fn into_inner(self) -> T {
        self.response
    }
}

/// Failure payload: `{"status": {"text": ...}}`.
///
/// All fields default so that an error body missing any of them still
/// decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorPayload {
    /// Status block
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: StatusText,
}

/// The `status` object of a failure payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusText {
    /// Human-readable message
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

/// An explicit `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope shape used when classifying failed responses.
///
/// Unlike [`Envelope`], the `"response"` key itself may be absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusEnvelope {
    /// Failure payload
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: ErrorPayload,
}

/// Decode a complete response body into `T`.
///
/// `T` mirrors the wrapper, usually as `Envelope<Payload>`.
///
/// # Errors
///
/// Returns [`Error::Decode`] with the parser diagnostic when the body is not
/// JSON or does not match `T`.
pub fn decode<T>(body: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|err| Error::Decode(err.to_string()))
}

/// Decode `{"response": T}` and return the inner payload.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_response<T>(body: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    decode::<Envelope<T>>(body).map(Envelope::into_inner)
}
