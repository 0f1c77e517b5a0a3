//! Conversion of failed responses into errors.

use crate::envelope::{self, StatusEnvelope};
use crate::Error;

/// The only status code treated as success.
pub const SUCCESS_STATUS: u16 = 200;

/// Turn a non-200 response into an [`Error`].
///
/// The body is decoded as `{"response": {"status": {"text": ...}}}`. If that
/// decode fails, the [`Error::Decode`] is returned as-is so callers can tell an
/// unparseable body apart from an error the server explained.
#[must_use]
pub fn classify(status: u16, body: &[u8]) -> Error {
    match envelope::decode::<Option<StatusEnvelope>>(body) {
        Ok(envelope) => Error::Http {
            status,
            text: envelope
                .unwrap_or_default()
                .response
                .status
                .text
                .trim()
                .to_string(),
        },
        Err(err) => err,
    }
}
