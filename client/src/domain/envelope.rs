//! Uniform result envelope for every cross-boundary call.
//!
//! Every remote call and every resource operation resolves to an
//! [`Envelope`]: either a success carrying the payload, or a failure carrying
//! a human-readable message. The two-variant shape makes the core invariant —
//! a success always has data, a failure never does — hold by construction
//! rather than by convention.

use serde::{Deserialize, Serialize};

/// Wire-shape violations caught while decoding an envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeShapeError {
    /// The document claimed success but carried no `data` field.
    #[error("success envelope carries no data payload")]
    MissingData,
}

/// Outcome of a remote call or resource operation.
///
/// Serialises to and from the wire shape
/// `{ "success": bool, "data"?: T, "error"?: string }`. Decoding a document
/// that claims success without a payload fails with
/// [`EnvelopeShapeError::MissingData`]; a failure document that carries stray
/// data keeps only the error message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "EnvelopeDto<T>")]
pub enum Envelope<T> {
    /// The operation produced a payload.
    Success(T),
    /// The operation failed; the message is suitable for display.
    Failure(String),
}

impl<T> Envelope<T> {
    /// Wrap a payload in a success envelope.
    pub fn success(data: T) -> Self {
        Self::Success(data)
    }

    /// Build a failure envelope from a display message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    /// Whether this envelope carries a payload.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Borrow the payload, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Borrow the failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message.as_str()),
        }
    }

    /// Consume the envelope, yielding the payload if present.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct WireEnvelope<'a, T> {
            success: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            data: Option<&'a T>,
            #[serde(skip_serializing_if = "Option::is_none")]
            error: Option<&'a str>,
        }

        let wire = match self {
            Self::Success(data) => WireEnvelope {
                success: true,
                data: Some(data),
                error: None,
            },
            Self::Failure(message) => WireEnvelope {
                success: false,
                data: None,
                error: Some(message),
            },
        };
        wire.serialize(serializer)
    }
}

#[derive(Debug, Deserialize)]
struct EnvelopeDto<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T> TryFrom<EnvelopeDto<T>> for Envelope<T> {
    type Error = EnvelopeShapeError;

    fn try_from(value: EnvelopeDto<T>) -> Result<Self, Self::Error> {
        let EnvelopeDto {
            success,
            data,
            error,
        } = value;
        if success {
            data.map(Envelope::Success)
                .ok_or(EnvelopeShapeError::MissingData)
        } else {
            Ok(Envelope::Failure(
                error.unwrap_or_else(|| "request failed".to_owned()),
            ))
        }
    }
}
