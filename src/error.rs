//! Error types for ecs-metadata
//!
//! Every failure is a normal return value. Each variant names the stage that
//! failed (resolve, construct, send, read, decode) so callers can tell them
//! apart without parsing messages.

use crate::version::{Document, MetadataVersion};
use thiserror::Error;

/// Result type alias for ecs-metadata operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ecs-metadata
#[derive(Debug, Error)]
pub enum Error {
    /// Neither endpoint signal is set, so no version can be selected
    #[error(
        "could not resolve ECS metadata endpoint: neither {} nor {} is set",
        MetadataVersion::V4.env_var(),
        MetadataVersion::V3.env_var()
    )]
    NoMetadataAvailable,

    /// A version was requested but its endpoint signal is empty
    #[error("missing metadata uri in environment ({var}) for {version}")]
    MissingEndpoint {
        /// The version whose endpoint was required
        version: MetadataVersion,
        /// The environment variable that should have held the endpoint
        var: &'static str,
    },

    /// The URL could not be turned into a request
    #[error("could not create metadata request for '{url}': {reason}")]
    RequestConstructionFailed {
        /// The URL that failed to parse
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The request could not be sent, or was cancelled while in flight
    #[error("could not send metadata request to '{url}': {reason}")]
    RequestFailed {
        /// The URL that was requested
        url: String,
        /// Transport failure, cancellation or deadline expiry
        reason: String,
    },

    /// The response body could not be fully read
    #[error("could not read metadata response from '{url}': {reason}")]
    ResponseReadFailed {
        /// The URL that was requested
        url: String,
        /// Why the body stream failed
        reason: String,
    },

    /// The response body is not a well-formed document of the expected shape
    #[error("could not decode {document} metadata ({version}): {source}")]
    DecodeFailed {
        /// Schema version the body was decoded as
        version: MetadataVersion,
        /// Which document was being decoded
        document: Document,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Machine-readable code naming the stage that failed
    ///
    /// Stable across releases, suitable for metrics labels or matching in
    /// callers that forward errors over the wire.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::NoMetadataAvailable => "no_metadata_available",
            Error::MissingEndpoint { .. } => "missing_endpoint",
            Error::RequestConstructionFailed { .. } => "request_construction_failed",
            Error::RequestFailed { .. } => "request_failed",
            Error::ResponseReadFailed { .. } => "response_read_failed",
            Error::DecodeFailed { .. } => "decode_failed",
        }
    }

    /// True when the error came from the transport (construct, send or read)
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::RequestConstructionFailed { .. }
                | Error::RequestFailed { .. }
                | Error::ResponseReadFailed { .. }
        )
    }

    pub(crate) fn decode(
        version: MetadataVersion,
        document: Document,
        source: serde_json::Error,
    ) -> Self {
        Error::DecodeFailed {
            version,
            document,
            source,
        }
    }
}
