//! Fetch-and-decode plumbing shared by the v3 and v4 modules

use crate::config::EndpointConfig;
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::transport::{HttpClient, fetch};
use crate::version::{Document, MetadataVersion};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Decode a response body as one version's document shape.
///
/// Unknown fields are ignored and missing fields fall back to their defaults;
/// only a body that is not a JSON document of the right grammar fails.
pub(crate) fn decode<T>(version: MetadataVersion, document: Document, body: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|e| Error::decode(version, document, e))
}

/// Field deserializer that reads an explicit `null` as the type's default.
///
/// The agent is written in Go and serializes nil slices, maps and empty
/// values as `null`; container-level `#[serde(default)]` only covers absent
/// keys.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Fetch one document from the endpoint advertised for `version` and decode it.
///
/// The version's endpoint is checked again here, since callers may pin a
/// version without going through resolution.
pub(crate) async fn fetch_and_decode<T, C>(
    endpoints: &EndpointConfig,
    version: MetadataVersion,
    document: Document,
    ctx: &RequestContext,
    client: &C,
) -> Result<T>
where
    T: DeserializeOwned,
    C: HttpClient + ?Sized,
{
    let base = endpoints
        .uri(version)
        .ok_or(Error::MissingEndpoint {
            version,
            var: version.env_var(),
        })?;

    let url = document.url(base);
    let body = fetch(ctx, client, &url).await?;

    tracing::trace!(%version, %document, bytes = body.len(), "decoding ECS metadata");
    decode(version, document, &body)
}
