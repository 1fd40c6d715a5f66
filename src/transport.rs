//! HTTP transport for metadata requests
//!
//! The crate never builds its own HTTP client. Callers hand in anything that
//! implements [`HttpClient`]; `reqwest::Client` works out of the box.

use crate::context::RequestContext;
use crate::error::{Error, Result};
use async_trait::async_trait;
use url::Url;

/// Status and fully drained body of one GET
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code, recorded but never inspected by the decoders
    pub status: u16,
    /// Complete response body
    pub body: Vec<u8>,
}

/// Client capable of issuing a single GET request
///
/// Implementations report send failures as [`Error::RequestFailed`] and body
/// read failures as [`Error::ResponseReadFailed`]. Cancellation is handled by
/// [`fetch`], so implementations do not need to know about
/// [`RequestContext`].
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use ecs_metadata::transport::{HttpClient, RawResponse};
/// use url::Url;
///
/// struct Canned(&'static str);
///
/// #[async_trait]
/// impl HttpClient for Canned {
///     async fn execute_get(&self, _url: Url) -> ecs_metadata::Result<RawResponse> {
///         Ok(RawResponse { status: 200, body: self.0.as_bytes().to_vec() })
///     }
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a GET to `url` and read the whole body into memory
    async fn execute_get(&self, url: Url) -> Result<RawResponse>;
}

#[async_trait]
impl HttpClient for reqwest::Client {
    async fn execute_get(&self, url: Url) -> Result<RawResponse> {
        let url_str = url.to_string();

        let response = self
            .get(url)
            .send()
            .await
            .map_err(|e| Error::RequestFailed {
                url: url_str.clone(),
                reason: describe_reqwest_error(&e),
            })?;

        let status = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::ResponseReadFailed {
                url: url_str,
                reason: describe_reqwest_error(&e),
            })?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn describe_reqwest_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("timed out: {}", e)
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}

/// Perform exactly one GET against `url` and return the raw body
///
/// Fails with [`Error::RequestConstructionFailed`] if `url` does not parse,
/// and with [`Error::RequestFailed`] if the context is cancelled or its
/// deadline passes before the response is complete. The HTTP status is not
/// checked: whatever body comes back is handed to the decoder.
pub async fn fetch<C>(ctx: &RequestContext, client: &C, url: &str) -> Result<Vec<u8>>
where
    C: HttpClient + ?Sized,
{
    let parsed = Url::parse(url).map_err(|e| Error::RequestConstructionFailed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if ctx.is_cancelled() {
        return Err(interrupted(url, "request cancelled"));
    }
    if ctx.is_expired() {
        return Err(interrupted(url, "deadline exceeded"));
    }

    tracing::debug!(url, "requesting ECS metadata");

    let response = tokio::select! {
        biased;
        _ = ctx.cancellation_token().cancelled() => {
            return Err(interrupted(url, "request cancelled"));
        }
        _ = ctx.expired() => {
            return Err(interrupted(url, "deadline exceeded"));
        }
        response = client.execute_get(parsed) => response?,
    };

    tracing::debug!(
        url,
        status = response.status,
        bytes = response.body.len(),
        "received ECS metadata response"
    );

    Ok(response.body)
}

fn interrupted(url: &str, reason: &str) -> Error {
    Error::RequestFailed {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}
