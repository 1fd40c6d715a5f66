//! Metadata schema version resolution
//!
//! A task running on Fargate platform 1.4+ or a recent EC2 agent carries both
//! the v3 and the v4 variable. The newer schema always wins.

use crate::config::{ENV_METADATA_URI_V3, ENV_METADATA_URI_V4, EndpointConfig};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Task metadata endpoint schema version
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataVersion {
    /// Task metadata endpoint version 3
    V3,
    /// Task metadata endpoint version 4
    V4,
}

impl MetadataVersion {
    /// Environment variable that advertises this version's endpoint
    #[must_use]
    pub fn env_var(&self) -> &'static str {
        match self {
            MetadataVersion::V3 => ENV_METADATA_URI_V3,
            MetadataVersion::V4 => ENV_METADATA_URI_V4,
        }
    }
}

impl std::fmt::Display for MetadataVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataVersion::V3 => f.write_str("v3"),
            MetadataVersion::V4 => f.write_str("v4"),
        }
    }
}

/// Which metadata document a request is after
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Document {
    /// The task document served at `{base}/task`
    Task,
    /// The container document served at `{base}`
    Container,
}

impl Document {
    /// Full URL of this document under an endpoint base URL
    ///
    /// ```
    /// use ecs_metadata::Document;
    ///
    /// let base = "http://169.254.170.2/v4/abc";
    /// assert_eq!(Document::Task.url(base), "http://169.254.170.2/v4/abc/task");
    /// assert_eq!(Document::Container.url(base), base);
    /// ```
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        match self {
            Document::Task => format!("{}/task", base),
            Document::Container => base.to_string(),
        }
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Document::Task => f.write_str("task"),
            Document::Container => f.write_str("container"),
        }
    }
}

/// The version that governs a request and the base URL to fetch from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    /// Selected schema version
    pub version: MetadataVersion,
    /// Base URL advertised for that version
    pub base_url: String,
}

/// Pick the schema version for one request
///
/// V4 takes precedence whenever its endpoint is non-empty, then V3. With
/// neither set this fails with [`Error::NoMetadataAvailable`].
///
/// # Examples
///
/// ```
/// use ecs_metadata::config::EndpointConfig;
/// use ecs_metadata::{MetadataVersion, resolve};
///
/// let config = EndpointConfig {
///     v3: Some("http://169.254.170.2/v3/abc".to_string()),
///     v4: Some("http://169.254.170.2/v4/abc".to_string()),
/// };
/// let endpoint = resolve(&config).unwrap();
/// assert_eq!(endpoint.version, MetadataVersion::V4);
/// ```
pub fn resolve(config: &EndpointConfig) -> Result<ResolvedEndpoint> {
    for version in [MetadataVersion::V4, MetadataVersion::V3] {
        if let Some(base_url) = config.uri(version) {
            tracing::debug!(%version, base_url, "resolved ECS metadata endpoint");
            return Ok(ResolvedEndpoint {
                version,
                base_url: base_url.to_string(),
            });
        }
    }

    tracing::debug!("no ECS metadata endpoint advertised");
    Err(Error::NoMetadataAvailable)
}

/// True if either endpoint is advertised
///
/// Same check as [`resolve`] without reporting which version. Never fetches.
#[must_use]
pub fn has_metadata(config: &EndpointConfig) -> bool {
    config.uri(MetadataVersion::V4).is_some() || config.uri(MetadataVersion::V3).is_some()
}
