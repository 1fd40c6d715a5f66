//! Configuration types for ecs-metadata
//!
//! The ECS agent advertises the metadata endpoint through environment
//! variables. [`EndpointConfig`] is a snapshot of those variables taken at one
//! point in time, so resolution never reads the process environment ad hoc.

use crate::version::MetadataVersion;
use serde::{Deserialize, Serialize};

/// Environment variable holding the task metadata endpoint v3 base URL
pub const ENV_METADATA_URI_V3: &str = "ECS_CONTAINER_METADATA_URI";

/// Environment variable holding the task metadata endpoint v4 base URL
pub const ENV_METADATA_URI_V4: &str = "ECS_CONTAINER_METADATA_URI_V4";

/// Endpoint locations for both metadata schema versions
///
/// An empty string is treated exactly like an absent value.
///
/// # Examples
///
/// ```
/// use ecs_metadata::config::EndpointConfig;
/// use ecs_metadata::MetadataVersion;
///
/// let config = EndpointConfig {
///     v4: Some("http://169.254.170.2/v4/abc".to_string()),
///     ..Default::default()
/// };
/// assert!(config.has_metadata());
/// assert_eq!(config.uri(MetadataVersion::V4), Some("http://169.254.170.2/v4/abc"));
/// assert_eq!(config.uri(MetadataVersion::V3), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL of the v3 endpoint (`ECS_CONTAINER_METADATA_URI`)
    pub v3: Option<String>,

    /// Base URL of the v4 endpoint (`ECS_CONTAINER_METADATA_URI_V4`)
    pub v4: Option<String>,
}

impl EndpointConfig {
    /// Snapshot both endpoint variables from the process environment
    ///
    /// Unset variables count as absent. A value that is not valid unicode
    /// still counts as set and is carried forward lossily, so it fails later
    /// as an unparsable URL instead of changing which version is picked.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| {
            std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
        })
    }

    /// Build a snapshot from an arbitrary environment reader
    ///
    /// ```
    /// use ecs_metadata::config::{EndpointConfig, ENV_METADATA_URI_V3};
    ///
    /// let config = EndpointConfig::from_lookup(|name| {
    ///     (name == ENV_METADATA_URI_V3).then(|| "http://169.254.170.2/v3/abc".to_string())
    /// });
    /// assert_eq!(config.v3.as_deref(), Some("http://169.254.170.2/v3/abc"));
    /// assert!(config.v4.is_none());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            v3: lookup(ENV_METADATA_URI_V3),
            v4: lookup(ENV_METADATA_URI_V4),
        }
    }

    /// The non-empty endpoint for one schema version, if any
    #[must_use]
    pub fn uri(&self, version: MetadataVersion) -> Option<&str> {
        let value = match version {
            MetadataVersion::V3 => self.v3.as_deref(),
            MetadataVersion::V4 => self.v4.as_deref(),
        };
        value.filter(|uri| !uri.is_empty())
    }

    /// True if at least one endpoint is available
    ///
    /// Pure check, no I/O.
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        crate::version::has_metadata(self)
    }
}
