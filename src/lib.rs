//! # ecs-metadata
//!
//! Client for the Amazon ECS task metadata endpoint.
//!
//! The ECS agent advertises a per-container HTTP endpoint through environment
//! variables: `ECS_CONTAINER_METADATA_URI` for the v3 schema and
//! `ECS_CONTAINER_METADATA_URI_V4` for v4. This crate picks the newest one
//! available, fetches the task or container document and decodes it into
//! typed records.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ecs_metadata::{ContainerMetadata, RequestContext, get_container, has_metadata};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     if !has_metadata() {
//!         println!("not running on ECS");
//!         return Ok(());
//!     }
//!
//!     let client = reqwest::Client::new();
//!     let ctx = RequestContext::new().with_timeout(Duration::from_secs(2));
//!
//!     match get_container(&ctx, &client).await? {
//!         ContainerMetadata::V4(container) => {
//!             println!("{} in {}", container.name, container.labels.ecs_task_arn);
//!         }
//!         ContainerMetadata::V3(container) => {
//!             println!("{} (v3)", container.name);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Any type implementing [`HttpClient`] can carry the request; an
//! implementation for [`reqwest::Client`] is provided.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Endpoint configuration
pub mod config;
/// Cancellation and deadlines
pub mod context;
/// Error types
pub mod error;
/// Version-independent fetchers and tagged results
pub mod metadata;
/// HTTP transport seam
pub mod transport;
/// Task metadata endpoint v3
pub mod v3;
/// Task metadata endpoint v4
pub mod v4;
/// Schema version resolution
pub mod version;

mod decode;

#[cfg(test)]
mod test_helpers;

// Re-export commonly used types
pub use config::EndpointConfig;
pub use context::RequestContext;
pub use error::{Error, Result};
pub use metadata::{
    ContainerMetadata, TaskMetadata, get_container, get_container_with, get_task, get_task_with,
    has_metadata,
};
pub use transport::{HttpClient, RawResponse};
pub use version::{Document, MetadataVersion, ResolvedEndpoint, resolve};
