//! Version-independent entry points
//!
//! Callers that do not care which schema the agent speaks use these: the
//! endpoint configuration is resolved per call and the result comes back
//! tagged with the version that produced it.

use crate::config::EndpointConfig;
use crate::context::RequestContext;
use crate::error::Result;
use crate::transport::HttpClient;
use crate::v3::{ContainerMetadataV3, TaskMetadataV3};
use crate::v4::{ContainerMetadataV4, TaskMetadataV4};
use crate::version::{MetadataVersion, resolve};
use crate::{v3, v4};

/// Task metadata in whichever schema the endpoint served
#[derive(Clone, Debug, PartialEq)]
pub enum TaskMetadata {
    /// Served by the v3 endpoint
    V3(TaskMetadataV3),
    /// Served by the v4 endpoint
    V4(TaskMetadataV4),
}

impl TaskMetadata {
    /// Schema version of the document
    #[must_use]
    pub fn version(&self) -> MetadataVersion {
        match self {
            TaskMetadata::V3(_) => MetadataVersion::V3,
            TaskMetadata::V4(_) => MetadataVersion::V4,
        }
    }

    /// The v3 document, if that is what was served
    #[must_use]
    pub fn as_v3(&self) -> Option<&TaskMetadataV3> {
        match self {
            TaskMetadata::V3(task) => Some(task),
            TaskMetadata::V4(_) => None,
        }
    }

    /// The v4 document, if that is what was served
    #[must_use]
    pub fn as_v4(&self) -> Option<&TaskMetadataV4> {
        match self {
            TaskMetadata::V4(task) => Some(task),
            TaskMetadata::V3(_) => None,
        }
    }

    /// Take the v3 document, if that is what was served
    #[must_use]
    pub fn into_v3(self) -> Option<TaskMetadataV3> {
        match self {
            TaskMetadata::V3(task) => Some(task),
            TaskMetadata::V4(_) => None,
        }
    }

    /// Take the v4 document, if that is what was served
    #[must_use]
    pub fn into_v4(self) -> Option<TaskMetadataV4> {
        match self {
            TaskMetadata::V4(task) => Some(task),
            TaskMetadata::V3(_) => None,
        }
    }

    /// Task ARN
    #[must_use]
    pub fn task_arn(&self) -> &str {
        match self {
            TaskMetadata::V3(task) => &task.task_arn,
            TaskMetadata::V4(task) => &task.task_arn,
        }
    }

    /// Cluster name or ARN
    #[must_use]
    pub fn cluster(&self) -> &str {
        match self {
            TaskMetadata::V3(task) => &task.cluster,
            TaskMetadata::V4(task) => &task.cluster,
        }
    }

    /// Number of containers in the task
    #[must_use]
    pub fn containers_len(&self) -> usize {
        match self {
            TaskMetadata::V3(task) => task.containers.len(),
            TaskMetadata::V4(task) => task.containers.len(),
        }
    }
}

/// Container metadata in whichever schema the endpoint served
#[derive(Clone, Debug, PartialEq)]
pub enum ContainerMetadata {
    /// Served by the v3 endpoint
    V3(ContainerMetadataV3),
    /// Served by the v4 endpoint
    V4(ContainerMetadataV4),
}

impl ContainerMetadata {
    /// Schema version of the document
    #[must_use]
    pub fn version(&self) -> MetadataVersion {
        match self {
            ContainerMetadata::V3(_) => MetadataVersion::V3,
            ContainerMetadata::V4(_) => MetadataVersion::V4,
        }
    }

    /// The v3 document, if that is what was served
    #[must_use]
    pub fn as_v3(&self) -> Option<&ContainerMetadataV3> {
        match self {
            ContainerMetadata::V3(container) => Some(container),
            ContainerMetadata::V4(_) => None,
        }
    }

    /// The v4 document, if that is what was served
    #[must_use]
    pub fn as_v4(&self) -> Option<&ContainerMetadataV4> {
        match self {
            ContainerMetadata::V4(container) => Some(container),
            ContainerMetadata::V3(_) => None,
        }
    }

    /// Take the v3 document, if that is what was served
    #[must_use]
    pub fn into_v3(self) -> Option<ContainerMetadataV3> {
        match self {
            ContainerMetadata::V3(container) => Some(container),
            ContainerMetadata::V4(_) => None,
        }
    }

    /// Take the v4 document, if that is what was served
    #[must_use]
    pub fn into_v4(self) -> Option<ContainerMetadataV4> {
        match self {
            ContainerMetadata::V4(container) => Some(container),
            ContainerMetadata::V3(_) => None,
        }
    }

    /// Container name from the task definition
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ContainerMetadata::V3(container) => &container.name,
            ContainerMetadata::V4(container) => &container.name,
        }
    }

    /// Docker container ID
    #[must_use]
    pub fn docker_id(&self) -> &str {
        match self {
            ContainerMetadata::V3(container) => &container.docker_id,
            ContainerMetadata::V4(container) => &container.docker_id,
        }
    }
}

impl From<TaskMetadataV3> for TaskMetadata {
    fn from(task: TaskMetadataV3) -> Self {
        TaskMetadata::V3(task)
    }
}

impl From<TaskMetadataV4> for TaskMetadata {
    fn from(task: TaskMetadataV4) -> Self {
        TaskMetadata::V4(task)
    }
}

impl From<ContainerMetadataV3> for ContainerMetadata {
    fn from(container: ContainerMetadataV3) -> Self {
        ContainerMetadata::V3(container)
    }
}

impl From<ContainerMetadataV4> for ContainerMetadata {
    fn from(container: ContainerMetadataV4) -> Self {
        ContainerMetadata::V4(container)
    }
}

/// Fetch metadata for the task this process runs in
///
/// The endpoint variables are read from the process environment on every
/// call. Fails with [`Error::NoMetadataAvailable`](crate::Error::NoMetadataAvailable)
/// outside ECS, without touching the network.
///
/// # Examples
///
/// ```no_run
/// use ecs_metadata::{RequestContext, get_task};
/// use std::time::Duration;
///
/// # async fn run() -> ecs_metadata::Result<()> {
/// let client = reqwest::Client::new();
/// let ctx = RequestContext::new().with_timeout(Duration::from_secs(2));
///
/// let task = get_task(&ctx, &client).await?;
/// println!("{} runs {} containers", task.task_arn(), task.containers_len());
/// # Ok(())
/// # }
/// ```
pub async fn get_task<C>(ctx: &RequestContext, client: &C) -> Result<TaskMetadata>
where
    C: HttpClient + ?Sized,
{
    get_task_with(&EndpointConfig::from_env(), ctx, client).await
}

/// Fetch metadata for the calling container
///
/// Same resolution rules as [`get_task`].
pub async fn get_container<C>(ctx: &RequestContext, client: &C) -> Result<ContainerMetadata>
where
    C: HttpClient + ?Sized,
{
    get_container_with(&EndpointConfig::from_env(), ctx, client).await
}

/// [`get_task`] against an explicit endpoint configuration
pub async fn get_task_with<C>(
    endpoints: &EndpointConfig,
    ctx: &RequestContext,
    client: &C,
) -> Result<TaskMetadata>
where
    C: HttpClient + ?Sized,
{
    let task: TaskMetadata = match resolve(endpoints)?.version {
        MetadataVersion::V4 => v4::get_task(endpoints, ctx, client).await?.into(),
        MetadataVersion::V3 => v3::get_task(endpoints, ctx, client).await?.into(),
    };
    Ok(task)
}

/// [`get_container`] against an explicit endpoint configuration
pub async fn get_container_with<C>(
    endpoints: &EndpointConfig,
    ctx: &RequestContext,
    client: &C,
) -> Result<ContainerMetadata>
where
    C: HttpClient + ?Sized,
{
    let container: ContainerMetadata = match resolve(endpoints)?.version {
        MetadataVersion::V4 => v4::get_container(endpoints, ctx, client).await?.into(),
        MetadataVersion::V3 => v3::get_container(endpoints, ctx, client).await?.into(),
    };
    Ok(container)
}

/// True if this process can see a task metadata endpoint
///
/// Reads the environment only; never fetches.
#[must_use]
pub fn has_metadata() -> bool {
    EndpointConfig::from_env().has_metadata()
}
