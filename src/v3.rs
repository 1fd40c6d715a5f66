//! Task metadata endpoint version 3
//!
//! Shapes follow the v3 response documents served by the ECS agent at
//! `${ECS_CONTAINER_METADATA_URI}` (container) and
//! `${ECS_CONTAINER_METADATA_URI}/task` (task).

use crate::config::EndpointConfig;
use crate::context::RequestContext;
use crate::decode::{decode, fetch_and_decode, null_as_default};
use crate::error::Result;
use crate::transport::HttpClient;
use crate::version::{Document, MetadataVersion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task-level resource limits
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskLimitsV3 {
    /// Task CPU in vCPU units, fractional on Fargate (e.g. `0.25`)
    #[serde(rename = "CPU", deserialize_with = "null_as_default")]
    pub cpu: f64,

    /// Task memory in MiB
    #[serde(rename = "Memory", deserialize_with = "null_as_default")]
    pub memory: i64,
}

/// Container-level resource limits
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerLimitsV3 {
    /// CPU units reserved for the container (1024 per vCPU)
    #[serde(rename = "CPU", deserialize_with = "null_as_default")]
    pub cpu: i64,

    /// Memory hard limit in MiB
    #[serde(rename = "Memory", deserialize_with = "null_as_default")]
    pub memory: i64,
}

/// Orchestration labels set on every v3 container
///
/// Only the five labels the agent always sets are kept. User-defined docker
/// labels are dropped in v3.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsV3 {
    /// `com.amazonaws.ecs.cluster`
    #[serde(rename = "com.amazonaws.ecs.cluster", deserialize_with = "null_as_default")]
    pub ecs_cluster: String,

    /// `com.amazonaws.ecs.container-name`
    #[serde(rename = "com.amazonaws.ecs.container-name", deserialize_with = "null_as_default")]
    pub ecs_container_name: String,

    /// `com.amazonaws.ecs.task-arn`
    #[serde(rename = "com.amazonaws.ecs.task-arn", deserialize_with = "null_as_default")]
    pub ecs_task_arn: String,

    /// `com.amazonaws.ecs.task-definition-family`
    #[serde(
        rename = "com.amazonaws.ecs.task-definition-family",
        deserialize_with = "null_as_default"
    )]
    pub ecs_task_definition_family: String,

    /// `com.amazonaws.ecs.task-definition-version`
    #[serde(
        rename = "com.amazonaws.ecs.task-definition-version",
        deserialize_with = "null_as_default"
    )]
    pub ecs_task_definition_version: String,
}

/// One network attachment of a v3 container
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkV3 {
    /// Network mode (`awsvpc`, `bridge`, `host`)
    #[serde(deserialize_with = "null_as_default")]
    pub network_mode: String,

    /// IPv4 addresses assigned on this network
    #[serde(rename = "IPv4Addresses", deserialize_with = "null_as_default")]
    pub ipv4_addresses: Vec<String>,
}

/// Metadata for a single container, v3 schema
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerMetadataV3 {
    /// Docker container ID
    #[serde(rename = "DockerId", deserialize_with = "null_as_default")]
    pub docker_id: String,

    /// Container name from the task definition
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    /// Container name as known to docker
    #[serde(deserialize_with = "null_as_default")]
    pub docker_name: String,

    /// Image reference
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,

    /// Image digest
    #[serde(rename = "ImageID", deserialize_with = "null_as_default")]
    pub image_id: String,

    /// Well-known orchestration labels
    #[serde(deserialize_with = "null_as_default")]
    pub labels: LabelsV3,

    /// Status the agent is driving the container towards
    #[serde(deserialize_with = "null_as_default")]
    pub desired_status: String,

    /// Last status observed by the agent
    #[serde(deserialize_with = "null_as_default")]
    pub known_status: String,

    /// Container resource limits
    #[serde(deserialize_with = "null_as_default")]
    pub limits: ContainerLimitsV3,

    /// When the container was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the container started, absent if it never did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    /// Container type (`NORMAL`, `CNI_PAUSE`, ...)
    #[serde(rename = "Type", deserialize_with = "null_as_default")]
    pub container_type: String,

    /// Network attachments in agent order
    #[serde(deserialize_with = "null_as_default")]
    pub networks: Vec<NetworkV3>,
}

/// Metadata for the whole task, v3 schema
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TaskMetadataV3 {
    /// Cluster name or ARN
    #[serde(deserialize_with = "null_as_default")]
    pub cluster: String,

    /// Task ARN
    #[serde(rename = "TaskARN", deserialize_with = "null_as_default")]
    pub task_arn: String,

    /// Task definition family
    #[serde(deserialize_with = "null_as_default")]
    pub family: String,

    /// Task definition revision
    #[serde(deserialize_with = "null_as_default")]
    pub revision: String,

    /// Status the agent is driving the task towards
    #[serde(deserialize_with = "null_as_default")]
    pub desired_status: String,

    /// Last status observed by the agent
    #[serde(deserialize_with = "null_as_default")]
    pub known_status: String,

    /// Every container in the task, in agent order
    #[serde(deserialize_with = "null_as_default")]
    pub containers: Vec<ContainerMetadataV3>,

    /// Task resource limits
    #[serde(deserialize_with = "null_as_default")]
    pub limits: TaskLimitsV3,

    /// When the first image pull started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_started_at: Option<DateTime<Utc>>,

    /// When the last image pull finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_stopped_at: Option<DateTime<Utc>>,
}

/// Decode a v3 task document
pub fn decode_task(body: &[u8]) -> Result<TaskMetadataV3> {
    decode(MetadataVersion::V3, Document::Task, body)
}

/// Decode a v3 container document
pub fn decode_container(body: &[u8]) -> Result<ContainerMetadataV3> {
    decode(MetadataVersion::V3, Document::Container, body)
}

/// Fetch task metadata from the v3 endpoint
///
/// Fails with [`Error::MissingEndpoint`](crate::Error::MissingEndpoint) when
/// no v3 endpoint is configured, even if a v4 endpoint is.
pub async fn get_task<C>(
    endpoints: &EndpointConfig,
    ctx: &RequestContext,
    client: &C,
) -> Result<TaskMetadataV3>
where
    C: HttpClient + ?Sized,
{
    fetch_and_decode(endpoints, MetadataVersion::V3, Document::Task, ctx, client).await
}

/// Fetch metadata for the calling container from the v3 endpoint
pub async fn get_container<C>(
    endpoints: &EndpointConfig,
    ctx: &RequestContext,
    client: &C,
) -> Result<ContainerMetadataV3>
where
    C: HttpClient + ?Sized,
{
    fetch_and_decode(endpoints, MetadataVersion::V3, Document::Container, ctx, client).await
}
