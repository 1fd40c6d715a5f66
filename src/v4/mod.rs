//! Task metadata endpoint version 4
//!
//! Shapes follow the v4 response documents served by the ECS agent at
//! `${ECS_CONTAINER_METADATA_URI_V4}` (container) and
//! `${ECS_CONTAINER_METADATA_URI_V4}/task` (task). Compared to v3, v4 adds
//! log configuration, richer network details and the container ARN, and
//! keeps user-defined docker labels (see [`Labels`]).

use crate::config::EndpointConfig;
use crate::context::RequestContext;
use crate::decode::{decode, fetch_and_decode, null_as_default};
use crate::error::Result;
use crate::transport::HttpClient;
use crate::version::{Document, MetadataVersion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod labels;
pub use labels::{
    LABEL_ECS_CLUSTER, LABEL_ECS_CONTAINER_NAME, LABEL_ECS_TASK_ARN,
    LABEL_ECS_TASK_DEFINITION_FAMILY, LABEL_ECS_TASK_DEFINITION_VERSION, Labels,
};

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

/// Resource limits, used for both tasks and containers
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// CPU in vCPU units for tasks, CPU units for containers
    #[serde(rename = "CPU", deserialize_with = "null_as_default")]
    pub cpu: f64,

    /// Memory in MiB
    #[serde(rename = "Memory", deserialize_with = "null_as_default")]
    pub memory: i64,
}

/// `awslogs` driver options of a container
///
/// Other log drivers put different keys here; those are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogOptionsV4 {
    /// Whether the log group is created on demand, as the agent reports it (`"true"`)
    #[serde(rename = "awslogs-create-group", deserialize_with = "null_as_default")]
    pub aws_logs_create_group: String,

    /// CloudWatch log group
    #[serde(rename = "awslogs-group", deserialize_with = "null_as_default")]
    pub aws_logs_group: String,

    /// CloudWatch log stream
    #[serde(rename = "awslogs-stream", deserialize_with = "null_as_default")]
    pub aws_logs_stream: String,

    /// Region the log group lives in
    #[serde(rename = "awslogs-region", deserialize_with = "null_as_default")]
    pub aws_region: String,
}

/// One network attachment of a v4 container
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkV4 {
    /// Network mode (`awsvpc`, `bridge`, `host`)
    #[serde(deserialize_with = "null_as_default")]
    pub network_mode: String,

    /// IPv4 addresses assigned on this network
    #[serde(rename = "IPv4Addresses", deserialize_with = "null_as_default")]
    pub ipv4_addresses: Vec<String>,

    /// Index of the ENI attachment
    #[serde(deserialize_with = "null_as_default")]
    pub attachment_index: i64,

    /// CIDR block of the subnet
    #[serde(rename = "IPv4SubnetCIDRBlock", deserialize_with = "null_as_default")]
    pub ipv4_subnet_cidr_block: String,

    /// MAC address of the attachment
    #[serde(rename = "MACAddress", deserialize_with = "null_as_default")]
    pub mac_address: String,

    /// DNS servers handed to the task
    #[serde(deserialize_with = "null_as_default")]
    pub domain_name_servers: Vec<String>,

    /// DNS search domains handed to the task
    #[serde(deserialize_with = "null_as_default")]
    pub domain_name_search_list: Vec<String>,

    /// Private DNS hostname of the attachment
    #[serde(rename = "PrivateDNSName", deserialize_with = "null_as_default")]
    pub private_dns_name: String,

    /// Subnet gateway address with prefix length
    #[serde(deserialize_with = "null_as_default")]
    pub subnet_gateway_ipv4_address: String,
}

/// Metadata for a single container, v4 schema
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerMetadataV4 {
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

    /// Docker labels
    #[serde(deserialize_with = "null_as_default")]
    pub labels: Labels,

    /// Status the agent is driving the container towards
    #[serde(deserialize_with = "null_as_default")]
    pub desired_status: String,

    /// Last status observed by the agent
    #[serde(deserialize_with = "null_as_default")]
    pub known_status: String,

    /// Container resource limits
    #[serde(deserialize_with = "null_as_default")]
    pub limits: Limits,

    /// When the container was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the container started, absent if it never did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    /// Container type (`NORMAL`, `CNI_PAUSE`, ...)
    #[serde(rename = "Type", deserialize_with = "null_as_default")]
    pub container_type: String,

    /// Container ARN
    #[serde(rename = "ContainerARN", deserialize_with = "null_as_default")]
    pub container_arn: String,

    /// Log driver name (`awslogs`, `awsfirelens`, ...)
    #[serde(deserialize_with = "null_as_default")]
    pub log_driver: String,

    /// Log driver options
    #[serde(deserialize_with = "null_as_default")]
    pub log_options: LogOptionsV4,

    /// Network attachments in agent order
    #[serde(deserialize_with = "null_as_default")]
    pub networks: Vec<NetworkV4>,
}

/// Metadata for the whole task, v4 schema
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TaskMetadataV4 {
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

    /// Task resource limits
    #[serde(deserialize_with = "null_as_default")]
    pub limits: Limits,

    /// When the first image pull started
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_started_at: Option<DateTime<Utc>>,

    /// When the last image pull finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_stopped_at: Option<DateTime<Utc>>,

    /// Availability zone the task runs in
    #[serde(deserialize_with = "null_as_default")]
    pub availability_zone: String,

    /// `EC2`, `FARGATE` or `EXTERNAL`
    #[serde(deserialize_with = "null_as_default")]
    pub launch_type: String,

    /// Every container in the task, in agent order
    #[serde(deserialize_with = "null_as_default")]
    pub containers: Vec<ContainerMetadataV4>,
}

/// Decode a v4 task document
pub fn decode_task(body: &[u8]) -> Result<TaskMetadataV4> {
    decode(MetadataVersion::V4, Document::Task, body)
}

/// Decode a v4 container document
pub fn decode_container(body: &[u8]) -> Result<ContainerMetadataV4> {
    decode(MetadataVersion::V4, Document::Container, body)
}

/// Fetch task metadata from the v4 endpoint
///
/// Fails with [`Error::MissingEndpoint`](crate::Error::MissingEndpoint) when
/// no v4 endpoint is configured.
pub async fn get_task<C>(
    endpoints: &EndpointConfig,
    ctx: &RequestContext,
    client: &C,
) -> Result<TaskMetadataV4>
where
    C: HttpClient + ?Sized,
{
    fetch_and_decode(endpoints, MetadataVersion::V4, Document::Task, ctx, client).await
}

/// Fetch metadata for the calling container from the v4 endpoint
pub async fn get_container<C>(
    endpoints: &EndpointConfig,
    ctx: &RequestContext,
    client: &C,
) -> Result<ContainerMetadataV4>
where
    C: HttpClient + ?Sized,
{
    fetch_and_decode(endpoints, MetadataVersion::V4, Document::Container, ctx, client).await
}
