//! Docker labels attached to a v4 container
//!
//! On the wire the labels are one flat string map. The agent mixes five
//! orchestration labels in with whatever the task definition declares, so
//! decoding is two-phase: read the whole map, then move the well-known keys
//! out into named fields. Everything left over stays in a private remainder
//! that is only reachable by exact key.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Cluster the task runs in
pub const LABEL_ECS_CLUSTER: &str = "com.amazonaws.ecs.cluster";
/// Container name from the task definition
pub const LABEL_ECS_CONTAINER_NAME: &str = "com.amazonaws.ecs.container-name";
/// ARN of the owning task
pub const LABEL_ECS_TASK_ARN: &str = "com.amazonaws.ecs.task-arn";
/// Task definition family
pub const LABEL_ECS_TASK_DEFINITION_FAMILY: &str = "com.amazonaws.ecs.task-definition-family";
/// Task definition revision
pub const LABEL_ECS_TASK_DEFINITION_VERSION: &str = "com.amazonaws.ecs.task-definition-version";

/// Labels of a v4 container, split into well-known fields and a remainder
///
/// A well-known key never appears in the remainder, so [`Labels::get`] on one
/// returns an empty string; read the named field instead.
///
/// # Examples
///
/// ```
/// use ecs_metadata::v4::Labels;
///
/// let labels: Labels = serde_json::from_str(r#"{
///     "com.amazonaws.ecs.task-arn": "arn:aws:ecs:us-west-2:111122223333:task/default/abc",
///     "custom.tag": "blue"
/// }"#).unwrap();
///
/// assert_eq!(labels.ecs_task_arn, "arn:aws:ecs:us-west-2:111122223333:task/default/abc");
/// assert_eq!(labels.get("custom.tag"), "blue");
/// assert_eq!(labels.get("com.amazonaws.ecs.task-arn"), "");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Option<HashMap<String, Option<String>>>",
    into = "BTreeMap<String, String>"
)]
pub struct Labels {
    /// `com.amazonaws.ecs.cluster`
    pub ecs_cluster: String,
    /// `com.amazonaws.ecs.container-name`
    pub ecs_container_name: String,
    /// `com.amazonaws.ecs.task-arn`
    pub ecs_task_arn: String,
    /// `com.amazonaws.ecs.task-definition-family`
    pub ecs_task_definition_family: String,
    /// `com.amazonaws.ecs.task-definition-version`
    pub ecs_task_definition_version: String,

    rest: HashMap<String, String>,
}

impl Labels {
    /// Value of a label outside the well-known set, or `""` if absent
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.rest.get(name).map(String::as_str).unwrap_or_default()
    }

    fn well_known(&self) -> [(&'static str, &str); 5] {
        [
            (LABEL_ECS_CLUSTER, self.ecs_cluster.as_str()),
            (LABEL_ECS_CONTAINER_NAME, self.ecs_container_name.as_str()),
            (LABEL_ECS_TASK_ARN, self.ecs_task_arn.as_str()),
            (
                LABEL_ECS_TASK_DEFINITION_FAMILY,
                self.ecs_task_definition_family.as_str(),
            ),
            (
                LABEL_ECS_TASK_DEFINITION_VERSION,
                self.ecs_task_definition_version.as_str(),
            ),
        ]
    }
}

impl From<HashMap<String, String>> for Labels {
    fn from(mut rest: HashMap<String, String>) -> Self {
        let mut take = |key: &str| rest.remove(key).unwrap_or_default();

        let ecs_cluster = take(LABEL_ECS_CLUSTER);
        let ecs_container_name = take(LABEL_ECS_CONTAINER_NAME);
        let ecs_task_arn = take(LABEL_ECS_TASK_ARN);
        let ecs_task_definition_family = take(LABEL_ECS_TASK_DEFINITION_FAMILY);
        let ecs_task_definition_version = take(LABEL_ECS_TASK_DEFINITION_VERSION);

        Self {
            ecs_cluster,
            ecs_container_name,
            ecs_task_arn,
            ecs_task_definition_family,
            ecs_task_definition_version,
            rest,
        }
    }
}

// `"Labels": null` decodes like an empty map, a `null` value like `""`.
impl From<Option<HashMap<String, Option<String>>>> for Labels {
    fn from(map: Option<HashMap<String, Option<String>>>) -> Self {
        map.unwrap_or_default()
            .into_iter()
            .map(|(key, value)| (key, value.unwrap_or_default()))
            .collect::<HashMap<String, String>>()
            .into()
    }
}

impl From<Labels> for BTreeMap<String, String> {
    fn from(labels: Labels) -> Self {
        let mut map: BTreeMap<String, String> = labels
            .well_known()
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        map.extend(labels.rest);
        map
    }
}

impl<K, V> FromIterator<(K, V)> for Labels
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<HashMap<String, String>>()
            .into()
    }
}
