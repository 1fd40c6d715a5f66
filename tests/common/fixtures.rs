//! Metadata documents captured from real ECS agents

/// v3 container document (`nginx-curl` on an awsvpc task)
pub const V3_CONTAINER: &str = include_str!("../../testdata/metadatav3-response-container.json");

/// v3 task document with a pause container and `nginx-curl`
pub const V3_TASK: &str = include_str!("../../testdata/metadatav3-response-task.json");

/// v4 container document (`curl`, awslogs driver, one extra label)
pub const V4_CONTAINER: &str = include_str!("../../testdata/metadatav4-response-container.json");

/// v4 task document with a pause container and `curl`
pub const V4_TASK: &str = include_str!("../../testdata/metadatav4-response-task.json");

/// Task ARN carried by the v4 container fixture's labels
pub const V4_CONTAINER_TASK_ARN: &str =
    "arn:aws:ecs:us-west-2:111122223333:task/default/8f03e41243824aea923aca126495f665";
