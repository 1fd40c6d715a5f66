use super::*;


const CONTAINER_JSON: &str = include_str!("../../../testdata/metadatav4-response-container.json");
const TASK_JSON: &str = include_str!("../../../testdata/metadatav4-response-task.json");

const BASE: &str = "http://169.254.170.2/v4/8f03e412";

fn v4_only() -> EndpointConfig {
    EndpointConfig {
        v3: None,
        v4: Some(BASE.to_string()),
    }
}
