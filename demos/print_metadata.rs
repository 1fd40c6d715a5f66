//! Print the metadata of the task this process runs in
//!
//! ```bash
//! cargo run --example print_metadata
//! ```

use ecs_metadata::{ContainerMetadata, RequestContext, TaskMetadata, get_container, get_task, has_metadata};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if !has_metadata() {
        println!("No ECS metadata endpoint advertised; not running on ECS?");
        return Ok(());
    }

    let client = reqwest::Client::new();
    let ctx = RequestContext::new().with_timeout(Duration::from_secs(5));

    match get_task(&ctx, &client).await? {
        TaskMetadata::V4(task) => {
            println!("Task {} (v4)", task.task_arn);
            println!("  Cluster:  {}", task.cluster);
            println!("  Family:   {}:{}", task.family, task.revision);
            println!("  Launch:   {} in {}", task.launch_type, task.availability_zone);
            println!("  Limits:   {} vCPU, {} MiB", task.limits.cpu, task.limits.memory);
            for container in &task.containers {
                println!("  - {} [{}] {}", container.name, container.known_status, container.image);
            }
        }
        TaskMetadata::V3(task) => {
            println!("Task {} (v3)", task.task_arn);
            println!("  Cluster:  {}", task.cluster);
            println!("  Family:   {}:{}", task.family, task.revision);
            for container in &task.containers {
                println!("  - {} [{}] {}", container.name, container.known_status, container.image);
            }
        }
    }

    match get_container(&ctx, &client).await? {
        ContainerMetadata::V4(container) => {
            println!("This container: {} ({})", container.name, container.container_arn);
            if container.log_driver == "awslogs" {
                println!(
                    "  Logs: {} / {}",
                    container.log_options.aws_logs_group, container.log_options.aws_logs_stream
                );
            }
        }
        ContainerMetadata::V3(container) => {
            println!("This container: {} ({})", container.name, container.docker_id);
        }
    }

    Ok(())
}
