//! End-to-end tests against a fake ECS agent
//!
//! Each test starts a wiremock server that serves captured metadata documents
//! at the paths the agent uses, then drives the public API with a real
//! `reqwest::Client`.

mod common;

use common::{
    FakeAgent, V3_CONTAINER, V3_PREFIX, V3_TASK, V4_CONTAINER, V4_CONTAINER_TASK_ARN, V4_PREFIX,
    V4_TASK,
};
use ecs_metadata::{
    ContainerMetadata, EndpointConfig, Error, MetadataVersion, RequestContext, TaskMetadata,
    get_container_with, get_task_with, v3, v4,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

// ============================================================================
// Version selection
// ============================================================================

#[tokio::test]
async fn test_v4_container_document() {
    let agent = FakeAgent::start().await;
    agent.serve_container(V4_PREFIX, V4_CONTAINER, 1).await;

    let client = reqwest::Client::new();
    let container = get_container_with(&agent.endpoints(false, true), &RequestContext::new(), &client)
        .await
        .unwrap();

    let ContainerMetadata::V4(container) = container else {
        panic!("expected a v4 container, got {container:?}");
    };
    assert_eq!(container.name, "curl");
    assert_eq!(container.labels.ecs_task_arn, V4_CONTAINER_TASK_ARN);
    assert_eq!(container.labels.get("com.example.service"), "curltest");
    assert_eq!(container.log_options.aws_logs_group, "/ecs/metadata");
}

#[tokio::test]
async fn test_v4_task_document() {
    let agent = FakeAgent::start().await;
    agent.serve_task(V4_PREFIX, V4_TASK, 1).await;

    let client = reqwest::Client::new();
    let task = get_task_with(&agent.endpoints(false, true), &RequestContext::new(), &client)
        .await
        .unwrap();

    assert_eq!(task.version(), MetadataVersion::V4);
    assert_eq!(task.containers_len(), 2);
    assert_eq!(task.as_v4().unwrap().availability_zone, "us-west-2d");
}

#[tokio::test]
async fn test_v3_task_document() {
    let agent = FakeAgent::start().await;
    agent.serve_task(V3_PREFIX, V3_TASK, 1).await;

    let client = reqwest::Client::new();
    let task = get_task_with(&agent.endpoints(true, false), &RequestContext::new(), &client)
        .await
        .unwrap();

    let TaskMetadata::V3(task) = task else {
        panic!("expected a v3 task, got {task:?}");
    };
    assert_eq!(task.family, "nginx");
    assert_eq!(task.containers[1].name, "nginx-curl");
}

#[tokio::test]
async fn test_v4_preferred_over_v3() {
    let agent = FakeAgent::start().await;
    agent.serve_container(V3_PREFIX, V3_CONTAINER, 0).await;
    agent.serve_container(V4_PREFIX, V4_CONTAINER, 1).await;

    let client = reqwest::Client::new();
    let container = get_container_with(&agent.endpoints(true, true), &RequestContext::new(), &client)
        .await
        .unwrap();

    assert_eq!(container.version(), MetadataVersion::V4);
}

#[tokio::test]
async fn test_no_endpoint_makes_no_request() {
    let agent = FakeAgent::start().await;
    agent.serve_task(V4_PREFIX, V4_TASK, 0).await;
    agent.serve_task(V3_PREFIX, V3_TASK, 0).await;

    let client = reqwest::Client::new();
    let err = get_task_with(&EndpointConfig::default(), &RequestContext::new(), &client)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoMetadataAvailable));
    assert_eq!(err.error_code(), "no_metadata_available");
}

// ============================================================================
// Pinned versions
// ============================================================================

#[tokio::test]
async fn test_pinned_v3_fetch_ignores_v4() {
    let agent = FakeAgent::start().await;
    agent.serve_container(V3_PREFIX, V3_CONTAINER, 1).await;

    let client = reqwest::Client::new();
    let container = v3::get_container(&agent.endpoints(true, true), &RequestContext::new(), &client)
        .await
        .unwrap();

    assert_eq!(container.name, "nginx-curl");
}

#[tokio::test]
async fn test_pinned_v4_without_endpoint() {
    let agent = FakeAgent::start().await;

    let client = reqwest::Client::new();
    let err = v4::get_task(&agent.endpoints(true, false), &RequestContext::new(), &client)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::MissingEndpoint {
            version: MetadataVersion::V4,
            ..
        }
    ));
}

// ============================================================================
// Failure stages
// ============================================================================

#[tokio::test]
async fn test_error_page_is_decode_failure() {
    let agent = FakeAgent::start().await;
    agent
        .serve(format!("{V4_PREFIX}/task"), 404, "404 page not found", 1)
        .await;

    let client = reqwest::Client::new();
    let err = get_task_with(&agent.endpoints(false, true), &RequestContext::new(), &client)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DecodeFailed { .. }), "got {err:?}");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_unreachable_agent_is_request_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let endpoints = EndpointConfig {
        v3: None,
        v4: Some(format!("http://127.0.0.1:{port}/v4/abc")),
    };

    let client = reqwest::Client::new();
    let err = get_container_with(&endpoints, &RequestContext::new(), &client)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RequestFailed { .. }), "got {err:?}");
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_slow_agent_hits_deadline() {
    let agent = FakeAgent::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_string(V4_CONTAINER)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&agent.server)
        .await;

    let client = reqwest::Client::new();
    let ctx = RequestContext::new().with_timeout(Duration::from_millis(50));
    let err = get_container_with(&agent.endpoints(false, true), &ctx, &client)
        .await
        .unwrap_err();

    match err {
        Error::RequestFailed { reason, .. } => assert_eq!(reason, "deadline exceeded"),
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cancelled_while_in_flight() {
    let agent = FakeAgent::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_string(V4_TASK)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&agent.server)
        .await;

    let token = CancellationToken::new();
    let ctx = RequestContext::new().with_cancellation(token.clone());
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let client = reqwest::Client::new();
    let err = get_task_with(&agent.endpoints(false, true), &ctx, &client)
        .await
        .unwrap_err();

    match err {
        Error::RequestFailed { reason, .. } => assert_eq!(reason, "request cancelled"),
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}
