//! A fake ECS agent built on wiremock

use ecs_metadata::EndpointConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path prefix the v3 endpoint is served under
pub const V3_PREFIX: &str = "/v3/9781c248";

/// Path prefix the v4 endpoint is served under
pub const V4_PREFIX: &str = "/v4/8f03e412";

/// Serves metadata documents the way the agent does: `{prefix}` for the
/// container and `{prefix}/task` for the task
pub struct FakeAgent {
    pub server: MockServer,
}

impl FakeAgent {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL for an endpoint prefix on this server
    pub fn base_url(&self, prefix: &str) -> String {
        format!("{}{}", self.server.uri(), prefix)
    }

    /// Serve `body` for the container document under `prefix`, expecting `hits` requests
    pub async fn serve_container(&self, prefix: &str, body: &str, hits: u64) {
        self.serve(prefix.to_string(), 200, body, hits).await;
    }

    /// Serve `body` for the task document under `prefix`, expecting `hits` requests
    pub async fn serve_task(&self, prefix: &str, body: &str, hits: u64) {
        self.serve(format!("{prefix}/task"), 200, body, hits).await;
    }

    /// Serve an arbitrary status and body at an exact path
    pub async fn serve(&self, at: String, status: u16, body: &str, hits: u64) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(hits)
            .mount(&self.server)
            .await;
    }

    /// Endpoint configuration pointing at this agent
    pub fn endpoints(&self, v3: bool, v4: bool) -> EndpointConfig {
        EndpointConfig {
            v3: v3.then(|| self.base_url(V3_PREFIX)),
            v4: v4.then(|| self.base_url(V4_PREFIX)),
        }
    }
}
