//! Fake GenAI management API.
//!
//! Runs a wiremock server on its own tokio runtime so blocking clients and CLI
//! subprocesses can talk to it from synchronous tests.

use serde_json::Value;
use tokio::runtime::Runtime;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{AgentFixture, SessionFixture};

pub const PROJECT_ID: &str = "631a6a99-0b30-425a-bdf2-af4532ff9451";
pub const USER_ID: &str = "admin";
pub const PASSWORD: &str = "secret";

/// Every route requires basic auth with [`USER_ID`] and [`PASSWORD`];
/// unauthenticated requests fall through to a 404.
pub struct FakeApi {
    // dropped before the runtime so expectations are verified while it still runs
    server: MockServer,
    runtime: Runtime,
}

impl FakeApi {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("Failed to start fake API runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn route(suffix: &str) -> String {
        format!("/api/genai/v1/projects/{}/{}", PROJECT_ID, suffix)
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    fn respond(&self, http_method: &str, suffix: &str, response: ResponseTemplate) {
        self.mount(
            Mock::given(method(http_method))
                .and(path(Self::route(suffix)))
                .and(basic_auth(USER_ID, PASSWORD))
                .respond_with(response),
        );
    }

    fn get_json(&self, suffix: &str, body: Value) {
        self.respond("GET", suffix, ResponseTemplate::new(200).set_body_json(body));
    }

    /// Serve the agent list plus one route per agent.
    pub fn with_agents(&self, agents: &[AgentFixture]) {
        let all: Vec<Value> = agents.iter().map(AgentFixture::to_json).collect();
        self.get_json("agents", Value::Array(all));
        for agent in agents {
            self.get_json(&format!("agents/{}", agent.id()), agent.to_json());
        }
    }

    /// Serve the session list in the given order plus per-session routes.
    pub fn with_sessions(&self, sessions: &[SessionFixture]) {
        let all: Vec<Value> = sessions.iter().map(SessionFixture::to_json).collect();
        self.get_json("sessions", Value::Array(all));
        for session in sessions {
            self.get_json(&format!("sessions/{}", session.id()), session.to_json());
            self.get_json(
                &format!("sessions/{}/messages", session.id()),
                session.messages_json(),
            );
        }
    }

    /// Answer `GET suffix` with a raw status and body.
    pub fn fail(&self, suffix: &str, status: u16, body: &str) {
        self.respond(
            "GET",
            suffix,
            ResponseTemplate::new(status).set_body_string(body),
        );
    }

    /// Accept exactly one `DELETE suffix`.
    pub fn expect_delete(&self, suffix: &str) {
        self.mount(
            Mock::given(method("DELETE"))
                .and(path(Self::route(suffix)))
                .and(basic_auth(USER_ID, PASSWORD))
                .respond_with(ResponseTemplate::new(204))
                .expect(1),
        );
    }

    /// Number of requests the server has seen.
    pub fn request_count(&self) -> usize {
        self.runtime
            .block_on(self.server.received_requests())
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
