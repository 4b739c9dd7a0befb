//! Mock Vault server.
//!
//! Runs wiremock on a runtime owned by the test so the blocking binary under
//! test can talk to it from a child process.

use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::{CLIENT_TOKEN, ROLE_ID, SECRET_ID};

/// A wiremock server posing as Vault.
pub struct MockVault {
    server: MockServer,
    rt: tokio::runtime::Runtime,
}

impl MockVault {
    /// Start a server with no mocks mounted.
    pub fn start() -> Self {
        let rt = tokio::runtime::Runtime::new().expect("failed to build runtime");
        let server = rt.block_on(MockServer::start());
        Self { server, rt }
    }

    /// Base address for `VAULT_ADDR`.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Mount an arbitrary mock.
    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    /// Accept the test AppRole credentials exactly `times` times.
    pub fn login(&self, times: u64) {
        self.mount(
            Mock::given(method("POST"))
                .and(path("/v1/auth/approle/login"))
                .and(body_json(json!({ "role_id": ROLE_ID, "secret_id": SECRET_ID })))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "auth": { "client_token": CLIENT_TOKEN, "lease_duration": 3600 }
                })))
                .expect(times),
        );
    }

    /// Reject every login with Vault's usual error body.
    pub fn reject_login(&self) {
        self.mount(
            Mock::given(method("POST"))
                .and(path("/v1/auth/approle/login"))
                .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                    "errors": ["invalid role or secret ID"]
                }))),
        );
    }

    /// Serve a KV v2 secret at `at`, expecting `times` reads.
    pub fn kv2_secret(&self, at: &str, fields: Value, times: u64) {
        self.read(
            at,
            200,
            json!({ "data": { "data": fields, "metadata": { "version": 1 } } }),
            times,
        );
    }

    /// Serve an arbitrary read response at `at`, expecting `times` reads.
    pub fn read(&self, at: &str, status: u16, body: Value, times: u64) {
        self.mount(
            Mock::given(method("GET"))
                .and(path(format!("/v1/{at}")))
                .and(header("x-vault-token", CLIENT_TOKEN))
                .respond_with(ResponseTemplate::new(status).set_body_json(body))
                .expect(times),
        );
    }

    /// Number of requests received so far.
    pub fn requests(&self) -> usize {
        self.rt
            .block_on(self.server.received_requests())
            .map(|r| r.len())
            .unwrap_or(0)
    }

    /// Panic if any mock's call count expectation is not met.
    pub fn verify(&self) {
        self.rt.block_on(self.server.verify());
    }
}
