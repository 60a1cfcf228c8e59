//! Test context wiring.
//!
//! Picks the target deployment, builds the client, and wraps the fixtures
//! into the panicking form the suites use.

#![allow(clippy::panic, clippy::expect_used)]

use std::sync::OnceLock;

use sonda_application::fixtures;
use sonda_application::ports::ApiClient;
use sonda_domain::{AuthSession, Credentials, RegistrationData, RequestSpec, ResponseSpec};
use sonda_infrastructure::config::BASE_URL_ENV;
use sonda_infrastructure::{ReqwestApiClient, ServiceConfig};
use tracing_subscriber::EnvFilter;

/// Initializes tracing once for the whole test binary.
fn init_tracing() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Everything a test case needs to talk to the service under test.
///
/// Keeps the embedded stub alive for the test's duration when one was
/// started.
pub struct TestContext {
    client: ReqwestApiClient,
    _stub: Option<crate::stub::StubHandle>,
}

impl TestContext {
    /// Starts a context against `SONDA_BASE_URL` when set, otherwise boots
    /// the embedded stub service on an ephemeral local port.
    pub async fn start() -> Self {
        init_tracing();
        if std::env::var_os(BASE_URL_ENV).is_some() {
            let config = ServiceConfig::from_env().unwrap_or_else(|e| panic!("{e}"));
            let client = ReqwestApiClient::new(config).unwrap_or_else(|e| panic!("{e}"));
            return Self {
                client,
                _stub: None,
            };
        }

        let stub = crate::stub::StubHandle::spawn().await;
        let config = ServiceConfig::new(stub.base_url()).unwrap_or_else(|e| panic!("{e}"));
        let client = ReqwestApiClient::new(config).unwrap_or_else(|e| panic!("{e}"));
        Self {
            client,
            _stub: Some(stub),
        }
    }

    /// Returns the client for direct fixture calls.
    #[must_use]
    pub const fn client(&self) -> &ReqwestApiClient {
        &self.client
    }

    /// Sends a request, panicking on transport failure.
    pub async fn send(&self, request: &RequestSpec) -> ResponseSpec {
        self.client
            .execute(request)
            .await
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Registers a user, panicking on any failed step.
    pub async fn register(&self, data: &RegistrationData) -> u64 {
        fixtures::register_user(&self.client, data)
            .await
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Logs in, panicking on any failed step.
    pub async fn login(&self, credentials: &Credentials) -> AuthSession {
        fixtures::login(&self.client, credentials)
            .await
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Registers a fresh user and logs in as them, panicking on any failed
    /// step.
    pub async fn create_user_and_auth(&self) -> AuthSession {
        fixtures::create_user_and_auth(&self.client)
            .await
            .unwrap_or_else(|e| panic!("{e}"))
    }
}
