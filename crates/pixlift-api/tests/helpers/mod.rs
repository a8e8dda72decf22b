//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p pixlift-api --test enhance_test`.
//! The remote provider is replaced by an in-process mock bound to an
//! ephemeral port; storage lives in a tempdir owned by the TestApp.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_test::TestServer;
use serde_json::json;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use pixlift_api::setup::routes::setup_routes;
use pixlift_api::state::AppState;
use pixlift_core::Config;
use pixlift_provider::{PollPolicy, ProviderClient};
use pixlift_services::EnhancementService;
use pixlift_storage::{LocalStorage, Storage};

/// Base URL the test config advertises for artifact links.
pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// Scripted behavior for the mock provider's status endpoint.
#[derive(Clone, Copy)]
pub enum ProviderScript {
    /// Report success once this many status calls have been made.
    SucceedAfter(u32),
    /// Never reach a terminal status.
    AlwaysPending,
    /// Report terminal error on the first status call.
    FailImmediately,
}

#[derive(Clone)]
struct MockProvider {
    poll_calls: Arc<AtomicU32>,
    script: ProviderScript,
    artifact_url: String,
}

async fn mock_upload() -> Json<serde_json::Value> {
    Json(json!({"data": {"code": "job-777"}}))
}

async fn mock_check_status(State(mock): State<MockProvider>) -> Json<serde_json::Value> {
    let calls = mock.poll_calls.fetch_add(1, Ordering::SeqCst) + 1;

    match mock.script {
        ProviderScript::FailImmediately => Json(json!({"data": {"status": "error"}})),
        ProviderScript::AlwaysPending => Json(json!({"data": {"status": "waiting"}})),
        ProviderScript::SucceedAfter(n) if calls >= n => Json(json!({
            "data": {
                "status": "success",
                "downloadUrls": [mock.artifact_url],
            }
        })),
        ProviderScript::SucceedAfter(_) => Json(json!({"data": {"status": "waiting"}})),
    }
}

async fn mock_artifact() -> Vec<u8> {
    b"enhanced-bytes".to_vec()
}

/// Start the mock provider; returns its base URL and the status-call counter.
async fn start_mock_provider(script: ProviderScript) -> (String, Arc<AtomicU32>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let poll_calls = Arc::new(AtomicU32::new(0));
    let mock = MockProvider {
        poll_calls: poll_calls.clone(),
        script,
        artifact_url: format!("http://{}/artifact.jpg", addr),
    };

    let app = Router::new()
        .route("/Upload", post(mock_upload))
        .route("/CheckStatus", post(mock_check_status))
        .route("/artifact.jpg", get(mock_artifact))
        .with_state(mock);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), poll_calls)
}

/// Test application: server, storage dir, and the mock's status-call counter.
pub struct TestApp {
    pub server: TestServer,
    pub storage_dir: TempDir,
    pub poll_calls: Arc<AtomicU32>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of status calls the mock provider has served.
    pub fn poll_calls(&self) -> u32 {
        self.poll_calls.load(Ordering::SeqCst)
    }

    /// Count of files currently spooled under the uploads sub-directory.
    pub fn spooled_upload_count(&self) -> usize {
        match std::fs::read_dir(self.storage_dir.path().join("uploads")) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }
}

/// Setup test app with isolated storage and a scripted mock provider.
pub async fn setup_test_app(script: ProviderScript) -> TestApp {
    let (provider_base, poll_calls) = start_mock_provider(script).await;
    let storage_dir = TempDir::new().unwrap();

    let config = Config {
        storage_path: storage_dir.path().to_string_lossy().to_string(),
        public_base_url: Some(TEST_BASE_URL.to_string()),
        provider_base_url: provider_base.clone(),
        poll_max_attempts: 3,
        poll_interval_ms: 10,
        ..Config::default()
    };

    let storage: Arc<dyn Storage> =
        Arc::new(LocalStorage::new(storage_dir.path()).await.unwrap());
    let provider = ProviderClient::new(
        provider_base,
        Duration::from_secs(5),
        Duration::from_secs(5),
    )
    .unwrap();
    let policy = PollPolicy {
        max_attempts: config.poll_max_attempts,
        interval: config.poll_interval(),
        status_timeout: config.status_timeout(),
    };
    let enhancer = EnhancementService::new(provider, storage.clone(), policy);

    let state = Arc::new(AppState {
        config: config.clone(),
        enhancer,
        storage,
        shutdown: CancellationToken::new(),
    });

    let router = setup_routes(&config, state);
    let server = TestServer::new(router).unwrap();

    TestApp {
        server,
        storage_dir,
        poll_calls,
    }
}
