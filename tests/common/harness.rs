//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use judgment::config::Config;
use judgment::exchange::{MemoryRatingsRepository, RatingsRepository};
use judgment::gateway::{AppState, create_router};
use judgment::persistence::HttpPersistence;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;
const CLIENT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Default)]
pub struct TestServerConfig {
    /// Index name exported for cases without one.
    pub default_index: Option<String>,
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub repository: Arc<MemoryRatingsRepository>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn api_url(&self) -> String {
        format!("{}{}", self.url(), judgment::constants::API_PREFIX)
    }

    /// Persistence client pointed at this server's API.
    pub fn persistence(&self) -> HttpPersistence {
        HttpPersistence::new(self.api_url(), Duration::from_secs(CLIENT_TIMEOUT_SECS))
            .expect("client should build")
    }

    /// Creates `case_id` with one query and returns the query id.
    pub async fn seed_case(&self, case_id: u64, query_text: &str) -> u64 {
        self.repository
            .create_case(case_id, None)
            .await
            .expect("case should be created");
        self.repository
            .add_query(case_id, query_text)
            .await
            .expect("query should be created")
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
}

/// Spawns the gateway over a fresh in-memory repository on an ephemeral port.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let mut app_config = Config::default();
    if let Some(index) = config.default_index {
        app_config.default_index = index;
    }

    let repository = Arc::new(MemoryRatingsRepository::new());
    let app = create_router(AppState::new(repository.clone(), &app_config));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        repository,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
