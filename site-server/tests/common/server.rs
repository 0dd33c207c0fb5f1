//! Test server harness for integration tests.
//!
//! Spins up the real router on a random localhost port so tests can talk
//! to it over HTTP.

use std::net::SocketAddr;
use std::path::Path;

use site_core::ProjectStore;
use site_export::SiteExporter;
use site_server::{router, AppState};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A test server instance with control handles.
pub struct TestServer {
    addr: SocketAddr,
    store: ProjectStore,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start an in-memory server.
    ///
    /// # Panics
    ///
    /// Panics if no port is available or the server fails to bind.
    pub async fn start() -> Self {
        Self::start_with_store(ProjectStore::new()).await
    }

    /// Start a server persisting into `dir`.
    #[allow(dead_code)]
    pub async fn start_with_data_dir(dir: &Path) -> Self {
        let store = ProjectStore::with_data_dir(dir).expect("data dir");
        Self::start_with_store(store).await
    }

    async fn start_with_store(store: ProjectStore) -> Self {
        let port = portpicker::pick_unused_port().expect("no available port");
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let state = AppState::new(store.clone(), SiteExporter::with_defaults());
        let app = router(state);

        let listener = TcpListener::bind(addr).await.expect("failed to bind");
        let actual_addr = listener.local_addr().expect("failed to get local addr");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("server error");
        });

        Self {
            addr: actual_addr,
            store,
            shutdown_tx: Some(shutdown_tx),
            handle,
        }
    }

    /// Absolute URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Store shared with the running server.
    #[allow(dead_code)]
    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    /// Stop the server and wait for it to exit.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}
