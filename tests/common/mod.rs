//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::net::TcpListener;
use zone_tracker::alerts::Notifier;
use zone_tracker::config::ServiceConfig;
use zone_tracker::http::HttpServer;
use zone_tracker::lifecycle::Shutdown;
use zone_tracker::Zone;

/// Notifier that remembers every zone it was asked to alert on.
#[derive(Default)]
pub struct RecordingNotifier {
    zones: Mutex<Vec<Zone>>,
}

impl RecordingNotifier {
    pub fn zones(&self) -> Vec<Zone> {
        self.zones.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, zone: Zone) {
        self.zones.lock().unwrap().push(zone);
    }
}

/// A running server bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub notifier: Arc<RecordingNotifier>,
    /// Dropping the sender stops the server.
    #[allow(dead_code)]
    pub shutdown: Shutdown,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the zone tracker with `config` on 127.0.0.1:0.
pub async fn start_server(config: ServiceConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let notifier = Arc::new(RecordingNotifier::default());
    let server = HttpServer::with_notifier(config, notifier.clone());
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    TestServer {
        addr,
        notifier,
        shutdown,
        client,
    }
}
