use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::Result;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

/// Spawn the server binary once per test run and wait until /health
/// answers. Healthy (200) and degraded (503, no reachable database) both
/// count as up, so the auth-surface tests run without a live Postgres.
pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| {
        let port = portpicker::pick_unused_port().expect("no unused port");
        let child = Command::new(env!("CARGO_BIN_EXE_patent-track-api"))
            .env("PATENT_TRACK_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .expect("spawn server binary");
        TestServer {
            base_url: format!("http://127.0.0.1:{port}"),
            child,
        }
    });

    let health = format!("{}/health", server.base_url);
    let client = reqwest::Client::new();
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if client.get(&health).send().await.is_ok() {
            return Ok(server);
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    anyhow::bail!("server not reachable at {} after 10s", server.base_url)
}
