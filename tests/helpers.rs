// Shared helpers for integration tests.

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;

use geoip_ingest::{run_import, ImportConfig, ImportReport};

/// Rows in `testdata/example.csv` that classify.
#[allow(dead_code)]
pub const FIXTURE_ACCEPTED: usize = 5;
/// Rows in `testdata/example.csv` that are discarded.
#[allow(dead_code)]
pub const FIXTURE_DISCARDED: usize = 4;

/// Path of the checked-in example dump.
pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/example.csv")
}

/// Import config writing to `geo.db` inside `dir`.
pub fn import_config(dir: &Path, file: PathBuf, batch_size: usize) -> ImportConfig {
    ImportConfig {
        file,
        db_path: dir.join("geo.db"),
        batch_size: NonZeroUsize::new(batch_size).expect("batch size must be non-zero"),
        timeout_seconds: None,
    }
}

/// Imports the example dump into a fresh database under `dir`.
#[allow(dead_code)]
pub async fn import_fixture(dir: &Path) -> ImportReport {
    run_import(import_config(dir, fixture_path(), 2), CancellationToken::new())
        .await
        .expect("fixture import should succeed")
}

/// Writes `contents` to `name` inside `dir`.
#[allow(dead_code)]
pub fn write_dump(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write dump");
    path
}

/// Minimal HTTP/1.1 GET; returns status, lowercase header block and body.
#[allow(dead_code)]
pub async fn http_get(addr: SocketAddr, path_and_query: &str) -> (u16, String, String) {
    let mut stream = TcpStream::connect(addr)
        .await
        .expect("Failed to connect to server");
    let request = format!(
        "GET {path_and_query} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"
    );
    stream
        .write_all(request.as_bytes())
        .await
        .expect("Failed to send request");

    let mut raw = Vec::new();
    stream
        .read_to_end(&mut raw)
        .await
        .expect("Failed to read response");
    let raw = String::from_utf8(raw).expect("response should be UTF-8");

    let (head, body) = raw
        .split_once("\r\n\r\n")
        .expect("response should have a header block");
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .expect("response should have a status code");
    (status, head.to_lowercase(), body.to_string())
}
