//! Inventory retrieval from the spreadsheet export endpoint or a local file.
use crate::error::MenuError;
use std::path::Path;
use std::time::{Duration, Instant};

/// Where the raw CSV text comes from.
#[derive(Debug, Clone)]
pub enum Source {
    /// Spreadsheet id, fetched over HTTPS.
    Sheet(String),
    /// Previously downloaded CSV export.
    Local(std::path::PathBuf),
}

impl Source {
    fn name(&self) -> String {
        match self {
            Source::Sheet(id) => format!("sheet {id}"),
            Source::Local(path) => path.display().to_string(),
        }
    }
}

const EXPORT_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// CSV export URL for a shared spreadsheet.
pub fn export_url(sheet_id: &str) -> String {
    export_url_at(EXPORT_BASE, sheet_id)
}

fn export_url_at(base: &str, sheet_id: &str) -> String {
    format!("{base}/{sheet_id}/export?format=csv")
}

/// Fetch raw CSV text. Non-success responses, timeouts, and empty payloads
/// all fail; there is no retry.
pub fn fetch_inventory(source: &Source, timeout: Duration) -> Result<String, MenuError> {
    fetch_from(source, timeout, EXPORT_BASE)
}

fn fetch_from(source: &Source, timeout: Duration, base: &str) -> Result<String, MenuError> {
    let start = Instant::now();
    let text = match source {
        Source::Sheet(id) => download(&export_url_at(base, id), timeout),
        Source::Local(path) => read_local(path),
    }
    .map_err(|reason| MenuError::Fetch {
        source_name: source.name(),
        reason,
    })?;

    let text = text.trim();
    if text.is_empty() {
        return Err(MenuError::Fetch {
            source_name: source.name(),
            reason: "downloaded CSV is empty".to_string(),
        });
    }
    tracing::info!(
        source = %source.name(),
        bytes = text.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "inventory fetched"
    );
    Ok(text.to_string())
}

fn download(url: &str, timeout: Duration) -> Result<String, String> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into();
    tracing::debug!(url, "requesting inventory export");
    let mut response = agent.get(url).call().map_err(|err| err.to_string())?;
    response
        .body_mut()
        .read_to_string()
        .map_err(|err| format!("read response body: {err}"))
}

fn read_local(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|err| format!("read {}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve one connection: answer with `reply`, or hold it open until
    /// `release` fires when `reply` is `None`.
    fn serve_once(
        reply: Option<&'static str>,
        release: mpsc::Receiver<()>,
    ) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
        let base = format!("http://{}", listener.local_addr().expect("local addr"));
        let handle = thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = [0_u8; 1024];
            let _ = stream.read(&mut request);
            match reply {
                Some(reply) => {
                    let _ = stream.write_all(reply.as_bytes());
                }
                None => {
                    let _ = release.recv_timeout(Duration::from_secs(10));
                }
            }
        });
        (base, handle)
    }

    const NOT_FOUND: &str =
        "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

    #[test]
    fn non_success_status_fails_download() {
        let (_release, rx) = mpsc::channel();
        let (base, handle) = serve_once(Some(NOT_FOUND), rx);

        let err = download(&export_url_at(&base, "sheet"), Duration::from_secs(5))
            .expect_err("404 response");
        assert!(err.contains("404"), "{err}");
        handle.join().expect("server thread");
    }

    #[test]
    fn silent_server_times_out_within_bound() {
        let (release, rx) = mpsc::channel();
        let (base, handle) = serve_once(None, rx);
        let timeout = Duration::from_millis(500);

        let start = Instant::now();
        let err = download(&export_url_at(&base, "sheet"), timeout).expect_err("no reply");
        let elapsed = start.elapsed();

        assert!(err.contains("timeout"), "{err}");
        assert!(elapsed >= timeout, "gave up after {elapsed:?}");
        assert!(elapsed < timeout * 6, "took {elapsed:?}");
        let _ = release.send(());
        handle.join().expect("server thread");
    }

    #[test]
    fn sheet_download_failure_is_a_fetch_error() {
        let (_release, rx) = mpsc::channel();
        let (base, handle) = serve_once(Some(NOT_FOUND), rx);

        let err = fetch_from(
            &Source::Sheet("sheet".to_string()),
            Duration::from_secs(5),
            &base,
        )
        .expect_err("404 response");
        match &err {
            MenuError::Fetch {
                source_name,
                reason,
            } => {
                assert_eq!(source_name, "sheet sheet");
                assert!(reason.contains("404"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
        handle.join().expect("server thread");
    }

    #[test]
    fn export_url_embeds_sheet_id() {
        assert_eq!(
            export_url("abc123"),
            "https://docs.google.com/spreadsheets/d/abc123/export?format=csv"
        );
    }

    #[test]
    fn local_source_is_read_and_trimmed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("inventory.csv");
        std::fs::write(&path, "\n\nCountry,Bought Quantity\n\n").expect("write fixture");

        let text = fetch_inventory(&Source::Local(path), Duration::from_secs(1))
            .expect("read local export");
        assert_eq!(text, "Country,Bought Quantity");
    }

    #[test]
    fn empty_payload_is_a_fetch_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "  \n").expect("write fixture");

        let err = fetch_inventory(&Source::Local(path), Duration::from_secs(1))
            .expect_err("empty export");
        assert!(matches!(err, MenuError::Fetch { .. }));
        assert!(err.to_string().contains("downloaded CSV is empty"));
    }

    #[test]
    fn missing_local_file_is_a_fetch_error() {
        let err = fetch_inventory(
            &Source::Local("/nonexistent/winemenu/inventory.csv".into()),
            Duration::from_secs(1),
        )
        .expect_err("missing file");
        assert!(matches!(err, MenuError::Fetch { .. }));
    }
}
