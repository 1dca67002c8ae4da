//! Common test utilities for integration tests

use farmsheets_cli::config::ResolvedConfig;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Canned reply served for one sheet ID.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

#[allow(dead_code)]
impl MockResponse {
    pub fn csv(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/csv; charset=utf-8",
            body: body.to_string(),
        }
    }

    pub fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: format!("status {status}"),
        }
    }
}

/// Local HTTP server that mimics the Google Sheets export endpoint.
pub struct MockSheetServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockSheetServer {
    /// Request targets (path and query) in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

/// Starts a server answering `/spreadsheets/d/<id>/export` with the response
/// registered for `<id>`, or 404 for unknown IDs.
#[allow(dead_code)]
pub async fn spawn_sheet_server(routes: Vec<(&str, MockResponse)>) -> MockSheetServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes: Arc<HashMap<String, MockResponse>> = Arc::new(
        routes
            .into_iter()
            .map(|(id, resp)| (id.to_string(), resp))
            .collect(),
    );
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = routes.clone();
            let recorded = recorded.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }

                let request = String::from_utf8_lossy(&buf);
                let target = request
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                recorded.lock().unwrap().push(target.clone());

                let path = target.split('?').next().unwrap_or("");
                let sheet_id = path
                    .split('/')
                    .skip_while(|segment| *segment != "d")
                    .nth(1)
                    .unwrap_or("");
                let resp = routes
                    .get(sheet_id)
                    .cloned()
                    .unwrap_or_else(|| MockResponse::status(404));

                let head = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    resp.status,
                    reason_phrase(resp.status),
                    resp.content_type,
                    resp.body.len()
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(resp.body.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    MockSheetServer {
        base_url: format!("http://{addr}"),
        requests,
    }
}

/// Base URL of a local port nothing is listening on.
#[allow(dead_code)]
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Settings writing into `<root>/farm_data_csv` and fetching from `base_url`.
#[allow(dead_code)]
pub fn test_config(root: &Path, base_url: &str) -> ResolvedConfig {
    ResolvedConfig {
        output_dir: root.join("farm_data_csv"),
        export_base_url: base_url.to_string(),
        ..ResolvedConfig::default()
    }
}

/// Google Sheets edit URL for a sheet ID.
#[allow(dead_code)]
pub fn sheet_url(id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{id}/edit?usp=drive_link")
}

/// Sorted file names in a directory.
#[allow(dead_code)]
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[allow(dead_code)]
pub const SAMPLE_CSV: &str = "First Name,Last Name,Mailing Address,City,State,Zip Code\n\
Jane,Doe,12 Palm Way,Palm Desert,CA,92260\n\
José,Peña,4 Mesa Rd,Indio,CA,92201\n";

#[allow(dead_code)]
pub const SIGN_IN_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Google Sheets - Sign in</title></head>
<body>Sign in to continue to Sheets</body></html>"#;
