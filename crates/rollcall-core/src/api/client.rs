//! API client for the roster endpoint.
//!
//! This module provides the `ApiClient` struct for fetching the roster and
//! submitting checked names. Both requests are bounded by the configured
//! timeout; body interpretation lives in free functions so it can be
//! tested without a server.

use std::time::Duration;

use reqwest::{header, Client};
use tracing::{debug, info, warn};

use crate::models::{GroupAssignment, RosterEntry, RosterResponse, SubmitOutcome, SubmitResponse};

use super::ApiError;

/// API client for the roster endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
}

/// Form fields of a submission, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub names: Vec<String>,
    pub group: GroupAssignment,
}

impl SubmitRequest {
    /// Build a request; an empty selection is rejected before any I/O.
    pub fn new(names: Vec<String>, group: GroupAssignment) -> Result<Self, ApiError> {
        if names.is_empty() {
            return Err(ApiError::EmptySelection);
        }
        Ok(Self { names, group })
    }

    /// `names` carries a JSON array of raw names, `group` the picker value.
    pub fn form_fields(&self) -> [(&'static str, String); 2] {
        let names = serde_json::Value::from(self.names.clone()).to_string();
        [("names", names), ("group", self.group.form_value())]
    }
}

impl ApiClient {
    /// Create a new API client
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Return the body of a successful response, or a status error.
    async fn check_response(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.text().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Fetch the full roster.
    pub async fn fetch_roster(&self) -> Result<Vec<RosterEntry>, ApiError> {
        debug!(url = %self.endpoint, "Fetching roster");

        let response = self
            .client
            .get(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let body = Self::check_response(response).await?;
        let entries = parse_roster_body(&body)?;

        info!(count = entries.len(), "Roster fetched");
        Ok(entries)
    }

    /// Submit checked names with an optional group reassignment.
    pub async fn submit(&self, request: &SubmitRequest) -> Result<SubmitOutcome, ApiError> {
        debug!(count = request.names.len(), group = %request.group.form_value(), "Submitting attendance");

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .form(&request.form_fields())
            .send()
            .await?;

        let body = Self::check_response(response).await?;
        let outcome = parse_submit_body(&body)?;

        if !outcome.missing.is_empty() {
            warn!(missing = ?outcome.missing, "Endpoint did not find some names");
        }
        info!(updated = outcome.updated.len(), "Attendance submitted");
        Ok(outcome)
    }
}

/// Interpret a roster response body.
pub fn parse_roster_body(body: &str) -> Result<Vec<RosterEntry>, ApiError> {
    let resp: RosterResponse = serde_json::from_str(body)
        .map_err(|_| ApiError::MalformedResponse("Server did not return JSON.".to_string()))?;

    match resp.ok {
        Some(true) => Ok(resp.into_entries()),
        Some(false) => Err(ApiError::Application(
            resp.error.unwrap_or_else(|| "Failed to load".to_string()),
        )),
        None => Err(ApiError::MalformedResponse(
            "Server response is missing the ok flag.".to_string(),
        )),
    }
}

/// Interpret a submit response body.
pub fn parse_submit_body(body: &str) -> Result<SubmitOutcome, ApiError> {
    let resp: SubmitResponse = serde_json::from_str(body)
        .map_err(|_| ApiError::MalformedResponse("Server did not return JSON.".to_string()))?;

    match resp.ok {
        Some(true) => Ok(resp.into()),
        Some(false) => Err(ApiError::Application(
            resp.error.unwrap_or_else(|| "Unknown error".to_string()),
        )),
        None => Err(ApiError::MalformedResponse(
            "Server response is missing the ok flag.".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Accept one connection, capture the raw request, reply with `status`
    /// and `body`.
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/exec", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];

            loop {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            let lower = l.to_ascii_lowercase();
                            lower.strip_prefix("content-length:").map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        (url, handle)
    }

    #[test]
    fn test_parse_roster_body() {
        let entries = parse_roster_body(r#"{"ok":true,"rows":[{"name":"Ann Lee","group":"2"}]}"#).unwrap();
        assert_eq!(entries, vec![RosterEntry::new("Ann Lee", "2")]);
    }

    #[test]
    fn test_parse_roster_body_errors() {
        assert!(matches!(
            parse_roster_body("<html>oops</html>"),
            Err(ApiError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_roster_body(r#"{"rows":[]}"#),
            Err(ApiError::MalformedResponse(_))
        ));
        match parse_roster_body(r#"{"ok":false,"error":"Sheet not found"}"#) {
            Err(ApiError::Application(msg)) => assert_eq!(msg, "Sheet not found"),
            other => panic!("unexpected: {:?}", other),
        }
        match parse_roster_body(r#"{"ok":false}"#) {
            Err(ApiError::Application(msg)) => assert_eq!(msg, "Failed to load"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_submit_body() {
        let outcome = parse_submit_body(
            r#"{"ok":true,"updated":["Ann Lee"],"grouped":["Ann Lee"],"groupApplied":"4","missing":[]}"#,
        )
        .unwrap();
        assert_eq!(outcome.updated, vec!["Ann Lee".to_string()]);
        assert_eq!(outcome.group_applied.as_deref(), Some("4"));

        match parse_submit_body(r#"{"ok":false}"#) {
            Err(ApiError::Application(msg)) => assert_eq!(msg, "Unknown error"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(parse_submit_body(""), Err(ApiError::MalformedResponse(_))));
    }

    #[test]
    fn test_submit_request_fields() {
        let request = SubmitRequest::new(vec!["Ann Lee".to_string()], GroupAssignment::Unchanged).unwrap();
        assert_eq!(
            request.form_fields(),
            [("names", r#"["Ann Lee"]"#.to_string()), ("group", "none".to_string())]
        );
    }

    #[test]
    fn test_submit_request_rejects_empty_selection() {
        assert!(matches!(
            SubmitRequest::new(Vec::new(), GroupAssignment::Group(3)),
            Err(ApiError::EmptySelection)
        ));
    }

    #[tokio::test]
    async fn test_fetch_roster_over_http() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"ok":true,"rows":[{"name":"Doe, Jane","group":2},{"name":"Bob Zed","group":null}]}"#,
        );
        let client = ApiClient::new(url, Duration::from_secs(5)).unwrap();

        let entries = client.fetch_roster().await.unwrap();
        assert_eq!(
            entries,
            vec![RosterEntry::new("Doe, Jane", "2"), RosterEntry::new("Bob Zed", "")]
        );

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /exec"));
    }

    #[tokio::test]
    async fn test_fetch_roster_http_error() {
        let (url, server) = serve_once("503 Service Unavailable", "");
        let client = ApiClient::new(url, Duration::from_secs(5)).unwrap();

        match client.fetch_roster().await {
            Err(ApiError::Status(msg)) => assert!(msg.starts_with("503")),
            other => panic!("unexpected: {:?}", other),
        }
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_submit_sends_form_body() {
        let (url, server) = serve_once("200 OK", r#"{"ok":true,"updated":["Ann Lee"]}"#);
        let client = ApiClient::new(url, Duration::from_secs(5)).unwrap();
        let request = SubmitRequest::new(vec!["Ann Lee".to_string()], GroupAssignment::Unchanged).unwrap();

        let outcome = client.submit(&request).await.unwrap();
        assert_eq!(outcome.status_message(), "Saved. Updated attendance: Ann Lee.");

        let raw = server.join().unwrap();
        assert!(raw.starts_with("POST /exec"));
        assert!(raw.to_ascii_lowercase().contains("content-type: application/x-www-form-urlencoded"));
        assert!(raw.ends_with("names=%5B%22Ann+Lee%22%5D&group=none"));
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/exec", listener.local_addr().unwrap());
        // Accept and hold the connection without answering.
        let holder = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_millis(800));
            drop(stream);
        });

        let client = ApiClient::new(url, Duration::from_millis(150)).unwrap();
        assert!(matches!(client.fetch_roster().await, Err(ApiError::Timeout)));
        holder.join().unwrap();
    }
}
