use std::time::Duration;

use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::{debug, info, warn};

use super::SourceError;
use crate::config::SourceConfig;
use crate::model::{Event, MarkRecord, Snapshot, Student};

/// Attempts per endpoint, the first one included
const MAX_ATTEMPTS: usize = 3;

/// Fetches the three record collections from a results API.
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
    token: String,
    config: SourceConfig,
}

impl HttpSource {
    pub fn new(
        config: SourceConfig,
        token: String,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mark-tally/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            token,
            config,
        })
    }

    /// Fetch students, events and marks concurrently.
    ///
    /// All three must succeed; a partial snapshot is never returned.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, SourceError> {
        let (students, events, marks) = futures::try_join!(
            self.get_json::<Vec<Student>>(&self.config.students_path),
            self.get_json::<Vec<Event>>(&self.config.events_path),
            self.get_json::<Vec<MarkRecord>>(&self.config.marks_path),
        )?;

        info!(
            students = students.len(),
            events = events.len(),
            marks = marks.len(),
            "Fetched snapshot"
        );
        Ok(Snapshot {
            students,
            events,
            marks,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = self.config.url_for(path);

        // Retry strategy: exponential backoff with 3 attempts
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(5))
            .take(MAX_ATTEMPTS - 1);

        let body = RetryIf::spawn(
            retry_strategy,
            || self.get_once(&url),
            |e: &SourceError| {
                let transient = e.is_transient();
                if transient {
                    warn!(url = %url, error = %e, "Request failed, retrying");
                }
                transient
            },
        )
        .await?;

        serde_json::from_str(&body).map_err(|source| SourceError::Parse {
            origin: url.clone(),
            source,
        })
    }

    async fn get_once(&self, url: &str) -> Result<String, SourceError> {
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.text().await?)
    }

    async fn check_response(response: Response) -> Result<Response, SourceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SourceError::from_status(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve canned responses keyed by request path, counting requests.
    async fn serve(routes: Vec<(&'static str, u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let routes = routes.clone();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let mut request = Vec::new();
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        let n = stream.read(&mut buf).await.unwrap_or(0);
                        if n == 0 {
                            break;
                        }
                        request.extend_from_slice(&buf[..n]);
                    }
                    let text = String::from_utf8_lossy(&request);
                    let path = text.split_whitespace().nth(1).unwrap_or("/").to_string();
                    let (status, body) = routes
                        .iter()
                        .find(|(p, _, _)| *p == path)
                        .map(|(_, s, b)| (*s, *b))
                        .unwrap_or((404, "missing"));
                    let response = format!(
                        "HTTP/1.1 {} X\r\n\
                         Content-Type: application/json\r\n\
                         Content-Length: {}\r\n\
                         Connection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        (format!("http://{}", addr), hits)
    }

    fn source(base_url: String) -> HttpSource {
        let config = SourceConfig {
            base_url,
            ..Default::default()
        };
        HttpSource::new(config, "secret".to_string(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_snapshot() {
        let (base, _) = serve(vec![
            ("/students", 200, r#"[{"id": 1, "name": "Ada", "region": "North"}]"#),
            ("/events", 200, r#"[{"id": "e1", "name": "Vault"}]"#),
            ("/marks", 200, r#"[{"student_id": 1, "event_id": "e1", "round1": {"E1": "9.5"}}]"#),
        ])
        .await;

        let snapshot = source(base).fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.students.len(), 1);
        assert_eq!(snapshot.events[0].name, "Vault");
        assert_eq!(snapshot.marks[0].final_score(), 9.5);
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let (base, hits) = serve(vec![
            ("/students", 401, "bad token"),
            ("/events", 200, "[]"),
            ("/marks", 200, "[]"),
        ])
        .await;

        let err = source(base).get_json::<Vec<Student>>("/students").await.unwrap_err();
        assert!(matches!(err, SourceError::Unauthorized));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_error_retries_then_fails() {
        let (base, hits) = serve(vec![("/marks", 503, "busy")]).await;

        let err = source(base).get_json::<Vec<MarkRecord>>("/marks").await.unwrap_err();
        assert!(matches!(err, SourceError::Server(_)));
        assert_eq!(hits.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let (base, _) = serve(vec![("/events", 200, r#"{"not": "a list"}"#)]).await;

        let err = source(base).get_json::<Vec<Event>>("/events").await.unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }
}
