// src/services/fetch.rs

//! Single HTTP GET with bounded retry and linear backoff.
//!
//! Every fetch in the pipeline goes through here. A transport error, a
//! non-2xx status, a body-read failure, and a decode failure all consume one
//! attempt; only exhausting the whole budget surfaces an error.

use std::time::Duration;

use reqwest::{Client, header};

use crate::config::CrawlerConfig;
use crate::error::{AppError, Result};

/// Accept header for the directory API.
pub const ACCEPT_JSON: &str = "application/json";

/// Accept header for detail pages, matching a regular browser.
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Retrying wrapper around the shared HTTP client.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl Fetcher {
    pub fn new(client: Client, config: &CrawlerConfig) -> Self {
        Self {
            client,
            max_retries: config.max_retries,
            retry_delay: config.retry_delay(),
        }
    }

    /// GET `url` and decode the body, retrying up to the configured budget.
    ///
    /// Before the n-th retry the task sleeps `n * retry_delay`; the first
    /// attempt starts immediately.
    pub async fn get_with<T, F>(&self, url: &str, accept: &str, parse: F) -> Result<T>
    where
        F: Fn(&str) -> Result<T>,
    {
        let attempts = self.max_retries + 1;
        let mut last_error = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                tokio::time::sleep(self.retry_delay * attempt).await;
            }

            match self.try_get(url, accept).await.and_then(|body| parse(&body)) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    log::warn!("Attempt {}/{} failed for {}: {}", attempt + 1, attempts, url, e);
                    last_error = Some(e);
                }
            }
        }

        let message = last_error.map_or_else(|| "no attempts made".to_string(), |e| e.to_string());
        Err(AppError::fetch(url, attempts, message))
    }

    async fn try_get(&self, url: &str, accept: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, accept)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AppError::status(url, status.as_u16()));
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const OK_RESPONSE: &str = "HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok";
    const ERROR_RESPONSE: &str =
        "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n";

    /// Serve a canned response on a local port, counting connections.
    fn spawn_stub(response: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });

        (format!("http://{addr}"), hits)
    }

    fn test_fetcher(max_retries: u32) -> Fetcher {
        let config = CrawlerConfig {
            max_retries,
            retry_delay_ms: 1,
            ..CrawlerConfig::default()
        };
        Fetcher::new(Client::new(), &config)
    }

    #[tokio::test]
    async fn first_success_needs_no_retries() {
        let (url, hits) = spawn_stub(OK_RESPONSE);
        let fetcher = test_fetcher(3);

        let body = fetcher
            .get_with(&url, ACCEPT_JSON, |body| Ok(body.to_string()))
            .await
            .unwrap();

        assert_eq!(body, "ok");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausts_retry_budget_on_server_errors() {
        let (url, hits) = spawn_stub(ERROR_RESPONSE);
        let fetcher = test_fetcher(3);

        let err = fetcher
            .get_with(&url, ACCEPT_JSON, |body| Ok(body.to_string()))
            .await
            .unwrap_err();

        assert_eq!(hits.load(Ordering::SeqCst), 4);
        match err {
            AppError::Fetch { attempts, .. } => assert_eq!(attempts, 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn decode_failure_spends_attempts_too() {
        let (url, hits) = spawn_stub(OK_RESPONSE);
        let fetcher = test_fetcher(2);

        let err = fetcher
            .get_with(&url, ACCEPT_JSON, |_body| -> Result<String> {
                Err(AppError::parse("body", "forced failure"))
            })
            .await
            .unwrap_err();

        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert!(matches!(err, AppError::Fetch { attempts: 3, .. }));
    }

    #[tokio::test]
    async fn retry_delays_grow_linearly() {
        let (url, hits) = spawn_stub(ERROR_RESPONSE);
        let config = CrawlerConfig {
            max_retries: 3,
            retry_delay_ms: 120,
            ..CrawlerConfig::default()
        };
        let fetcher = Fetcher::new(Client::new(), &config);

        let start = std::time::Instant::now();
        let err = fetcher
            .get_with(&url, ACCEPT_JSON, |body| Ok(body.to_string()))
            .await
            .unwrap_err();
        let elapsed = start.elapsed();

        assert!(matches!(err, AppError::Fetch { attempts: 4, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 4);

        // The three retries sleep 120, 240, and 360 ms in turn.
        assert!(elapsed >= Duration::from_millis(720), "ran for {elapsed:?}");
        assert!(elapsed < Duration::from_millis(1080), "ran for {elapsed:?}");
    }
}
