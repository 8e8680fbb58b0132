use std::fmt;

use super::CorpusSource;
use crate::{BoxError, UserAgentRecord};

/// Public key-value store record holding a periodically refreshed user-agent corpus.
pub const DEFAULT_CORPUS_URL: &str = "https://api.apify.com/v2/key-value-stores/z1V7YjyftOYIqNsww/records/USER-AGENTS?disableRedirect=true";

#[derive(Debug, Clone)]
/// A [`CorpusSource`] fetching a JSON array of records with an HTTP GET request.
///
/// Non-success status codes are reported as fetch failures.
pub struct HttpCorpusSource {
    url: String,
    client: reqwest::Client,
}

impl HttpCorpusSource {
    /// Create a new [`HttpCorpusSource`] for the given url, using a default client.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    /// Create a new [`HttpCorpusSource`] using a preconfigured client,
    /// e.g. one with timeouts or a proxy configured.
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// The url fetched by this source.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpCorpusSource {
    fn default() -> Self {
        Self::new(DEFAULT_CORPUS_URL)
    }
}

impl CorpusSource for HttpCorpusSource {
    async fn fetch_corpus(&self) -> Result<Vec<UserAgentRecord>, BoxError> {
        let records = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<UserAgentRecord>>()
            .await?;
        Ok(records)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::{
        io::{AsyncReadExt as _, AsyncWriteExt as _},
        net::TcpListener,
    };

    /// Serve a single canned HTTP/1.1 response on a local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = stream.read(&mut buf).await.unwrap();
            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });
        format!("http://{addr}/records/USER-AGENTS")
    }

    #[tokio::test]
    async fn test_fetch_corpus_over_http() {
        let url = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{"userAgent":"ua-1","softwareNameCode":"chrome","operatingSystemCode":"mac","softwareVersion":91,"timeSeen":900}]"#,
        )
        .await;

        let source = HttpCorpusSource::new(url);
        let corpus = source.fetch_corpus().await.unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].user_agent, "ua-1");
        assert_eq!(corpus[0].time_seen, 900);
    }

    #[tokio::test]
    async fn test_fetch_corpus_error_status() {
        let url = serve_once("HTTP/1.1 503 Service Unavailable", "[]").await;
        let source = HttpCorpusSource::new(url);
        assert!(source.fetch_corpus().await.is_err());
    }

    #[test]
    fn test_default_url() {
        assert_eq!(HttpCorpusSource::default().url(), DEFAULT_CORPUS_URL);
    }
}
