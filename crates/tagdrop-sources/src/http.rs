//! HTTP tag-document source.

use async_trait::async_trait;
use tracing::instrument;

use tagdrop_core::error::SourceError;
use tagdrop_core::model::TagRecord;
use tagdrop_core::traits::{parse_tag_document, TagSource};

use crate::config::FetchConfig;

/// Fetches a JSON tag document over HTTP.
pub struct HttpSource {
    url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str, config: &FetchConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .expect("failed to build HTTP client");

        Self {
            url: url.to_string(),
            timeout_secs: config.timeout_secs,
            client,
        }
    }
}

#[async_trait]
impl TagSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_tags(&self) -> Result<Vec<TagRecord>, SourceError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout_secs)
            } else {
                SourceError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        let records = parse_tag_document(&body)?;
        tracing::debug!(count = records.len(), "fetched tag document");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> HttpSource {
        HttpSource::new(&format!("{}/tags.json", server.uri()), &FetchConfig::default())
    }

    #[tokio::test]
    async fn successful_fetch() {
        let server = MockServer::start().await;

        let body = serde_json::json!([
            {"text": "good form", "correct": true, "feedback": "well balanced"},
            {"text": "AI", "correct": false, "feedback": "painted by hand"}
        ]);
        Mock::given(method("GET"))
            .and(path("/tags.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let records = source_for(&server).fetch_tags().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "good form");
        assert!(records[0].correct);
        assert!(!records[1].correct);
    }

    #[tokio::test]
    async fn not_found_is_a_permanent_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tags.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_tags().await.unwrap_err();
        assert!(matches!(err, SourceError::Http { status: 404, .. }));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn server_errors_are_transient() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tags.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_tags().await.unwrap_err();
        assert!(matches!(err, SourceError::Http { status: 503, .. }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tags.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_tags().await.unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }
}
