//! Search client: jittered dispatch, error mapping, result normalization

use crate::SearchConfig;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};
use verity_domain::search::{ProviderResponse, SearchQuery};
use verity_domain::text::clip;
use verity_domain::traits::SearchBackend;
use verity_domain::SourceRecord;

/// Map a provider-reported error code to a human-readable message.
///
/// The catalog is fixed; anything outside it reads as an unknown API error.
fn catalog_message(code: &str) -> &'static str {
    match code {
        "42" => "Invalid API credentials",
        "32" => "Request quota exceeded",
        "55" => "Requests-per-second limit exceeded",
        "15" => "No search results",
        _ => "Unknown API error",
    }
}

/// Client over a [`SearchBackend`] that never fails its caller.
///
/// Each call sleeps a uniform random delay within the configured range
/// before dispatch (burst avoidance against the provider), then maps every
/// outcome (transport failure, provider domain error, zero hits, real
/// hits) to a non-empty `Vec<SourceRecord>`.
pub struct SearchClient<B> {
    backend: B,
    config: SearchConfig,
}

impl<B> SearchClient<B>
where
    B: SearchBackend,
{
    /// Create a client over the given backend
    pub fn new(backend: B, config: SearchConfig) -> Self {
        Self { backend, config }
    }

    /// Search for evidence on a query; always returns at least one record
    pub async fn search(&self, query_text: &str) -> Vec<SourceRecord> {
        self.jitter().await;

        let query = SearchQuery::relevance(
            query_text,
            self.config.max_passages,
            self.config.max_results as u32,
        );

        debug!("Dispatching search: {}", clip(query_text, 50));

        match self.backend.fetch(&query).await {
            Ok(response) => self.normalize(query_text, response),
            Err(e) => {
                warn!("Search transport failure: {}", e);
                vec![SourceRecord::placeholder(
                    "Search temporarily unavailable",
                    "Temporary technical difficulties. Please try again later",
                )]
            }
        }
    }

    /// Sleep a uniform random delay within the configured range.
    ///
    /// An inverted range (min above max, possible when a config skipped
    /// validation) is treated as if its bounds were swapped; dispatch must
    /// never panic mid-pipeline over a delay setting.
    async fn jitter(&self) {
        let low = self.config.min_delay_ms.min(self.config.max_delay_ms);
        let high = self.config.min_delay_ms.max(self.config.max_delay_ms);
        if high == 0 {
            return;
        }
        let delay_ms = {
            let mut rng = rand::thread_rng();
            rng.gen_range(low..=high)
        };
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    /// Turn a provider response document into bounded source records
    fn normalize(&self, query_text: &str, response: ProviderResponse) -> Vec<SourceRecord> {
        if let Some(error) = response.error {
            warn!(
                "Provider error (code {}): {}",
                error.code,
                clip(&error.message, 120)
            );
            return vec![SourceRecord::placeholder(
                catalog_message(&error.code),
                &format!("Code {}: {}", error.code, error.message),
            )];
        }

        let records: Vec<SourceRecord> = response
            .results
            .into_iter()
            .filter_map(|hit| {
                // Hits without a URL are unusable as evidence
                let url = hit.url?;
                let title = hit.title.unwrap_or_else(|| "Untitled".to_string());
                let snippet = hit
                    .passages
                    .iter()
                    .take(self.config.max_passages as usize)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(" ");
                Some(SourceRecord::new(&title, &url, &snippet))
            })
            .take(self.config.max_results)
            .collect();

        if records.is_empty() {
            info!("No hits for query: {}", clip(query_text, 80));
            return vec![SourceRecord::placeholder(
                "No information found",
                &format!("Nothing was found for \"{}\"", clip(query_text, 200)),
            )];
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockBackend;
    use verity_domain::search::{ProviderError, ProviderHit};

    fn client(backend: MockBackend) -> SearchClient<MockBackend> {
        SearchClient::new(backend, SearchConfig::no_delay())
    }

    fn hit(title: &str, url: &str, passages: &[&str]) -> ProviderHit {
        ProviderHit {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            passages: passages.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_zero_hits_yields_not_found_placeholder() {
        let client = client(MockBackend::always(ProviderResponse::default()));

        let records = client.search("Event E occurred on date D").await;
        assert_eq!(records.len(), 1);
        assert!(records[0].is_placeholder());
        assert_eq!(records[0].title, "No information found");
        assert!(records[0].snippet.contains("Event E occurred on date D"));
    }

    #[tokio::test]
    async fn test_catalogued_error_code_maps_to_message() {
        let response = ProviderResponse {
            error: Some(ProviderError {
                code: "32".to_string(),
                message: "daily quota reached".to_string(),
            }),
            results: vec![],
        };
        let client = client(MockBackend::always(response));

        let records = client.search("q").await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Request quota exceeded");
        assert!(records[0].snippet.contains("Code 32"));
    }

    #[tokio::test]
    async fn test_uncatalogued_code_maps_to_generic_message() {
        let response = ProviderResponse {
            error: Some(ProviderError {
                code: "999".to_string(),
                message: "???".to_string(),
            }),
            results: vec![],
        };
        let client = client(MockBackend::always(response));

        let records = client.search("q").await;
        assert_eq!(records[0].title, "Unknown API error");
    }

    #[tokio::test]
    async fn test_transport_failure_degrades_to_placeholder() {
        let client = client(MockBackend::always_failing("timed out"));

        let records = client.search("q").await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Search temporarily unavailable");
    }

    #[tokio::test]
    async fn test_hits_are_normalized_and_capped() {
        let response = ProviderResponse {
            error: None,
            results: (0..8)
                .map(|i| hit(&format!("title {}", i), "https://a.example", &["p1", "p2", "p3"]))
                .collect(),
        };
        let client = client(MockBackend::always(response));

        let records = client.search("q").await;
        assert_eq!(records.len(), 5); // max_results default
        assert!(!records[0].is_placeholder());
        // only max_passages (2) passages are joined
        assert_eq!(records[0].snippet, "p1 p2");
    }

    #[tokio::test]
    async fn test_hit_without_url_is_skipped() {
        let response = ProviderResponse {
            error: None,
            results: vec![
                ProviderHit {
                    title: Some("no url".to_string()),
                    url: None,
                    passages: vec![],
                },
                hit("good", "https://a.example", &["p"]),
            ],
        };
        let client = client(MockBackend::always(response));

        let records = client.search("q").await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "good");
    }

    #[tokio::test]
    async fn test_long_fields_are_capped() {
        let long_title = "t".repeat(600);
        let long_passage = "s".repeat(900);
        let response = ProviderResponse {
            error: None,
            results: vec![hit(&long_title, "https://a.example", &[&long_passage])],
        };
        let client = client(MockBackend::always(response));

        let records = client.search("q").await;
        assert_eq!(records[0].title.chars().count(), 250);
        assert_eq!(records[0].snippet.chars().count(), 500);
    }

    #[tokio::test]
    async fn test_inverted_delay_range_still_dispatches() {
        let mut config = SearchConfig::no_delay();
        config.min_delay_ms = 2;
        config.max_delay_ms = 1;
        let client = SearchClient::new(MockBackend::always(ProviderResponse::default()), config);

        let records = client.search("q").await;
        assert_eq!(records.len(), 1);
        assert!(records[0].is_placeholder());
    }

    #[tokio::test]
    async fn test_query_document_shape() {
        let backend = MockBackend::always(ProviderResponse::default());
        let client = client(backend.clone());

        client.search("the claim").await;

        let queries = backend.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].text, "the claim");
        assert_eq!(queries[0].sort_by, "relevance");
        assert_eq!(queries[0].max_passages, 2);
    }
}
