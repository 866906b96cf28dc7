//! Search backend implementations
//!
//! `HttpBackend` performs the real provider round-trip; `MockBackend`
//! returns canned response documents for tests.

use crate::{SearchConfig, SearchError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use verity_domain::search::{ProviderResponse, SearchQuery};
use verity_domain::traits::SearchBackend;

/// HTTP transport to the search provider.
///
/// Posts the structured query document as JSON with the API key attached;
/// the reqwest client carries the configured fixed timeout, so a hung
/// provider surfaces as a transport error rather than a stuck pipeline.
pub struct HttpBackend {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Build a backend from the search configuration
    pub fn new(config: &SearchConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_default();

        Self {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            client,
        }
    }
}

#[async_trait]
impl SearchBackend for HttpBackend {
    type Error = SearchError;

    async fn fetch(&self, query: &SearchQuery) -> Result<ProviderResponse, Self::Error> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("apikey", self.api_key.as_str())])
            .json(query)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        response
            .json::<ProviderResponse>()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))
    }
}

/// Deterministic backend for tests: replays queued responses in order,
/// repeating the last one once the queue drains.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    responses: Arc<Mutex<VecDeque<Result<ProviderResponse, String>>>>,
    last: Arc<Mutex<Option<Result<ProviderResponse, String>>>>,
    queries: Arc<Mutex<Vec<SearchQuery>>>,
}

impl MockBackend {
    /// Create a backend that always answers with the given response
    pub fn always(response: ProviderResponse) -> Self {
        let backend = Self::default();
        backend.push(Ok(response));
        backend
    }

    /// Create a backend that always fails with a transport error
    pub fn always_failing(message: impl Into<String>) -> Self {
        let backend = Self::default();
        backend.push(Err(message.into()));
        backend
    }

    /// Queue one outcome
    pub fn push(&self, outcome: Result<ProviderResponse, String>) {
        self.responses.lock().unwrap().push_back(outcome);
    }

    /// Queries received so far, in call order
    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for MockBackend {
    type Error = SearchError;

    async fn fetch(&self, query: &SearchQuery) -> Result<ProviderResponse, Self::Error> {
        self.queries.lock().unwrap().push(query.clone());

        let outcome = {
            let mut queue = self.responses.lock().unwrap();
            match queue.pop_front() {
                Some(outcome) => {
                    *self.last.lock().unwrap() = Some(outcome.clone());
                    outcome
                }
                None => self
                    .last
                    .lock()
                    .unwrap()
                    .clone()
                    .unwrap_or(Ok(ProviderResponse::default())),
            }
        };

        outcome.map_err(SearchError::Transport)
    }
}
