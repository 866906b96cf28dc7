//! Per-claim evidence gathering

use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};
use verity_domain::traits::SearchBackend;
use verity_domain::{Claim, EvidenceBundle, SourceRecord};
use verity_search::SearchClient;

/// Gathers evidence for each claim through the search client.
///
/// Calls are serialized by default (`concurrency = 1`) to respect provider
/// rate limits; the bound can be widened to K in-flight. Bundle order
/// always matches claim order, and per-claim failure is already absorbed
/// inside the search client, so every claim ends up with at least one
/// record.
pub struct EvidenceGatherer<B> {
    search: Arc<SearchClient<B>>,
    concurrency: usize,
}

impl<B> EvidenceGatherer<B>
where
    B: SearchBackend + 'static,
{
    /// Create a gatherer over the shared search client
    pub fn new(search: Arc<SearchClient<B>>, concurrency: usize) -> Self {
        Self {
            search,
            concurrency: concurrency.max(1),
        }
    }

    /// Gather evidence for every claim, in claim order
    pub async fn gather(&self, claims: &[Claim]) -> EvidenceBundle {
        let mut bundle = EvidenceBundle::new();
        if claims.is_empty() {
            return bundle;
        }

        if self.concurrency == 1 {
            for claim in claims {
                let sources = self.search.search(&claim.text).await;
                bundle.insert(claim.clone(), sources);
            }
        } else {
            for (claim, sources) in self.gather_bounded(claims).await {
                bundle.insert(claim, sources);
            }
        }

        info!(
            "Gathered evidence for {} claims ({} real sources)",
            bundle.len(),
            bundle.total_real_sources()
        );
        bundle
    }

    /// Gather with up to `concurrency` searches in flight, preserving order
    async fn gather_bounded(&self, claims: &[Claim]) -> Vec<(Claim, Vec<SourceRecord>)> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();

        for (idx, claim) in claims.iter().cloned().enumerate() {
            let search = Arc::clone(&self.search);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                // A closed semaphore is unreachable here; treat it as no permit.
                let _permit = semaphore.acquire().await;
                let sources = search.search(&claim.text).await;
                (idx, claim, sources)
            });
        }

        let mut slots: Vec<Option<(Claim, Vec<SourceRecord>)>> = vec![None; claims.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, claim, sources)) => slots[idx] = Some((claim, sources)),
                Err(e) => warn!("Evidence task failed to join: {}", e),
            }
        }

        // A panicked task leaves its slot empty; the claim still gets a record.
        slots
            .into_iter()
            .enumerate()
            .map(|(idx, slot)| {
                slot.unwrap_or_else(|| {
                    (
                        claims[idx].clone(),
                        vec![SourceRecord::placeholder(
                            "Search temporarily unavailable",
                            "Temporary technical difficulties. Please try again later",
                        )],
                    )
                })
            })
            .collect()
    }
}
