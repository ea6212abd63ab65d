//! Staging candidates and published trade ideas.
//!
//! Candidates are keyed by ticker: re-staging a ticker overwrites its record
//! and keeps its id. All writes go through one lock, so two scans racing on
//! the same ticker can never produce two candidates.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::info;

use crate::models::staging::{Direction, StagingCandidate, TradeIdea};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("staging candidate {0} not found")]
    CandidateNotFound(u64),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait StagingStore: Send + Sync {
    /// Insert or overwrite the candidate for `ticker`
    async fn upsert_candidate(
        &self,
        ticker: &str,
        score: f64,
        direction: Direction,
        scanned_at: DateTime<Utc>,
    ) -> StoreResult<StagingCandidate>;

    /// All candidates, ordered by ticker
    async fn list_candidates(&self) -> StoreResult<Vec<StagingCandidate>>;

    async fn get_candidate(&self, id: u64) -> StoreResult<StagingCandidate>;

    /// Remove a candidate without publishing it
    async fn discard(&self, id: u64) -> StoreResult<StagingCandidate>;

    /// Convert a candidate into an active trade idea and remove it from staging
    async fn publish(
        &self,
        id: u64,
        admin_comment: &str,
        published_at: DateTime<Utc>,
    ) -> StoreResult<TradeIdea>;

    /// Active trade ideas, newest first
    async fn trade_ideas(&self) -> StoreResult<Vec<TradeIdea>>;
}

#[derive(Default)]
struct Inner {
    candidates: BTreeMap<String, StagingCandidate>,
    ideas: Vec<TradeIdea>,
    next_candidate_id: u64,
    next_idea_id: u64,
}

impl Inner {
    fn ticker_for(&self, id: u64) -> StoreResult<String> {
        self.candidates
            .values()
            .find(|c| c.id == id)
            .map(|c| c.ticker.clone())
            .ok_or(StoreError::CandidateNotFound(id))
    }
}

/// Process-local store behind a single async mutex
#[derive(Default)]
pub struct InMemoryStagingStore {
    inner: Mutex<Inner>,
}

impl InMemoryStagingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn thesis_for(candidate: &StagingCandidate) -> String {
    format!(
        "{} scored {:.1}/10 on the five-pillar scan ({}).",
        candidate.ticker,
        candidate.score,
        candidate.direction.label()
    )
}

#[async_trait]
impl StagingStore for InMemoryStagingStore {
    async fn upsert_candidate(
        &self,
        ticker: &str,
        score: f64,
        direction: Direction,
        scanned_at: DateTime<Utc>,
    ) -> StoreResult<StagingCandidate> {
        let mut inner = self.inner.lock().await;
        let id = match inner.candidates.get(ticker) {
            Some(existing) => existing.id,
            None => {
                inner.next_candidate_id += 1;
                inner.next_candidate_id
            }
        };
        let candidate = StagingCandidate {
            id,
            ticker: ticker.to_string(),
            score,
            direction,
            scanned_at,
        };
        inner.candidates.insert(ticker.to_string(), candidate.clone());
        Ok(candidate)
    }

    async fn list_candidates(&self) -> StoreResult<Vec<StagingCandidate>> {
        Ok(self.inner.lock().await.candidates.values().cloned().collect())
    }

    async fn get_candidate(&self, id: u64) -> StoreResult<StagingCandidate> {
        let inner = self.inner.lock().await;
        let ticker = inner.ticker_for(id)?;
        inner
            .candidates
            .get(&ticker)
            .cloned()
            .ok_or(StoreError::CandidateNotFound(id))
    }

    async fn discard(&self, id: u64) -> StoreResult<StagingCandidate> {
        let mut inner = self.inner.lock().await;
        let ticker = inner.ticker_for(id)?;
        let removed = inner
            .candidates
            .remove(&ticker)
            .ok_or(StoreError::CandidateNotFound(id))?;
        info!(id, ticker = %removed.ticker, "Discarded staging candidate");
        Ok(removed)
    }

    async fn publish(
        &self,
        id: u64,
        admin_comment: &str,
        published_at: DateTime<Utc>,
    ) -> StoreResult<TradeIdea> {
        let mut inner = self.inner.lock().await;
        let ticker = inner.ticker_for(id)?;
        let candidate = inner
            .candidates
            .remove(&ticker)
            .ok_or(StoreError::CandidateNotFound(id))?;

        inner.next_idea_id += 1;
        let idea = TradeIdea {
            id: inner.next_idea_id,
            ticker: candidate.ticker.clone(),
            direction: candidate.direction,
            thesis: thesis_for(&candidate),
            admin_comment: admin_comment.trim().to_string(),
            timestamp: published_at,
            active: true,
        };
        inner.ideas.push(idea.clone());
        info!(id, idea_id = idea.id, ticker = %idea.ticker, "Published trade idea");
        Ok(idea)
    }

    async fn trade_ideas(&self) -> StoreResult<Vec<TradeIdea>> {
        let inner = self.inner.lock().await;
        let mut ideas: Vec<TradeIdea> = inner.ideas.iter().filter(|i| i.active).cloned().collect();
        ideas.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(ideas)
    }
}
