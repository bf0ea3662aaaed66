//! Batch evaluation and summary statistics.
//!
//! A run takes one reference snapshot from the [`ReferenceStore`], evaluates
//! items concurrently (bounded), and reports per-item capability failures
//! next to the statistics instead of aborting.

pub mod error;
mod report;

#[cfg(test)]
mod tests;

pub use error::BatchError;
pub use report::{AggregateReport, BatchSummary, ItemFailure, QualityDistribution};

use std::path::Path;
use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::embedding::Embedder;
use crate::evaluator::QualityAggregator;
use crate::model::{EvaluationResult, Response, WeightMap};
use crate::registry::ReferenceStore;

/// One entry of a batch file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchItem {
    pub response: Response,
    #[serde(default)]
    pub query: String,
}

impl BatchItem {
    pub fn new(response: Response, query: impl Into<String>) -> Self {
        Self {
            response,
            query: query.into(),
        }
    }

    /// Decodes a JSON array of items and validates every response.
    pub fn parse_all(json: &str, path: &Path) -> Result<Vec<Self>, BatchError> {
        let items: Vec<Self> = serde_json::from_str(json).map_err(|source| BatchError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        for (index, item) in items.iter().enumerate() {
            item.response
                .validate()
                .map_err(|source| BatchError::InvalidItem { index, source })?;
        }

        Ok(items)
    }

    pub fn load_all(path: &Path) -> Result<Vec<Self>, BatchError> {
        let raw = std::fs::read_to_string(path).map_err(|source| BatchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_all(&raw, path)
    }
}

/// Evaluates many responses against the current reference snapshot.
#[derive(Debug)]
pub struct BatchRunner<E> {
    store: Arc<ReferenceStore>,
    embedder: Arc<E>,
    weights: WeightMap,
    concurrency: usize,
}

impl<E: Embedder> BatchRunner<E> {
    pub fn new(
        store: Arc<ReferenceStore>,
        embedder: Arc<E>,
        weights: WeightMap,
        concurrency: usize,
    ) -> Self {
        Self {
            store,
            embedder,
            weights,
            concurrency: concurrency.max(1),
        }
    }

    pub fn from_config(store: Arc<ReferenceStore>, embedder: Arc<E>, config: &Config) -> Self {
        Self::new(
            store,
            embedder,
            config.weights.clone(),
            config.batch_concurrency,
        )
    }

    #[inline]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Pairs response `i` with query `i`; missing queries are `""`.
    #[instrument(skip_all, fields(responses = responses.len(), queries = queries.len()))]
    pub async fn run(
        &self,
        responses: &[Response],
        queries: &[String],
    ) -> Result<AggregateReport, BatchError> {
        let pairs: Vec<(&Response, &str)> = responses
            .iter()
            .enumerate()
            .map(|(i, response)| (response, queries.get(i).map_or("", String::as_str)))
            .collect();
        self.run_pairs(&pairs).await
    }

    pub async fn run_items(&self, items: &[BatchItem]) -> Result<AggregateReport, BatchError> {
        let pairs: Vec<(&Response, &str)> = items
            .iter()
            .map(|item| (&item.response, item.query.as_str()))
            .collect();
        self.run_pairs(&pairs).await
    }

    async fn run_pairs(&self, pairs: &[(&Response, &str)]) -> Result<AggregateReport, BatchError> {
        let aggregator = QualityAggregator::new(
            Arc::clone(&self.embedder),
            self.store.snapshot(),
            self.weights.clone(),
        )?;
        let aggregator = &aggregator;

        let outcomes: Vec<_> = stream::iter(pairs.iter().enumerate())
            .map(|(index, (response, query))| async move {
                (index, aggregator.evaluate(response, query).await)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut results: Vec<EvaluationResult> = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for (index, outcome) in outcomes {
            match outcome {
                Ok(result) => results.push(result),
                Err(err) => {
                    warn!(index, error = %err, "Batch item failed");
                    failures.push(ItemFailure {
                        index,
                        error: err.to_string(),
                    });
                }
            }
        }

        let report = AggregateReport::from_results(pairs.len(), results, failures);
        info!(
            total = report.summary.total_responses,
            evaluated = report.summary.evaluated,
            failed = report.summary.failed,
            mean_overall = report.summary.mean_overall_score,
            high = report.distribution.high_quality,
            medium = report.distribution.medium_quality,
            low = report.distribution.low_quality,
            "Batch evaluated"
        );

        Ok(report)
    }
}
