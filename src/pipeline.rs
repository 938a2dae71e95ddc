// src/pipeline.rs
//! Pipeline Orchestrator.
//!
//! Fetching -> ParsingFiltering -> ScoringClassifying -> RankingAggregating -> Done
//!
//! Each stage sees the full output of the previous one (batch, not streaming).
//! The run ends in `NoContent` when the filter stage would receive nothing,
//! i.e. no source produced a parsable record.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use metrics::{counter, gauge};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analyze::{score_classify_rank, Classifier};
use crate::article::Article;
use crate::batch::Batch;
use crate::config::DigestConfig;
use crate::error::PipelineError;
use crate::ingest::executor::{FetchExecutor, FetchStatus, SourceFetch};
use crate::ingest::parser::parse_record;
use crate::ingest::transport::HttpTransport;
use crate::ingest::types::{FeedTransport, SourceRegistry};
use crate::metrics::ensure_metrics_described;
use crate::relevance::RelevanceFilter;
use crate::translate::Translator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Fetching,
    ParsingFiltering,
    ScoringClassifying,
    RankingAggregating,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReport {
    pub source: String,
    #[serde(flatten)]
    pub status: FetchStatus,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub target_date: Option<NaiveDate>,
    pub sources: Vec<SourceReport>,
    pub records: usize,
    pub parsed: usize,
    pub dropped: usize,
    pub filtered_out: usize,
    pub deduplicated: usize,
    pub translate_failures: usize,
    pub kept: usize,
    /// Stages entered, in order.
    pub stages: Vec<PipelineStage>,
}

impl RunReport {
    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|s| !s.status.is_ok())
    }

    pub fn final_stage(&self) -> Option<PipelineStage> {
        self.stages.last().copied()
    }

    fn enter(&mut self, stage: PipelineStage) {
        debug!(target: "pipeline", ?stage, "stage");
        self.stages.push(stage);
    }
}

#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    /// Possibly empty (everything filtered out); still a valid result.
    Done { batch: Batch, report: RunReport },
    /// No source produced usable content.
    NoContent(RunReport),
}

impl PipelineOutcome {
    pub fn batch(&self) -> Option<&Batch> {
        match self {
            PipelineOutcome::Done { batch, .. } => Some(batch),
            PipelineOutcome::NoContent(_) => None,
        }
    }

    pub fn report(&self) -> &RunReport {
        match self {
            PipelineOutcome::Done { report, .. } => report,
            PipelineOutcome::NoContent(report) => report,
        }
    }

    pub fn is_no_content(&self) -> bool {
        matches!(self, PipelineOutcome::NoContent(_))
    }
}

pub struct Pipeline {
    registry: SourceRegistry,
    executor: FetchExecutor,
    filter: RelevanceFilter,
    classifier: Classifier,
    translator: Option<Arc<dyn Translator>>,
}

impl Pipeline {
    pub fn new(
        registry: SourceRegistry,
        executor: FetchExecutor,
        filter: RelevanceFilter,
        classifier: Classifier,
    ) -> Self {
        Self {
            registry,
            executor,
            filter,
            classifier,
            translator: None,
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Validated config + HTTP transport.
    pub fn from_config(cfg: &DigestConfig) -> Result<Self, PipelineError> {
        let transport = HttpTransport::new(&cfg.fetch.user_agent, cfg.fetch.timeout())?;
        Self::from_config_with_transport(cfg, Arc::new(transport))
    }

    /// Validated config + caller-supplied transport (fixtures, tests).
    pub fn from_config_with_transport(
        cfg: &DigestConfig,
        transport: Arc<dyn FeedTransport>,
    ) -> Result<Self, PipelineError> {
        cfg.validate()?;
        let executor = FetchExecutor::new(transport)
            .with_timeout(cfg.fetch.timeout())
            .with_max_concurrency(cfg.fetch.max_concurrency);
        Ok(Self::new(
            cfg.registry()?,
            executor,
            cfg.relevance_filter()?,
            cfg.classifier()?,
        ))
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// One full run. `target_date` is carried into the batch; the core does
    /// not filter by it (see `Batch::published_on`).
    pub async fn run(&self, target_date: Option<NaiveDate>) -> PipelineOutcome {
        ensure_metrics_described();
        let mut report = RunReport {
            target_date,
            ..Default::default()
        };

        // --- Fetching ---
        report.enter(PipelineStage::Fetching);
        let fetched = self.executor.fetch_all(&self.registry).await;
        report.sources = fetched.iter().map(source_report).collect();
        report.records = fetched.iter().map(|f| f.records.len()).sum();

        // --- Parsing / Filtering ---
        report.enter(PipelineStage::ParsingFiltering);
        let parsed = parse_all(&fetched, &mut report);
        if parsed.is_empty() {
            report.enter(PipelineStage::Failed);
            warn!(
                target: "pipeline",
                sources = report.sources.len(),
                failed = report.failed_sources().count(),
                "no content available"
            );
            return PipelineOutcome::NoContent(report);
        }

        let (relevant, rejected) = self.filter.retain(parsed);
        report.filtered_out = rejected;
        counter!("digest_filtered_total").increment(rejected as u64);

        let relevant = dedup_by_key(relevant, &mut report);
        let relevant = self.localize(relevant, &mut report).await;

        // --- Scoring / Classifying (+ rank) ---
        report.enter(PipelineStage::ScoringClassifying);
        let ranked = score_classify_rank(relevant, &self.classifier);

        // --- Ranking / Aggregating ---
        report.enter(PipelineStage::RankingAggregating);
        let batch = Batch::from_ranked(ranked, target_date);
        report.kept = batch.articles.len();
        counter!("digest_articles_total").increment(report.kept as u64);
        gauge!("digest_last_run_ts").set(chrono::Utc::now().timestamp() as f64);

        report.enter(PipelineStage::Done);
        info!(
            target: "pipeline",
            kept = report.kept,
            filtered = report.filtered_out,
            dedup = report.deduplicated,
            dropped = report.dropped,
            avg_hot = batch.stats.avg_hot_score,
            "digest run complete"
        );
        PipelineOutcome::Done { batch, report }
    }

    async fn localize(&self, articles: Vec<Article>, report: &mut RunReport) -> Vec<Article> {
        let Some(translator) = self.translator.clone() else {
            return articles;
        };
        let timeout = self.executor.timeout();

        let results: Vec<(Article, bool)> = stream::iter(articles)
            .map(|a| translate_one(translator.as_ref(), a, timeout))
            .buffered(8)
            .collect()
            .await;

        let mut out = Vec::with_capacity(results.len());
        for (a, ok) in results {
            if !ok {
                report.translate_failures += 1;
            }
            out.push(a);
        }
        out
    }
}

fn source_report(f: &SourceFetch) -> SourceReport {
    SourceReport {
        source: f.source.name.clone(),
        status: f.status.clone(),
        elapsed_ms: f.elapsed.as_millis() as u64,
    }
}

/// Parse every record of every source, registry order then feed order.
fn parse_all(fetched: &[SourceFetch], report: &mut RunReport) -> Vec<Article> {
    let mut out = Vec::new();
    for f in fetched {
        for rec in &f.records {
            match parse_record(rec, &f.source.name) {
                Some(a) => out.push(a),
                None => {
                    debug!(target: "ingest", source = %f.source.name, "record dropped: missing title or link");
                    report.dropped += 1;
                }
            }
        }
    }
    report.parsed = out.len();
    counter!("digest_parse_dropped_total").increment(report.dropped as u64);
    out
}

/// Collapse articles sharing (source, id); first occurrence wins.
fn dedup_by_key(articles: Vec<Article>, report: &mut RunReport) -> Vec<Article> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut keep = Vec::with_capacity(articles.len());
    for a in articles {
        if seen.insert((a.source.clone(), a.id.clone())) {
            keep.push(a);
        } else {
            report.deduplicated += 1;
        }
    }
    counter!("digest_dedup_total").increment(report.deduplicated as u64);
    keep
}

/// Fill localized fields; on error or timeout fall back to the original text.
async fn translate_one(
    translator: &dyn Translator,
    mut article: Article,
    timeout: Duration,
) -> (Article, bool) {
    let res = tokio::time::timeout(timeout, translator.translate(&article.title, &article.body)).await;
    let ok = match res {
        Ok(Ok(loc)) => {
            article.title_localized = Some(loc.title);
            article.body_localized = Some(loc.body);
            true
        }
        Ok(Err(e)) => {
            warn!(target: "pipeline", translator = translator.name(), id = %article.id, error = %e, "translation failed");
            false
        }
        Err(_) => {
            warn!(target: "pipeline", translator = translator.name(), id = %article.id, "translation timed out");
            false
        }
    };
    if !ok {
        counter!("digest_translate_errors_total").increment(1);
        article.title_localized = Some(article.title.clone());
        article.body_localized = Some(article.body.clone());
    }
    (article, ok)
}
