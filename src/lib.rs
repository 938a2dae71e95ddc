// src/lib.rs
// Public library surface for integration tests and the demo binary.

pub mod analyze;
pub mod article;
pub mod batch;
pub mod config;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod pipeline;
pub mod relevance;
pub mod translate;

// ---- Re-exports for stable public API ----
pub use crate::article::{Article, EngagementMetrics, Published};
pub use crate::batch::{Batch, Stats};
pub use crate::config::{load_config_default, load_config_from, DigestConfig};
pub use crate::error::{ConfigError, PipelineError};
pub use crate::pipeline::{Pipeline, PipelineOutcome, PipelineStage, RunReport};
pub use crate::translate::{Localized, Translator};
