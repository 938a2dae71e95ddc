//! Demo: one digest run over the configured feeds, stats printed as JSON
//! followed by the top-ranked articles.
//!
//! Config comes from $DIGEST_CONFIG_PATH / config/digest.toml / built-in seed.
//! Set DIGEST_TRANSLATE=1 to attach the phrase-table translator.

use std::sync::Arc;

use ai_news_digest::batch::DEFAULT_TOP_N;
use ai_news_digest::translate::PhraseTableTranslator;
use ai_news_digest::{load_config_default, Pipeline, PipelineOutcome};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op otherwise.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = load_config_default()?;
    let mut pipeline = Pipeline::from_config(&cfg)?;
    if std::env::var("DIGEST_TRANSLATE").is_ok_and(|v| v == "1") {
        pipeline = pipeline.with_translator(Arc::new(PhraseTableTranslator::default_table()));
    }

    let today = chrono::Local::now().date_naive();
    match pipeline.run(Some(today)).await {
        PipelineOutcome::Done { batch, report } => {
            println!("{}", serde_json::to_string_pretty(&batch.stats)?);
            for a in batch.top_n(DEFAULT_TOP_N) {
                println!(
                    "[{}] {} ({}, hot {:.1})",
                    a.category.as_deref().unwrap_or("-"),
                    a.title,
                    a.source,
                    a.hot_score
                );
            }
            tracing::info!(failed_sources = report.failed_sources().count(), "done");
        }
        PipelineOutcome::NoContent(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            anyhow::bail!("no content available");
        }
    }
    Ok(())
}
