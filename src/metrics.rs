use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series carry descriptions once a recorder exists).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("digest_records_total", "Raw feed records fetched.");
        describe_counter!(
            "digest_fetch_errors_total",
            "Source fetches that failed, timed out or returned a malformed feed."
        );
        describe_histogram!("digest_fetch_ms", "Per-source fetch time in milliseconds.");
        describe_counter!(
            "digest_parse_dropped_total",
            "Records dropped for missing title or link."
        );
        describe_counter!(
            "digest_filtered_total",
            "Articles rejected by the relevance filter."
        );
        describe_counter!(
            "digest_dedup_total",
            "Articles collapsed by (source, id) within a batch."
        );
        describe_counter!("digest_articles_total", "Articles in produced batches.");
        describe_counter!(
            "digest_translate_errors_total",
            "Translator failures (article kept untranslated)."
        );
        describe_gauge!("digest_last_run_ts", "Unix ts when the pipeline last finished.");
    });
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install a global Prometheus recorder. Fails if one is already installed.
    pub fn install() -> Result<Self, BuildError> {
        let handle = PrometheusBuilder::new().install_recorder()?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Prometheus exposition text.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}
