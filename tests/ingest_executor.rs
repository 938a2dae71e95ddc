// tests/ingest_executor.rs
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ai_news_digest::ingest::{
    FeedTransport, FetchExecutor, FetchStatus, FixtureTransport, Source, SourceRegistry,
};
use anyhow::{bail, Result};
use async_trait::async_trait;

const FEED: &str = r#"<rss version="2.0"><channel><title>x</title>
<item><title>AI one</title><link>https://a.test/one</link></item>
<item><title>AI two</title><link>https://a.test/two</link></item>
</channel></rss>"#;

#[derive(Clone, Copy)]
enum Behavior {
    Ok,
    Fail,
    Hang,
    Garbage,
}

struct ScriptedTransport {
    script: HashMap<String, Behavior>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedTransport {
    fn new(script: &[(&str, Behavior)]) -> Self {
        Self {
            script: script.iter().map(|(n, b)| (n.to_string(), *b)).collect(),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl FeedTransport for ScriptedTransport {
    async fn fetch_body(&self, source: &Source) -> Result<String> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;

        let out = match self.script.get(&source.name).copied().unwrap_or(Behavior::Ok) {
            Behavior::Ok => Ok(FEED.to_string()),
            Behavior::Fail => Err(anyhow::anyhow!("connection refused")),
            Behavior::Garbage => Ok("<html>nope</html>".to_string()),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(FEED.to_string())
            }
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        out
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn registry(names: &[&str]) -> SourceRegistry {
    SourceRegistry::new(
        names
            .iter()
            .map(|n| Source::new(n, &format!("https://{n}.test/feed"), "media"))
            .collect(),
    )
    .unwrap()
}

#[tokio::test]
async fn one_bad_source_does_not_affect_the_others() {
    let transport = Arc::new(ScriptedTransport::new(&[
        ("b", Behavior::Fail),
        ("c", Behavior::Hang),
        ("d", Behavior::Garbage),
    ]));
    let exec = FetchExecutor::new(transport).with_timeout(Duration::from_millis(200));

    let out = exec.fetch_all(&registry(&["a", "b", "c", "d", "e"])).await;

    let names: Vec<&str> = out.iter().map(|f| f.source.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c", "d", "e"]);

    assert_eq!(out[0].status, FetchStatus::Fetched { records: 2 });
    assert!(matches!(out[1].status, FetchStatus::Failed { ref reason } if reason.contains("connection refused")));
    assert_eq!(out[2].status, FetchStatus::TimedOut);
    assert!(matches!(out[3].status, FetchStatus::Failed { .. }));
    assert_eq!(out[4].records.len(), 2);

    for f in &out[1..4] {
        assert!(f.records.is_empty());
    }
}

#[tokio::test]
async fn concurrency_is_bounded() {
    let transport = Arc::new(ScriptedTransport::new(&[]));
    let exec = FetchExecutor::new(transport.clone()).with_max_concurrency(2);

    let names: Vec<String> = (0..6).map(|i| format!("s{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let out = exec.fetch_all(&registry(&refs)).await;

    assert_eq!(out.len(), 6);
    assert!(out.iter().all(|f| f.status.is_ok()));
    let peak = transport.peak.load(Ordering::SeqCst);
    assert!((1..=2).contains(&peak), "peak in-flight was {peak}");
}

#[tokio::test]
async fn empty_registry_yields_nothing() {
    let exec = FetchExecutor::new(Arc::new(ScriptedTransport::new(&[])));
    let out = exec.fetch_all(&SourceRegistry::new(vec![]).unwrap()).await;
    assert!(out.is_empty());
}

#[test]
fn duplicate_source_names_are_rejected() {
    let err = SourceRegistry::new(vec![
        Source::new("Verge", "https://a.test", "m"),
        Source::new("verge", "https://b.test", "m"),
    ]);
    assert!(err.is_err());
}

struct AlwaysErr;

#[async_trait]
impl FeedTransport for AlwaysErr {
    async fn fetch_body(&self, _source: &Source) -> Result<String> {
        bail!("dns failure")
    }
    fn name(&self) -> &'static str {
        "always-err"
    }
}

#[tokio::test]
async fn every_source_failing_still_reports_each_one() {
    let exec = FetchExecutor::new(Arc::new(AlwaysErr));
    let out = exec.fetch_all(&registry(&["x", "y"])).await;
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|f| !f.status.is_ok()));
}

const EXTENDED_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/" xmlns:atom="http://www.w3.org/2005/Atom">
<channel>
  <title>Extended</title>
  <atom:link href="https://ext.test/feed" rel="self"/>
  <item>
    <title>Caf&eacute; robots get an AI upgrade&trade;</title>
    <link>https://ext.test/cafe-robots</link>
    <media:title>Thumbnail caption</media:title>
    <atom:link href="https://ext.test/cafe-robots?alt" rel="alternate"/>
  </item>
  <item>
    <title>Plain AI item</title>
    <link>https://ext.test/plain</link>
  </item>
</channel>
</rss>"#;

#[tokio::test]
async fn extension_elements_and_html_entities_keep_the_source_alive() {
    let transport = FixtureTransport::new().with("ext", EXTENDED_FEED);
    let exec = FetchExecutor::new(Arc::new(transport));
    let out = exec.fetch_all(&registry(&["ext"])).await;

    assert_eq!(out[0].status, FetchStatus::Fetched { records: 2 });
    let titles: Vec<&str> = out[0]
        .records
        .iter()
        .filter_map(|r| r.title.as_deref())
        .collect();
    assert_eq!(titles, vec!["Café robots get an AI upgrade™", "Plain AI item"]);
    assert_eq!(
        out[0].records[0].link.as_deref(),
        Some("https://ext.test/cafe-robots")
    );
}
