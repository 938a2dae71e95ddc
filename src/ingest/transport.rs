// src/ingest/transport.rs
use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;

use crate::ingest::types::{FeedTransport, Source};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Plain HTTP GET of the source endpoint. Non-2xx is an error.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// The client-level timeout mirrors the executor's per-source timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn fetch_body(&self, source: &Source) -> Result<String> {
        let resp = self
            .client
            .get(&source.endpoint)
            .send()
            .await
            .with_context(|| format!("{} http get()", source.name))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!(
                "{}: HTTP {} {}",
                source.name,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ));
        }
        resp.text()
            .await
            .with_context(|| format!("{} http .text()", source.name))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Serves canned feed documents keyed by source name. A source without a
/// fixture fails like an unreachable endpoint.
#[derive(Debug, Clone, Default)]
pub struct FixtureTransport {
    bodies: HashMap<String, String>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source_name: &str, body: &str) -> Self {
        self.bodies.insert(source_name.to_string(), body.to_string());
        self
    }
}

#[async_trait]
impl FeedTransport for FixtureTransport {
    async fn fetch_body(&self, source: &Source) -> Result<String> {
        self.bodies
            .get(&source.name)
            .cloned()
            .ok_or_else(|| anyhow!("no fixture for source {}", source.name))
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
