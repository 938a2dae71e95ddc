// src/ingest/types.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One configured content origin. Immutable once the registry is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,     // e.g., "TechCrunch"
    pub endpoint: String, // feed URL
    pub category: String, // source-category tag, e.g. "科技媒体"
}

impl Source {
    pub fn new(name: &str, endpoint: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            endpoint: endpoint.to_string(),
            category: category.to_string(),
        }
    }
}

/// Ordered, name-unique set of sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRegistry {
    sources: Vec<Source>,
}

impl SourceRegistry {
    /// Build a registry, rejecting blank entries and duplicate names.
    /// An empty list is accepted here; config validation decides whether that is fatal.
    pub fn new(sources: Vec<Source>) -> Result<Self, ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for s in &sources {
            if s.name.trim().is_empty() || s.endpoint.trim().is_empty() {
                return Err(ConfigError::InvalidSource(format!(
                    "name={:?} endpoint={:?}",
                    s.name, s.endpoint
                )));
            }
            if !seen.insert(s.name.to_ascii_lowercase()) {
                return Err(ConfigError::DuplicateSource(s.name.clone()));
            }
        }
        Ok(Self { sources })
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn get(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// One unparsed feed entry, in feed order. Fields are raw (markup intact).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub pub_date: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
}

/// Retrieves the raw feed document for a source.
#[async_trait::async_trait]
pub trait FeedTransport: Send + Sync {
    async fn fetch_body(&self, source: &Source) -> Result<String>;
    fn name(&self) -> &'static str;
}
