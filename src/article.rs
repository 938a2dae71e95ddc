// src/article.rs
//! The normalized unit of content produced by the item parser and enriched
//! in place by the later pipeline stages.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Publication time: UTC when the feed value parsed, otherwise the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Published {
    Utc(DateTime<Utc>),
    Raw(String),
}

impl Published {
    /// Parse an RFC 2822 feed timestamp (`Tue, 11 Feb 2026 10:30:00 +0000`).
    /// Anything else is retained verbatim (trimmed).
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match DateTime::parse_from_rfc2822(raw) {
            Ok(dt) => Published::Utc(dt.with_timezone(&Utc)),
            Err(_) => Published::Raw(raw.to_string()),
        }
    }

    pub fn as_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Published::Utc(dt) => Some(*dt),
            Published::Raw(_) => None,
        }
    }

    /// `true` if this timestamp falls on `date` (UTC). Raw values match when
    /// they start with the `YYYY-MM-DD` form of the date.
    pub fn is_on(&self, date: NaiveDate) -> bool {
        match self {
            Published::Utc(dt) => dt.date_naive() == date,
            Published::Raw(s) => s.starts_with(&date.format("%Y-%m-%d").to_string()),
        }
    }
}

impl std::fmt::Display for Published {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Published::Utc(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Published::Raw(s) => f.write_str(s),
        }
    }
}

/// Engagement counters. Feeds carry none of these, so they default to zero;
/// `impressions` is optional because a source may not report it at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
    pub impressions: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Last URL path segment, at most 50 chars. Unique per (source, id) only.
    pub id: String,
    pub title: String,
    /// Markup-free description.
    pub body: String,
    pub title_localized: Option<String>,
    pub body_localized: Option<String>,
    /// Source name (back-reference into the registry).
    pub source: String,
    pub author: String,
    /// First `<category>` of the feed item, empty when absent.
    pub feed_category: String,
    pub published: Published,
    pub url: String,
    pub metrics: EngagementMetrics,

    // Derived by the analysis stages.
    pub category: Option<String>,
    pub confidence: f64,
    pub hot_score: f64,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub urls: Vec<String>,
}

impl Article {
    /// Text used for classification and extraction.
    pub fn text(&self) -> String {
        format!("{}\n\n{}", self.title, self.body)
    }

    /// Text used by the relevance gate.
    pub fn relevance_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }

    /// Dedup key within a batch.
    pub fn key(&self) -> (&str, &str) {
        (self.source.as_str(), self.id.as_str())
    }
}
