// src/batch.rs
//! Ranked, categorized article collection plus its statistics.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analyze::aggregate;
use crate::article::Article;

pub const DEFAULT_TOP_N: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    /// Only categories actually assigned in this batch.
    pub category_distribution: BTreeMap<String, usize>,
    pub avg_hot_score: f64,
    pub total_hot_score: f64,
}

/// Articles in non-increasing hot-score order; `stats.total == articles.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub target_date: Option<NaiveDate>,
    pub articles: Vec<Article>,
    pub stats: Stats,
}

impl Batch {
    /// Wrap already-ranked articles and compute their stats.
    pub fn from_ranked(articles: Vec<Article>, target_date: Option<NaiveDate>) -> Self {
        let stats = aggregate(&articles);
        Self {
            target_date,
            articles,
            stats,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// First `n` articles; stats stay those of the full batch.
    pub fn top_n(&self, n: usize) -> &[Article] {
        &self.articles[..n.min(self.articles.len())]
    }

    /// Sub-batch whose category equals `category` or starts with it.
    /// Ranking order is preserved and stats are recomputed.
    pub fn filter_by_category(&self, category: &str) -> Batch {
        self.retain_where(|a| {
            a.category
                .as_deref()
                .is_some_and(|c| c == category || c.starts_with(category))
        })
    }

    /// Caller-side date bounding: keep articles published on `date` (UTC).
    pub fn published_on(&self, date: NaiveDate) -> Batch {
        self.retain_where(|a| a.published.is_on(date))
    }

    fn retain_where(&self, keep: impl Fn(&Article) -> bool) -> Batch {
        let articles: Vec<Article> = self.articles.iter().filter(|a| keep(a)).cloned().collect();
        Batch::from_ranked(articles, self.target_date)
    }
}
