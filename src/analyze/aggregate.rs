//! Batch statistics. Pure; reads the articles only.

use std::collections::BTreeMap;

use crate::article::Article;
use crate::batch::Stats;

pub fn aggregate(articles: &[Article]) -> Stats {
    let mut dist: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_hot = 0.0f64;

    for a in articles {
        total_hot += a.hot_score;
        if let Some(c) = &a.category {
            *dist.entry(c.clone()).or_insert(0) += 1;
        }
    }

    // empty batch: mean is defined as 0
    let avg = if articles.is_empty() {
        0.0
    } else {
        total_hot / articles.len() as f64
    };

    Stats {
        total: articles.len(),
        category_distribution: dist,
        avg_hot_score: avg,
        total_hot_score: total_hot,
    }
}
