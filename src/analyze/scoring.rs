//! Hot score and ranking.
//!
//! score = likes*1 + retweets*2 + replies*1.5 (+ impressions*0.001 when impressions > 0)

use crate::article::{Article, EngagementMetrics};

pub const W_LIKE: f64 = 1.0;
pub const W_RETWEET: f64 = 2.0;
pub const W_REPLY: f64 = 1.5;
pub const W_IMPRESSION: f64 = 0.001;

pub fn hot_score(m: &EngagementMetrics) -> f64 {
    let mut score =
        m.likes as f64 * W_LIKE + m.retweets as f64 * W_RETWEET + m.replies as f64 * W_REPLY;
    if let Some(views) = m.impressions.filter(|v| *v > 0) {
        score += views as f64 * W_IMPRESSION;
    }
    score
}

/// Stable sort by hot score, descending. Equal scores keep input order.
pub fn rank(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.hot_score.total_cmp(&a.hot_score));
}
