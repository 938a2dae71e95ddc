// src/analyze/mod.rs
//! Scoring / classification / ranking stages over parsed, relevant articles.

pub mod aggregate;
pub mod classify;
pub mod extract;
pub mod scoring;

use crate::article::Article;

// Re-export convenient types.
pub use crate::analyze::aggregate::aggregate;
pub use crate::analyze::classify::{
    default_categories, CategorySpec, Classification, Classifier, DEFAULT_CATEGORY,
};
pub use crate::analyze::scoring::{hot_score, rank};

/// Add score, category, confidence and extracted entities. Upstream fields
/// are left untouched.
pub fn enrich(article: &mut Article, classifier: &Classifier) {
    article.hot_score = hot_score(&article.metrics);

    let text = article.text();
    let Classification {
        category,
        confidence,
    } = classifier.classify(&text);
    article.category = Some(category);
    article.confidence = confidence;

    article.hashtags = extract::hashtags(&text);
    article.mentions = extract::mentions(&text);
    article.urls = extract::urls(&text);
}

/// Enrich every article, then rank (stable, descending hot score).
pub fn score_classify_rank(mut articles: Vec<Article>, classifier: &Classifier) -> Vec<Article> {
    for a in articles.iter_mut() {
        enrich(a, classifier);
    }
    rank(&mut articles);
    articles
}
