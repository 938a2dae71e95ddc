// src/relevance.rs
//! Relevance gate: keep an article when its title + body contains at least one
//! vocabulary term. Case-insensitive substring match, no tokenization, so "AI"
//! also matches inside words like "said".

use crate::article::Article;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceFilter {
    // lower-cased, blanks removed
    keywords: Vec<String>,
}

impl RelevanceFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// First matching vocabulary term, if any. Empty text never matches.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        if text.trim().is_empty() {
            return None;
        }
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .find(|k| lower.contains(k.as_str()))
            .map(String::as_str)
    }

    pub fn is_relevant(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    pub fn accepts(&self, article: &Article) -> bool {
        self.is_relevant(&article.relevance_text())
    }

    /// Keep relevant articles, preserving order. Returns (kept, rejected count).
    pub fn retain(&self, articles: Vec<Article>) -> (Vec<Article>, usize) {
        let before = articles.len();
        let kept: Vec<Article> = articles.into_iter().filter(|a| self.accepts(a)).collect();
        let rejected = before - kept.len();
        (kept, rejected)
    }
}
