// src/ingest/parser.rs
//! Item Parser: `RawRecord` -> `Article`, or `None` when title or link is missing.

use crate::article::{Article, EngagementMetrics, Published};
use crate::ingest::normalize_text;
use crate::ingest::types::RawRecord;

pub const MAX_ID_LEN: usize = 50;
pub const MAX_BODY_LEN: usize = 500;

/// Convert one raw feed entry. Dropped records are not errors.
pub fn parse_record(record: &RawRecord, source_name: &str) -> Option<Article> {
    let title = record
        .title
        .as_deref()
        .map(|t| normalize_text(t, usize::MAX))
        .filter(|t| !t.is_empty())?;
    let url = record
        .link
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())?
        .to_string();

    let body = record
        .description
        .as_deref()
        .map(|d| normalize_text(d, MAX_BODY_LEN))
        .unwrap_or_default();

    let published = Published::parse(record.pub_date.as_deref().unwrap_or_default());

    let author = record
        .author
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(source_name)
        .to_string();

    Some(Article {
        id: article_id(&url),
        title,
        body,
        title_localized: None,
        body_localized: None,
        source: source_name.to_string(),
        author,
        feed_category: record
            .category
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        published,
        url,
        metrics: EngagementMetrics::default(),
        category: None,
        confidence: 0.0,
        hot_score: 0.0,
        hashtags: Vec::new(),
        mentions: Vec::new(),
        urls: Vec::new(),
    })
}

/// Last non-empty path segment of the link, capped at `MAX_ID_LEN` chars.
/// Query strings and fragments are not part of the segment.
pub fn article_id(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path
        .trim_end_matches('/')
        .rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or(path);
    segment.chars().take(MAX_ID_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(title: Option<&str>, link: Option<&str>) -> RawRecord {
        RawRecord {
            title: title.map(String::from),
            link: link.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn id_is_last_segment_ignoring_trailing_slash() {
        assert_eq!(
            article_id("https://techcrunch.com/2026/02/11/gpt5-leaks/"),
            "gpt5-leaks"
        );
        assert_eq!(
            article_id("https://www.theverge.com/2026/02/11/claude-sonnet?utm=rss"),
            "claude-sonnet"
        );
    }

    #[test]
    fn id_is_truncated_to_fifty_chars() {
        let long = format!("https://x.test/{}", "a".repeat(80));
        assert_eq!(article_id(&long).chars().count(), MAX_ID_LEN);
    }

    #[test]
    fn missing_title_or_link_drops_record() {
        assert!(parse_record(&rec(None, Some("https://x.test/a")), "S").is_none());
        assert!(parse_record(&rec(Some("T"), None), "S").is_none());
        assert!(parse_record(&rec(Some("   "), Some("https://x.test/a")), "S").is_none());
        assert!(parse_record(&rec(Some("T"), Some("  ")), "S").is_none());
    }

    #[test]
    fn body_is_stripped_and_author_falls_back_to_source() {
        let r = RawRecord {
            title: Some("GPT news".into()),
            link: Some("https://x.test/2026/gpt-news".into()),
            description: Some("<p>Hello&nbsp;<b>world</b></p>".into()),
            pub_date: Some("garbage".into()),
            author: None,
            category: Some(" AI ".into()),
        };
        let a = parse_record(&r, "The Verge").unwrap();
        assert_eq!(a.id, "gpt-news");
        assert_eq!(a.body, "Hello world");
        assert_eq!(a.author, "The Verge");
        assert_eq!(a.feed_category, "AI");
        assert_eq!(a.published, Published::Raw("garbage".into()));
        assert_eq!(a.metrics, EngagementMetrics::default());
    }
}
