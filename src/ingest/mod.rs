// src/ingest/mod.rs
pub mod executor;
pub mod feed;
pub mod parser;
pub mod transport;
pub mod types;

use once_cell::sync::OnceCell;
use regex::Regex;

pub use executor::{FetchExecutor, FetchStatus, SourceFetch};
pub use parser::{article_id, parse_record};
pub use transport::{FixtureTransport, HttpTransport};
pub use types::{FeedTransport, RawRecord, Source, SourceRegistry};

/// Normalize feed text: decode entities, strip tags, fold quotes and
/// whitespace, cap at `max_chars` characters.
pub fn normalize_text(s: &str, max_chars: usize) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags (and comments)
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)<!--.*?-->|</?[a-z!][^>]*>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace (incl. NBSP)
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").trim().to_string();

    // 5) Length cap
    if out.chars().count() > max_chars {
        out = out.chars().take(max_chars).collect::<String>().trim_end().to_string();
    }

    out
}
