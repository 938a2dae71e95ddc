// Hashtag / mention / URL extraction, in order of appearance (duplicates kept).

use once_cell::sync::OnceCell;
use regex::Regex;

pub fn hashtags(text: &str) -> Vec<String> {
    static RE: OnceCell<Regex> = OnceCell::new();
    let re = RE.get_or_init(|| Regex::new(r"#(\w+)").unwrap());
    captures(re, text)
}

pub fn mentions(text: &str) -> Vec<String> {
    static RE: OnceCell<Regex> = OnceCell::new();
    let re = RE.get_or_init(|| Regex::new(r"@(\w+)").unwrap());
    captures(re, text)
}

pub fn urls(text: &str) -> Vec<String> {
    static RE: OnceCell<Regex> = OnceCell::new();
    let re = RE.get_or_init(|| Regex::new(r"https?://\S+").unwrap());
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

fn captures(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
