// src/ingest/feed.rs
//! RSS 2.0 decoding into `RawRecord`s (feed order preserved).
//!
//! Items are read with a streaming walk rather than a strict schema: only the
//! first direct `<title>`, `<link>`, ... child of an item counts, prefixed
//! extension elements (`media:title`, `atom:link`) are skipped, and text is
//! entity-decoded as HTML so feeds using `&eacute;` or `&trade;` still load.

use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::ingest::types::RawRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Description,
    PubDate,
    Author,
    Creator,
    Category,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"description" => Some(Field::Description),
            b"pubDate" => Some(Field::PubDate),
            b"author" => Some(Field::Author),
            b"dc:creator" | b"creator" => Some(Field::Creator),
            b"category" => Some(Field::Category),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct ItemDraft {
    record: RawRecord,
    creator: Option<String>,
}

impl ItemDraft {
    /// First occurrence wins; later duplicates are ignored.
    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Title => &mut self.record.title,
            Field::Link => &mut self.record.link,
            Field::Description => &mut self.record.description,
            Field::PubDate => &mut self.record.pub_date,
            Field::Author => &mut self.record.author,
            Field::Creator => &mut self.creator,
            Field::Category => &mut self.record.category,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    fn finish(mut self) -> RawRecord {
        if self.record.author.is_none() {
            self.record.author = self.creator;
        }
        self.record
    }
}

/// Decode an RSS document. A document that is not well-formed XML or has no
/// `<channel>` is a malformed response for the whole source.
pub fn decode_rss(body: &str) -> Result<Vec<RawRecord>> {
    let mut reader = Reader::from_str(body);
    let mut records = Vec::new();
    let mut saw_channel = false;

    let mut item: Option<ItemDraft> = None;
    // depth below the open <item>; 1 = direct child
    let mut depth = 0usize;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event().context("parsing rss xml")? {
            Event::Start(e) => {
                let name = e.name();
                if item.is_some() {
                    depth += 1;
                    if depth == 1 {
                        field = Field::from_name(name.as_ref());
                        text.clear();
                    }
                } else if name.as_ref() == b"item" {
                    item = Some(ItemDraft::default());
                    depth = 0;
                } else if name.as_ref() == b"channel" {
                    saw_channel = true;
                }
            }
            Event::Empty(e) => {
                if item.is_none() && e.name().as_ref() == b"channel" {
                    saw_channel = true;
                }
            }
            Event::End(_) => {
                if depth == 0 {
                    if let Some(draft) = item.take() {
                        records.push(draft.finish());
                    }
                } else {
                    if depth == 1 {
                        if let (Some(draft), Some(f)) = (item.as_mut(), field.take()) {
                            draft.set(f, std::mem::take(&mut text));
                        }
                    }
                    depth -= 1;
                }
            }
            Event::Text(e) if field.is_some() => {
                text.push_str(&html_escape::decode_html_entities(&String::from_utf8_lossy(&e)));
            }
            Event::CData(e) if field.is_some() => {
                text.push_str(&String::from_utf8_lossy(&e));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_channel {
        bail!("parsing rss xml: no <channel> element");
    }
    Ok(records)
}
