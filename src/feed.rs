//! Feed parsing: RSS 2.0 and Atom documents into a common entry shape.
//!
//! Both syndication dialects in use across the vendor feeds are
//! deserialized with `quick-xml`'s serde support into [`FeedEntry`]. RSS is
//! tried first, Atom second. Timestamps are parsed here when they follow the
//! dialect's own convention (RFC 2822 `pubDate`, RFC 3339 `updated`); a
//! string that doesn't is kept raw for the date normalizer's fallback chain.

use chrono::{DateTime, Utc};
use quick_xml::de::from_str;
use serde::Deserialize;
use std::error::Error;

/// One feed entry, regardless of source dialect.
#[derive(Debug, Clone, Default)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub link: Option<String>,
    /// Published/updated time, when the feed's own convention parsed.
    pub timestamp: Option<DateTime<Utc>>,
    /// The raw timestamp string, for the normalizer's fallback chain.
    pub raw_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: RssChannel,
}

#[derive(Debug, Deserialize)]
struct RssChannel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<AtomText>,
    summary: Option<AtomText>,
    content: Option<AtomText>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    updated: Option<String>,
    published: Option<String>,
}

/// Atom text constructs carry attributes (`type="html"`), so plain `String`
/// deserialization is not enough.
#[derive(Debug, Default, Deserialize)]
struct AtomText {
    #[serde(rename = "$text")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

/// Parse a feed document into entries, accepting RSS 2.0 or Atom.
///
/// # Errors
///
/// Returns an error when the document yields no entries under either
/// dialect; callers treat that the same as a network failure and fall back.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, Box<dyn Error>> {
    let xml = scrub_html_entities(xml);

    if let Ok(rss) = from_str::<Rss>(&xml) {
        if !rss.channel.items.is_empty() {
            return Ok(rss.channel.items.into_iter().map(rss_entry).collect());
        }
    }

    match from_str::<AtomFeed>(&xml) {
        Ok(atom) if !atom.entries.is_empty() => {
            Ok(atom.entries.into_iter().map(atom_entry).collect())
        }
        Ok(_) => Err("no recognizable feed entries".into()),
        Err(e) => Err(Box::new(e)),
    }
}

fn rss_entry(item: RssItem) -> FeedEntry {
    let timestamp = item
        .pub_date
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc2822(s).ok())
        .map(|dt| dt.with_timezone(&Utc));
    FeedEntry {
        title: item.title,
        summary: item.description,
        link: item.link,
        timestamp,
        raw_date: item.pub_date,
    }
}

fn atom_entry(entry: AtomEntry) -> FeedEntry {
    let raw_date = entry.published.or(entry.updated);
    let timestamp = raw_date
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    // Prefer the alternate link; a bare <link> without rel counts as one.
    let link = entry
        .links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or(entry.links.first())
        .and_then(|l| l.href.clone());

    FeedEntry {
        title: entry.title.and_then(|t| t.value),
        summary: entry
            .summary
            .and_then(|t| t.value)
            .or(entry.content.and_then(|t| t.value)),
        link,
        timestamp,
        raw_date,
    }
}

/// HTML entities commonly smuggled into vendor XML that the parser rejects.
fn scrub_html_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
