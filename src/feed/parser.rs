use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::models::FeedEntry;

#[derive(Debug, Clone, Copy)]
enum Field {
    Guid,
    Title,
    Author,
    Category,
    Description,
    Published,
    Link,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"guid" => Some(Field::Guid),
            b"title" => Some(Field::Title),
            b"author" | b"dc:creator" => Some(Field::Author),
            b"category" => Some(Field::Category),
            b"description" => Some(Field::Description),
            b"pubDate" => Some(Field::Published),
            b"link" => Some(Field::Link),
            _ => None,
        }
    }

    fn assign(self, entry: &mut FeedEntry, value: String) {
        if value.is_empty() {
            return;
        }
        match self {
            Field::Guid => entry.id = value,
            Field::Title => entry.title = value,
            Field::Author => {
                entry.author.get_or_insert(value);
            }
            Field::Category => {
                entry.category.get_or_insert(value);
            }
            Field::Description => entry.summary = Some(value),
            Field::Published => entry.published = Some(value),
            Field::Link => entry.link = Some(value),
        }
    }
}

/// Parses the `<item>` elements of an RSS 2.0 document.
///
/// Items without a guid fall back to their link as identifier; items with
/// neither are dropped. Only the first author and category of an item are kept.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<FeedEntry> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => current = Some(FeedEntry::default()),
                tag if current.is_some() => {
                    field = Field::from_tag(tag);
                    text.clear();
                }
                _ => {}
            },
            Ok(Event::Text(e)) if field.is_some() => {
                let chunk = e
                    .unescape()
                    .map(|t| t.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&e).into_owned());
                text.push_str(&chunk);
            }
            Ok(Event::CData(e)) if field.is_some() => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"item" => {
                    field = None;
                    if let Some(entry) = current.take().and_then(finish_entry) {
                        entries.push(entry);
                    }
                }
                _ => {
                    if let (Some(entry), Some(f)) = (current.as_mut(), field.take()) {
                        f.assign(entry, text.trim().to_string());
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::ParseError(format!(
                    "Invalid RSS at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    tracing::debug!("Parsed {} feed items", entries.len());
    Ok(entries)
}

fn finish_entry(mut entry: FeedEntry) -> Option<FeedEntry> {
    if entry.id.is_empty() {
        match &entry.link {
            Some(link) => entry.id = link.clone(),
            None => {
                tracing::warn!("Dropping feed item without guid or link: {}", entry.title);
                return None;
            }
        }
    }
    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>Remote Jobs</title>
    <link>https://example.com</link>
    <item>
      <title>Acme: Senior Rust Engineer</title>
      <region>Anywhere</region>
      <category>Back-End Programming</category>
      <description>&lt;p&gt;Build &lt;b&gt;Rust&lt;/b&gt; &amp;amp; Postgres services&lt;/p&gt;</description>
      <pubDate>Tue, 14 Oct 2025 09:30:00 +0000</pubDate>
      <guid>https://example.com/jobs/1</guid>
      <link>https://example.com/jobs/1</link>
    </item>
    <item>
      <title>Data Engineer</title>
      <dc:creator>Globex</dc:creator>
      <description><![CDATA[<p>Python & Airflow</p>]]></description>
      <link>https://example.com/jobs/2</link>
    </item>
    <item>
      <title>No identity</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_items() {
        let entries = parse_feed(SAMPLE).unwrap();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.id, "https://example.com/jobs/1");
        assert_eq!(first.title, "Acme: Senior Rust Engineer");
        assert_eq!(first.author, None);
        assert_eq!(first.category.as_deref(), Some("Back-End Programming"));
        assert_eq!(
            first.summary.as_deref(),
            Some("<p>Build <b>Rust</b> &amp; Postgres services</p>")
        );
        assert_eq!(
            first.published.as_deref(),
            Some("Tue, 14 Oct 2025 09:30:00 +0000")
        );

        let second = &entries[1];
        assert_eq!(second.id, "https://example.com/jobs/2");
        assert_eq!(second.author.as_deref(), Some("Globex"));
        assert_eq!(second.summary.as_deref(), Some("<p>Python & Airflow</p>"));
        assert_eq!(second.category, None);
    }

    #[test]
    fn test_channel_fields_ignored() {
        let entries = parse_feed(SAMPLE).unwrap();
        assert!(entries.iter().all(|e| e.title != "Remote Jobs"));
    }

    #[test]
    fn test_malformed_xml() {
        let result = parse_feed("<rss><channel><item><title>x</item></channel></rss>");
        assert!(matches!(result, Err(Error::ParseError(_))));
    }

    #[test]
    fn test_empty_channel() {
        let entries = parse_feed("<rss><channel></channel></rss>").unwrap();
        assert!(entries.is_empty());
    }
}
