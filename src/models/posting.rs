use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One item as it appears in the RSS feed, before any cleanup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub summary: Option<String>,
    pub published: Option<String>,
    pub link: Option<String>,
}

/// A job listing.
///
/// `id` is unique within the store and is the key used to drop postings
/// already seen in an earlier fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub category: String,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub link: String,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Posting {
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Parses the timestamp formats found in feeds and stored rows: RFC 3339,
/// RFC 2822, and naive ISO 8601 (taken as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Company and title recovered from a feed entry.
///
/// The feed usually carries the company as the item author. When the author
/// is missing or `Unknown`, titles of the form `Company: Role` are split.
pub fn split_company_title(raw_title: &str, author: Option<&str>) -> (String, String) {
    let author = author.map(str::trim).filter(|a| !a.is_empty());

    match author {
        Some(company) if company != "Unknown" => (company.to_string(), raw_title.to_string()),
        _ => match raw_title.split_once(':') {
            Some((company, title)) => (company.trim().to_string(), title.trim().to_string()),
            None => (
                author.unwrap_or("Unknown").to_string(),
                raw_title.to_string(),
            ),
        },
    }
}
