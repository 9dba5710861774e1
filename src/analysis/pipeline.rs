use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::analysis::classifier::TechClassifier;
use crate::error::Result;
use crate::feed::{clean_html, parse_feed, FeedClient};
use crate::models::{parse_timestamp, split_company_title, FeedEntry, Posting};
use crate::storage::{AppendOutcome, PostingStore};

const UNCATEGORIZED: &str = "Uncategorized";

/// Outcome of one fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub fetched: usize,
    pub relevant: usize,
    pub added: usize,
    pub total: usize,
}

/// Fetch, classify and store: one pass over the feed.
pub struct CollectionPipeline {
    feed: FeedClient,
    classifier: TechClassifier,
    store: PostingStore,
    feed_url: String,
    show_progress: bool,
}

impl CollectionPipeline {
    pub fn new(
        feed: FeedClient,
        classifier: TechClassifier,
        store: PostingStore,
        feed_url: impl Into<String>,
    ) -> Self {
        Self {
            feed,
            classifier,
            store,
            feed_url: feed_url.into(),
            show_progress: true,
        }
    }

    /// Disables the terminal spinner around the feed download.
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn store(&self) -> &PostingStore {
        &self.store
    }

    /// Runs one cycle. A feed that cannot be fetched after all retries fails
    /// the cycle before anything is written.
    pub async fn run(&self) -> Result<CollectionSummary> {
        tracing::info!("Fetching job feed from {}", self.feed_url);

        let spinner = self.spinner("Fetching job feed...");
        let body = self.feed.fetch(&self.feed_url).await;
        spinner.finish_and_clear();
        let body = body?;

        let entries = parse_feed(&body)?;
        tracing::info!("Feed returned {} entries", entries.len());

        let fetched_at = Utc::now();
        let fetched = entries.len();
        let relevant: Vec<Posting> = entries
            .into_iter()
            .filter_map(|entry| self.to_relevant_posting(entry, fetched_at))
            .collect();

        tracing::info!("{} of {} entries are tech postings", relevant.len(), fetched);

        let relevant_count = relevant.len();
        let AppendOutcome { added, total } = self.store.append_new(relevant, fetched_at)?;

        if added > 0 {
            tracing::info!(
                "Stored {} new postings in {} ({} total)",
                added,
                self.store.path().display(),
                total
            );
        } else {
            tracing::info!("No new postings; dataset timestamp refreshed");
        }

        Ok(CollectionSummary {
            fetched,
            relevant: relevant_count,
            added,
            total,
        })
    }

    fn to_relevant_posting(&self, entry: FeedEntry, fetched_at: DateTime<Utc>) -> Option<Posting> {
        let posting = build_posting(entry, fetched_at);
        let relevant =
            self.classifier
                .is_relevant(&posting.title, &posting.category, posting.description_text());

        if !relevant {
            tracing::debug!("Skipping non-tech posting: {}", posting.title);
            return None;
        }
        Some(posting)
    }

    fn spinner(&self, message: &'static str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// Turns a raw feed entry into a posting with a plain-text description.
pub fn build_posting(entry: FeedEntry, fetched_at: DateTime<Utc>) -> Posting {
    let (company, title) = split_company_title(&entry.title, entry.author.as_deref());

    let category = entry
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| UNCATEGORIZED.to_string());

    let description = entry
        .summary
        .as_deref()
        .map(clean_html)
        .filter(|d| !d.is_empty());

    Posting {
        id: entry.id,
        title,
        company,
        category,
        description,
        published_at: entry.published.as_deref().and_then(parse_timestamp),
        link: entry.link.unwrap_or_default(),
        fetched_at: Some(fetched_at),
    }
}
