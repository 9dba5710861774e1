use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{parse_timestamp, Posting};

const COLUMNS: [&str; 9] = [
    "job_id",
    "title",
    "company",
    "category",
    "full_description",
    "published_date",
    "link",
    "fetched_at",
    "dataset_last_updated_utc",
];

/// On-disk row layout. Column names match the files written by earlier
/// collector versions so existing datasets keep loading.
#[derive(Debug, Serialize, Deserialize)]
struct PostingRow {
    #[serde(default)]
    job_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    full_description: Option<String>,
    #[serde(default)]
    published_date: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    fetched_at: Option<String>,
    #[serde(default)]
    dataset_last_updated_utc: Option<String>,
}

impl PostingRow {
    fn from_posting(posting: &Posting, last_updated: DateTime<Utc>) -> Self {
        Self {
            job_id: Some(posting.id.clone()),
            title: Some(posting.title.clone()),
            company: Some(posting.company.clone()),
            category: Some(posting.category.clone()),
            full_description: posting.description.clone(),
            published_date: posting.published_at.map(format_timestamp),
            link: Some(posting.link.clone()),
            fetched_at: posting.fetched_at.map(format_timestamp),
            dataset_last_updated_utc: Some(format_timestamp(last_updated)),
        }
    }

    fn into_posting(self) -> Posting {
        Posting {
            id: self.job_id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            company: self
                .company
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            category: self
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "Uncategorized".to_string()),
            description: self.full_description.filter(|d| !d.is_empty()),
            published_at: self.published_date.as_deref().and_then(parse_timestamp),
            link: self.link.unwrap_or_default(),
            fetched_at: self.fetched_at.as_deref().and_then(parse_timestamp),
        }
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[derive(Debug, Clone, Default)]
pub struct PostingSnapshot {
    pub postings: Vec<Posting>,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    pub added: usize,
    pub total: usize,
}

/// Posting collection kept in a single CSV file.
///
/// Every write replaces the whole file through a sibling temp file and a
/// rename, so a failed write leaves the previous dataset intact.
pub struct PostingStore {
    path: PathBuf,
}

impl PostingStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads every stored posting. A missing file is an empty dataset.
    pub fn load(&self) -> Result<PostingSnapshot> {
        if !self.exists() {
            tracing::debug!("No posting store at {}", self.path.display());
            return Ok(PostingSnapshot::default());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;

        let mut snapshot = PostingSnapshot::default();
        for row in reader.deserialize::<PostingRow>() {
            let row = row?;
            if let Some(ts) = row.dataset_last_updated_utc.as_deref().and_then(parse_timestamp) {
                snapshot.last_updated = Some(snapshot.last_updated.map_or(ts, |prev| prev.max(ts)));
            }
            snapshot.postings.push(row.into_posting());
        }

        tracing::debug!(
            "Loaded {} postings from {}",
            snapshot.postings.len(),
            self.path.display()
        );
        Ok(snapshot)
    }

    /// Appends the candidates whose id is not stored yet and refreshes the
    /// dataset timestamp, even when nothing new arrived.
    pub fn append_new(
        &self,
        candidates: Vec<Posting>,
        now: DateTime<Utc>,
    ) -> Result<AppendOutcome> {
        let mut postings = self.load()?.postings;
        let mut seen: HashSet<String> = postings.iter().map(|p| p.id.clone()).collect();

        let mut added = 0;
        for posting in candidates {
            if seen.insert(posting.id.clone()) {
                postings.push(posting);
                added += 1;
            }
        }

        self.write_all(&postings, now)?;

        Ok(AppendOutcome {
            added,
            total: postings.len(),
        })
    }

    pub fn write_all(&self, postings: &[Posting], last_updated: DateTime<Utc>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.temp_path();
        let written = self.write_rows(&tmp_path, postings, last_updated);
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn write_rows(
        &self,
        path: &Path,
        postings: &[Posting],
        last_updated: DateTime<Utc>,
    ) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        if postings.is_empty() {
            writer.write_record(COLUMNS)?;
        }
        for posting in postings {
            writer.serialize(PostingRow::from_posting(posting, last_updated))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
