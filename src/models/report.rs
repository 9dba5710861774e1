use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::skill::{CategoryCount, CoOccurrenceMatrix, CompanyCount, SkillCount};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketReport {
    pub generated_at: DateTime<Utc>,
    pub dataset_last_updated: Option<DateTime<Utc>>,
    pub total_postings: usize,
    pub unique_companies: usize,
    pub hottest_skill: Option<String>,
    pub top_skills: Vec<SkillCount>,
    pub top_companies: Vec<CompanyCount>,
    pub categories: Vec<CategoryCount>,
    pub co_occurrence: CoOccurrenceMatrix,
    pub recent_postings: Vec<PostingRow>,
}

/// Listing line shown under the aggregate tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingRow {
    pub published_at: Option<DateTime<Utc>>,
    pub company: String,
    pub title: String,
    pub category: String,
    pub link: String,
    pub skills: Vec<String>,
}
