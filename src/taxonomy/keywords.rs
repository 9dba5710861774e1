use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Static tables driving the tech-relevance classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierKeywords {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub allowed_categories: Vec<String>,
}

impl ClassifierKeywords {
    pub fn new<P, N, C>(positive: P, negative: N, allowed_categories: C) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        Self {
            positive: lowercase_all(positive),
            negative: lowercase_all(negative),
            allowed_categories: lowercase_all(allowed_categories),
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let keywords: ClassifierKeywords = serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        Ok(Self::new(
            keywords.positive,
            keywords.negative,
            keywords.allowed_categories,
        ))
    }
}

impl Default for ClassifierKeywords {
    fn default() -> Self {
        Self::new(
            [
                "engineer",
                "developer",
                "programmer",
                "software",
                "data",
                "devops",
                "sre",
                "cloud",
                "backend",
                "frontend",
                "full stack",
                "machine learning",
                "ai",
                "product manager",
                "qa",
                "security",
            ],
            [
                "sales",
                "marketing",
                "customer support",
                "hr",
                "writer",
                "executive assistant",
                "finance",
                "legal",
                "account executive",
            ],
            [
                "programming",
                "back-end programming",
                "front-end programming",
                "full-stack programming",
                "devops and sysadmin",
                "design",
            ],
        )
    }
}

fn lowercase_all<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
