pub mod keywords;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::{Error, Result};

pub use keywords::ClassifierKeywords;

#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyCategory {
    pub name: String,
    pub terms: Vec<String>,
}

/// The fixed catalog of skills recognised in posting text.
///
/// Terms are stored lowercase. The flattened list keeps the first occurrence of
/// a term when several categories list it.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    categories: Vec<VocabularyCategory>,
    flattened: Vec<String>,
    category_of: HashMap<String, String>,
}

impl SkillVocabulary {
    pub fn new() -> Self {
        let categories = vec![
            (
                "Languages",
                vec![
                    "python", "java", "javascript", "typescript", "golang", "rust", "c++",
                    "ruby", "php", "swift", "kotlin", "sql",
                ],
            ),
            (
                "Frameworks",
                vec![
                    "react", "node", "django", "flask", "fastapi", "spring", "vue", "angular",
                    "next.js", "rails", "pytorch", "tensorflow",
                ],
            ),
            (
                "Cloud/DevOps",
                vec![
                    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "jenkins",
                    "linux", "circleci", "git",
                ],
            ),
            (
                "Databases",
                vec![
                    "postgresql", "mysql", "mongodb", "redis", "elasticsearch", "dynamodb",
                    "snowflake",
                ],
            ),
        ];

        Self::from_categories(categories)
    }

    pub fn from_categories<I, N, T, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self {
            categories: Vec::new(),
            flattened: Vec::new(),
            category_of: HashMap::new(),
        };

        for (name, terms) in categories {
            vocabulary.add_category(name.into(), terms);
        }

        vocabulary
    }

    /// Loads a `{"category": ["term", ...]}` JSON document.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let categories: BTreeMap<String, Vec<String>> = serde_json::from_str(&raw)
            .map_err(|e| Error::Vocabulary(format!("{}: {}", path.display(), e)))?;

        let vocabulary = Self::from_categories(categories);
        tracing::info!(
            "Loaded {} skills in {} categories from {}",
            vocabulary.len(),
            vocabulary.categories.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    fn add_category<T, S>(&mut self, name: String, terms: T)
    where
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept = Vec::new();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() || kept.contains(&term) {
                continue;
            }
            if !self.category_of.contains_key(&term) {
                self.category_of.insert(term.clone(), name.clone());
                self.flattened.push(term.clone());
            }
            kept.push(term);
        }

        self.categories.push(VocabularyCategory { name, terms: kept });
    }

    /// Every term across all categories, duplicates removed.
    pub fn terms(&self) -> &[String] {
        &self.flattened
    }

    pub fn categories(&self) -> &[VocabularyCategory] {
        &self.categories
    }

    /// First category listing `term`.
    pub fn category_of(&self, term: &str) -> Option<&str> {
        self.category_of.get(term).map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.category_of.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.flattened.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flattened.is_empty()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new()
    }
}
