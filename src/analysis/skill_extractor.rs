use regex::{Regex, RegexSet};

use crate::error::{Error, Result};
use crate::models::SkillSet;
use crate::taxonomy::SkillVocabulary;

/// Finds vocabulary terms in free text using whole-word matching.
///
/// Text is lowercased and every character that is neither a word character nor
/// whitespace becomes a space, so `Python/Django` yields two tokens. Terms are
/// matched verbatim against that normalized text, so a term containing any
/// punctuation (`c++`, `next.js`, `ci/cd`) can never match and is left out of
/// the searchable set.
pub struct SkillExtractor {
    terms: Vec<String>,
    patterns: RegexSet,
    punctuation: Regex,
}

impl SkillExtractor {
    pub fn new(vocabulary: &SkillVocabulary) -> Result<Self> {
        let punctuation = Regex::new(r"[^\w\s]").map_err(|e| Error::Vocabulary(e.to_string()))?;

        let mut terms = Vec::new();
        let mut patterns = Vec::new();

        for term in vocabulary.terms() {
            let term_lower = term.to_lowercase();
            if term_lower.trim().is_empty() || !is_searchable(&term_lower) {
                tracing::debug!("Skill '{}' can never match normalized text, skipping", term);
                continue;
            }

            patterns.push(format!(r"\b{}\b", regex::escape(&term_lower)));
            terms.push(term.clone());
        }

        let patterns = RegexSet::new(&patterns).map_err(|e| Error::Vocabulary(e.to_string()))?;

        Ok(Self {
            terms,
            patterns,
            punctuation,
        })
    }

    /// Skills mentioned in a description. A missing description has none.
    pub fn extract_skills(&self, description: Option<&str>) -> SkillSet {
        match description {
            Some(text) => self.extract(text),
            None => SkillSet::new(),
        }
    }

    pub fn extract(&self, text: &str) -> SkillSet {
        if text.is_empty() || self.terms.is_empty() {
            return SkillSet::new();
        }

        let normalized = self.normalize(text);
        self.patterns
            .matches(&normalized)
            .into_iter()
            .map(|i| self.terms[i].clone())
            .collect()
    }

    pub fn normalize(&self, text: &str) -> String {
        self.punctuation
            .replace_all(&text.to_lowercase(), " ")
            .into_owned()
    }

    /// Terms that can produce a match.
    pub fn searchable_terms(&self) -> &[String] {
        &self.terms
    }
}

/// Only word characters and whitespace survive normalization.
fn is_searchable(term: &str) -> bool {
    term.chars().all(|c| c.is_alphanumeric() || c == '_' || c.is_whitespace())
}
