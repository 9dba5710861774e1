use crate::taxonomy::ClassifierKeywords;

/// Keeps postings that look like tech jobs.
///
/// Keyword tests here are plain substring checks on the lowercased title and
/// description, unlike the whole-word matching of [`SkillExtractor`]. A broad
/// net is wanted for rejection, so a negative keyword such as `hr` also
/// rejects text containing "through".
///
/// [`SkillExtractor`]: crate::analysis::SkillExtractor
pub struct TechClassifier {
    keywords: ClassifierKeywords,
}

impl TechClassifier {
    pub fn new(keywords: ClassifierKeywords) -> Self {
        Self { keywords }
    }

    /// A posting is relevant when no negative keyword occurs, its category is
    /// allowed, and at least one positive keyword occurs.
    pub fn is_relevant(&self, title: &str, category: &str, description: &str) -> bool {
        let text = format!("{} {}", title, description).to_lowercase();

        if self.keywords.negative.iter().any(|k| text.contains(k.as_str())) {
            return false;
        }

        let category = category.trim().to_lowercase();
        if !self.keywords.allowed_categories.iter().any(|c| *c == category) {
            return false;
        }

        self.keywords.positive.iter().any(|k| text.contains(k.as_str()))
    }
}

impl Default for TechClassifier {
    fn default() -> Self {
        Self::new(ClassifierKeywords::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> TechClassifier {
        TechClassifier::new(ClassifierKeywords::new(
            ["engineer", "developer"],
            ["sales", "hr"],
            ["programming", "devops and sysadmin"],
        ))
    }

    #[test]
    fn test_accepts_allowed_category_with_keyword() {
        let c = classifier();
        assert!(c.is_relevant("Senior Rust Engineer", "Programming", "Build services"));
        assert!(c.is_relevant("Platform role", "DevOps and Sysadmin", "Developer tooling"));
    }

    #[test]
    fn test_rejects_allowed_category_without_keyword() {
        let c = classifier();
        assert!(!c.is_relevant("Designer", "Programming", "Figma mockups"));
    }

    #[test]
    fn test_rejects_keyword_with_disallowed_category() {
        let c = classifier();
        assert!(!c.is_relevant("Backend Engineer", "Design", "Go services"));
    }

    #[test]
    fn test_category_must_match_exactly() {
        let c = classifier();
        assert!(!c.is_relevant("Backend Engineer", "Back-End Programming", ""));
    }

    #[test]
    fn test_negative_keyword_wins() {
        let c = classifier();
        assert!(!c.is_relevant("Sales Engineer", "Programming", "Developer"));
        assert!(!c.is_relevant("Engineer", "Programming", "Report to the SALES lead"));
    }

    #[test]
    fn test_negative_keyword_is_substring_match() {
        let c = classifier();
        assert!(!c.is_relevant("Engineer", "Programming", "Ship features through CI"));
    }

    #[test]
    fn test_empty_description() {
        let c = classifier();
        assert!(c.is_relevant("Engineer", "programming", ""));
        assert!(!c.is_relevant("", "programming", ""));
    }
}
