use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::analysis::cooccurrence::build_co_occurrence;
use crate::analysis::ranking::{rank_categories, rank_companies, rank_skills};
use crate::analysis::skill_extractor::SkillExtractor;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::llm::build_market_context;
use crate::models::{MarketReport, Posting, PostingRow, SkillSet};
use crate::taxonomy::SkillVocabulary;

/// A posting with its skills derived from the description. The skill set is
/// recomputed on every load and never written back.
#[derive(Debug, Clone)]
pub struct AnalyzedPosting {
    pub posting: Posting,
    pub skills: SkillSet,
}

pub struct MarketAnalyzer {
    vocabulary: SkillVocabulary,
    extractor: SkillExtractor,
}

impl MarketAnalyzer {
    pub fn new(vocabulary: SkillVocabulary) -> Result<Self> {
        let extractor = SkillExtractor::new(&vocabulary)?;
        Ok(Self {
            vocabulary,
            extractor,
        })
    }

    pub fn annotate(&self, postings: Vec<Posting>) -> Vec<AnalyzedPosting> {
        postings
            .into_iter()
            .map(|posting| {
                let skills = self.extractor.extract_skills(posting.description.as_deref());
                AnalyzedPosting { posting, skills }
            })
            .collect()
    }

    pub fn build_report(
        &self,
        analyzed: &[AnalyzedPosting],
        dataset_last_updated: Option<DateTime<Utc>>,
        config: &ReportConfig,
    ) -> MarketReport {
        let selected = select(analyzed, &config.categories);

        tracing::info!(
            "Analyzing {} of {} postings",
            selected.len(),
            analyzed.len()
        );

        let skill_sets: Vec<&SkillSet> = selected.iter().map(|a| &a.skills).collect();
        let ranked_skills = rank_skills(skill_sets.iter().copied(), &self.vocabulary);

        let matrix_skills: Vec<String> = ranked_skills
            .iter()
            .take(config.matrix_skills)
            .map(|s| s.skill.clone())
            .collect();
        let co_occurrence = build_co_occurrence(skill_sets.iter().copied(), &matrix_skills);

        let unique_companies = selected
            .iter()
            .map(|a| a.posting.company.as_str())
            .collect::<HashSet<_>>()
            .len();

        let mut top_companies =
            rank_companies(selected.iter().map(|a| a.posting.company.as_str()));
        top_companies.truncate(config.top_companies);

        let categories = rank_categories(selected.iter().map(|a| a.posting.category.as_str()));

        let mut recent: Vec<&AnalyzedPosting> = selected.clone();
        recent.sort_by(|a, b| b.posting.published_at.cmp(&a.posting.published_at));
        let recent_postings = recent
            .into_iter()
            .take(config.recent_postings)
            .map(|a| PostingRow {
                published_at: a.posting.published_at,
                company: a.posting.company.clone(),
                title: a.posting.title.clone(),
                category: a.posting.category.clone(),
                link: a.posting.link.clone(),
                skills: a.skills.iter().cloned().collect(),
            })
            .collect();

        let hottest_skill = ranked_skills.first().map(|s| s.skill.clone());
        let mut top_skills = ranked_skills;
        top_skills.truncate(config.top_skills);

        MarketReport {
            generated_at: Utc::now(),
            dataset_last_updated,
            total_postings: selected.len(),
            unique_companies,
            hottest_skill,
            top_skills,
            top_companies,
            categories,
            co_occurrence,
            recent_postings,
        }
    }

    /// Digest of the selected postings for the advice model. Rankings are
    /// computed in full so the digest does not depend on report limits.
    pub fn market_context(&self, analyzed: &[AnalyzedPosting], config: &ReportConfig) -> String {
        let selected = select(analyzed, &config.categories);
        let skills = rank_skills(selected.iter().map(|a| &a.skills), &self.vocabulary);
        let companies = rank_companies(selected.iter().map(|a| a.posting.company.as_str()));
        build_market_context(selected.len(), &skills, &companies)
    }
}

fn select<'a>(
    analyzed: &'a [AnalyzedPosting],
    categories: &[String],
) -> Vec<&'a AnalyzedPosting> {
    analyzed
        .iter()
        .filter(|a| category_selected(&a.posting.category, categories))
        .collect()
}

fn category_selected(category: &str, selected: &[String]) -> bool {
    selected.is_empty() || selected.iter().any(|c| c.eq_ignore_ascii_case(category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_timestamp;

    fn posting(
        id: &str,
        company: &str,
        category: &str,
        description: Option<&str>,
        published: &str,
    ) -> Posting {
        Posting {
            id: id.to_string(),
            title: format!("Role {}", id),
            company: company.to_string(),
            category: category.to_string(),
            description: description.map(str::to_string),
            published_at: parse_timestamp(published),
            link: format!("https://example.com/{}", id),
            fetched_at: None,
        }
    }

    fn analyzer() -> MarketAnalyzer {
        MarketAnalyzer::new(SkillVocabulary::from_categories(vec![
            ("Languages", vec!["python", "sql", "rust"]),
            ("Frameworks", vec!["react", "django"]),
        ]))
        .unwrap()
    }

    fn sample() -> Vec<Posting> {
        vec![
            posting("1", "Acme", "Programming", Some("Python and SQL"), "2025-10-01T00:00:00Z"),
            posting("2", "Acme", "Programming", Some("Python with React"), "2025-10-03T00:00:00Z"),
            posting("3", "Globex", "Design", Some("React, Rust"), "2025-10-02T00:00:00Z"),
            posting("4", "Initech", "Programming", None, "not a date"),
        ]
    }

    #[test]
    fn test_annotate_derives_skills() {
        let a = analyzer();
        let analyzed = a.annotate(sample());
        assert_eq!(analyzed[0].skills.len(), 2);
        assert!(analyzed[3].skills.is_empty());
    }

    #[test]
    fn test_report_aggregates() {
        let a = analyzer();
        let analyzed = a.annotate(sample());
        let report = a.build_report(&analyzed, None, &ReportConfig::default());

        assert_eq!(report.total_postings, 4);
        assert_eq!(report.unique_companies, 3);
        assert_eq!(report.hottest_skill.as_deref(), Some("python"));
        assert_eq!(report.top_skills[0].count, 2);
        assert_eq!(report.top_skills[0].category.as_deref(), Some("Languages"));
        assert_eq!(report.top_companies[0].company, "Acme");
        assert_eq!(report.top_companies[0].count, 2);

        let m = &report.co_occurrence;
        assert_eq!(m.get("python", "sql"), 1);
        assert_eq!(m.get("python", "react"), 1);
        assert_eq!(m.get("sql", "react"), 0);
        assert_eq!(m.get("react", "rust"), 1);

        let order: Vec<_> = report.recent_postings.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(order, vec!["Role 2", "Role 3", "Role 1", "Role 4"]);
    }

    #[test]
    fn test_category_filter_and_limits() {
        let a = analyzer();
        let analyzed = a.annotate(sample());
        let config = ReportConfig {
            top_skills: 1,
            matrix_skills: 2,
            categories: vec!["programming".to_string()],
            ..ReportConfig::default()
        };
        let report = a.build_report(&analyzed, None, &config);

        assert_eq!(report.total_postings, 3);
        assert_eq!(report.top_skills.len(), 1);
        assert_eq!(report.co_occurrence.skills().len(), 2);
        assert!(report.categories.iter().all(|c| c.category == "Programming"));
    }

    #[test]
    fn test_empty_dataset() {
        let a = analyzer();
        let report = a.build_report(&[], None, &ReportConfig::default());
        assert_eq!(report.total_postings, 0);
        assert!(report.hottest_skill.is_none());
        assert!(report.co_occurrence.is_empty());
    }

    #[test]
    fn test_market_context_ignores_report_limits() {
        let a = analyzer();
        let analyzed = a.annotate(sample());
        let config = ReportConfig {
            top_skills: 1,
            top_companies: 1,
            ..ReportConfig::default()
        };

        let report = a.build_report(&analyzed, None, &config);
        assert_eq!(report.top_skills.len(), 1);

        let context = a.market_context(&analyzed, &config);
        assert!(context.contains("- Total active jobs: 4\n"));
        assert!(context.contains("- Top demanded skills: python, react, sql, rust\n"));
        assert!(context.contains("- Top hiring companies: Acme, Globex, Initech\n"));
    }

    #[test]
    fn test_market_context_respects_category_filter() {
        let a = analyzer();
        let analyzed = a.annotate(sample());
        let config = ReportConfig {
            categories: vec!["Design".to_string()],
            ..ReportConfig::default()
        };

        let context = a.market_context(&analyzed, &config);
        assert!(context.contains("- Total active jobs: 1\n"));
        assert!(context.contains("- Top demanded skills: react, rust\n"));
        assert!(context.contains("- Top hiring companies: Globex\n"));
    }
}
