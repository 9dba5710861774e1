pub mod classifier;
pub mod cooccurrence;
pub mod market;
pub mod pipeline;
pub mod ranking;
pub mod skill_extractor;

pub use classifier::TechClassifier;
pub use cooccurrence::build_co_occurrence;
pub use market::{AnalyzedPosting, MarketAnalyzer};
pub use pipeline::{CollectionPipeline, CollectionSummary};
pub use ranking::{rank_by_frequency, rank_categories, rank_companies, rank_skills};
pub use skill_extractor::SkillExtractor;
