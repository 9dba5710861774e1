pub mod config;
pub mod error;
pub mod models;
pub mod feed;
pub mod llm;
pub mod taxonomy;
pub mod analysis;
pub mod storage;

pub use config::{AdviceBackend, Config, FetchConfig, ReportConfig};
pub use error::{Error, Result};
pub use feed::FeedClient;
pub use llm::{ClaudeProvider, LLMProvider, OllamaProvider};
pub use analysis::{CollectionPipeline, MarketAnalyzer, SkillExtractor, TechClassifier};
pub use storage::PostingStore;
pub use taxonomy::{ClassifierKeywords, SkillVocabulary};
