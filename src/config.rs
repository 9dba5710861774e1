use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_FEED_URL: &str = "https://weworkremotely.com/remote-jobs.rss";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_OLLAMA_MODEL: &str = "qwen2.5:7b-instruct";
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceBackend {
    Ollama,
    Claude,
}

impl std::str::FromStr for AdviceBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(AdviceBackend::Ollama),
            "claude" | "anthropic" => Ok(AdviceBackend::Claude),
            other => Err(Error::Config(format!("Unknown advice provider: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub feed_url: String,
    pub data_file: PathBuf,
    pub user_agent: String,
    pub fetch: FetchConfig,
    pub advice_backend: AdviceBackend,
    pub ollama_url: String,
    pub ollama_model: String,
    pub anthropic_api_key: Option<String>,
    pub claude_model: String,
    pub advice_timeout: Duration,
    pub vocabulary_path: Option<PathBuf>,
    pub classifier_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let feed_url = env::var("FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string());

        let data_file = env::var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("wwr_tech_jobs.csv"));

        let user_agent = env::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let fetch = FetchConfig {
            timeout: Duration::from_secs(parse_env("FETCH_TIMEOUT_SECS", 30)),
            max_attempts: parse_env("FETCH_RETRIES", 3u32).max(1),
            backoff: Duration::from_secs(parse_env("FETCH_BACKOFF_SECS", 5)),
        };

        let advice_backend = env::var("ADVICE_PROVIDER")
            .unwrap_or_else(|_| "ollama".to_string())
            .parse()?;

        let anthropic_api_key = env::var("ANTHROPIC_API_KEY").ok().filter(|k| !k.is_empty());
        if advice_backend == AdviceBackend::Claude && anthropic_api_key.is_none() {
            return Err(Error::Config(
                "ANTHROPIC_API_KEY environment variable not set".to_string(),
            ));
        }

        Ok(Self {
            feed_url,
            data_file,
            user_agent,
            fetch,
            advice_backend,
            ollama_url: env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string()),
            ollama_model: env::var("OLLAMA_MODEL")
                .unwrap_or_else(|_| DEFAULT_OLLAMA_MODEL.to_string()),
            anthropic_api_key,
            claude_model: env::var("CLAUDE_MODEL")
                .unwrap_or_else(|_| DEFAULT_CLAUDE_MODEL.to_string()),
            advice_timeout: Duration::from_secs(parse_env("ADVICE_TIMEOUT_SECS", 120)),
            vocabulary_path: env::var("VOCABULARY_PATH").ok().map(PathBuf::from),
            classifier_path: env::var("CLASSIFIER_PATH").ok().map(PathBuf::from),
        })
    }
}

/// Retry policy for the feed download: `max_attempts` tries in total,
/// `backoff` between consecutive tries.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            backoff: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub top_skills: usize,
    pub matrix_skills: usize,
    pub top_companies: usize,
    pub recent_postings: usize,
    pub categories: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_skills: 20,
            matrix_skills: 15,
            top_companies: 10,
            recent_postings: 25,
            categories: Vec::new(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
