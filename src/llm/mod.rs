pub mod provider;
pub mod ollama;
pub mod claude;
pub mod prompts;
pub mod context;
pub mod parser;

pub use provider::LLMProvider;
pub use ollama::OllamaProvider;
pub use claude::ClaudeProvider;
pub use prompts::AdviceRequest;
pub use context::build_market_context;
pub use parser::clean_advice;
