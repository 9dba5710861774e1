use async_trait::async_trait;
use crate::error::Result;
use crate::llm::prompts::AdviceRequest;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// One request to the text-generation service. Timeouts and service
    /// failures come back as `Error::LLMApi`.
    async fn generate_advice(&self, request: &AdviceRequest) -> Result<String>;
    fn name(&self) -> &str;
}
