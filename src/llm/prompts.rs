pub const SYSTEM_PROMPT: &str = r#"You are a senior hiring manager giving role-agnostic career advice.

GOAL:
Help users get interviews by showing real ownership, not surface-level skills.

ABSOLUTE RULES (BREAKING ANY RULE IS FAILURE):
- Use hyphen (-) bullets ONLY
- ONE bullet per line
- ONE sentence per bullet
- Max 15 words per bullet
- Max 5 skills
- ONE role only
- NO generic verbs (learn, study, understand, explore)
- NO courses, tutorials, or certifications
- STOP after "Next Best Action (This Week)"

ROLE HANDLING:
- Infer the most relevant role from the question
- State the assumption clearly
- Do NOT mention specific companies

QUALITY RULES:
- Skills must map to real job responsibilities
- Builds must involve real data or real users
- Advice must sound like interview screening criteria
- If advice is generic, rewrite it to be concrete

FORMAT (EXACT):

**Assumed Role**
- <bullet>

**Why Companies Hire This Role**
- <bullet>

**Top Skills That Matter (Max 5)**
- <skill>
- <skill>

**What to Build to Prove It**
- <bullet>

**What to Ignore for Now**
- <bullet>

**Next Best Action (This Week)**
- <bullet>"#;

/// Heading of the section the answer must end with.
pub const FINAL_SECTION: &str = "Next Best Action (This Week)";

#[derive(Debug, Clone)]
pub struct AdviceRequest {
    pub question: String,
    pub market_context: String,
}

impl AdviceRequest {
    pub fn new(question: impl Into<String>, market_context: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            market_context: market_context.into(),
        }
    }

    /// Single-string prompt for completion-style APIs, system prompt included.
    pub fn to_prompt(&self) -> String {
        format!(
            "\nSYSTEM:\n{}\n\n{}",
            SYSTEM_PROMPT,
            self.user_message()
        )
    }

    /// Market data and question, for chat APIs that take the system prompt
    /// separately.
    pub fn user_message(&self) -> String {
        format!(
            "MARKET DATA (for context only, do NOT repeat verbatim):\n{}\n\nUSER QUESTION:\n{}\n",
            self.market_context.trim(),
            self.question.trim()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_layout() {
        let request = AdviceRequest::new(
            "  How do I become a data engineer? ",
            "\nMARKET SNAPSHOT:\n- Total active jobs: 3\n",
        );
        let prompt = request.to_prompt();

        let system = prompt.find("SYSTEM:").unwrap();
        let market = prompt.find("MARKET DATA").unwrap();
        let question = prompt.find("USER QUESTION:\nHow do I become a data engineer?").unwrap();
        assert!(system < market && market < question);
        assert!(prompt.contains("MARKET SNAPSHOT:\n- Total active jobs: 3\n\nUSER QUESTION"));
    }

    #[test]
    fn test_user_message_excludes_system_prompt() {
        let request = AdviceRequest::new("q", "ctx");
        assert!(!request.user_message().contains("ABSOLUTE RULES"));
    }
}
