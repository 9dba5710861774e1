use crate::error::{Error, Result};
use crate::llm::prompts::FINAL_SECTION;

/// Tidies raw model output: drops a wrapping code fence and anything the model
/// kept writing after the bullets of the final section.
pub fn clean_advice(response: &str) -> Result<String> {
    let text = strip_code_fence(response.trim());

    let lines: Vec<&str> = text.lines().collect();
    let cut = lines
        .iter()
        .position(|l| l.contains(FINAL_SECTION))
        .map(|heading| heading + 1 + final_bullets_len(&lines[heading + 1..]))
        .unwrap_or(lines.len());

    let cleaned = lines[..cut].join("\n").trim().to_string();
    if cleaned.is_empty() {
        return Err(Error::LLMApi("Empty response from model".to_string()));
    }

    Ok(cleaned)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Skip any language identifier on the fence line
    let body = rest.find('\n').map(|i| &rest[i + 1..]).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Number of lines belonging to the bullet list right after the final heading.
fn final_bullets_len(lines: &[&str]) -> usize {
    let mut seen_bullet = false;
    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with('-') || (trimmed.starts_with('*') && !trimmed.starts_with("**")) {
            seen_bullet = true;
        } else if trimmed.is_empty() && !seen_bullet {
            continue;
        } else {
            return i;
        }
    }
    lines.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuts_after_final_section() {
        let input = "**Assumed Role**\n- Data engineer\n\n**Next Best Action (This Week)**\n- Ship one pipeline\n- Publish the repo\n\nHope this helps! Good luck.";
        let cleaned = clean_advice(input).unwrap();
        assert!(cleaned.ends_with("- Publish the repo"));
        assert!(!cleaned.contains("Good luck"));
        assert!(cleaned.starts_with("**Assumed Role**"));
    }

    #[test]
    fn test_strips_code_fence() {
        let input = "```markdown\n**Assumed Role**\n- Backend engineer\n```";
        assert_eq!(clean_advice(input).unwrap(), "**Assumed Role**\n- Backend engineer");
    }

    #[test]
    fn test_keeps_text_without_final_section() {
        let input = "  - Focus on SQL and Python  \n";
        assert_eq!(clean_advice(input).unwrap(), "- Focus on SQL and Python");
    }

    #[test]
    fn test_empty_response() {
        assert!(matches!(clean_advice("   "), Err(Error::LLMApi(_))));
        assert!(matches!(clean_advice("```\n```"), Err(Error::LLMApi(_))));
    }
}
