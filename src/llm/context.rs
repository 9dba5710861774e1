use crate::models::{CompanyCount, SkillCount};

pub const CONTEXT_SKILLS: usize = 10;
pub const CONTEXT_COMPANIES: usize = 5;

/// Short digest of the market handed to the advice model: posting count, the
/// ten most demanded skills and the five most active companies.
///
/// Expects full rankings; anything past the digest limits is ignored.
pub fn build_market_context(
    total_postings: usize,
    ranked_skills: &[SkillCount],
    ranked_companies: &[CompanyCount],
) -> String {
    let skills: Vec<&str> = ranked_skills
        .iter()
        .take(CONTEXT_SKILLS)
        .map(|s| s.skill.as_str())
        .collect();
    let companies: Vec<&str> = ranked_companies
        .iter()
        .take(CONTEXT_COMPANIES)
        .map(|c| c.company.as_str())
        .collect();

    format!(
        "MARKET SNAPSHOT:\n\
         - Total active jobs: {}\n\
         - Top demanded skills: {}\n\
         - Top hiring companies: {}\n\
         \n\
         INSIGHT:\n\
         Hiring managers prioritize candidates who match at least 70% of required skills.\n\
         Skill combinations matter more than single tools.\n",
        total_postings,
        skills.join(", "),
        companies.join(", ")
    )
}
