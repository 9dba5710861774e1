use std::collections::BTreeSet;

use crate::models::{CoOccurrenceMatrix, SkillSet};

/// Counts, for every pair of skills in `restrict_to`, the postings whose skill
/// sets contain both.
///
/// Skills outside `restrict_to` are ignored, so a posting left with fewer than
/// two relevant skills contributes nothing. Each pair is recorded in both
/// directions. Cost is O(postings * k^2) for k skills per posting.
pub fn build_co_occurrence<'a, I>(skill_sets: I, restrict_to: &[String]) -> CoOccurrenceMatrix
where
    I: IntoIterator<Item = &'a SkillSet>,
{
    let mut matrix = CoOccurrenceMatrix::with_skills(restrict_to.iter().cloned());
    if matrix.is_empty() {
        return matrix;
    }

    let allowed: BTreeSet<&str> = restrict_to.iter().map(String::as_str).collect();

    for skills in skill_sets {
        let relevant: Vec<&str> = skills
            .iter()
            .map(String::as_str)
            .filter(|s| allowed.contains(s))
            .collect();

        for (i, a) in relevant.iter().enumerate() {
            for b in &relevant[i + 1..] {
                matrix.record_pair(a, b);
            }
        }
    }

    matrix
}
