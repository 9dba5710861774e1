use std::collections::HashMap;

use crate::models::{CategoryCount, CompanyCount, SkillCount, SkillSet};
use crate::taxonomy::SkillVocabulary;

/// Counts items and orders them by count, descending. Items with equal counts
/// keep the order in which they were first seen.
pub fn rank_by_frequency<I, S>(items: I) -> Vec<(String, u32)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, (u32, usize)> = HashMap::new();

    for item in items {
        let next_index = counts.len();
        let entry = counts
            .entry(item.as_ref().to_string())
            .or_insert((0, next_index));
        entry.0 += 1;
    }

    let mut ranked: Vec<(String, u32, usize)> = counts
        .into_iter()
        .map(|(key, (count, first_seen))| (key, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked.into_iter().map(|(key, count, _)| (key, count)).collect()
}

/// Flattens per-posting skill sets and ranks skills by the number of postings
/// mentioning them.
pub fn rank_skills<'a, I>(skill_sets: I, vocabulary: &SkillVocabulary) -> Vec<SkillCount>
where
    I: IntoIterator<Item = &'a SkillSet>,
{
    rank_by_frequency(skill_sets.into_iter().flat_map(|set| set.iter()))
        .into_iter()
        .map(|(skill, count)| SkillCount {
            category: vocabulary.category_of(&skill).map(str::to_string),
            skill,
            count,
        })
        .collect()
}

pub fn rank_companies<'a, I>(companies: I) -> Vec<CompanyCount>
where
    I: IntoIterator<Item = &'a str>,
{
    rank_by_frequency(companies)
        .into_iter()
        .map(|(company, count)| CompanyCount { company, count })
        .collect()
}

pub fn rank_categories<'a, I>(categories: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a str>,
{
    rank_by_frequency(categories)
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect()
}
