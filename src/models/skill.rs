use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Vocabulary terms found in one posting.
pub type SkillSet = BTreeSet<String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    pub category: Option<String>,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyCount {
    pub company: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u32,
}

/// Pairwise counts of postings in which two skills appear together.
///
/// The table is dense over `skills`: every pair is present, zero when the two
/// skills never met. The diagonal stays zero and `get(a, b) == get(b, a)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoOccurrenceMatrix {
    skills: Vec<String>,
    counts: BTreeMap<String, BTreeMap<String, u32>>,
}

impl CoOccurrenceMatrix {
    pub fn with_skills<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for skill in skills {
            let skill = skill.into();
            if !ordered.contains(&skill) {
                ordered.push(skill);
            }
        }

        let counts = ordered
            .iter()
            .map(|row| {
                let cols = ordered.iter().map(|col| (col.clone(), 0)).collect();
                (row.clone(), cols)
            })
            .collect();

        Self {
            skills: ordered,
            counts,
        }
    }

    /// Row and column labels, in the order they were supplied.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.counts.contains_key(skill)
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn get(&self, a: &str, b: &str) -> u32 {
        self.counts
            .get(a)
            .and_then(|row| row.get(b))
            .copied()
            .unwrap_or(0)
    }

    /// Counts for one skill against every label, in label order.
    pub fn row(&self, skill: &str) -> Vec<u32> {
        self.skills.iter().map(|other| self.get(skill, other)).collect()
    }

    pub fn max_count(&self) -> u32 {
        self.counts
            .values()
            .flat_map(|row| row.values())
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// Counts one posting containing both `a` and `b`. Ignores self-pairs and
    /// skills outside the table.
    pub(crate) fn record_pair(&mut self, a: &str, b: &str) {
        if a == b || !self.contains(a) || !self.contains(b) {
            return;
        }
        for (row, col) in [(a, b), (b, a)] {
            if let Some(cell) = self.counts.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell += 1;
            }
        }
    }
}
