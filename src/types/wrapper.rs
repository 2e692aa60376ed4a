use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::rule::RuleRecord;

/// Ordered collection of translated rules, one per input record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleWrapper {
    data: Vec<RuleRecord>,
}

impl RuleWrapper {
    #[must_use]
    pub fn new(data: Vec<RuleRecord>) -> Self {
        Self { data }
    }

    #[must_use]
    pub fn data(&self) -> &[RuleRecord] {
        &self.data
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RuleRecord> {
        self.data.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleRecord> {
        self.data.iter()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<RuleRecord> {
        self.data
    }
}

impl Index<usize> for RuleWrapper {
    type Output = RuleRecord;

    fn index(&self, index: usize) -> &RuleRecord {
        &self.data[index]
    }
}

impl<'a> IntoIterator for &'a RuleWrapper {
    type Item = &'a RuleRecord;
    type IntoIter = std::slice::Iter<'a, RuleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl IntoIterator for RuleWrapper {
    type Item = RuleRecord;
    type IntoIter = std::vec::IntoIter<RuleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl FromIterator<RuleRecord> for RuleWrapper {
    fn from_iter<I: IntoIterator<Item = RuleRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for RuleWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RuleWrapper ({} records):", self.data.len())?;
        for (i, record) in self.data.iter().enumerate() {
            writeln!(f, "  [{i}] {record}")?;
        }
        Ok(())
    }
}
