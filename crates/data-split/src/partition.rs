//! Partition Membership

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subset a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    Train,
    Validation,
    Test,
}

impl Partition {
    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Validation => "validation",
            Partition::Test => "test",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Disjoint row subsets covering a whole dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partitions {
    train: Vec<usize>,
    validation: Vec<usize>,
    test: Vec<usize>,
    #[serde(skip)]
    membership: Vec<Option<Partition>>,
}

impl Partitions {
    pub(crate) fn new(train: Vec<usize>, validation: Vec<usize>, test: Vec<usize>) -> Self {
        let len = train.len() + validation.len() + test.len();
        let mut membership = vec![None; len];
        for (rows, partition) in [
            (&train, Partition::Train),
            (&validation, Partition::Validation),
            (&test, Partition::Test),
        ] {
            for &row in rows {
                membership[row] = Some(partition);
            }
        }
        Self {
            train,
            validation,
            test,
            membership,
        }
    }

    /// Training rows
    pub fn train(&self) -> &[usize] {
        &self.train
    }

    /// Validation rows, empty when no validation split was requested
    pub fn validation(&self) -> &[usize] {
        &self.validation
    }

    /// Test rows
    pub fn test(&self) -> &[usize] {
        &self.test
    }

    /// Rows of one partition
    pub fn rows(&self, partition: Partition) -> &[usize] {
        match partition {
            Partition::Train => &self.train,
            Partition::Validation => &self.validation,
            Partition::Test => &self.test,
        }
    }

    /// Partition a row belongs to
    pub fn partition_of(&self, row: usize) -> Option<Partition> {
        self.membership.get(row).copied().flatten()
    }

    /// Total number of partitioned rows
    pub fn len(&self) -> usize {
        self.train.len() + self.validation.len() + self.test.len()
    }

    /// Whether no rows were partitioned
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_lookup() {
        let p = Partitions::new(vec![2, 0], vec![3], vec![1]);
        assert_eq!(p.partition_of(0), Some(Partition::Train));
        assert_eq!(p.partition_of(1), Some(Partition::Test));
        assert_eq!(p.partition_of(3), Some(Partition::Validation));
        assert_eq!(p.partition_of(9), None);
        assert_eq!(p.len(), 4);
        assert_eq!(p.rows(Partition::Train), &[2, 0]);
    }
}
