//! Detectives: investigators who can be assigned to any number of cases.

use serde::{Deserialize, Serialize};

use crate::DetectiveId;

/// Rank given to a detective when the caller does not supply one.
pub const DEFAULT_RANK: &str = "Junior";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detective {
  pub id:           DetectiveId,
  pub name:         String,
  pub rank:         String,
  pub solved_cases: i64,
}

/// Input for creating a [`Detective`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDetective {
  pub name:         String,
  pub rank:         String,
  pub solved_cases: i64,
}

impl NewDetective {
  /// A junior detective with no solved cases.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name:         name.into(),
      rank:         DEFAULT_RANK.to_owned(),
      solved_cases: 0,
    }
  }

  pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
    self.rank = rank.into();
    self
  }

  pub fn with_solved_cases(mut self, solved_cases: i64) -> Self {
    self.solved_cases = solved_cases;
    self
  }
}
