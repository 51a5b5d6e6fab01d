//! Suspects and their criminal records.
//!
//! A suspect belongs to exactly one case and has at most one criminal record.
//! Deleting a suspect does not delete its record; the record is kept with its
//! suspect reference cleared (an orphan).

use serde::{Deserialize, Serialize};

use crate::{CaseId, CriminalRecordId, SuspectId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suspect {
  pub id:      SuspectId,
  pub name:    String,
  pub age:     Option<i64>,
  pub alibi:   Option<String>,
  pub case_id: CaseId,
}

/// Input for creating a [`Suspect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSuspect {
  pub name:    String,
  pub age:     Option<i64>,
  pub alibi:   Option<String>,
  pub case_id: CaseId,
}

impl NewSuspect {
  pub fn new(name: impl Into<String>, age: i64, case_id: CaseId) -> Self {
    Self { name: name.into(), age: Some(age), alibi: None, case_id }
  }

  pub fn with_alibi(mut self, alibi: impl Into<String>) -> Self {
    self.alibi = Some(alibi.into());
    self
  }
}

/// Prior convictions of a suspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriminalRecord {
  pub id:              CriminalRecordId,
  pub previous_crimes: Option<String>,
  pub sentence:        Option<String>,
  /// `None` once the suspect has been deleted.
  pub suspect_id:      Option<SuspectId>,
}

impl CriminalRecord {
  pub fn is_orphan(&self) -> bool { self.suspect_id.is_none() }
}

/// Input for creating a [`CriminalRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCriminalRecord {
  pub suspect_id:      SuspectId,
  pub previous_crimes: Option<String>,
  pub sentence:        Option<String>,
}

impl NewCriminalRecord {
  pub fn new(suspect_id: SuspectId) -> Self {
    Self { suspect_id, previous_crimes: None, sentence: None }
  }

  pub fn with_previous_crimes(mut self, crimes: impl Into<String>) -> Self {
    self.previous_crimes = Some(crimes.into());
    self
  }

  pub fn with_sentence(mut self, sentence: impl Into<String>) -> Self {
    self.sentence = Some(sentence.into());
    self
  }
}
