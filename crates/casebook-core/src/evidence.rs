//! Evidence: physical or documentary material attached to a case.

use serde::{Deserialize, Serialize};

use crate::{CaseId, EvidenceId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
  pub id:             EvidenceId,
  pub description:    String,
  pub found_location: Option<String>,
  pub case_id:        CaseId,
}

/// Input for creating an [`Evidence`] item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvidence {
  pub description:    String,
  pub found_location: Option<String>,
  pub case_id:        CaseId,
}

impl NewEvidence {
  pub fn new(description: impl Into<String>, case_id: CaseId) -> Self {
    Self { description: description.into(), found_location: None, case_id }
  }

  pub fn with_found_location(mut self, location: impl Into<String>) -> Self {
    self.found_location = Some(location.into());
    self
  }
}
