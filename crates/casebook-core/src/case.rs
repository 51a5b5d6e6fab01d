//! Cases, the root of the investigation hierarchy.
//!
//! A case owns its suspects and evidence: deleting a case deletes them too.
//! Detectives are linked to cases through assignments and survive the
//! deletion of any case they worked on.

use serde::{Deserialize, Serialize};

use crate::CaseId;

/// Status given to a case when the caller does not supply one.
pub const DEFAULT_STATUS: &str = "Open";

/// A persisted investigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
  pub id:         CaseId,
  pub crime_type: String,
  pub status:     String,
  pub location:   String,
  /// Expected as `YYYY-MM-DD`; stored verbatim.
  pub date:       String,
}

/// Input for creating a [`Case`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCase {
  pub crime_type: String,
  pub status:     String,
  pub location:   String,
  pub date:       String,
}

impl NewCase {
  /// Build a new open case.
  pub fn new(
    crime_type: impl Into<String>,
    location: impl Into<String>,
    date: impl Into<String>,
  ) -> Self {
    Self {
      crime_type: crime_type.into(),
      status:     DEFAULT_STATUS.to_owned(),
      location:   location.into(),
      date:       date.into(),
    }
  }

  pub fn with_status(mut self, status: impl Into<String>) -> Self {
    self.status = status.into();
    self
  }
}
