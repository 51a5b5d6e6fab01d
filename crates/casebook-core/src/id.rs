//! Typed record identifiers.
//!
//! Identifiers are assigned by the store, start at 1 and are never reused.
//! Each entity gets its own newtype so a `SuspectId` can never be passed
//! where a `CaseId` is expected.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

macro_rules! record_id {
  ($(#[$meta:meta])* $name:ident, $kind:literal) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub i64);

    impl $name {
      /// Human-readable name of the entity this id refers to.
      pub const KIND: &'static str = $kind;

      pub fn get(self) -> i64 { self.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
      }
    }

    impl From<i64> for $name {
      fn from(raw: i64) -> Self { Self(raw) }
    }

    impl From<$name> for i64 {
      fn from(id: $name) -> Self { id.0 }
    }

    impl FromStr for $name {
      type Err = Error;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_positive(s)
          .map(Self)
          .ok_or_else(|| Error::InvalidId { kind: $kind, input: s.to_owned() })
      }
    }
  };
}

/// Accept only plain ASCII digits with a non-zero value.
fn parse_positive(s: &str) -> Option<i64> {
  if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  s.parse::<i64>().ok().filter(|n| *n > 0)
}

record_id!(
  /// Identifier of a [`Case`](crate::case::Case).
  CaseId, "case"
);
record_id!(
  /// Identifier of a [`Suspect`](crate::suspect::Suspect).
  SuspectId, "suspect"
);
record_id!(
  /// Identifier of an [`Evidence`](crate::evidence::Evidence) item.
  EvidenceId, "evidence"
);
record_id!(
  /// Identifier of a [`Detective`](crate::detective::Detective).
  DetectiveId, "detective"
);
record_id!(
  /// Identifier of a [`CriminalRecord`](crate::suspect::CriminalRecord).
  CriminalRecordId, "criminal record"
);
