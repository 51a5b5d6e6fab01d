//! The `Repository` and `Assignments` traits.
//!
//! Traits are implemented by storage backends (e.g. `casebook-store-sqlite`).
//! Callers such as `casebook-cli` depend on these abstractions, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  case::Case,
  detective::Detective,
  CaseId, DetectiveId,
};

// ─── Repository ──────────────────────────────────────────────────────────────

/// Create/read/delete access to one kind of record.
///
/// Every call is its own unit of work: it acquires a connection, runs inside
/// a transaction, commits or rolls back, and releases the connection before
/// the returned future resolves. No state is carried between calls.
///
/// Records are never updated in place; there is no update operation.
pub trait Repository: Send + Sync {
  /// The persisted record, carrying its store-assigned id.
  type Record: Send + 'static;
  /// Caller-supplied fields for a new record.
  type New: Send + 'static;
  type Id: Copy + Send + 'static;
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new record and return it with its freshly assigned id.
  ///
  /// Schema constraint violations (unknown foreign key, duplicate unique
  /// value) are returned as errors and leave the store unchanged.
  fn create(
    &self,
    input: Self::New,
  ) -> impl Future<Output = Result<Self::Record, Self::Error>> + Send + '_;

  /// Every record of this kind, in insertion order.
  fn get_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Self::Record>, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: Self::Id,
  ) -> impl Future<Output = Result<Option<Self::Record>, Self::Error>> + Send + '_;

  /// Delete a record by id, including anything the schema cascades to.
  ///
  /// Returns `false` without touching the store if no record had that id.
  fn delete(
    &self,
    id: Self::Id,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Assignments ─────────────────────────────────────────────────────────────

/// The many-to-many association between detectives and cases.
pub trait Assignments: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Assign a detective to a case. Returns `false` if already assigned.
  fn assign(
    &self,
    detective_id: DetectiveId,
    case_id: CaseId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove an assignment. Returns `false` if there was none.
  fn unassign(
    &self,
    detective_id: DetectiveId,
    case_id: CaseId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Detectives assigned to a case, ordered by id.
  fn detectives_for_case(
    &self,
    case_id: CaseId,
  ) -> impl Future<Output = Result<Vec<Detective>, Self::Error>> + Send + '_;

  /// Cases a detective is assigned to, ordered by id.
  fn cases_for_detective(
    &self,
    detective_id: DetectiveId,
  ) -> impl Future<Output = Result<Vec<Case>, Self::Error>> + Send + '_;
}
