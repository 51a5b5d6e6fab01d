//! Mapping between Casebook entity types and their SQLite tables.
//!
//! Each entity implements [`Table`]: its table name, the column list used for
//! reads, how to bind an insert, and how to decode a row. The generic
//! repository in `store.rs` builds every statement from these pieces.

use rusqlite::{Row, Transaction, params};

use casebook_core::{
  CaseId, CriminalRecordId, DetectiveId, EvidenceId, SuspectId,
  case::{Case, NewCase},
  detective::{Detective, NewDetective},
  evidence::{Evidence, NewEvidence},
  suspect::{CriminalRecord, NewCriminalRecord, NewSuspect, Suspect},
};

/// A record type stored in its own SQLite table.
pub trait Table: Sized + Send + 'static {
  type New: Send + 'static;
  type Id: Copy + Send + 'static + From<i64> + Into<i64>;

  /// Table name.
  const TABLE: &'static str;
  /// Entity name used in log output.
  const KIND: &'static str;
  /// Columns read back by [`Table::from_row`], in order. `id` comes first.
  const COLUMNS: &'static str;
  /// `(table, column)` pairs whose rows are deleted along with this record
  /// by `ON DELETE CASCADE`. Only consulted for logging.
  const DEPENDENTS: &'static [(&'static str, &'static str)] = &[];

  fn id(&self) -> Self::Id;

  /// Execute the `INSERT` for a new record. The caller reads the assigned id
  /// back with `last_insert_rowid`.
  fn insert(tx: &Transaction<'_>, input: &Self::New) -> rusqlite::Result<()>;

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

// ─── Case ────────────────────────────────────────────────────────────────────

impl Table for Case {
  type New = NewCase;
  type Id = CaseId;

  const TABLE: &'static str = "cases";
  const KIND: &'static str = CaseId::KIND;
  const COLUMNS: &'static str = "id, crime_type, status, location, date";
  const DEPENDENTS: &'static [(&'static str, &'static str)] =
    &[("suspects", "case_id"), ("evidence", "case_id")];

  fn id(&self) -> CaseId { self.id }

  fn insert(tx: &Transaction<'_>, input: &NewCase) -> rusqlite::Result<()> {
    tx.execute(
      "INSERT INTO cases (crime_type, status, location, date) VALUES (?1, ?2, ?3, ?4)",
      params![input.crime_type, input.status, input.location, input.date],
    )?;
    Ok(())
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Case {
      id:         CaseId(row.get(0)?),
      crime_type: row.get(1)?,
      // Rows written outside this crate may carry an explicit NULL.
      status:     row
        .get::<_, Option<String>>(2)?
        .unwrap_or_else(|| casebook_core::case::DEFAULT_STATUS.to_owned()),
      location:   row.get(3)?,
      date:       row.get(4)?,
    })
  }
}

// ─── Suspect ─────────────────────────────────────────────────────────────────

impl Table for Suspect {
  type New = NewSuspect;
  type Id = SuspectId;

  const TABLE: &'static str = "suspects";
  const KIND: &'static str = SuspectId::KIND;
  const COLUMNS: &'static str = "id, name, age, alibi, case_id";

  fn id(&self) -> SuspectId { self.id }

  fn insert(tx: &Transaction<'_>, input: &NewSuspect) -> rusqlite::Result<()> {
    tx.execute(
      "INSERT INTO suspects (name, age, alibi, case_id) VALUES (?1, ?2, ?3, ?4)",
      params![input.name, input.age, input.alibi, input.case_id.get()],
    )?;
    Ok(())
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Suspect {
      id:      SuspectId(row.get(0)?),
      name:    row.get(1)?,
      age:     row.get(2)?,
      alibi:   row.get(3)?,
      case_id: CaseId(row.get(4)?),
    })
  }
}

// ─── Evidence ────────────────────────────────────────────────────────────────

impl Table for Evidence {
  type New = NewEvidence;
  type Id = EvidenceId;

  const TABLE: &'static str = "evidence";
  const KIND: &'static str = EvidenceId::KIND;
  const COLUMNS: &'static str = "id, description, found_location, case_id";

  fn id(&self) -> EvidenceId { self.id }

  fn insert(tx: &Transaction<'_>, input: &NewEvidence) -> rusqlite::Result<()> {
    tx.execute(
      "INSERT INTO evidence (description, found_location, case_id) VALUES (?1, ?2, ?3)",
      params![input.description, input.found_location, input.case_id.get()],
    )?;
    Ok(())
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Evidence {
      id:             EvidenceId(row.get(0)?),
      description:    row.get(1)?,
      found_location: row.get(2)?,
      case_id:        CaseId(row.get(3)?),
    })
  }
}

// ─── Detective ───────────────────────────────────────────────────────────────

impl Table for Detective {
  type New = NewDetective;
  type Id = DetectiveId;

  const TABLE: &'static str = "detectives";
  const KIND: &'static str = DetectiveId::KIND;
  const COLUMNS: &'static str = "id, name, rank, solved_cases";

  fn id(&self) -> DetectiveId { self.id }

  fn insert(tx: &Transaction<'_>, input: &NewDetective) -> rusqlite::Result<()> {
    tx.execute(
      "INSERT INTO detectives (name, rank, solved_cases) VALUES (?1, ?2, ?3)",
      params![input.name, input.rank, input.solved_cases],
    )?;
    Ok(())
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Detective {
      id:           DetectiveId(row.get(0)?),
      name:         row.get(1)?,
      rank:         row
        .get::<_, Option<String>>(2)?
        .unwrap_or_else(|| casebook_core::detective::DEFAULT_RANK.to_owned()),
      solved_cases: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
    })
  }
}

// ─── CriminalRecord ──────────────────────────────────────────────────────────

impl Table for CriminalRecord {
  type New = NewCriminalRecord;
  type Id = CriminalRecordId;

  const TABLE: &'static str = "criminal_records";
  const KIND: &'static str = CriminalRecordId::KIND;
  const COLUMNS: &'static str = "id, previous_crimes, sentence, suspect_id";

  fn id(&self) -> CriminalRecordId { self.id }

  fn insert(tx: &Transaction<'_>, input: &NewCriminalRecord) -> rusqlite::Result<()> {
    tx.execute(
      "INSERT INTO criminal_records (previous_crimes, sentence, suspect_id)
       VALUES (?1, ?2, ?3)",
      params![input.previous_crimes, input.sentence, input.suspect_id.get()],
    )?;
    Ok(())
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(CriminalRecord {
      id:              CriminalRecordId(row.get(0)?),
      previous_crimes: row.get(1)?,
      sentence:        row.get(2)?,
      suspect_id:      row.get::<_, Option<i64>>(3)?.map(SuspectId),
    })
  }
}
