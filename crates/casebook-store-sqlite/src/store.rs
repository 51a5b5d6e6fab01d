//! [`SqliteStore`], the SQLite implementation of the Casebook repositories.

use std::{
  marker::PhantomData,
  path::{Path, PathBuf},
  sync::Arc,
};

use rusqlite::{OptionalExtension as _, Transaction, params};

use casebook_core::{
  CaseId, DetectiveId,
  case::Case,
  detective::Detective,
  evidence::Evidence,
  store::{Assignments, Repository},
  suspect::{CriminalRecord, Suspect},
};

use crate::{
  Error, Result,
  encode::Table,
  schema::{CONNECTION_PRAGMAS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Casebook store backed by a single SQLite file.
///
/// The handle holds only the database path. Every operation opens a fresh
/// connection, runs in its own transaction and closes the connection before
/// returning, so a crash between calls always leaves the last committed
/// state on disk. Cloning is cheap.
#[derive(Clone, Debug)]
pub struct SqliteStore {
  path: Arc<PathBuf>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let store = Self { path: Arc::new(path.as_ref().to_path_buf()) };

    let conn = store.connect().await?;
    let init = conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await;
    release(conn).await;
    init.map_err(|source| Error::Open { path: store.path().to_path_buf(), source })?;

    tracing::info!(path = %store.path().display(), "store opened");
    Ok(store)
  }

  pub fn path(&self) -> &Path { &self.path }

  pub fn cases(&self) -> Repo<Case> { Repo::new(self.clone()) }

  pub fn suspects(&self) -> Repo<Suspect> { Repo::new(self.clone()) }

  pub fn evidence(&self) -> Repo<Evidence> { Repo::new(self.clone()) }

  pub fn detectives(&self) -> Repo<Detective> { Repo::new(self.clone()) }

  pub fn criminal_records(&self) -> Repo<CriminalRecord> { Repo::new(self.clone()) }

  async fn connect(&self) -> Result<tokio_rusqlite::Connection> {
    tokio_rusqlite::Connection::open(self.path.as_path())
      .await
      .map_err(|source| Error::Open { path: self.path().to_path_buf(), source })
  }

  /// Run `work` as one unit of work.
  ///
  /// Opens a connection, enables foreign keys, begins a transaction, and
  /// commits only if `work` succeeds. On any error the transaction is dropped
  /// uncommitted (rolled back). The connection is closed on every path.
  async fn unit_of_work<F, R>(&self, op: &'static str, work: F) -> Result<R>
  where
    F: FnOnce(&Transaction<'_>) -> rusqlite::Result<R> + Send + 'static,
    R: Send + 'static,
  {
    let conn = self.connect().await?;
    tracing::debug!(op, "unit of work started");

    let outcome = conn
      .call(move |conn| {
        conn.execute_batch(CONNECTION_PRAGMAS)?;
        let tx = conn.transaction()?;
        let out = work(&tx)?;
        tx.commit()?;
        Ok(out)
      })
      .await;

    release(conn).await;

    match outcome {
      Ok(out) => {
        tracing::debug!(op, "unit of work committed");
        Ok(out)
      }
      Err(e) => {
        let err = Error::classify(e);
        tracing::debug!(op, error = %err, "unit of work rolled back");
        Err(err)
      }
    }
  }
}

/// Close a per-call connection. A failed close is logged, never surfaced:
/// the unit of work has already committed or rolled back by this point.
async fn release(conn: tokio_rusqlite::Connection) {
  if let Err(e) = conn.close().await {
    tracing::warn!(error = %e, "failed to close connection");
  }
}

// ─── Generic row helpers ─────────────────────────────────────────────────────

fn select_one<T: Table>(tx: &Transaction<'_>, id: i64) -> rusqlite::Result<Option<T>> {
  let sql = format!("SELECT {} FROM {} WHERE id = ?1", T::COLUMNS, T::TABLE);
  tx.query_row(&sql, params![id], T::from_row).optional()
}

fn select_where<T: Table>(
  tx: &Transaction<'_>,
  filter: &str,
  args: impl rusqlite::Params,
) -> rusqlite::Result<Vec<T>> {
  let sql = format!("SELECT {} FROM {} {filter} ORDER BY id", T::COLUMNS, T::TABLE);
  let mut stmt = tx.prepare(&sql)?;
  let rows = stmt
    .query_map(args, T::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

// ─── Repo ────────────────────────────────────────────────────────────────────

/// Repository for one record type, obtained from [`SqliteStore`].
pub struct Repo<T> {
  store:  SqliteStore,
  _table: PhantomData<fn() -> T>,
}

impl<T> Repo<T> {
  fn new(store: SqliteStore) -> Self { Self { store, _table: PhantomData } }
}

impl<T> Clone for Repo<T> {
  fn clone(&self) -> Self { Self::new(self.store.clone()) }
}

impl<T: Table> Repository for Repo<T> {
  type Record = T;
  type New = T::New;
  type Id = T::Id;
  type Error = Error;

  async fn create(&self, input: T::New) -> Result<T> {
    let record = self
      .store
      .unit_of_work("create", move |tx| {
        T::insert(tx, &input)?;
        let id = tx.last_insert_rowid();
        select_one::<T>(tx, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
      })
      .await?;

    let id: i64 = record.id().into();
    tracing::debug!(kind = T::KIND, id, "record created");
    Ok(record)
  }

  async fn get_all(&self) -> Result<Vec<T>> {
    self.store.unit_of_work("get_all", |tx| select_where::<T>(tx, "", [])).await
  }

  async fn find_by_id(&self, id: T::Id) -> Result<Option<T>> {
    let id: i64 = id.into();
    self.store.unit_of_work("find_by_id", move |tx| select_one::<T>(tx, id)).await
  }

  async fn delete(&self, id: T::Id) -> Result<bool> {
    let id: i64 = id.into();
    let count_dependents = tracing::enabled!(tracing::Level::DEBUG) && !T::DEPENDENTS.is_empty();

    let (deleted, cascaded) = self
      .store
      .unit_of_work("delete", move |tx| {
        // Only counted for the debug log; the schema does the cascading.
        let cascaded = if count_dependents {
          let mut n = 0_i64;
          for (table, column) in T::DEPENDENTS {
            let sql = format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1");
            n += tx.query_row(&sql, params![id], |r| r.get::<_, i64>(0))?;
          }
          Some(n)
        } else {
          None
        };

        let sql = format!("DELETE FROM {} WHERE id = ?1", T::TABLE);
        let deleted = tx.execute(&sql, params![id])? > 0;
        Ok((deleted, cascaded))
      })
      .await?;

    if deleted {
      tracing::debug!(kind = T::KIND, id, cascaded, "record deleted");
    } else {
      tracing::debug!(kind = T::KIND, id, "delete target not found");
    }
    Ok(deleted)
  }
}

// ─── Assignments impl ────────────────────────────────────────────────────────

impl Assignments for SqliteStore {
  type Error = Error;

  async fn assign(&self, detective_id: DetectiveId, case_id: CaseId) -> Result<bool> {
    let (d, c) = (detective_id.get(), case_id.get());
    let added = self
      .unit_of_work("assign", move |tx| {
        // OR IGNORE covers the primary key only; foreign key failures still
        // abort the statement.
        let n = tx.execute(
          "INSERT OR IGNORE INTO detective_case (detective_id, case_id) VALUES (?1, ?2)",
          params![d, c],
        )?;
        Ok(n > 0)
      })
      .await?;

    tracing::debug!(detective_id = d, case_id = c, added, "assignment recorded");
    Ok(added)
  }

  async fn unassign(&self, detective_id: DetectiveId, case_id: CaseId) -> Result<bool> {
    let (d, c) = (detective_id.get(), case_id.get());
    self
      .unit_of_work("unassign", move |tx| {
        let n = tx.execute(
          "DELETE FROM detective_case WHERE detective_id = ?1 AND case_id = ?2",
          params![d, c],
        )?;
        Ok(n > 0)
      })
      .await
  }

  async fn detectives_for_case(&self, case_id: CaseId) -> Result<Vec<Detective>> {
    let c = case_id.get();
    self
      .unit_of_work("detectives_for_case", move |tx| {
        select_where::<Detective>(
          tx,
          "WHERE id IN (SELECT detective_id FROM detective_case WHERE case_id = ?1)",
          params![c],
        )
      })
      .await
  }

  async fn cases_for_detective(&self, detective_id: DetectiveId) -> Result<Vec<Case>> {
    let d = detective_id.get();
    self
      .unit_of_work("cases_for_detective", move |tx| {
        select_where::<Case>(
          tx,
          "WHERE id IN (SELECT case_id FROM detective_case WHERE detective_id = ?1)",
          params![d],
        )
      })
      .await
  }
}
