//! Command-line surface and dispatch onto the store.

use std::{fmt::Display, process::ExitCode};

use anyhow::Context as _;
use clap::{Args, Subcommand, builder::NonEmptyStringValueParser};
use serde::Serialize;

use casebook_core::{
  CaseId, CriminalRecordId, DetectiveId, EvidenceId, SuspectId,
  case::NewCase,
  detective::NewDetective,
  evidence::NewEvidence,
  store::{Assignments, Repository},
  suspect::{NewCriminalRecord, NewSuspect},
};
use casebook_store_sqlite::SqliteStore;

use crate::render::{Output, Tabular};

// ─── Arguments ────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Manage cases.
  #[command(subcommand)]
  Case(CaseCommand),
  /// Manage suspects.
  #[command(subcommand)]
  Suspect(SuspectCommand),
  /// Manage evidence.
  #[command(subcommand)]
  Evidence(EvidenceCommand),
  /// Manage detectives.
  #[command(subcommand)]
  Detective(DetectiveCommand),
  /// Manage criminal records.
  #[command(subcommand)]
  Record(RecordCommand),
  /// Assign a detective to a case.
  Assign(AssignArgs),
  /// Remove a detective from a case.
  Unassign(AssignArgs),
}

#[derive(Subcommand, Debug)]
pub enum CaseCommand {
  /// Add a new case.
  Add(AddCase),
  /// List all cases.
  List,
  /// Show one case.
  Show { id: CaseId },
  /// Delete a case together with its suspects and evidence.
  Delete { id: CaseId },
  /// List the detectives assigned to a case.
  Detectives { id: CaseId },
}

#[derive(Args, Debug)]
pub struct AddCase {
  #[arg(long, value_parser = NonEmptyStringValueParser::new())]
  crime_type: String,
  /// Defaults to "Open".
  #[arg(long, value_parser = NonEmptyStringValueParser::new())]
  status:     Option<String>,
  #[arg(long, value_parser = NonEmptyStringValueParser::new())]
  location:   String,
  /// Date of the incident, YYYY-MM-DD.
  #[arg(long, value_parser = NonEmptyStringValueParser::new())]
  date:       String,
}

impl From<AddCase> for NewCase {
  fn from(args: AddCase) -> Self {
    let case = NewCase::new(args.crime_type, args.location, args.date);
    match args.status {
      Some(status) => case.with_status(status),
      None => case,
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum SuspectCommand {
  /// Add a suspect to an existing case.
  Add(AddSuspect),
  List,
  Show { id: SuspectId },
  Delete { id: SuspectId },
}

#[derive(Args, Debug)]
pub struct AddSuspect {
  #[arg(long, value_parser = NonEmptyStringValueParser::new())]
  name:    String,
  #[arg(long)]
  age:     i64,
  #[arg(long)]
  alibi:   Option<String>,
  #[arg(long)]
  case_id: CaseId,
}

impl From<AddSuspect> for NewSuspect {
  fn from(args: AddSuspect) -> Self {
    let suspect = NewSuspect::new(args.name, args.age, args.case_id);
    match args.alibi.filter(|a| !a.is_empty()) {
      Some(alibi) => suspect.with_alibi(alibi),
      None => suspect,
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum EvidenceCommand {
  /// Attach evidence to an existing case.
  Add(AddEvidence),
  List,
  Show { id: EvidenceId },
  Delete { id: EvidenceId },
}

#[derive(Args, Debug)]
pub struct AddEvidence {
  #[arg(long, value_parser = NonEmptyStringValueParser::new())]
  description:    String,
  #[arg(long)]
  found_location: Option<String>,
  #[arg(long)]
  case_id:        CaseId,
}

impl From<AddEvidence> for NewEvidence {
  fn from(args: AddEvidence) -> Self {
    let evidence = NewEvidence::new(args.description, args.case_id);
    match args.found_location.filter(|l| !l.is_empty()) {
      Some(location) => evidence.with_found_location(location),
      None => evidence,
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum DetectiveCommand {
  /// Add a detective.
  Add(AddDetective),
  List,
  Show { id: DetectiveId },
  Delete { id: DetectiveId },
  /// List the cases a detective is assigned to.
  Cases { id: DetectiveId },
}

#[derive(Args, Debug)]
pub struct AddDetective {
  #[arg(long, value_parser = NonEmptyStringValueParser::new())]
  name:         String,
  /// Defaults to "Junior".
  #[arg(long, value_parser = NonEmptyStringValueParser::new())]
  rank:         Option<String>,
  /// Defaults to 0.
  #[arg(long)]
  solved_cases: Option<i64>,
}

impl From<AddDetective> for NewDetective {
  fn from(args: AddDetective) -> Self {
    let mut detective = NewDetective::new(args.name);
    if let Some(rank) = args.rank {
      detective = detective.with_rank(rank);
    }
    if let Some(solved) = args.solved_cases {
      detective = detective.with_solved_cases(solved);
    }
    detective
  }
}

#[derive(Subcommand, Debug)]
pub enum RecordCommand {
  /// Add the criminal record of a suspect. A suspect has at most one.
  Add(AddRecord),
  List,
  Show { id: CriminalRecordId },
  Delete { id: CriminalRecordId },
}

#[derive(Args, Debug)]
pub struct AddRecord {
  #[arg(long)]
  suspect_id:      SuspectId,
  #[arg(long)]
  previous_crimes: Option<String>,
  #[arg(long)]
  sentence:        Option<String>,
}

impl From<AddRecord> for NewCriminalRecord {
  fn from(args: AddRecord) -> Self {
    NewCriminalRecord {
      suspect_id:      args.suspect_id,
      previous_crimes: args.previous_crimes,
      sentence:        args.sentence,
    }
  }
}

#[derive(Args, Debug)]
pub struct AssignArgs {
  #[arg(long)]
  detective: DetectiveId,
  #[arg(long = "case")]
  case_id:   CaseId,
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

/// The four operations every repository supports.
enum Crud<Id, New> {
  Add(New),
  List,
  Show(Id),
  Delete(Id),
}

/// Run one command as one store operation (two for the relation listings,
/// which first confirm the owner exists).
pub async fn execute(store: &SqliteStore, command: Command, out: Output) -> anyhow::Result<ExitCode> {
  match command {
    Command::Case(cmd) => {
      let action = match cmd {
        CaseCommand::Add(args) => {
          warn_on_odd_date(&args.date);
          Crud::Add(args.into())
        }
        CaseCommand::List => Crud::List,
        CaseCommand::Show { id } => Crud::Show(id),
        CaseCommand::Delete { id } => Crud::Delete(id),
        CaseCommand::Detectives { id } => return case_detectives(store, id, out).await,
      };
      crud(&store.cases(), CaseId::KIND, action, out).await
    }

    Command::Suspect(cmd) => {
      let action = match cmd {
        SuspectCommand::Add(args) => Crud::Add(args.into()),
        SuspectCommand::List => Crud::List,
        SuspectCommand::Show { id } => Crud::Show(id),
        SuspectCommand::Delete { id } => Crud::Delete(id),
      };
      crud(&store.suspects(), SuspectId::KIND, action, out).await
    }

    Command::Evidence(cmd) => {
      let action = match cmd {
        EvidenceCommand::Add(args) => Crud::Add(args.into()),
        EvidenceCommand::List => Crud::List,
        EvidenceCommand::Show { id } => Crud::Show(id),
        EvidenceCommand::Delete { id } => Crud::Delete(id),
      };
      crud(&store.evidence(), EvidenceId::KIND, action, out).await
    }

    Command::Detective(cmd) => {
      let action = match cmd {
        DetectiveCommand::Add(args) => Crud::Add(args.into()),
        DetectiveCommand::List => Crud::List,
        DetectiveCommand::Show { id } => Crud::Show(id),
        DetectiveCommand::Delete { id } => Crud::Delete(id),
        DetectiveCommand::Cases { id } => return detective_cases(store, id, out).await,
      };
      crud(&store.detectives(), DetectiveId::KIND, action, out).await
    }

    Command::Record(cmd) => {
      let action = match cmd {
        RecordCommand::Add(args) => Crud::Add(args.into()),
        RecordCommand::List => Crud::List,
        RecordCommand::Show { id } => Crud::Show(id),
        RecordCommand::Delete { id } => Crud::Delete(id),
      };
      crud(&store.criminal_records(), CriminalRecordId::KIND, action, out).await
    }

    Command::Assign(AssignArgs { detective, case_id }) => {
      let added = store
        .assign(detective, case_id)
        .await
        .with_context(|| format!("failed to assign detective {detective} to case {case_id}"))?;
      if added {
        out.message(format!("Detective {detective} assigned to case {case_id}."));
      } else {
        out.message(format!("Detective {detective} was already assigned to case {case_id}."));
      }
      Ok(ExitCode::SUCCESS)
    }

    Command::Unassign(AssignArgs { detective, case_id }) => {
      let removed = store
        .unassign(detective, case_id)
        .await
        .with_context(|| format!("failed to unassign detective {detective} from case {case_id}"))?;
      if removed {
        out.message(format!("Detective {detective} removed from case {case_id}."));
        Ok(ExitCode::SUCCESS)
      } else {
        out.message(format!("Detective {detective} is not assigned to case {case_id}."));
        Ok(ExitCode::FAILURE)
      }
    }
  }
}

async fn crud<R>(
  repo: &R,
  kind: &'static str,
  action: Crud<R::Id, R::New>,
  out: Output,
) -> anyhow::Result<ExitCode>
where
  R: Repository,
  R::Record: Tabular + Serialize,
  R::Id: Display,
{
  match action {
    Crud::Add(input) => {
      let record = repo
        .create(input)
        .await
        .with_context(|| format!("failed to add {kind}"))?;
      out.record(&record)?;
      out.message(format!("Added {kind}."));
    }
    Crud::List => out.records(&repo.get_all().await?)?,
    Crud::Show(id) => match repo.find_by_id(id).await? {
      Some(record) => out.record(&record)?,
      None => return Ok(not_found(kind, id)),
    },
    Crud::Delete(id) => {
      if !repo.delete(id).await? {
        return Ok(not_found(kind, id));
      }
      out.message(format!("Deleted {kind} {id}."));
    }
  }
  Ok(ExitCode::SUCCESS)
}

async fn case_detectives(store: &SqliteStore, id: CaseId, out: Output) -> anyhow::Result<ExitCode> {
  if store.cases().find_by_id(id).await?.is_none() {
    return Ok(not_found(CaseId::KIND, id));
  }
  out.records(&store.detectives_for_case(id).await?)?;
  Ok(ExitCode::SUCCESS)
}

async fn detective_cases(
  store: &SqliteStore,
  id: DetectiveId,
  out: Output,
) -> anyhow::Result<ExitCode> {
  if store.detectives().find_by_id(id).await?.is_none() {
    return Ok(not_found(DetectiveId::KIND, id));
  }
  out.records(&store.cases_for_detective(id).await?)?;
  Ok(ExitCode::SUCCESS)
}

fn not_found(kind: &str, id: impl Display) -> ExitCode {
  eprintln!("No {kind} with id {id}.");
  ExitCode::FAILURE
}

/// Dates are stored verbatim; flag ones that are not `YYYY-MM-DD`.
fn warn_on_odd_date(date: &str) {
  if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
    tracing::warn!(date, "case date is not in YYYY-MM-DD form; storing as given");
  }
}
