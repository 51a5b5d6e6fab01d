//! Integration tests for `SqliteStore` against a temporary database file.

use casebook_core::{
  CaseId, CriminalRecordId, DetectiveId, EvidenceId, SuspectId,
  case::NewCase,
  detective::NewDetective,
  evidence::NewEvidence,
  store::{Assignments, Repository},
  suspect::{NewCriminalRecord, NewSuspect},
};
use tempfile::TempDir;

use crate::{Error, SqliteStore};

/// The returned `TempDir` must outlive the store; dropping it removes the
/// database file.
async fn store() -> (TempDir, SqliteStore) {
  let dir = tempfile::tempdir().expect("temp dir");
  let store = SqliteStore::open(dir.path().join("crime.db"))
    .await
    .expect("open store");
  (dir, store)
}

fn robbery() -> NewCase { NewCase::new("Robbery", "5th Ave", "2024-01-01") }

// ─── Cases ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_case() {
  let (_dir, s) = store().await;

  let case = s.cases().create(robbery().with_status("Closed")).await.unwrap();
  assert_eq!(case.id, CaseId(1));
  assert_eq!(case.status, "Closed");

  let fetched = s.cases().find_by_id(case.id).await.unwrap();
  assert_eq!(fetched, Some(case));
}

#[tokio::test]
async fn case_status_defaults_to_open() {
  let (_dir, s) = store().await;
  let case = s.cases().create(robbery()).await.unwrap();
  assert_eq!(case.status, "Open");
}

#[tokio::test]
async fn get_all_is_empty_on_fresh_store() {
  let (_dir, s) = store().await;
  assert!(s.cases().get_all().await.unwrap().is_empty());
  assert!(s.suspects().get_all().await.unwrap().is_empty());
  assert!(s.evidence().get_all().await.unwrap().is_empty());
  assert!(s.detectives().get_all().await.unwrap().is_empty());
  assert!(s.criminal_records().get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_all_returns_every_case_in_insertion_order() {
  let (_dir, s) = store().await;
  for crime in ["Robbery", "Fraud", "Arson"] {
    s.cases()
      .create(NewCase::new(crime, "Downtown", "2024-02-02"))
      .await
      .unwrap();
  }

  let all = s.cases().get_all().await.unwrap();
  let crimes: Vec<_> = all.iter().map(|c| c.crime_type.as_str()).collect();
  assert_eq!(crimes, ["Robbery", "Fraud", "Arson"]);
}

#[tokio::test]
async fn find_missing_case_returns_none() {
  let (_dir, s) = store().await;
  assert!(s.cases().find_by_id(CaseId(99)).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_case_reports_not_found() {
  let (_dir, s) = store().await;
  s.cases().create(robbery()).await.unwrap();

  assert!(!s.cases().delete(CaseId(42)).await.unwrap());
  assert_eq!(s.cases().get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn deleted_case_is_not_found_and_id_not_reused() {
  let (_dir, s) = store().await;
  s.cases().create(robbery()).await.unwrap();
  let second = s.cases().create(robbery()).await.unwrap();

  assert!(s.cases().delete(second.id).await.unwrap());
  assert!(s.cases().find_by_id(second.id).await.unwrap().is_none());

  let third = s.cases().create(robbery()).await.unwrap();
  assert!(third.id > second.id);
}

// ─── Cascades ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn deleting_case_removes_its_suspect() {
  let (_dir, s) = store().await;

  let case = s.cases().create(robbery()).await.unwrap();
  assert_eq!(case.id, CaseId(1));

  let suspect = s
    .suspects()
    .create(NewSuspect::new("Jane Doe", 30, case.id).with_alibi("home"))
    .await
    .unwrap();
  assert_eq!(suspect.id, SuspectId(1));

  assert!(s.cases().delete(CaseId(1)).await.unwrap());
  assert!(s.suspects().find_by_id(SuspectId(1)).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_case_cascades_only_to_its_own_dependents() {
  let (_dir, s) = store().await;
  let doomed = s.cases().create(robbery()).await.unwrap();
  let kept = s
    .cases()
    .create(NewCase::new("Fraud", "Harbor", "2024-03-03"))
    .await
    .unwrap();

  for case_id in [doomed.id, kept.id] {
    s.suspects().create(NewSuspect::new("Suspect", 40, case_id)).await.unwrap();
    s.evidence()
      .create(NewEvidence::new("Glove", case_id).with_found_location("Alley"))
      .await
      .unwrap();
  }

  assert!(s.cases().delete(doomed.id).await.unwrap());

  let suspects = s.suspects().get_all().await.unwrap();
  let evidence = s.evidence().get_all().await.unwrap();
  assert_eq!(suspects.len(), 1);
  assert_eq!(evidence.len(), 1);
  assert!(suspects.iter().all(|x| x.case_id == kept.id));
  assert!(evidence.iter().all(|x| x.case_id == kept.id));
}

#[tokio::test]
async fn deleting_suspect_orphans_criminal_record() {
  let (_dir, s) = store().await;
  let case = s.cases().create(robbery()).await.unwrap();
  let suspect = s
    .suspects()
    .create(NewSuspect::new("Jane Doe", 30, case.id))
    .await
    .unwrap();
  let record = s
    .criminal_records()
    .create(NewCriminalRecord::new(suspect.id).with_previous_crimes("Theft"))
    .await
    .unwrap();
  assert_eq!(record.suspect_id, Some(suspect.id));

  assert!(s.suspects().delete(suspect.id).await.unwrap());

  let orphan = s
    .criminal_records()
    .find_by_id(record.id)
    .await
    .unwrap()
    .expect("record survives its suspect");
  assert!(orphan.is_orphan());
  assert_eq!(orphan.previous_crimes.as_deref(), Some("Theft"));
}

#[tokio::test]
async fn deleting_case_with_recorded_suspect_keeps_record() {
  let (_dir, s) = store().await;
  let case = s.cases().create(robbery()).await.unwrap();
  let suspect = s
    .suspects()
    .create(NewSuspect::new("Jane Doe", 30, case.id))
    .await
    .unwrap();
  let record = s
    .criminal_records()
    .create(NewCriminalRecord::new(suspect.id))
    .await
    .unwrap();

  assert!(s.cases().delete(case.id).await.unwrap());

  let orphan = s.criminal_records().find_by_id(record.id).await.unwrap().unwrap();
  assert_eq!(orphan.suspect_id, None);
}

#[tokio::test]
async fn case_delete_rolls_back_when_cascade_fails() {
  let (_dir, s) = store().await;
  let case = s.cases().create(robbery()).await.unwrap();
  s.suspects().create(NewSuspect::new("Jane Doe", 30, case.id)).await.unwrap();
  s.evidence().create(NewEvidence::new("Glove", case.id)).await.unwrap();

  // Evidence rows refuse deletion, so the cascade fails halfway through.
  rusqlite::Connection::open(s.path())
    .unwrap()
    .execute_batch(
      "CREATE TRIGGER evidence_sealed BEFORE DELETE ON evidence
       BEGIN SELECT RAISE(ABORT, 'evidence is sealed'); END;",
    )
    .unwrap();

  let err = s.cases().delete(case.id).await.unwrap_err();
  assert!(err.is_constraint(), "unexpected error: {err}");

  assert_eq!(s.cases().get_all().await.unwrap().len(), 1);
  assert_eq!(s.suspects().get_all().await.unwrap().len(), 1);
  assert_eq!(s.evidence().get_all().await.unwrap().len(), 1);
}

// ─── Constraints ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn suspect_for_missing_case_is_rejected() {
  let (_dir, s) = store().await;

  let err = s
    .suspects()
    .create(NewSuspect::new("Nobody", 20, CaseId(7)))
    .await
    .unwrap_err();
  assert!(err.is_constraint(), "unexpected error: {err}");
  assert!(s.suspects().get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn evidence_for_missing_case_is_rejected() {
  let (_dir, s) = store().await;
  let err = s
    .evidence()
    .create(NewEvidence::new("Knife", CaseId(1)))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Constraint(_)));
}

#[tokio::test]
async fn second_record_for_same_suspect_is_rejected() {
  let (_dir, s) = store().await;
  let case = s.cases().create(robbery()).await.unwrap();
  let suspect = s
    .suspects()
    .create(NewSuspect::new("Jane Doe", 30, case.id))
    .await
    .unwrap();

  let first = s
    .criminal_records()
    .create(NewCriminalRecord::new(suspect.id).with_sentence("2 years"))
    .await
    .unwrap();

  let err = s
    .criminal_records()
    .create(NewCriminalRecord::new(suspect.id).with_sentence("Life"))
    .await
    .unwrap_err();
  assert!(err.is_constraint(), "unexpected error: {err}");

  let all = s.criminal_records().get_all().await.unwrap();
  assert_eq!(all, vec![first]);
}

// ─── Detectives ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn detective_defaults_apply() {
  let (_dir, s) = store().await;
  let d = s.detectives().create(NewDetective::new("J. Carter")).await.unwrap();
  assert_eq!(d.rank, "Junior");
  assert_eq!(d.solved_cases, 0);

  let fetched = s.detectives().find_by_id(d.id).await.unwrap().unwrap();
  assert_eq!(fetched, d);
}

#[tokio::test]
async fn evidence_and_suspect_round_trip_optional_fields() {
  let (_dir, s) = store().await;
  let case = s.cases().create(robbery()).await.unwrap();

  let bare = s.evidence().create(NewEvidence::new("Hair", case.id)).await.unwrap();
  assert_eq!(bare.found_location, None);
  assert_eq!(
    s.evidence().find_by_id(EvidenceId(1)).await.unwrap(),
    Some(bare)
  );

  let suspect = s
    .suspects()
    .create(NewSuspect::new("John Roe", 52, case.id))
    .await
    .unwrap();
  assert_eq!(suspect.alibi, None);
  assert_eq!(suspect.age, Some(52));
  assert_eq!(s.suspects().find_by_id(suspect.id).await.unwrap(), Some(suspect));
}

// ─── Assignments ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn assign_and_list_both_directions() {
  let (_dir, s) = store().await;
  let case = s.cases().create(robbery()).await.unwrap();
  let other = s
    .cases()
    .create(NewCase::new("Fraud", "Harbor", "2024-03-03"))
    .await
    .unwrap();
  let carter = s.detectives().create(NewDetective::new("J. Carter")).await.unwrap();
  let holmes = s
    .detectives()
    .create(NewDetective::new("R. Holmes").with_rank("Senior"))
    .await
    .unwrap();

  assert!(s.assign(carter.id, case.id).await.unwrap());
  assert!(s.assign(holmes.id, case.id).await.unwrap());
  assert!(s.assign(holmes.id, other.id).await.unwrap());

  let on_case = s.detectives_for_case(case.id).await.unwrap();
  assert_eq!(on_case, vec![carter.clone(), holmes.clone()]);

  let holmes_cases = s.cases_for_detective(holmes.id).await.unwrap();
  assert_eq!(holmes_cases, vec![case, other]);
}

#[tokio::test]
async fn duplicate_assignment_is_a_no_op() {
  let (_dir, s) = store().await;
  let case = s.cases().create(robbery()).await.unwrap();
  let d = s.detectives().create(NewDetective::new("J. Carter")).await.unwrap();

  assert!(s.assign(d.id, case.id).await.unwrap());
  assert!(!s.assign(d.id, case.id).await.unwrap());
  assert_eq!(s.detectives_for_case(case.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn assigning_unknown_ids_is_a_constraint_error() {
  let (_dir, s) = store().await;
  let case = s.cases().create(robbery()).await.unwrap();

  let err = s.assign(DetectiveId(5), case.id).await.unwrap_err();
  assert!(err.is_constraint(), "unexpected error: {err}");
}

#[tokio::test]
async fn unassign_reports_whether_link_existed() {
  let (_dir, s) = store().await;
  let case = s.cases().create(robbery()).await.unwrap();
  let d = s.detectives().create(NewDetective::new("J. Carter")).await.unwrap();

  assert!(!s.unassign(d.id, case.id).await.unwrap());
  s.assign(d.id, case.id).await.unwrap();
  assert!(s.unassign(d.id, case.id).await.unwrap());
  assert!(s.cases_for_detective(d.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_detective_keeps_cases() {
  let (_dir, s) = store().await;
  let case = s.cases().create(robbery()).await.unwrap();
  let d = s.detectives().create(NewDetective::new("J. Carter")).await.unwrap();
  s.assign(d.id, case.id).await.unwrap();

  assert!(s.detectives().delete(d.id).await.unwrap());

  assert!(s.cases().find_by_id(case.id).await.unwrap().is_some());
  assert!(s.detectives_for_case(case.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_case_keeps_detectives() {
  let (_dir, s) = store().await;
  let case = s.cases().create(robbery()).await.unwrap();
  let d = s.detectives().create(NewDetective::new("J. Carter")).await.unwrap();
  s.assign(d.id, case.id).await.unwrap();

  assert!(s.cases().delete(case.id).await.unwrap());

  assert!(s.detectives().find_by_id(d.id).await.unwrap().is_some());
  assert!(s.cases_for_detective(d.id).await.unwrap().is_empty());
}

// ─── Store lifecycle ─────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_keeps_data() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("crime.db");

  let first = SqliteStore::open(&path).await.unwrap();
  first.cases().create(robbery()).await.unwrap();
  drop(first);

  let second = SqliteStore::open(&path).await.unwrap();
  let all = second.cases().get_all().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].crime_type, "Robbery");
}

#[tokio::test]
async fn opening_in_missing_directory_fails() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("no-such-dir").join("crime.db");

  let err = SqliteStore::open(&path).await.unwrap_err();
  assert!(matches!(err, Error::Open { .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn missing_criminal_record_is_none_not_error() {
  let (_dir, s) = store().await;
  assert!(
    s.criminal_records()
      .find_by_id(CriminalRecordId(1))
      .await
      .unwrap()
      .is_none()
  );
  assert!(!s.criminal_records().delete(CriminalRecordId(1)).await.unwrap());
}
