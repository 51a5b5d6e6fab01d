//! Plain-text grid and JSON rendering of records.

use casebook_core::{
  case::Case,
  detective::Detective,
  evidence::Evidence,
  suspect::{CriminalRecord, Suspect},
};
use serde::Serialize;

/// A record that can be shown as one row of a grid.
pub trait Tabular {
  /// Plural noun used in "No ... found." messages.
  const PLURAL: &'static str;
  const HEADERS: &'static [&'static str];

  fn cells(&self) -> Vec<String>;
}

fn opt(value: Option<&str>) -> String { value.unwrap_or_default().to_owned() }

impl Tabular for Case {
  const PLURAL: &'static str = "cases";
  const HEADERS: &'static [&'static str] = &["ID", "Crime Type", "Status", "Location", "Date"];

  fn cells(&self) -> Vec<String> {
    vec![
      self.id.to_string(),
      self.crime_type.clone(),
      self.status.clone(),
      self.location.clone(),
      self.date.clone(),
    ]
  }
}

impl Tabular for Suspect {
  const PLURAL: &'static str = "suspects";
  const HEADERS: &'static [&'static str] = &["ID", "Name", "Age", "Alibi", "Case ID"];

  fn cells(&self) -> Vec<String> {
    vec![
      self.id.to_string(),
      self.name.clone(),
      self.age.map(|a| a.to_string()).unwrap_or_default(),
      opt(self.alibi.as_deref()),
      self.case_id.to_string(),
    ]
  }
}

impl Tabular for Evidence {
  const PLURAL: &'static str = "evidence";
  const HEADERS: &'static [&'static str] = &["ID", "Description", "Found Location", "Case ID"];

  fn cells(&self) -> Vec<String> {
    vec![
      self.id.to_string(),
      self.description.clone(),
      opt(self.found_location.as_deref()),
      self.case_id.to_string(),
    ]
  }
}

impl Tabular for Detective {
  const PLURAL: &'static str = "detectives";
  const HEADERS: &'static [&'static str] = &["ID", "Name", "Rank", "Solved Cases"];

  fn cells(&self) -> Vec<String> {
    vec![
      self.id.to_string(),
      self.name.clone(),
      self.rank.clone(),
      self.solved_cases.to_string(),
    ]
  }
}

impl Tabular for CriminalRecord {
  const PLURAL: &'static str = "criminal records";
  const HEADERS: &'static [&'static str] = &["ID", "Suspect ID", "Previous Crimes", "Sentence"];

  fn cells(&self) -> Vec<String> {
    vec![
      self.id.to_string(),
      // Orphaned records have lost their suspect.
      self.suspect_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_owned()),
      opt(self.previous_crimes.as_deref()),
      opt(self.sentence.as_deref()),
    ]
  }
}

/// Render rows as a grid:
///
/// ```text
/// +----+--------+
/// | ID | Name   |
/// +====+========+
/// | 1  | Carter |
/// +----+--------+
/// ```
pub fn grid<T: Tabular>(rows: &[T]) -> String {
  let body: Vec<Vec<String>> = rows.iter().map(Tabular::cells).collect();

  // Widths count chars, not display columns: wide or combining characters
  // shift the borders on their row but never truncate a cell.
  let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.chars().count()).collect();
  for row in &body {
    for (w, cell) in widths.iter_mut().zip(row) {
      *w = (*w).max(cell.chars().count());
    }
  }

  let mut out = rule(&widths, '-');
  out.push_str(&line(&widths, T::HEADERS.iter().copied()));
  out.push_str(&rule(&widths, '='));
  for row in &body {
    out.push_str(&line(&widths, row.iter().map(String::as_str)));
    out.push_str(&rule(&widths, '-'));
  }
  out
}

fn rule(widths: &[usize], fill: char) -> String {
  let mut out = String::from("+");
  for w in widths {
    out.extend(std::iter::repeat_n(fill, w + 2));
    out.push('+');
  }
  out.push('\n');
  out
}

fn line<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
  let mut out = String::from("|");
  for (cell, w) in cells.zip(widths) {
    out.push(' ');
    out.push_str(cell);
    out.extend(std::iter::repeat_n(' ', w - cell.chars().count() + 1));
    out.push('|');
  }
  out.push('\n');
  out
}

/// Where command results go: stdout, as grids or as JSON.
#[derive(Debug, Clone, Copy)]
pub struct Output {
  pub json: bool,
}

impl Output {
  pub fn records<T: Tabular + Serialize>(&self, rows: &[T]) -> anyhow::Result<()> {
    if self.json {
      println!("{}", serde_json::to_string_pretty(rows)?);
    } else if rows.is_empty() {
      println!("No {} found.", T::PLURAL);
    } else {
      print!("{}", grid(rows));
    }
    Ok(())
  }

  pub fn record<T: Tabular + Serialize>(&self, row: &T) -> anyhow::Result<()> {
    if self.json {
      println!("{}", serde_json::to_string_pretty(row)?);
    } else {
      print!("{}", grid(std::slice::from_ref(row)));
    }
    Ok(())
  }

  /// A status line. Suppressed in JSON mode so stdout stays parseable.
  pub fn message(&self, text: impl std::fmt::Display) {
    if !self.json {
      println!("{text}");
    }
  }
}

#[cfg(test)]
mod tests {
  use casebook_core::{CaseId, CriminalRecordId, DetectiveId};

  use super::*;

  #[test]
  fn grid_pads_to_widest_cell() {
    let rows = [
      Detective {
        id:           DetectiveId(1),
        name:         "J. Carter".into(),
        rank:         "Junior".into(),
        solved_cases: 0,
      },
      Detective {
        id:           DetectiveId(12),
        name:         "Holmes".into(),
        rank:         "Senior".into(),
        solved_cases: 143,
      },
    ];

    let expected = "\
+----+-----------+--------+--------------+
| ID | Name      | Rank   | Solved Cases |
+====+===========+========+==============+
| 1  | J. Carter | Junior | 0            |
+----+-----------+--------+--------------+
| 12 | Holmes    | Senior | 143          |
+----+-----------+--------+--------------+
";
    assert_eq!(grid(&rows), expected);
  }

  #[test]
  fn empty_grid_has_only_headers() {
    let out = grid::<Case>(&[]);
    assert_eq!(out.lines().count(), 3);
    assert!(out.contains("| ID | Crime Type |"));
  }

  #[test]
  fn orphan_record_shows_dash() {
    let record = CriminalRecord {
      id:              CriminalRecordId(3),
      previous_crimes: Some("Theft".into()),
      sentence:        None,
      suspect_id:      None,
    };
    assert_eq!(record.cells(), ["3", "-", "Theft", ""]);
  }

  #[test]
  fn case_cells_follow_headers() {
    let case = Case {
      id:         CaseId(1),
      crime_type: "Robbery".into(),
      status:     "Open".into(),
      location:   "5th Ave".into(),
      date:       "2024-01-01".into(),
    };
    assert_eq!(case.cells().len(), Case::HEADERS.len());
  }
}
