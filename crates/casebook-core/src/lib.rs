//! Core types and trait definitions for the Casebook investigation store.
//!
//! This crate is free of database dependencies. Storage backends implement
//! [`store::Repository`] and [`store::Assignments`]; callers depend on those
//! traits and on the entity types defined here.

// Native `async fn` in traits; the returned futures are declared `Send`
// explicitly in the trait signatures.
#![allow(async_fn_in_trait)]

pub mod case;
pub mod detective;
pub mod error;
pub mod evidence;
pub mod id;
pub mod store;
pub mod suspect;

pub use error::{Error, Result};
pub use id::{CaseId, CriminalRecordId, DetectiveId, EvidenceId, SuspectId};
