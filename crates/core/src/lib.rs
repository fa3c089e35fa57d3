//! Telemetry scoring engine for the MINDTWIN diagnostics service.
//!
//! Everything in this crate is pure: evaluators take a request batch and
//! return a fresh response envelope. The only shared mutable structure is the
//! [`ledger::AlertLedger`], which owns its own lock.

pub mod anomaly;
pub mod error;
pub mod fallback;
pub mod features;
pub mod ledger;
pub mod maintenance;
pub mod offline;
pub mod optimizer;
pub mod parameter;
pub mod settings;
pub mod severity;
pub mod telemetry;
pub mod types;
pub mod validation;
