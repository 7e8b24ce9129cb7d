//! Buyer lead tracking core.
//!
//! An in-memory repository layer for buyer leads and their activity history,
//! domain services enforcing the workflow rules, and a CSV codec for bulk
//! import/export. State lives for the process lifetime only; the demo data
//! set is seeded at startup.

pub mod backend;

pub use backend::{initialize_backend, AppState};
