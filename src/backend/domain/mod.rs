//! # Domain Module
//!
//! Business logic for the lead tracker: buyer CRUD and search, the activity
//! history rules (a "Created lead" entry on creation, a "Status changed"
//! entry on every status transition, cascade removal on delete), demo
//! authentication, and CSV import/export. Services work against the storage
//! traits and know nothing about any UI.

pub mod auth_service;
pub mod buyer_service;
pub mod commands;
pub mod csv_codec;
pub mod errors;
pub mod export_service;
pub mod import_service;
pub mod models;

pub use auth_service::AuthService;
pub use buyer_service::BuyerService;
pub use errors::DomainError;
pub use export_service::ExportService;
pub use import_service::ImportService;
