//! # Backend Module
//!
//! Everything non-UI: domain services on top of the storage layer. The
//! layering matches what a fuller application would use,
//!
//! ```text
//! UI layer (out of scope here)
//!     |
//! Domain layer (business logic, services)
//!     |
//! Storage layer (in-memory collections)
//! ```
//!
//! so the in-memory store can later be replaced by a persistent one without
//! touching the services.

pub mod domain;
pub mod storage;

use anyhow::Result;
use log::info;

use crate::backend::domain::{AuthService, BuyerService, ExportService, ImportService};
use crate::backend::storage::MemoryConnection;

/// Main application state that holds all services.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub buyer_service: BuyerService,
    pub import_service: ImportService,
    pub export_service: ExportService,
}

/// Initialize the backend with all required services over a seeded store.
pub fn initialize_backend() -> Result<AppState> {
    info!("Setting up in-memory store");
    let connection = MemoryConnection::with_seed_data();

    info!("Setting up domain services");
    let buyer_service = BuyerService::new(connection);
    let import_service = ImportService::new(buyer_service.clone());

    Ok(AppState {
        auth_service: AuthService::new(),
        buyer_service,
        import_service,
        export_service: ExportService::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::commands::buyers::SearchBuyersCommand;

    #[test]
    fn test_initialize_backend_wires_services_to_one_store() {
        let state = initialize_backend().unwrap();

        assert_eq!(state.buyer_service.list_buyers().unwrap().buyers.len(), 3);

        // The import service writes through the same store the buyer
        // service reads.
        let actor = state.auth_service.sign_in("admin@company.com", "demo123").unwrap();
        let text = "First Name,Last Name,Email\nJane,Doe,jane@example.com\n";
        state.import_service.import_csv(text, &actor.id).unwrap();

        let found = state
            .buyer_service
            .search_buyers(SearchBuyersCommand {
                query: "jane".to_string(),
            })
            .unwrap();
        assert_eq!(found.buyers.len(), 1);
    }
}
