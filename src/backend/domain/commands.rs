//! Domain-level command and query types.
//!
//! These structs are the contract between callers (a UI layer, the demo
//! binary, tests) and the services in this module. Services take a command
//! in and hand a result back; nothing else crosses the boundary.

pub mod buyers {
    use crate::backend::domain::models::buyer::{Buyer, BuyerStatus, PropertyType};

    /// Input for creating a new buyer lead.
    #[derive(Debug, Clone, Default)]
    pub struct CreateBuyerCommand {
        pub first_name: String,
        pub last_name: String,
        pub email: String,
        pub phone: Option<String>,
        pub budget: Option<f64>,
        pub preferred_location: Option<String>,
        pub property_type: Option<PropertyType>,
        /// Defaults to `BuyerStatus::New` when unset.
        pub status: Option<BuyerStatus>,
        pub source: Option<String>,
        pub notes: Option<String>,
    }

    /// Partial update of an existing buyer. `None` fields are left as-is.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateBuyerCommand {
        pub buyer_id: String,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub budget: Option<f64>,
        pub preferred_location: Option<String>,
        pub property_type: Option<PropertyType>,
        pub status: Option<BuyerStatus>,
        pub source: Option<String>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct GetBuyerCommand {
        pub buyer_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteBuyerCommand {
        pub buyer_id: String,
    }

    /// Free-text search across buyer fields.
    #[derive(Debug, Clone)]
    pub struct SearchBuyersCommand {
        pub query: String,
    }

    /// Structured filters. All provided criteria must hold.
    #[derive(Debug, Clone, Default)]
    pub struct BuyerFiltersCommand {
        pub status: Option<BuyerStatus>,
        pub property_type: Option<PropertyType>,
        pub min_budget: Option<f64>,
        pub max_budget: Option<f64>,
        pub location: Option<String>,
        pub source: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct CreateBuyerResult {
        pub buyer: Buyer,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateBuyerResult {
        pub buyer: Buyer,
    }

    #[derive(Debug, Clone)]
    pub struct GetBuyerResult {
        pub buyer: Option<Buyer>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteBuyerResult {
        pub deleted: bool,
    }

    #[derive(Debug, Clone)]
    pub struct ListBuyersResult {
        pub buyers: Vec<Buyer>,
    }

    /// Dashboard counts.
    #[derive(Debug, Clone)]
    pub struct BuyerStatsResult {
        pub total: usize,
        pub qualified: usize,
        pub viewing: usize,
        pub closed: usize,
    }
}

pub mod history {
    use crate::backend::domain::models::history::HistoryEntry;

    /// Input for manually recording an activity against a buyer.
    #[derive(Debug, Clone)]
    pub struct AddHistoryCommand {
        pub buyer_id: String,
        pub action: String,
        pub details: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct ListHistoryCommand {
        pub buyer_id: String,
    }

    /// Entries ordered most recent first.
    #[derive(Debug, Clone)]
    pub struct ListHistoryResult {
        pub entries: Vec<HistoryEntry>,
    }
}

pub mod import_export {
    /// Outcome of a bulk CSV import.
    ///
    /// Parsing is all-or-nothing; row creation afterwards is best-effort,
    /// so `imported` can be less than `total`.
    #[derive(Debug, Clone)]
    pub struct ImportCsvResult {
        pub imported: usize,
        pub total: usize,
        pub row_errors: Vec<String>,
        pub success_message: String,
    }

    /// A rendered CSV document plus a suggested download filename.
    #[derive(Debug, Clone)]
    pub struct ExportCsvResult {
        pub csv_content: String,
        pub filename: String,
        pub buyer_count: usize,
    }
}
