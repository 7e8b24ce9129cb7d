//! Bulk CSV import.
//!
//! Parsing is all-or-nothing: any malformed row aborts the batch before a
//! single lead is created. Creation afterwards is best-effort per row, so a
//! row that fails a business rule is counted and logged without stopping the
//! rest of the batch.

use anyhow::Result;
use log::{error, info};

use crate::backend::domain::buyer_service::BuyerService;
use crate::backend::domain::commands::import_export::ImportCsvResult;
use crate::backend::domain::csv_codec;

/// Service orchestrating CSV imports through the buyer service.
#[derive(Clone)]
pub struct ImportService {
    buyer_service: BuyerService,
}

impl ImportService {
    pub fn new(buyer_service: BuyerService) -> Self {
        Self { buyer_service }
    }

    /// Import buyer leads from CSV text on behalf of `actor_id`.
    pub fn import_csv(&self, csv_content: &str, actor_id: &str) -> Result<ImportCsvResult> {
        let commands = csv_codec::csv_to_buyer_commands(csv_content)?;
        let total = commands.len();
        info!("Importing {} buyer leads from CSV", total);

        let mut imported = 0;
        let mut row_errors = Vec::new();
        for (index, command) in commands.into_iter().enumerate() {
            match self.buyer_service.create_buyer(command, actor_id) {
                Ok(_) => imported += 1,
                Err(err) => {
                    error!("Failed to import buyer {}: {}", index + 1, err);
                    row_errors.push(format!("Buyer {}: {}", index + 1, err));
                }
            }
        }

        let success_message = format!("Successfully imported {} of {} buyers", imported, total);
        info!("{}", success_message);

        Ok(ImportCsvResult {
            imported,
            total,
            row_errors,
            success_message,
        })
    }
}
