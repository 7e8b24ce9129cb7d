//! CSV export orchestration: snapshot the current leads through the buyer
//! service, render them, and suggest a download filename. Writing the bytes
//! anywhere is the caller's job; the core produces text only.

use anyhow::Result;
use chrono::Utc;
use log::info;

use crate::backend::domain::buyer_service::BuyerService;
use crate::backend::domain::commands::import_export::ExportCsvResult;
use crate::backend::domain::csv_codec;

#[derive(Clone)]
pub struct ExportService {}

impl ExportService {
    pub fn new() -> Self {
        Self {}
    }

    /// Export every current buyer lead as CSV.
    pub fn export_buyers(&self, buyer_service: &BuyerService) -> Result<ExportCsvResult> {
        let buyers = buyer_service.list_buyers()?.buyers;
        let csv_content = csv_codec::buyers_to_csv(&buyers)?;
        let filename = format!("buyers_{}.csv", Utc::now().format("%Y%m%d"));

        info!(
            "Exported {} buyer leads ({} bytes) as {}",
            buyers.len(),
            csv_content.len(),
            filename
        );

        Ok(ExportCsvResult {
            csv_content,
            filename,
            buyer_count: buyers.len(),
        })
    }

    /// Produce the import template offered to users before uploading.
    pub fn export_template(&self) -> Result<ExportCsvResult> {
        let csv_content = csv_codec::build_template()?;
        Ok(ExportCsvResult {
            csv_content,
            filename: "buyer-import-template.csv".to_string(),
            buyer_count: 1,
        })
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}
