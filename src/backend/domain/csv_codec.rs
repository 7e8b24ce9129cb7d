//! CSV codec for buyer leads.
//!
//! Converts buyer records to CSV text for export and parses uploaded CSV
//! text back into create commands for import. Both directions use RFC-4180
//! quoting: a field is wrapped in double quotes only when it contains a
//! comma, a double quote, or a newline, and inner quotes are doubled.

use anyhow::Result;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};

use crate::backend::domain::commands::buyers::CreateBuyerCommand;
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::buyer::{is_valid_email, Buyer, BuyerStatus, PropertyType};

/// Export column order. Import recognizes the first ten; the date columns
/// are derived data and ignored on the way back in.
pub const EXPORT_HEADERS: [&str; 12] = [
    "First Name",
    "Last Name",
    "Email",
    "Phone",
    "Budget",
    "Preferred Location",
    "Property Type",
    "Status",
    "Source",
    "Notes",
    "Created Date",
    "Updated Date",
];

const TEMPLATE_HEADERS: [&str; 10] = [
    "First Name",
    "Last Name",
    "Email",
    "Phone",
    "Budget",
    "Preferred Location",
    "Property Type",
    "Status",
    "Source",
    "Notes",
];

/// Importable columns, matched against header names case-insensitively
/// after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    FirstName,
    LastName,
    Email,
    Phone,
    Budget,
    PreferredLocation,
    PropertyType,
    Status,
    Source,
    Notes,
}

fn match_column(header: &str) -> Option<Column> {
    match header.trim().to_lowercase().as_str() {
        "first name" => Some(Column::FirstName),
        "last name" => Some(Column::LastName),
        "email" => Some(Column::Email),
        "phone" => Some(Column::Phone),
        "budget" => Some(Column::Budget),
        "preferred location" => Some(Column::PreferredLocation),
        "property type" => Some(Column::PropertyType),
        "status" => Some(Column::Status),
        "source" => Some(Column::Source),
        "notes" => Some(Column::Notes),
        _ => None,
    }
}

/// Serialize buyers to CSV text using the fixed export schema.
/// Dates are written day-precision as `YYYY-MM-DD`.
pub fn buyers_to_csv(buyers: &[Buyer]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for buyer in buyers {
        let budget = buyer.budget.map(|b| b.to_string()).unwrap_or_default();
        let created = buyer.created_at.format("%Y-%m-%d").to_string();
        let updated = buyer.updated_at.format("%Y-%m-%d").to_string();
        writer.write_record([
            buyer.first_name.as_str(),
            buyer.last_name.as_str(),
            buyer.email.as_str(),
            buyer.phone.as_deref().unwrap_or(""),
            budget.as_str(),
            buyer.preferred_location.as_deref().unwrap_or(""),
            buyer.property_type.map(|p| p.as_str()).unwrap_or(""),
            buyer.status.as_str(),
            buyer.source.as_deref().unwrap_or(""),
            buyer.notes.as_deref().unwrap_or(""),
            created.as_str(),
            updated.as_str(),
        ])?;
    }

    into_string(writer)
}

/// Parse CSV text into buyer create commands.
///
/// The first non-blank line is the header row; recognized columns may appear
/// in any order and unrecognized ones are skipped. Parsing is all-or-nothing:
/// the first row with a missing required field or a malformed email aborts
/// the batch with an error naming the 1-based row number (header is row 1).
pub fn csv_to_buyer_commands(text: &str) -> Result<Vec<CreateBuyerCommand>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() || (headers.len() == 1 && headers[0].trim().is_empty()) {
        return Err(DomainError::CsvTooShort.into());
    }

    // Column map in header order; a duplicated header means the rightmost
    // occurrence wins, since assignments are applied left to right.
    let columns: Vec<(usize, Column)> = headers
        .iter()
        .enumerate()
        .filter_map(|(index, name)| match_column(name).map(|c| (index, c)))
        .collect();

    let mut commands = Vec::new();
    let mut row = 1usize;
    for result in reader.records() {
        let record = result.map_err(|e| DomainError::CsvParse {
            row: row + 1,
            reason: e.to_string(),
        })?;
        if is_blank_record(&record) {
            continue;
        }
        row += 1;

        let mut command = CreateBuyerCommand::default();
        for (index, column) in &columns {
            let value = record.get(*index).unwrap_or("").trim();
            match column {
                Column::FirstName => command.first_name = value.to_string(),
                Column::LastName => command.last_name = value.to_string(),
                Column::Email => command.email = value.to_string(),
                Column::Phone => command.phone = non_empty(value),
                Column::Budget => {
                    // Lenient: unparseable numeric text leaves the budget
                    // unset instead of poisoning the record.
                    command.budget = if value.is_empty() {
                        None
                    } else {
                        value.parse::<f64>().ok()
                    };
                }
                Column::PreferredLocation => command.preferred_location = non_empty(value),
                Column::PropertyType => command.property_type = PropertyType::parse(value),
                Column::Status => command.status = BuyerStatus::parse(value),
                Column::Source => command.source = non_empty(value),
                Column::Notes => command.notes = non_empty(value),
            }
        }

        if command.first_name.is_empty()
            || command.last_name.is_empty()
            || command.email.is_empty()
        {
            return Err(DomainError::CsvParse {
                row,
                reason: "Missing required fields (First Name, Last Name, Email)".to_string(),
            }
            .into());
        }
        if !is_valid_email(&command.email) {
            return Err(DomainError::CsvParse {
                row,
                reason: "Invalid email format".to_string(),
            }
            .into());
        }

        commands.push(command);
    }

    if commands.is_empty() {
        return Err(DomainError::CsvTooShort.into());
    }

    Ok(commands)
}

/// Build the import template: the importable header row plus one sample row.
pub fn build_template() -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(TEMPLATE_HEADERS)?;
    writer.write_record([
        "John",
        "Smith",
        "john.smith@email.com",
        "+1-555-0123",
        "450000",
        "Downtown",
        "Condo",
        "new",
        "Website",
        "Looking for 2-bedroom condo",
    ])?;

    into_string(writer)
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV writer error: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// A record read from a whitespace-only line: one field that trims empty.
fn is_blank_record(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).map_or(true, |f| f.trim().is_empty())
}
