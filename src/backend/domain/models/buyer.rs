use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Workflow stage of a buyer lead.
///
/// Serialized in lowercase, matching the wire form used in CSV files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuyerStatus {
    New,
    Contacted,
    Qualified,
    Viewing,
    Offer,
    Closed,
    Lost,
}

impl BuyerStatus {
    pub const ALL: [BuyerStatus; 7] = [
        BuyerStatus::New,
        BuyerStatus::Contacted,
        BuyerStatus::Qualified,
        BuyerStatus::Viewing,
        BuyerStatus::Offer,
        BuyerStatus::Closed,
        BuyerStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuyerStatus::New => "new",
            BuyerStatus::Contacted => "contacted",
            BuyerStatus::Qualified => "qualified",
            BuyerStatus::Viewing => "viewing",
            BuyerStatus::Offer => "offer",
            BuyerStatus::Closed => "closed",
            BuyerStatus::Lost => "lost",
        }
    }

    /// Parse a status label, ignoring case. Returns `None` for anything
    /// outside the fixed enumeration.
    pub fn parse(value: &str) -> Option<BuyerStatus> {
        let lowered = value.to_lowercase();
        Self::ALL.iter().copied().find(|s| s.as_str() == lowered)
    }
}

impl Default for BuyerStatus {
    fn default() -> Self {
        BuyerStatus::New
    }
}

impl fmt::Display for BuyerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of property a buyer is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    House,
    Condo,
    Apartment,
    Townhouse,
    Other,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::House,
        PropertyType::Condo,
        PropertyType::Apartment,
        PropertyType::Townhouse,
        PropertyType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "House",
            PropertyType::Condo => "Condo",
            PropertyType::Apartment => "Apartment",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Other => "Other",
        }
    }

    /// Parse a property type label. The match is exact, including case.
    pub fn parse(value: &str) -> Option<PropertyType> {
        Self::ALL.iter().copied().find(|p| p.as_str() == value)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model representing a buyer lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buyer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub budget: Option<f64>,
    pub preferred_location: Option<String>,
    pub property_type: Option<PropertyType>,
    pub status: BuyerStatus,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owning user. Single-tenant demo data, not an access boundary.
    pub user_id: String,
}

impl Buyer {
    /// Generate a unique ID for a buyer.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}

/// Syntactic email check: one `@`, no whitespace, and a dot somewhere
/// inside the domain part with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.chars().any(char::is_whitespace) {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
