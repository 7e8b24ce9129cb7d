use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Action label written when a lead is first created.
pub const ACTION_CREATED_LEAD: &str = "Created lead";

/// Action label written when a lead's workflow status changes.
pub const ACTION_STATUS_CHANGED: &str = "Status changed";

/// Common action labels offered for manually recorded activity.
/// The label is freeform, so anything outside this list is also accepted.
pub const COMMON_ACTIONS: [&str; 10] = [
    "Phone call",
    "Email sent",
    "Meeting scheduled",
    "Property viewing",
    "Offer submitted",
    "Contract signed",
    "Follow-up required",
    "Status updated",
    "Documents received",
    "Other",
];

/// A single activity record attached to a buyer lead.
///
/// Entries are append-only: they are never edited, and are removed only when
/// the owning buyer is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub buyer_id: String,
    pub action: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

impl HistoryEntry {
    /// Generate a unique ID for a history entry.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}
