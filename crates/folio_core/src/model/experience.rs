//! Work history shown on the experience timeline.

use serde::{Deserialize, Serialize};

/// One role on the timeline. Entries are rendered in authored order, newest
/// first, so they carry no id and no sortable date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    /// Display start, e.g. `Sep 2025`.
    pub start: String,
    /// Display end, e.g. `Present`.
    pub end: String,
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Experience {
    /// `"{start} – {end}"` as printed above the role.
    pub fn period(&self) -> String {
        format!("{} – {}", self.start, self.end)
    }
}
