use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One roster record as fetched from the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    /// Raw group label, trimmed; empty when unassigned.
    pub group: String,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into().trim().to_string(),
        }
    }
}

// Response from GET <endpoint>
#[derive(Debug, Clone, Deserialize)]
pub struct RosterResponse {
    pub ok: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub rows: Option<Vec<RosterRow>>,
    /// Older deployments return bare names with no group column.
    #[serde(default)]
    pub names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterRow {
    #[serde(default)]
    pub name: Option<String>,
    /// String, number or null depending on how the sheet cell was typed.
    #[serde(default)]
    pub group: Value,
}

impl RosterResponse {
    /// Flatten either response shape into roster entries.
    pub fn into_entries(self) -> Vec<RosterEntry> {
        if let Some(rows) = self.rows {
            rows.into_iter()
                .map(|row| RosterEntry::new(row.name.unwrap_or_default(), value_to_label(&row.group)))
                .collect()
        } else if let Some(names) = self.names {
            names.into_iter().map(|name| RosterEntry::new(name, "")).collect()
        } else {
            Vec::new()
        }
    }
}

// Response from POST <endpoint>
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub ok: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub updated: Vec<String>,
    #[serde(default)]
    pub grouped: Vec<String>,
    #[serde(rename = "groupApplied", default)]
    pub group_applied: Value,
    #[serde(default)]
    pub missing: Vec<String>,
}

/// A confirmed submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub updated: Vec<String>,
    pub grouped: Vec<String>,
    pub group_applied: Option<String>,
    pub missing: Vec<String>,
}

impl From<SubmitResponse> for SubmitOutcome {
    fn from(resp: SubmitResponse) -> Self {
        let group_applied = Some(value_to_label(&resp.group_applied)).filter(|g| !g.is_empty());
        Self {
            updated: resp.updated,
            grouped: resp.grouped,
            group_applied,
            missing: resp.missing,
        }
    }
}

impl SubmitOutcome {
    /// Status line shown after a successful submit.
    pub fn status_message(&self) -> String {
        let mut msg = format!("Saved. Updated attendance: {}.", join_or_dash(&self.updated));
        if let Some(ref group) = self.group_applied {
            msg.push_str(&format!(" Set Group={} for: {}.", group, join_or_dash(&self.grouped)));
        }
        if !self.missing.is_empty() {
            msg.push_str(&format!(" Not found: {}.", self.missing.join(", ")));
        }
        msg
    }
}

fn join_or_dash(names: &[String]) -> String {
    if names.is_empty() {
        "—".to_string()
    } else {
        names.join(", ")
    }
}

/// Render a loosely typed JSON cell as a trimmed label.
fn value_to_label(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
