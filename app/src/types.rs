//! View-model descriptors consumed by the presentation components.
//!
//! The server describes what to render as structured view descriptors (a
//! table, an editor) and the components reflect them verbatim. Wire names are
//! camelCase; optional fields degrade to empty/false defaults rather than
//! failing deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(feature = "ssr")]
use axum::extract::FromRef;
#[cfg(feature = "ssr")]
use leptos::config::LeptosOptions;

/// Reserved row key carrying the embedded actions sub-view.
pub const ACTION_KEY: &str = "_action";
/// Reserved row key carrying the deletion marker.
pub const IS_DELETED_KEY: &str = "_isDeleted";

#[cfg(feature = "ssr")]
#[derive(FromRef, Debug, Clone)]
pub struct AppState {
    pub leptos_options: std::sync::Arc<LeptosOptions>,
    pub actions: ActionLedger,
}

#[cfg(feature = "ssr")]
impl FromRef<AppState> for LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.as_ref().clone()
    }
}

/// In-process record of every action payload the dispatcher has accepted.
///
/// The presentation layer never consumes a dispatch result; the ledger exists
/// so the server side can log and inspect what was asked of it.
#[cfg(feature = "ssr")]
#[derive(Debug, Clone, Default)]
pub struct ActionLedger(std::sync::Arc<std::sync::Mutex<Vec<ActionPayload>>>);

#[cfg(feature = "ssr")]
impl ActionLedger {
    pub fn record(&self, payload: ActionPayload) {
        if let Ok(mut entries) = self.0.lock() {
            entries.push(payload);
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<ActionPayload> {
        self.0.lock().map(|entries| entries.clone()).unwrap_or_default()
    }
}

/// Metadata common to every view descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ViewMetadata {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A table view descriptor: columns, rows, filters, and empty-state text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    #[serde(default)]
    pub metadata: ViewMetadata,
    #[serde(default)]
    pub config: TableConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<usize>,
}

impl TableView {
    /// The title text to render above the grid, empty when the descriptor
    /// carries none.
    #[must_use]
    pub fn title_text(&self) -> String {
        self.metadata.title.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    #[serde(default)]
    pub columns: Vec<TableColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<TableRow>>,
    #[serde(default)]
    pub empty_content: String,
    #[serde(default)]
    pub loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<TableFilters>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub name: String,
    #[serde(default)]
    pub accessor: String,
}

/// Per-column filter descriptors, keyed by column name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TableFilters(pub std::collections::BTreeMap<String, TableFilter>);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableFilter {
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub selected: Vec<String>,
}

/// An opaque row record: cell values keyed by column name, plus the reserved
/// `_action` and `_isDeleted` keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TableRow(pub serde_json::Map<String, Value>);

impl TableRow {
    /// The cell value stored under `column`, if any.
    #[must_use]
    pub fn cell(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Extracts the embedded action list, empty when the `_action` sub-view
    /// is absent or malformed.
    #[must_use]
    pub fn actions(&self) -> Vec<GridAction> {
        self.0
            .get(ACTION_KEY)
            .and_then(|value| serde_json::from_value::<GridActionsView>(value.clone()).ok())
            .map(|view| view.config.actions)
            .unwrap_or_default()
    }

    /// Derives the deleted flag from the `_isDeleted` marker, false when the
    /// marker is absent.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.0.get(IS_DELETED_KEY).is_some_and(truthy)
    }
}

/// A row paired with its extracted actions and derived deleted flag.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRowWithMetadata {
    pub data: TableRow,
    pub actions: Vec<GridAction>,
    pub is_deleted: bool,
}

/// The actions sub-view embedded in a row under [`ACTION_KEY`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GridActionsView {
    #[serde(default)]
    pub metadata: ViewMetadata,
    #[serde(default)]
    pub config: GridActionsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GridActionsConfig {
    #[serde(default)]
    pub actions: Vec<GridAction>,
}

/// A row action: a named operation posted to the action dispatcher, with an
/// optional confirmation that gates dispatch behind an explicit user accept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GridAction {
    pub name: String,
    pub action_path: String,
    #[serde(default)]
    pub payload: serde_json::Map<String, Value>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// An editor view descriptor, rendered by the apply-YAML dialog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    #[serde(default)]
    pub metadata: ViewMetadata,
    #[serde(default)]
    pub config: EditorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub metadata: std::collections::BTreeMap<String, String>,
}

/// The record handed to the action dispatcher: an action path merged into the
/// action's payload fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct ActionPayload(pub serde_json::Map<String, Value>);

impl ActionPayload {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }
}

impl From<serde_json::Map<String, Value>> for ActionPayload {
    fn from(fields: serde_json::Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// JavaScript-style truthiness, matching how the original dashboard coerced
/// the deletion marker.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}



#[cfg(test)]
mod action_type_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grid_action_wire_names() {
        let action: GridAction = serde_json::from_value(json!({
            "name": "Delete",
            "actionPath": "dashboard/delete",
            "type": "danger",
            "payload": { "name": "frontend" },
            "confirmation": { "title": "Delete frontend", "body": "Are you sure?" }
        }))
        .expect("deserialization failed");

        assert_eq!(action.action_path, "dashboard/delete");
        assert_eq!(action.kind, "danger");
        assert_eq!(action.payload["name"], "frontend");
        let confirmation = action.confirmation.expect("confirmation missing");
        assert_eq!(confirmation.title, "Delete frontend");
    }

    #[test]
    fn test_grid_action_defaults() {
        let action: GridAction = serde_json::from_value(json!({
            "name": "Restart",
            "actionPath": "dashboard/restart"
        }))
        .expect("deserialization failed");

        assert!(action.payload.is_empty());
        assert_eq!(action.kind, "");
        assert!(action.confirmation.is_none());
    }

    #[test]
    fn test_action_payload_is_transparent() {
        let mut payload = ActionPayload::default();
        payload.insert("action", json!("dashboard/restart"));
        payload.insert("name", json!("frontend"));

        let value = serde_json::to_value(&payload).expect("serialization failed");
        assert_eq!(value, json!({ "action": "dashboard/restart", "name": "frontend" }));
    }

    #[test]
    fn test_editor_view_defaults() {
        let view: EditorView = serde_json::from_value(json!({
            "metadata": { "type": "editor" },
            "config": { "value": "replicas: 3", "language": "yaml" }
        }))
        .expect("deserialization failed");

        assert_eq!(view.config.value, "replicas: 3");
        assert!(!view.config.read_only);
        assert!(view.config.metadata.is_empty());
    }
}
