//! Server functions for the dashboard's API.
//!
//! Two collaborators back the presentation layer: the view-model provider,
//! which describes what the overview should render, and the action endpoint,
//! which accepts whatever the components dispatch. The provider here serves a
//! demo inventory; the action endpoint records payloads into the in-process
//! ledger and logs them, nothing downstream consumes a result.

use leptos::prelude::{ServerFnError, server};
use leptos::server_fn::codec::Json;

use crate::types::{ActionPayload, TableView};

#[cfg(feature = "ssr")]
use serde_json::{Value, json};

/// Fetches the table view descriptor for the overview page.
#[server(endpoint = "/workloads")]
pub async fn select_workloads() -> Result<TableView, ServerFnError> {
    tracing::debug!("Serving workloads table view");
    Ok(workloads_table())
}

/// Accepts an action payload dispatched by the presentation layer.
///
/// The payload is recorded and logged; the caller never consumes a result.
/// JSON input, since payloads carry arbitrary nested fields.
#[server(endpoint = "/action", input = Json)]
pub async fn perform_action(update: ActionPayload) -> Result<(), ServerFnError> {
    use leptos::prelude::expect_context;

    use crate::services::action::ACTION_FIELD;
    use crate::types::AppState;

    let AppState { actions, .. } = expect_context::<AppState>();
    let path = update
        .get(ACTION_FIELD)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    tracing::info!(action = %path, "Recording dispatched action");
    actions.record(update);
    Ok(())
}

/// The demo inventory behind the overview table.
#[cfg(feature = "ssr")]
fn workloads_table() -> TableView {
    use crate::types::{TableColumn, TableConfig, TableFilter, TableFilters, TableRow, ViewMetadata};

    let columns = ["Name", "Kind", "Status", "Age"]
        .into_iter()
        .map(|name| TableColumn {
            name: name.to_owned(),
            accessor: name.to_owned(),
        })
        .collect();

    let rows = vec![
        workload_row(json!({
            "Name": "frontend",
            "Kind": "Deployment",
            "Status": "Running",
            "Age": "2d",
            "_action": {
                "metadata": { "type": "gridActions" },
                "config": {
                    "actions": [
                        {
                            "name": "Restart",
                            "actionPath": "dashboard/restart",
                            "payload": { "name": "frontend" }
                        },
                        {
                            "name": "Delete",
                            "actionPath": "dashboard/delete",
                            "type": "danger",
                            "payload": { "name": "frontend" },
                            "confirmation": {
                                "title": "Delete frontend",
                                "body": "The deployment and its pods will be removed. This cannot be undone."
                            }
                        }
                    ]
                }
            }
        })),
        workload_row(json!({
            "Name": "backend",
            "Kind": "Deployment",
            "Status": "Running",
            "Age": "2d",
            "_action": {
                "metadata": { "type": "gridActions" },
                "config": {
                    "actions": [
                        {
                            "name": "Restart",
                            "actionPath": "dashboard/restart",
                            "payload": { "name": "backend" }
                        }
                    ]
                }
            }
        })),
        workload_row(json!({
            "Name": "batch-report",
            "Kind": "CronJob",
            "Status": "Pending",
            "Age": "6h"
        })),
        workload_row(json!({
            "Name": "legacy-worker",
            "Kind": "Deployment",
            "Status": "Terminating",
            "Age": "41d",
            "_isDeleted": true
        })),
    ];

    let mut filters = std::collections::BTreeMap::new();
    filters.insert(
        "Status".to_owned(),
        TableFilter {
            values: vec!["Running".to_owned(), "Pending".to_owned(), "Terminating".to_owned()],
            selected: Vec::new(),
        },
    );

    let total = rows.len();
    TableView {
        metadata: ViewMetadata {
            kind: "table".to_owned(),
            title: Some("Workloads".to_owned()),
        },
        config: TableConfig {
            columns,
            rows: Some(rows),
            empty_content: "No workloads found".to_owned(),
            loading: false,
            filters: Some(TableFilters(filters)),
        },
        total_items: Some(total),
    }
}

#[cfg(feature = "ssr")]
fn workload_row(value: Value) -> crate::types::TableRow {
    match value {
        Value::Object(map) => crate::types::TableRow(map),
        _ => crate::types::TableRow::default(),
    }
}
