//! The data grid: renders a table view descriptor, materializes each row with
//! its actions and deleted flag, and gates destructive row actions behind a
//! confirmation modal.
//!
//! Grid state lives in [`DatagridState`], an explicit state object the
//! component drives: built once, fed every new table view, dropped with the
//! owner. Rendering reflects the descriptor faithfully; the only logic here
//! is row materialization and the confirmation gate.

use chrono::{DateTime, Utc};
use icondata::BsClock;
use leptos::{prelude::*, svg::svg};
use serde_json::Value;

use crate::services::action::{ActionDispatcher, SharedDispatcher, merged_update};
use crate::types::{Confirmation, GridAction, TableFilters, TableRow, TableRowWithMetadata, TableView};

/// The confirmation captured while a gated action waits for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDialogOptions {
    pub action: GridAction,
    pub text: String,
    pub kind: String,
    pub confirmation: Confirmation,
}

/// Pairs every row with its extracted action list and derived deleted flag.
///
/// Order-preserving and 1:1; a row without an embedded actions sub-view
/// yields an empty list, a row without a deletion marker yields `false`.
#[must_use]
pub fn rows_with_metadata(rows: &[TableRow]) -> Vec<TableRowWithMetadata> {
    rows.iter()
        .map(|row| TableRowWithMetadata {
            data: row.clone(),
            actions: row.actions(),
            is_deleted: row.is_deleted(),
        })
        .collect()
}

/// Grid state derived from the current table view, plus the pending
/// confirmation record.
#[derive(Debug, Clone)]
pub struct DatagridState {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<TableRowWithMetadata>,
    pub placeholder: String,
    pub last_updated: DateTime<Utc>,
    pub filters: Option<TableFilters>,
    pub loading: bool,
    pub total_items: Option<usize>,
    pending_action: Option<ActionDialogOptions>,
}

impl DatagridState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: String::new(),
            columns: Vec::new(),
            rows: Vec::new(),
            placeholder: String::new(),
            last_updated: Utc::now(),
            filters: None,
            loading: false,
            total_items: None,
            pending_action: None,
        }
    }

    /// Re-derives the grid from a new table view. Rows are only replaced when
    /// the descriptor carries them, so a row-less update keeps the current
    /// rows on screen.
    pub fn on_view_change(&mut self, view: &TableView) {
        self.title = view.title_text();
        self.columns = view.config.columns.iter().map(|column| column.name.clone()).collect();
        if let Some(rows) = &view.config.rows {
            self.rows = rows_with_metadata(rows);
        }
        self.placeholder = view.config.empty_content.clone();
        self.last_updated = Utc::now();
        self.loading = view.config.loading;
        self.filters = view.config.filters.clone();
        self.total_items = view.total_items;
    }

    /// Dispatches `action` immediately, or captures it behind the
    /// confirmation modal when the action requires one.
    pub fn run_action(&mut self, action: GridAction, dispatcher: &dyn ActionDispatcher) {
        let Some(confirmation) = action.confirmation.clone() else {
            dispatcher.perform(merged_update(&action));
            return;
        };

        self.pending_action = Some(ActionDialogOptions {
            text: action.name.clone(),
            kind: action.kind.clone(),
            confirmation,
            action,
        });
    }

    /// Dispatches the pending action and clears the record. A no-op when
    /// nothing is pending.
    pub fn accept_pending(&mut self, dispatcher: &dyn ActionDispatcher) {
        if let Some(pending) = self.pending_action.take() {
            dispatcher.perform(merged_update(&pending.action));
        }
    }

    /// Clears the pending record without dispatching.
    pub fn cancel_pending(&mut self) {
        self.pending_action = None;
    }

    #[must_use]
    pub fn pending(&self) -> Option<&ActionDialogOptions> {
        self.pending_action.as_ref()
    }

    #[must_use]
    pub fn is_modal_open(&self) -> bool {
        self.pending_action.is_some()
    }

    /// The title is hidden when the view reports zero total items.
    #[must_use]
    pub fn show_title(&self) -> bool {
        self.total_items.is_none_or(|total| total > 0)
    }
}

impl Default for DatagridState {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Renders the data grid for the given table view.
pub fn component(view: Signal<TableView>) -> impl IntoView {
    // Parked in a StoredValue so every handler below stays Copy.
    let dispatcher = StoredValue::new(expect_context::<SharedDispatcher>());
    let state = RwSignal::new(DatagridState::new());

    // Apply the current view synchronously so the server-rendered pass has
    // data, then track changes on the client.
    state.update(|s| s.on_view_change(&view.get_untracked()));
    Effect::new(move |_| {
        let current = view.get();
        state.update(|s| s.on_view_change(&current));
    });

    let run_action = move |action: GridAction| {
        dispatcher.with_value(|d| state.update(|s| s.run_action(action, d.0.as_ref())));
    };
    let accept = move |_| {
        dispatcher.with_value(|d| state.update(|s| s.accept_pending(d.0.as_ref())));
    };
    let cancel = move |_| state.update(DatagridState::cancel_pending);

    // Active filter chips, one per selected filter value.
    let filter_chips = move || {
        state.with(|s| {
            s.filters
                .as_ref()
                .map(|filters| {
                    filters
                        .0
                        .iter()
                        .flat_map(|(column, filter)| {
                            filter.selected.iter().map(move |value| format!("{column}: {value}"))
                        })
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    view! {
        <div class="flex flex-col gap-3">
            <Show when=move || state.with(|s| s.show_title() && !s.title.is_empty()) fallback=|| ()>
                <h2 class="text-2xl font-semibold text-white">{move || state.with(|s| s.title.clone())}</h2>
            </Show>

            <div class="flex flex-row flex-wrap gap-1 text-xs">
                {move || {
                    filter_chips()
                        .into_iter()
                        .map(|chip| {
                            view! {
                                <span class="py-1 px-2 text-gray-300 rounded-lg bg-[#2a2a2a]">{chip}</span>
                            }
                        })
                        .collect_view()
                }}
            </div>

            <table class="w-full text-left text-sm text-gray-200">
                <thead>
                    <tr class="border-b border-gray-600 uppercase text-xs text-gray-400">
                        <For
                            each=move || state.with(|s| s.columns.clone())
                            key=Clone::clone
                            children=|column| view! { <th class="py-2 px-3">{column}</th> }
                        />
                        <th class="py-2 px-3"></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || state.with(|s| s.rows.clone()).into_iter().enumerate()
                        key=|(index, _row)| *index
                        children=move |(_index, row)| {
                            let columns = state.with_untracked(|s| s.columns.clone());
                            let deleted = row.is_deleted;
                            let actions = row.actions.clone();
                            view! {
                                <tr
                                    class="border-b border-gray-700"
                                    class=("line-through", move || deleted)
                                    class=("opacity-50", move || deleted)
                                >
                                    {columns
                                        .into_iter()
                                        .map(|column| {
                                            let text = cell_text(row.data.cell(&column));
                                            view! { <td class="py-2 px-3">{text}</td> }
                                        })
                                        .collect_view()}
                                    <td class="py-2 px-3 text-right">
                                        // Deleted rows keep their cells but lose their action menu.
                                        {(!deleted)
                                            .then(|| {
                                                actions
                                                    .into_iter()
                                                    .map(|action| {
                                                        let label = action.name.clone();
                                                        let danger = action.kind == "danger";
                                                        view! {
                                                            <button
                                                                class="py-1 px-2 ml-1 rounded transition-colors hover:bg-gray-600"
                                                                class=("text-red-400", move || danger)
                                                                on:click=move |_| run_action(action.clone())
                                                            >
                                                                {label}
                                                            </button>
                                                        }
                                                    })
                                                    .collect_view()
                                            })}
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <Show when=move || state.with(|s| s.rows.is_empty() && !s.loading) fallback=|| ()>
                <p class="py-6 text-center italic text-gray-400">{move || state.with(|s| s.placeholder.clone())}</p>
            </Show>

            <div class="flex flex-row gap-1 items-center self-end text-xs text-gray-500">
                {svg()
                    .attr("viewBox", BsClock.view_box)
                    .attr("innerHTML", BsClock.data)
                    .attr("style", "filter: brightness(0) invert(0.6);")
                    .class("size-3")}
                <p>{move || state.with(|s| format!("Last updated {}", s.last_updated.format("%H:%M:%S")))}</p>
            </div>

            <Show when=move || state.with(DatagridState::is_modal_open) fallback=|| ()>
                <div class="flex fixed inset-0 z-20 justify-center items-center bg-black/60">
                    <div class="flex flex-col gap-4 p-6 max-w-md rounded-lg bg-[#2a2a2a]">
                        <h3 class="text-lg font-semibold text-white">
                            {move || state.with(|s| s.pending().map(|p| p.confirmation.title.clone()).unwrap_or_default())}
                        </h3>
                        <p class="text-sm text-gray-300">
                            {move || state.with(|s| s.pending().map(|p| p.confirmation.body.clone()).unwrap_or_default())}
                        </p>
                        <div class="flex flex-row gap-2 justify-end">
                            <button
                                class="py-2 px-4 text-gray-300 rounded hover:bg-gray-600"
                                on:click=cancel
                            >
                                "Cancel"
                            </button>
                            <button
                                class="py-2 px-4 text-white bg-red-700 rounded hover:bg-red-600"
                                on:click=accept
                            >
                                {move || state.with(|s| s.pending().map(|p| p.text.clone()).unwrap_or_default())}
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
