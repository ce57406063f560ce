//! This module defines the `overview` component, the dashboard's landing
//! page.
//!
//! It fetches the workloads table view from the server, renders it through
//! the data grid, and hosts the apply-YAML dialog. While a fetch is in
//! flight the loading service's delayed-visibility signal decides whether
//! the spinner shows at all.

use leptos::prelude::*;
use leptos_meta::{Title, TitleProps};

use crate::api::select_workloads;
use crate::components::{apply_yaml, datagrid, loader};
use crate::services::loading::{LoadingService, SHOW_AFTER, SHOW_AT_LEAST};

/// Renders the workloads overview page.
///
/// Reactive state:
/// - `in_flight` tracks whether a table fetch is running; it feeds the
///   delayed-visibility signal, so fast fetches never flash the spinner.
/// - the shared `request_complete` latch is lowered before each fetch and
///   raised after it, which is what releases a visible spinner once the
///   minimum-display floor has passed.
/// - `apply_open` owns the apply-YAML dialog state; the dialog pushes its
///   own transitions back through the change callback.
pub fn component() -> impl IntoView {
    let loading = expect_context::<LoadingService>();
    let in_flight = RwSignal::new(false);
    let apply_open = RwSignal::new(false);

    // Resource fetching the table view descriptor; refetched on demand.
    let workloads = Resource::new(
        || (),
        move |()| async move {
            in_flight.set(true);
            loading.request_complete.set(false);
            let result = select_workloads().await;
            in_flight.set(false);
            loading.request_complete.set(true);
            result
        },
    );

    let show_spinner = loading.with_delay(in_flight.into(), SHOW_AFTER, SHOW_AT_LEAST);

    let table_view = Signal::derive(move || workloads.get().and_then(Result::ok).unwrap_or_default());

    view! {
        <>
            {Title(TitleProps::builder().text("Dashboard \u{2013} Workloads").build())}

            <Show when=move || show_spinner.get() fallback=|| ()>
                {loader::component()}
            </Show>

            <div class="flex flex-row justify-end gap-2">
                <button
                    class="py-2 px-4 text-sm text-gray-300 rounded transition-colors hover:bg-gray-600"
                    on:click=move |_| workloads.refetch()
                >
                    "Refresh"
                </button>
                <button
                    class="py-2 px-4 text-sm font-semibold rounded bg-[#68b5fc] text-[#1e1e1e] hover:bg-[#68b5fc]/90"
                    on:click=move |_| apply_open.set(true)
                >
                    "Apply YAML"
                </button>
            </div>

            <Suspense fallback=|| ()>
                {move || workloads.get().map(|_| datagrid::component(table_view).into_any())}
            </Suspense>

            {apply_yaml::component(
                apply_open,
                Callback::new(move |open: bool| {
                    leptos::logging::log!("apply dialog open: {open}");
                }),
            )}
        </>
    }
}
