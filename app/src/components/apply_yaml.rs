//! The apply-YAML dialog: a modal editor seeded with a YAML scratch document.
//!
//! Open/closed state follows an explicit accessor pattern: the dialog owns a
//! setter that updates the signal and then pushes the new value to the
//! caller's change callback, so the owner always observes transitions it did
//! not initiate itself. Submit hands the buffer to the action dispatcher as
//! an apply action; the buffer is opaque text here, validation happens
//! wherever the action lands.

use leptos::{ev, prelude::*};
use serde_json::Value;

use crate::services::action::{ACTION_FIELD, SharedDispatcher};
use crate::types::{ActionPayload, EditorConfig, EditorView, ViewMetadata};

/// Action path the apply payload is dispatched under.
pub const APPLY_ACTION_PATH: &str = "dashboard/apply";
/// Payload field carrying the editor buffer.
pub const UPDATE_FIELD: &str = "update";

const SCRATCH_DOCUMENT: &str = "# Paste a resource manifest to apply\n";

/// The editor descriptor the dialog renders when the caller supplies none.
#[must_use]
pub fn scratch_editor() -> EditorView {
    EditorView {
        metadata: ViewMetadata {
            kind: "editor".to_owned(),
            title: None,
        },
        config: EditorConfig {
            value: SCRATCH_DOCUMENT.to_owned(),
            language: "yaml".to_owned(),
            read_only: false,
            metadata: std::collections::BTreeMap::new(),
        },
    }
}

/// Builds the dispatch record for an apply: the action path plus the editor
/// buffer under [`UPDATE_FIELD`].
#[must_use]
pub fn apply_update(buffer: &str) -> ActionPayload {
    let mut update = ActionPayload::default();
    update.insert(ACTION_FIELD, Value::String(APPLY_ACTION_PATH.to_owned()));
    update.insert(UPDATE_FIELD, Value::String(buffer.to_owned()));
    update
}

/// Renders the apply-YAML modal.
///
/// `is_open` is the dialog's open flag; every transition made by the dialog
/// itself is also pushed through `is_open_change`.
pub fn component(is_open: RwSignal<bool>, is_open_change: Callback<bool>) -> impl IntoView {
    // Parked in a StoredValue so the submit handler stays Copy.
    let dispatcher = StoredValue::new(expect_context::<SharedDispatcher>());
    let editor = scratch_editor();
    let buffer = RwSignal::new(editor.config.value.clone());
    let read_only = editor.config.read_only;
    let language = editor.config.language.clone();

    let set_open = move |open: bool| {
        is_open.set(open);
        is_open_change.run(open);
    };

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        dispatcher.with_value(|d| d.perform(apply_update(&buffer.get_untracked())));
        set_open(false);
    };

    view! {
        <Show when=move || is_open.get() fallback=|| ()>
            <div class="flex fixed inset-0 z-20 justify-center items-center bg-black/60">
                <div class="flex flex-col gap-4 p-6 w-full max-w-2xl rounded-lg bg-[#2a2a2a]">
                    <h3 class="text-lg font-semibold text-white">"Apply YAML"</h3>
                    <form class="flex flex-col gap-4" on:submit=submit>
                        <textarea
                            id="yaml"
                            name="yaml"
                            rows="12"
                            spellcheck="false"
                            lang=language.clone()
                            prop:value=move || buffer.get()
                            readonly=read_only
                            on:input=move |ev| buffer.set(event_target_value(&ev))
                            class="py-3 px-4 w-full font-mono text-sm text-white rounded focus:ring-2 focus:outline-none bg-[#1e1e1e] focus:ring-[#68b5fc]"
                        />
                        <div class="flex flex-row gap-2 justify-end">
                            <button
                                type="button"
                                class="py-2 px-4 text-gray-300 rounded hover:bg-gray-600"
                                on:click=move |_| set_open(false)
                            >
                                "Cancel"
                            </button>
                            <button
                                type="submit"
                                class="py-2 px-4 font-semibold rounded bg-[#68b5fc] text-[#1e1e1e] hover:bg-[#68b5fc]/90"
                            >
                                "Apply"
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_editor_defaults() {
        let editor = scratch_editor();
        assert_eq!(editor.metadata.kind, "editor");
        assert_eq!(editor.config.language, "yaml");
        assert!(!editor.config.read_only);
        assert!(editor.config.value.starts_with('#'));
    }

    #[test]
    fn test_apply_update_carries_path_and_buffer() {
        let update = apply_update("replicas: 3\n");
        assert_eq!(
            update.get(ACTION_FIELD),
            Some(&serde_json::json!(APPLY_ACTION_PATH))
        );
        assert_eq!(update.get(UPDATE_FIELD), Some(&serde_json::json!("replicas: 3\n")));
    }

    #[test]
    fn test_component_signature() {
        let _: fn(RwSignal<bool>, Callback<bool>) -> _ = component;
    }
}
