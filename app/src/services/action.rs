//! Action dispatch.
//!
//! Components never perform operations themselves; they hand an action
//! payload to a dispatcher and move on. The dispatcher is an opaque
//! collaborator behind the [`ActionDispatcher`] trait so component logic can
//! be exercised against a mock.

use std::sync::Arc;

use serde_json::Value;

use crate::api::perform_action;
use crate::types::{ActionPayload, GridAction};

/// Key under which the action path is merged into the payload.
pub const ACTION_FIELD: &str = "action";

/// Accepts an action payload and performs it asynchronously. No return value
/// reaches the presentation layer; dispatch failures are the dispatcher's
/// concern.
#[cfg_attr(test, mockall::automock)]
pub trait ActionDispatcher: Send + Sync {
    fn perform(&self, update: ActionPayload);
}

/// Builds the dispatch record for `action`: its payload fields with the
/// action path merged in under [`ACTION_FIELD`]. A payload field of the same
/// name is overwritten.
#[must_use]
pub fn merged_update(action: &GridAction) -> ActionPayload {
    let mut update = ActionPayload::from(action.payload.clone());
    update.insert(ACTION_FIELD, Value::String(action.action_path.clone()));
    update
}

/// Production dispatcher: posts the payload to the `perform_action` server
/// function without waiting on the outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerActionDispatcher;

impl ActionDispatcher for ServerActionDispatcher {
    fn perform(&self, update: ActionPayload) {
        leptos::task::spawn_local(async move {
            if let Err(err) = perform_action(update).await {
                leptos::logging::error!("Action dispatch failed: {err}");
            }
        });
    }
}

/// The dispatcher handle components resolve from context, standing in for
/// constructor injection.
#[derive(Clone)]
pub struct SharedDispatcher(pub Arc<dyn ActionDispatcher>);

impl SharedDispatcher {
    #[must_use]
    pub fn new(dispatcher: impl ActionDispatcher + 'static) -> Self {
        Self(Arc::new(dispatcher))
    }

    pub fn perform(&self, update: ActionPayload) {
        self.0.perform(update);
    }
}
