//! This module defines the `error_template` component, the standardized error
//! page rendered by error boundaries and the router fallback.
//!
//! It includes an `AppError` enum for application-level errors (e.g. Not
//! Found) and sets the matching HTTP status code when rendering on the
//! server.

use http::status::StatusCode;
use leptos::prelude::*;
use leptos_router::components::A;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,
}

impl AppError {
    /// Returns the HTTP status code associated with the error.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Renders a generic error page based on the provided errors.
///
/// `outside_errors` carries errors handed in from a server-side rendering
/// context; `errors` is the reactive error collection from a client-side
/// error boundary. One of the two must be present.
pub fn component(
    outside_errors: Option<Errors>,
    errors: Option<RwSignal<Errors>>,
) -> impl IntoView {
    let errors = outside_errors.map_or_else(
        || errors.unwrap_or_else(|| panic!("No Errors found and we expected errors!")),
        |e| RwSignal::new(e),
    );
    // Snapshot the errors without subscribing to changes.
    let errors: Vec<AppError> = errors
        .get_untracked()
        .into_iter()
        .filter_map(|(_key, error)| error.downcast_ref::<AppError>().cloned())
        .collect();

    // On the server, surface the first error as the response status.
    #[cfg(feature = "ssr")]
    {
        use leptos_axum::ResponseOptions;
        if let Some(response) = use_context::<ResponseOptions>() {
            response.set_status(errors[0].status_code());
        }
    }

    view! {
        <div class="grid place-content-center px-4 h-full antialiased">
            <h1 class="mb-6 text-center">{if errors.len() > 1 { "Errors" } else { "Error" }}</h1>
            <For
                each=move || errors.clone().into_iter().enumerate()
                key=|(index, _error)| *index
                children=|(_index, error)| {
                    let error_string = error.to_string();
                    let error_code = error.status_code();
                    view! {
                        <div class="flex flex-col gap-1 justify-center items-center">
                            <h1 class="text-xl tracking-widest text-gray-400 uppercase">
                                {format!("{error_code}| {error_string}")}
                            </h1>
                            <div class="flex gap-1 justify-center items-center mt-6 text-center duration-200 hover:text-[#68b5fc]">
                                <A href="/">"Go back to the overview"</A>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}
