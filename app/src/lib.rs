//! Presentation layer of the dashboard: the application shell, the overview
//! page, and the components and services it is assembled from.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    SsrMode, StaticSegment,
    components::{FlatRoutes, Route, Router},
};

use crate::components::{error_template, header};
use crate::services::action::{ServerActionDispatcher, SharedDispatcher};
use crate::services::loading::LoadingService;

pub mod api;
pub mod components;
mod overview;
pub mod services;
pub mod types;

/// The HTML document shell rendered on the server.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <HydrationScripts options=options/>
                <MetaTags/>
                <Stylesheet id="leptos" href="/pkg/dashboard.css"/>
                <Title text="Dashboard"/>
            </head>
            <body class="bg-[#1e1e1e]">{component()}</body>
        </html>
    }
}

/// The root component: app-wide services plus the router.
#[must_use]
pub fn component() -> impl IntoView {
    // Services the components resolve from context: the loading state and
    // the action dispatcher.
    provide_context(LoadingService::new());
    provide_context(SharedDispatcher::new(ServerActionDispatcher));

    view! {
        <Router>
            <div class="overflow-auto text-white font-sans">
                {header::component}
                <main class="container flex flex-col gap-8 px-4 pt-10 pb-14 mx-auto mt-16 max-w-5xl md:px-0">
                    <FlatRoutes fallback=|| {
                        let mut outside_errors = Errors::default();
                        outside_errors.insert_with_default_key(error_template::AppError::NotFound);
                        error_template::component(Some(outside_errors), None)
                    }>
                        <Route path=StaticSegment("") view=overview::component ssr=SsrMode::InOrder/>
                    </FlatRoutes>
                </main>
            </div>
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// The shell cannot be rendered without a full Leptos context, but
    /// building it must not panic.
    fn test_shell_builds() {
        let options = LeptosOptions::builder().output_name("dashboard").build();
        drop(shell(options));
    }

    #[test]
    fn test_root_signatures() {
        let _shell: fn(LeptosOptions) -> _ = shell;
        let _root: fn() -> _ = component;
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn test_server_function_signatures_are_stable() {
        use crate::api::{perform_action, select_workloads};
        use crate::types::ActionPayload;

        let _workloads: fn() -> _ = select_workloads;
        let _action: fn(ActionPayload) -> _ = perform_action;
    }
}
