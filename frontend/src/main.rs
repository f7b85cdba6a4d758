use yew::prelude::*;
use yew_router::prelude::*;

mod api;
mod change_voter;
mod config;
mod context;
mod hooks;
mod logging;
mod pagination;
mod row_actions;
mod styles;
mod voter_table;

use crate::{
    config::Config,
    context::AppContext,
    styles::{alert_style, CONTAINER},
    voter_table::VoterTable,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")] Voters,
    #[not_found]
    #[at("/404")] NotFound,
}

#[function_component(Navigation)]
fn navigation() -> Html {
    let current_route = use_route::<Route>();

    html! {
        <nav class="bg-gray-900 shadow-lg fixed top-0 w-full z-50">
            <div class="container mx-auto px-6 py-4 flex justify-center space-x-8">
                <Link<Route> to={Route::Voters} classes={classes!(
                    "text-base", "md:text-lg", "font-medium", "px-4", "py-2", "rounded-md",
                    "transition-colors", "duration-200", "ease-in-out",
                    "text-gray-200", "border", "border-transparent", "hover:border-blue-400", "hover:text-blue-400",
                    if current_route == Some(Route::Voters) {
                        "text-blue-400 border-blue-400 ring-2 ring-blue-500 ring-offset-1 ring-offset-gray-900"
                    } else {
                        ""
                    }
                )}>
                    {"Voters"}
                </Link<Route>>
            </div>
        </nav>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Config,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let context = use_state(|| AppContext::new(props.config.client.clone(), props.config.refetch));

    html! {
        <ContextProvider<AppContext> context={(*context).clone()}>
            <BrowserRouter>
                <div class="min-h-screen bg-gray-900">
                    <Navigation />
                    <div class="pt-16">
                        <Switch<Route> render={switch} />
                    </div>
                </div>
            </BrowserRouter>
        </ContextProvider<AppContext>>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Voters => html! { <VoterTable /> },
        Route::NotFound => html! {
            <div class={CONTAINER}>
                <div class={alert_style("warning")}>{"Page not found"}</div>
            </div>
        },
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let config = Config::load();
    logging::init(config.log_level);
    tracing::info!(service = %config.client.service_base_url, "starting voter admin");

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
