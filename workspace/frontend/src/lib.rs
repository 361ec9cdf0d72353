use yew::prelude::*;
use yew_router::prelude::*;

mod components;
pub mod common;
pub mod hooks;
pub mod session;
pub mod settings;
pub mod transport;

use common::toast::ToastProvider;
use components::chatbot::Chatbot;
use components::dashboard::Dashboard;
use components::forum::Forum;
use components::friends::Friends;
use components::layout::layout::Layout;
use components::leaderboard::Leaderboard;
use components::login::Login;
use components::rewards::Rewards;
use session::ApiProvider;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/dashboard")]
    Dashboard,
    #[at("/login")]
    Login,
    #[at("/leaderboard")]
    Leaderboard,
    #[at("/friends")]
    Friends,
    #[at("/rewards")]
    Rewards,
    #[at("/forum")]
    Forum,
    #[at("/chatbot")]
    Chatbot,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Home | Route::Dashboard => html! { <Layout title="Dashboard"><Dashboard /></Layout> },
        Route::Login => html! { <Layout title="Log in"><Login /></Layout> },
        Route::Leaderboard => html! { <Layout title="Leaderboard"><Leaderboard /></Layout> },
        Route::Friends => html! { <Layout title="Friends"><Friends /></Layout> },
        Route::Rewards => html! { <Layout title="Rewards"><Rewards /></Layout> },
        Route::Forum => html! { <Layout title="Forum"><Forum /></Layout> },
        Route::Chatbot => html! { <Layout title="Tutor"><Chatbot /></Layout> },
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! { <Layout title="404"><h1>{"404 Not Found"}</h1></Layout> }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ToastProvider>
            <BrowserRouter>
                <ApiProvider>
                    <Switch<Route> render={switch} />
                </ApiProvider>
            </BrowserRouter>
        </ToastProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    settings::init_settings();

    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== DSA Quest Frontend Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("Debug mode: {}", settings.debug_mode);

    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
