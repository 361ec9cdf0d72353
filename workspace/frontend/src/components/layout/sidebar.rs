use yew::prelude::*;
use yew_router::prelude::*;
use crate::Route;

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    html! {
        <div class="drawer-side z-50">
            <label aria-label="close sidebar" class="drawer-overlay" for="app-drawer"></label>
            <ul class="menu p-4 w-72 min-h-full bg-base-100 text-base-content border-r border-base-300">
                <li class="mb-4">
                    <div class="flex items-center gap-3 px-2">
                        <div class="w-10 h-10 rounded-lg bg-primary flex items-center justify-center text-primary-content font-bold text-2xl">
                            <i class="fas fa-code-branch"></i>
                        </div>
                        <span class="text-2xl font-bold tracking-tight">{"DSA Quest"}</span>
                    </div>
                </li>

                <li><Link<Route> to={Route::Dashboard} classes="nav-link"><i class="fas fa-home w-5"></i> {"Dashboard"}</Link<Route>></li>
                <li><Link<Route> to={Route::Leaderboard} classes="nav-link"><i class="fas fa-trophy w-5"></i> {"Leaderboard"}</Link<Route>></li>
                <li><Link<Route> to={Route::Friends} classes="nav-link"><i class="fas fa-user-friends w-5"></i> {"Friends"}</Link<Route>></li>
                <li><Link<Route> to={Route::Rewards} classes="nav-link"><i class="fas fa-gift w-5"></i> {"Rewards"}</Link<Route>></li>
                <li><Link<Route> to={Route::Forum} classes="nav-link"><i class="fas fa-comments w-5"></i> {"Forum"}</Link<Route>></li>
                <li><Link<Route> to={Route::Chatbot} classes="nav-link"><i class="fas fa-robot w-5"></i> {"Tutor"}</Link<Route>></li>
            </ul>
        </div>
    }
}
