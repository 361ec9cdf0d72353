use client::api::friends::{
    Friend, FriendRequest, accept_friend_request, get_friend_requests, get_friends, reject_friend_request, remove_friend,
};
use client::ApiError;
use yew::prelude::*;

use super::add_friend::AddFriend;
use crate::common::loading::{ButtonSpinner, Loading, LoadingSize};
use crate::common::toast::ToastContext;
use crate::components::login::LoginRequired;
use crate::hooks::{use_api, use_loading, use_multiple_loading};

/// Independently loading sections of the friends screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FriendsPanel {
    Friends,
    Requests,
    Send,
}

#[function_component(Friends)]
pub fn friends() -> Html {
    let api = use_api();
    let panels = use_multiple_loading(vec![FriendsPanel::Friends, FriendsPanel::Requests, FriendsPanel::Send]);
    let bulk = use_loading();
    let toast_ctx = use_context::<ToastContext>().expect("Friends requires a ToastProvider");
    let friends = use_state(Vec::<Friend>::new);
    let requests = use_state(Vec::<FriendRequest>::new);
    let authenticated = api.session().is_authenticated();

    let load_friends = {
        let api = api.clone();
        let panels = panels.clone();
        let friends = friends.clone();
        let toast_ctx = toast_ctx.clone();
        use_callback((), move |_: (), _| {
            let api = api.clone();
            let panels = panels.clone();
            let friends = friends.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match panels.with_loading(&FriendsPanel::Friends, || get_friends(&api)).await {
                    Ok(list) => friends.set(list.friends),
                    Err(e) => toast_ctx.show_api_error(&e),
                }
            });
        })
    };

    let load_requests = {
        let api = api.clone();
        let panels = panels.clone();
        let requests = requests.clone();
        let toast_ctx = toast_ctx.clone();
        use_callback((), move |_: (), _| {
            let api = api.clone();
            let panels = panels.clone();
            let requests = requests.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match panels.with_loading(&FriendsPanel::Requests, || get_friend_requests(&api)).await {
                    Ok(list) => requests.set(list.requests),
                    Err(e) => toast_ctx.show_api_error(&e),
                }
            });
        })
    };

    // Both panels load side by side, each with its own spinner
    {
        let load_friends = load_friends.clone();
        let load_requests = load_requests.clone();
        use_effect_with(authenticated, move |authenticated| {
            if *authenticated {
                load_friends.emit(());
                load_requests.emit(());
            }
            || ()
        });
    }

    let respond = {
        let api = api.clone();
        let panels = panels.clone();
        let toast_ctx = toast_ctx.clone();
        let load_friends = load_friends.clone();
        let load_requests = load_requests.clone();
        Callback::from(move |(request_id, accept): (String, bool)| {
            let api = api.clone();
            let panels = panels.clone();
            let toast_ctx = toast_ctx.clone();
            let load_friends = load_friends.clone();
            let load_requests = load_requests.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = panels
                    .with_loading(&FriendsPanel::Requests, || async {
                        if accept {
                            accept_friend_request(&api, &request_id).await
                        } else {
                            reject_friend_request(&api, &request_id).await
                        }
                    })
                    .await;
                match result {
                    Ok(_) => {
                        toast_ctx.show_success(if accept { "Friend request accepted" } else { "Friend request rejected" }.to_string());
                        load_requests.emit(());
                        if accept {
                            load_friends.emit(());
                        }
                    }
                    Err(e) => toast_ctx.show_api_error(&e),
                }
            });
        })
    };

    let on_accept_all = {
        let api = api.clone();
        let bulk = bulk.clone();
        let requests = requests.clone();
        let toast_ctx = toast_ctx.clone();
        let load_friends = load_friends.clone();
        let load_requests = load_requests.clone();
        Callback::from(move |_| {
            let api = api.clone();
            let bulk = bulk.clone();
            let ids: Vec<String> = requests.iter().map(|r| r.id.clone()).collect();
            let toast_ctx = toast_ctx.clone();
            let load_friends = load_friends.clone();
            let load_requests = load_requests.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let operations = ids.iter().map(|id| accept_friend_request(&api, id));
                let result: Result<_, ApiError> = bulk
                    .with_multiple_loading(operations, Some("Accepting all requests..."))
                    .await;
                match result {
                    Ok(acks) => toast_ctx.show_success(format!("Accepted {} requests", acks.len())),
                    Err(e) => toast_ctx.show_api_error(&e),
                }
                load_requests.emit(());
                load_friends.emit(());
            });
        })
    };

    let on_remove = {
        let api = api.clone();
        let panels = panels.clone();
        let toast_ctx = toast_ctx.clone();
        let load_friends = load_friends.clone();
        Callback::from(move |friend_id: String| {
            let api = api.clone();
            let panels = panels.clone();
            let toast_ctx = toast_ctx.clone();
            let load_friends = load_friends.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match panels.with_loading(&FriendsPanel::Friends, || remove_friend(&api, &friend_id)).await {
                    Ok(()) => {
                        toast_ctx.show_info("Friend removed".to_string());
                        load_friends.emit(());
                    }
                    Err(e) => toast_ctx.show_api_error(&e),
                }
            });
        })
    };

    if !authenticated {
        return html! { <LoginRequired /> };
    }

    let requests_busy = panels.is_loading(&FriendsPanel::Requests) || bulk.is_loading();

    html! {
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Friends"}</h2>
                    {if panels.is_loading(&FriendsPanel::Friends) {
                        html! { <Loading size={LoadingSize::Small} /> }
                    } else if friends.is_empty() {
                        html! { <p class="text-gray-500">{"No friends yet. Send a request below."}</p> }
                    } else {
                        html! {
                            <ul class="divide-y divide-base-300">
                                {for friends.iter().map(|friend| {
                                    let friend_id = friend.id.clone();
                                    let on_remove = on_remove.clone();
                                    html! {
                                        <li key={friend.id.clone()} class="flex items-center justify-between py-2">
                                            <span>
                                                <span class={classes!("badge", "badge-xs", "mr-2", if friend.online { "badge-success" } else { "badge-ghost" })}></span>
                                                <span class="font-semibold">{&friend.username}</span>
                                                <span class="text-sm text-gray-500">{format!(" {} XP", friend.xp)}</span>
                                            </span>
                                            <button class="btn btn-ghost btn-xs" onclick={Callback::from(move |_| on_remove.emit(friend_id.clone()))}>
                                                <i class="fas fa-user-minus"></i>
                                            </button>
                                        </li>
                                    }
                                })}
                            </ul>
                        }
                    }}
                    <div class="divider"></div>
                    <AddFriend api={api.clone()} panels={panels.clone()} sending={panels.is_loading(&FriendsPanel::Send)} />
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div class="flex justify-between items-center">
                        <h2 class="card-title">{"Requests"}</h2>
                        <button class="btn btn-primary btn-sm" onclick={on_accept_all}
                            disabled={requests.is_empty() || requests_busy}>
                            <ButtonSpinner loading={bulk.is_loading()}>{"Accept all"}</ButtonSpinner>
                        </button>
                    </div>
                    {if requests_busy {
                        html! { <Loading size={LoadingSize::Small} text={bulk.is_loading().then(|| bulk.loading_text())} /> }
                    } else if requests.is_empty() {
                        html! { <p class="text-gray-500">{"No pending requests."}</p> }
                    } else {
                        html! {
                            <ul class="divide-y divide-base-300">
                                {for requests.iter().map(|request| {
                                    let accept = {
                                        let respond = respond.clone();
                                        let id = request.id.clone();
                                        Callback::from(move |_| respond.emit((id.clone(), true)))
                                    };
                                    let reject = {
                                        let respond = respond.clone();
                                        let id = request.id.clone();
                                        Callback::from(move |_| respond.emit((id.clone(), false)))
                                    };
                                    html! {
                                        <li key={request.id.clone()} class="flex items-center justify-between py-2">
                                            <span class="font-semibold">
                                                {request.from_username.clone().unwrap_or_else(|| request.from_user_id.clone())}
                                            </span>
                                            <span class="flex gap-2">
                                                <button class="btn btn-success btn-xs" onclick={accept}>{"Accept"}</button>
                                                <button class="btn btn-ghost btn-xs" onclick={reject}>{"Reject"}</button>
                                            </span>
                                        </li>
                                    }
                                })}
                            </ul>
                        }
                    }}
                </div>
            </div>
        </div>
    }
}
