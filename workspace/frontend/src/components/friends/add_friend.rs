use client::api::friends::send_friend_request;
use client::{MultiLoadingCoordinator, RequestExecutor};
use std::rc::Rc;
use yew::prelude::*;

use super::view::FriendsPanel;
use crate::common::form::{field, read_form, reset_form};
use crate::common::loading::ButtonSpinner;
use crate::common::toast::ToastContext;

#[derive(Properties)]
pub struct Props {
    pub api: Rc<RequestExecutor>,
    pub panels: Rc<MultiLoadingCoordinator<FriendsPanel>>,
    pub sending: bool,
}

impl PartialEq for Props {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api) && Rc::ptr_eq(&self.panels, &other.panels) && self.sending == other.sending
    }
}

#[function_component(AddFriend)]
pub fn add_friend(props: &Props) -> Html {
    let toast_ctx = use_context::<ToastContext>().expect("AddFriend requires a ToastProvider");
    let form_ref = use_node_ref();

    let on_submit = {
        let api = props.api.clone();
        let panels = props.panels.clone();
        let form_ref = form_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(form_data) = read_form(&form_ref) else {
                return;
            };
            let user_id = field(&form_data, "user_id");
            if user_id.is_empty() {
                toast_ctx.show_warning("Enter a user ID".to_string());
                return;
            }

            let api = api.clone();
            let panels = panels.clone();
            let toast_ctx = toast_ctx.clone();
            let form_ref = form_ref.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match panels.with_loading(&FriendsPanel::Send, || send_friend_request(&api, &user_id)).await {
                    Ok(_) => {
                        log::info!("Friend request sent to {}", user_id);
                        toast_ctx.show_success("Friend request sent".to_string());
                        reset_form(&form_ref);
                    }
                    Err(e) => toast_ctx.show_api_error(&e),
                }
            });
        })
    };

    let sending = props.sending;

    html! {
        <form ref={form_ref} onsubmit={on_submit} class="flex gap-2">
            <input name="user_id" type="text" placeholder="User ID" class="input input-bordered input-sm flex-1" />
            <button type="submit" class="btn btn-primary btn-sm" disabled={sending}>
                <ButtonSpinner loading={sending}>
                    <i class="fas fa-user-plus"></i>{" Add"}
                </ButtonSpinner>
            </button>
        </form>
    }
}
