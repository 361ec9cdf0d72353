use client::api::chatbot::{ChatMessage, ChatRole, send_message};
use client::ApiError;
use yew::prelude::*;

use crate::common::error::ErrorBanner;
use crate::common::form::{field, read_form, reset_form};
use crate::common::loading::ButtonSpinner;
use crate::components::login::LoginRequired;
use crate::hooks::{use_api, use_loading_with_error};

#[function_component(Chatbot)]
pub fn chatbot() -> Html {
    let api = use_api();
    let coordinator = use_loading_with_error();
    let messages = use_state(Vec::<ChatMessage>::new);
    let form_ref = use_node_ref();

    let on_submit = {
        let api = api.clone();
        let coordinator = coordinator.clone();
        let messages = messages.clone();
        let form_ref = form_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(form_data) = read_form(&form_ref) else {
                return;
            };
            let text = field(&form_data, "message");
            if text.is_empty() || coordinator.is_loading() {
                return;
            }

            let api = api.clone();
            let coordinator = coordinator.clone();
            let messages = messages.clone();
            let form_ref = form_ref.clone();
            let history = (*messages).clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result: Result<_, ApiError> = coordinator
                    .with_loading(|| send_message(&api, &text, &history), Some("Thinking..."))
                    .await;
                // A failed turn is not added to the transcript
                if let Ok(reply) = result {
                    let mut updated = history;
                    updated.push(ChatMessage { role: ChatRole::User, content: text });
                    updated.push(ChatMessage { role: ChatRole::Assistant, content: reply.reply });
                    messages.set(updated);
                    reset_form(&form_ref);
                }
            });
        })
    };

    if !api.session().is_authenticated() {
        return html! { <LoginRequired /> };
    }

    let thinking = coordinator.is_loading();

    html! {
        <div class="card bg-base-100 shadow max-w-3xl mx-auto">
            <div class="card-body">
                <h2 class="card-title"><i class="fas fa-robot"></i>{" DSA Tutor"}</h2>
                <div class="space-y-2 min-h-64 max-h-[60vh] overflow-y-auto">
                    {if messages.is_empty() {
                        html! { <p class="text-gray-500">{"Ask about any data structure or algorithm."}</p> }
                    } else {
                        html! {}
                    }}
                    {for messages.iter().enumerate().map(|(index, message)| {
                        let (side, bubble) = match message.role {
                            ChatRole::User => ("chat-end", "chat-bubble-primary"),
                            ChatRole::Assistant => ("chat-start", ""),
                        };
                        html! {
                            <div key={index} class={classes!("chat", side)}>
                                <div class={classes!("chat-bubble", "whitespace-pre-wrap", bubble)}>{&message.content}</div>
                            </div>
                        }
                    })}
                    {if thinking {
                        html! {
                            <div class="chat chat-start">
                                <div class="chat-bubble"><span class="loading loading-dots loading-sm"></span></div>
                            </div>
                        }
                    } else {
                        html! {}
                    }}
                </div>
                <ErrorBanner error={coordinator.error()} />
                <form ref={form_ref} onsubmit={on_submit} class="flex gap-2">
                    <input name="message" type="text" placeholder="Type your question" class="input input-bordered flex-1" autocomplete="off" />
                    <button type="submit" class="btn btn-primary" disabled={thinking}>
                        <ButtonSpinner loading={thinking}><i class="fas fa-paper-plane"></i></ButtonSpinner>
                    </button>
                </form>
            </div>
        </div>
    }
}
