use client::api::forum::{Question, post_answer, vote_question};
use client::RequestExecutor;
use std::rc::Rc;
use yew::prelude::*;

use crate::common::form::{field, read_form, reset_form};
use crate::common::toast::ToastContext;
use crate::hooks::use_loading;

#[derive(Properties)]
pub struct Props {
    pub api: Rc<RequestExecutor>,
    pub question: Question,
    pub on_changed: Callback<Question>,
}

impl PartialEq for Props {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api) && self.question == other.question && self.on_changed == other.on_changed
    }
}

#[function_component(QuestionCard)]
pub fn question_card(props: &Props) -> Html {
    let toast_ctx = use_context::<ToastContext>().expect("QuestionCard requires a ToastProvider");
    let busy = use_loading();
    let expanded = use_state(|| false);
    let form_ref = use_node_ref();

    let vote = {
        let api = props.api.clone();
        let busy = busy.clone();
        let question_id = props.question.id.clone();
        let on_changed = props.on_changed.clone();
        let toast_ctx = toast_ctx.clone();
        Callback::from(move |up: bool| {
            let api = api.clone();
            let busy = busy.clone();
            let question_id = question_id.clone();
            let on_changed = on_changed.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match busy.with_loading(|| vote_question(&api, &question_id, up), None).await {
                    Ok(question) => on_changed.emit(question),
                    Err(e) => toast_ctx.show_api_error(&e),
                }
            });
        })
    };

    let on_answer = {
        let api = props.api.clone();
        let busy = busy.clone();
        let question = props.question.clone();
        let on_changed = props.on_changed.clone();
        let form_ref = form_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(form_data) = read_form(&form_ref) else {
                return;
            };
            let body = field(&form_data, "answer");
            if body.is_empty() {
                return;
            }

            let api = api.clone();
            let busy = busy.clone();
            let mut question = question.clone();
            let on_changed = on_changed.clone();
            let toast_ctx = toast_ctx.clone();
            let form_ref = form_ref.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = busy
                    .with_loading(|| post_answer(&api, &question.id, &body), Some("Posting answer..."))
                    .await;
                match result {
                    Ok(answer) => {
                        reset_form(&form_ref);
                        question.answers.push(answer);
                        on_changed.emit(question);
                    }
                    Err(e) => toast_ctx.show_api_error(&e),
                }
            });
        })
    };

    let toggle = {
        let expanded = expanded.clone();
        Callback::from(move |_| expanded.set(!*expanded))
    };
    let up = {
        let vote = vote.clone();
        Callback::from(move |_| vote.emit(true))
    };
    let down = Callback::from(move |_| vote.emit(false));
    let question = &props.question;

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body flex-row gap-4">
                <div class="flex flex-col items-center">
                    <button class="btn btn-ghost btn-xs" onclick={up} disabled={busy.is_loading()}><i class="fas fa-chevron-up"></i></button>
                    <span class="font-bold">{question.votes}</span>
                    <button class="btn btn-ghost btn-xs" onclick={down} disabled={busy.is_loading()}><i class="fas fa-chevron-down"></i></button>
                </div>
                <div class="flex-1">
                    <h3 class="font-bold text-lg cursor-pointer" onclick={toggle}>{&question.title}</h3>
                    <div class="flex gap-1 my-1">
                        {for question.tags.iter().map(|tag| html! { <span class="badge badge-outline badge-sm">{tag}</span> })}
                    </div>
                    <p class="text-sm text-gray-500">
                        {format!("{} answers", question.answers.len())}
                        {question.author.as_ref().map(|author| format!(" · asked by {}", author)).unwrap_or_default()}
                    </p>
                    {if *expanded {
                        html! {
                            <div class="mt-4 space-y-3">
                                <p class="whitespace-pre-wrap">{&question.body}</p>
                                {for question.answers.iter().map(|answer| html! {
                                    <div key={answer.id.clone()} class="border-l-4 border-primary pl-3">
                                        <p class="whitespace-pre-wrap">{&answer.body}</p>
                                        <p class="text-xs text-gray-500">{answer.author.clone().unwrap_or_default()}</p>
                                    </div>
                                })}
                                <form ref={form_ref} onsubmit={on_answer} class="flex gap-2">
                                    <input name="answer" type="text" placeholder="Your answer" class="input input-bordered input-sm flex-1" />
                                    <button type="submit" class="btn btn-primary btn-sm" disabled={busy.is_loading()}>{"Answer"}</button>
                                </form>
                            </div>
                        }
                    } else {
                        html! {}
                    }}
                </div>
            </div>
        </div>
    }
}
