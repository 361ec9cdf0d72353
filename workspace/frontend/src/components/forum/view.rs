use client::api::forum::{Question, get_questions};
use yew::prelude::*;

use super::composer::QuestionComposer;
use super::question_card::QuestionCard;
use crate::common::error::ErrorDisplay;
use crate::common::loading::Loading;
use crate::common::toast::ToastContext;
use crate::hooks::{use_api, use_loading, use_loading_with_error};

#[function_component(Forum)]
pub fn forum() -> Html {
    let api = use_api();
    let loading = use_loading();
    let posting = use_loading_with_error();
    let toast_ctx = use_context::<ToastContext>().expect("Forum requires a ToastProvider");
    let questions = use_state(Vec::<Question>::new);
    let error = use_state(|| None::<String>);

    let refetch = {
        let api = api.clone();
        let loading = loading.clone();
        let questions = questions.clone();
        let error = error.clone();
        use_callback((), move |_: (), _| {
            let api = api.clone();
            let loading = loading.clone();
            let questions = questions.clone();
            let error = error.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match loading.with_loading(|| get_questions(&api), Some("Loading questions...")).await {
                    Ok(list) => {
                        error.set(None);
                        questions.set(list.questions);
                    }
                    Err(e) => {
                        toast_ctx.show_api_error(&e);
                        error.set(Some(e.user_message()));
                    }
                }
            });
        })
    };

    {
        let refetch = refetch.clone();
        use_effect_with((), move |_| {
            refetch.emit(());
            || ()
        });
    }

    let on_posted = use_callback(questions.clone(), |question: Question, questions| {
        let mut updated = (**questions).clone();
        updated.insert(0, question);
        questions.set(updated);
    });

    let on_changed = use_callback(questions.clone(), |question: Question, questions| {
        let updated = questions
            .iter()
            .map(|existing| if existing.id == question.id { question.clone() } else { existing.clone() })
            .collect();
        questions.set(updated);
    });

    if loading.is_loading() {
        return html! { <Loading text={Some(loading.loading_text())} /> };
    }
    if let Some(message) = &*error {
        return html! { <ErrorDisplay message={message.clone()} on_retry={Some(refetch)} /> };
    }

    html! {
        <>
            {if api.session().is_authenticated() {
                html! {
                    <QuestionComposer
                        api={api.clone()}
                        coordinator={posting.clone()}
                        posting={posting.is_loading()}
                        error={posting.error()}
                        {on_posted}
                    />
                }
            } else {
                html! {}
            }}
            <div class="space-y-4">
                {if questions.is_empty() {
                    html! { <p class="text-gray-500">{"No questions yet. Be the first to ask!"}</p> }
                } else {
                    html! {
                        <>
                            {for questions.iter().map(|question| html! {
                                <QuestionCard key={question.id.clone()} api={api.clone()} question={question.clone()} on_changed={on_changed.clone()} />
                            })}
                        </>
                    }
                }}
            </div>
        </>
    }
}
