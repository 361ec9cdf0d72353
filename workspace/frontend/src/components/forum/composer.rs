use client::api::forum::{Question, QuestionDraft, post_question};
use client::{ApiError, LoadingWithErrorCoordinator, RequestExecutor};
use std::rc::Rc;
use yew::prelude::*;

use crate::common::error::ErrorBanner;
use crate::common::form::{field, read_form, reset_form};
use crate::common::loading::ButtonSpinner;
use crate::common::toast::ToastContext;

#[derive(Properties)]
pub struct Props {
    pub api: Rc<RequestExecutor>,
    pub coordinator: Rc<LoadingWithErrorCoordinator>,
    /// Coordinator state, passed separately so the composer re-renders on change
    pub posting: bool,
    pub error: Option<String>,
    pub on_posted: Callback<Question>,
}

impl PartialEq for Props {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api)
            && Rc::ptr_eq(&self.coordinator, &other.coordinator)
            && self.posting == other.posting
            && self.error == other.error
            && self.on_posted == other.on_posted
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

#[function_component(QuestionComposer)]
pub fn question_composer(props: &Props) -> Html {
    let toast_ctx = use_context::<ToastContext>().expect("QuestionComposer requires a ToastProvider");
    let form_ref = use_node_ref();

    let on_submit = {
        let api = props.api.clone();
        let coordinator = props.coordinator.clone();
        let on_posted = props.on_posted.clone();
        let form_ref = form_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(form_data) = read_form(&form_ref) else {
                return;
            };
            let draft = QuestionDraft {
                title: field(&form_data, "title"),
                body: field(&form_data, "body"),
                tags: split_tags(&field(&form_data, "tags")),
            };
            // Invalid drafts never reach the server
            let draft = match draft.normalize() {
                Ok(draft) => draft,
                Err(e) => {
                    coordinator.set_error(e.to_string());
                    return;
                }
            };

            let api = api.clone();
            let coordinator = coordinator.clone();
            let on_posted = on_posted.clone();
            let toast_ctx = toast_ctx.clone();
            let form_ref = form_ref.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result: Result<Question, ApiError> = coordinator
                    .with_loading(|| post_question(&api, &draft), Some("Posting question..."))
                    .await;
                if let Ok(question) = result {
                    toast_ctx.show_success("Question posted".to_string());
                    reset_form(&form_ref);
                    on_posted.emit(question);
                }
            });
        })
    };

    let on_dismiss = {
        let coordinator = props.coordinator.clone();
        Callback::from(move |_| coordinator.clear_error())
    };

    html! {
        <div class="card bg-base-100 shadow mb-6">
            <div class="card-body">
                <h2 class="card-title">{"Ask a question"}</h2>
                <ErrorBanner error={props.error.clone()} on_dismiss={Some(on_dismiss)} />
                <form ref={form_ref} onsubmit={on_submit} class="space-y-3">
                    <input name="title" type="text" placeholder="Title" class="input input-bordered w-full" />
                    <textarea name="body" placeholder="Describe what you tried" class="textarea textarea-bordered w-full" rows="4"></textarea>
                    <input name="tags" type="text" placeholder="Tags, comma separated (max 5)" class="input input-bordered w-full" />
                    <button type="submit" class="btn btn-primary" disabled={props.posting}>
                        <ButtonSpinner loading={props.posting}>{"Post"}</ButtonSpinner>
                    </button>
                </form>
            </div>
        </div>
    }
}

