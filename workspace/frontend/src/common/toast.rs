use client::ApiError;
use std::cell::Cell;
use std::rc::Rc;
use yew::prelude::*;

use crate::settings;

#[derive(Clone, Debug, PartialEq)]
pub enum ToastType {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastType {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastType::Info => "alert-info",
            ToastType::Success => "alert-success",
            ToastType::Warning => "alert-warning",
            ToastType::Error => "alert-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Info => "fas fa-info-circle",
            ToastType::Success => "fas fa-check-circle",
            ToastType::Warning => "fas fa-exclamation-triangle",
            ToastType::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub toast_type: ToastType,
}

thread_local! {
    static NEXT_TOAST_ID: Cell<usize> = const { Cell::new(0) };
}

fn next_toast_id() -> usize {
    NEXT_TOAST_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    })
}

pub enum ToastAction {
    Add(Toast),
    Remove(usize),
}

#[derive(Default, PartialEq)]
pub struct ToastList {
    toasts: Vec<Toast>,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Add(toast) => toasts.push(toast),
            ToastAction::Remove(id) => toasts.retain(|t| t.id != id),
        }
        Rc::new(ToastList { toasts })
    }
}

/// Handle for raising toasts from anywhere under [`ToastProvider`].
///
/// Only holds the reducer dispatcher, so a copy captured in a long-lived
/// callback never works on a stale toast list.
#[derive(Clone, PartialEq)]
pub struct ToastContext {
    dispatch: UseReducerDispatcher<ToastList>,
}

impl ToastContext {
    fn show(&self, message: String, toast_type: ToastType) {
        let id = next_toast_id();
        self.dispatch.dispatch(ToastAction::Add(Toast { id, message, toast_type }));

        let dispatch = self.dispatch.clone();
        let duration = settings::get_settings().toast_duration_ms;
        gloo_timers::callback::Timeout::new(duration, move || {
            dispatch.dispatch(ToastAction::Remove(id));
        })
        .forget();
    }

    pub fn show_info(&self, message: String) {
        self.show(message, ToastType::Info);
    }

    pub fn show_success(&self, message: String) {
        self.show(message, ToastType::Success);
    }

    pub fn show_warning(&self, message: String) {
        self.show(message, ToastType::Warning);
    }

    pub fn show_error(&self, message: String) {
        self.show(message, ToastType::Error);
    }

    /// Surface a failed request. Expired sessions are announced by the
    /// session controller, so 401s are skipped here.
    pub fn show_api_error(&self, error: &ApiError) {
        if !error.is_unauthorized() {
            self.show_error(error.user_message());
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let toasts = use_reducer(ToastList::default);
    let context = ToastContext {
        dispatch: toasts.dispatcher(),
    };

    html! {
        <ContextProvider<ToastContext> context={context}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for toasts.toasts.iter().map(|toast| {
                    let id = toast.id;
                    let on_close = {
                        let dispatch = toasts.dispatcher();
                        Callback::from(move |_| dispatch.dispatch(ToastAction::Remove(id)))
                    };

                    html! {
                        <div key={id} class={classes!("alert", toast.toast_type.alert_class(), "shadow-lg")}>
                            <i class={toast.toast_type.icon()}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}

