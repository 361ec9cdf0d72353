use yew::prelude::*;

#[derive(Clone, PartialEq, Default)]
pub enum LoadingSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl LoadingSize {
    fn class(&self) -> &'static str {
        match self {
            LoadingSize::Small => "loading-sm",
            LoadingSize::Medium => "loading-md",
            LoadingSize::Large => "loading-lg",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or_default]
    pub size: LoadingSize,
    /// Usually the coordinator's current loading text
    #[prop_or_default]
    pub text: Option<String>,
}

#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="flex flex-col justify-center items-center py-12 gap-4">
            <span class={classes!("loading", "loading-spinner", props.size.class())}></span>
            {if let Some(text) = &props.text {
                html! { <p class="text-sm text-gray-500">{text}</p> }
            } else {
                html! {}
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ButtonSpinnerProps {
    pub loading: bool,
    pub children: Children,
}

/// Button content that swaps to a small spinner while `loading` is set
#[function_component(ButtonSpinner)]
pub fn button_spinner(props: &ButtonSpinnerProps) -> Html {
    if props.loading {
        html! { <span class="loading loading-spinner loading-xs"></span> }
    } else {
        html! { <>{ for props.children.iter() }</> }
    }
}
