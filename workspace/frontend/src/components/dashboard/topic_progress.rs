use client::api::progress::TopicProgress;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub topics: Vec<TopicProgress>,
}

#[function_component(TopicProgressList)]
pub fn topic_progress_list(props: &Props) -> Html {
    if props.topics.is_empty() {
        return html! { <p class="text-gray-500">{"No topics started yet."}</p> };
    }

    html! {
        <div class="space-y-4">
            {for props.topics.iter().map(|topic| {
                let percent = topic.percent();
                html! {
                    <div key={topic.topic.clone()}>
                        <div class="flex justify-between text-sm mb-1">
                            <span class="font-semibold capitalize">{&topic.topic}</span>
                            <span>{format!("{}/{} levels", topic.completed_levels, topic.total_levels)}</span>
                        </div>
                        <progress class="progress progress-primary w-full" value={percent.to_string()} max="100"></progress>
                    </div>
                }
            })}
        </div>
    }
}
