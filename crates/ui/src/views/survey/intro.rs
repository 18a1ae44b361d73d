use dioxus::prelude::*;

use crate::vm::SurveyIntent;

#[component]
pub(super) fn IntroCard(title: String, on_intent: EventHandler<SurveyIntent>) -> Element {
    let mut name = use_signal(String::new);
    let can_start = !name.read().trim().is_empty();

    rsx! {
        div { class: "survey-card survey-card--intro",
            h1 { class: "survey-card__title", "{title}" }
            input {
                class: "survey-input",
                id: "survey-name",
                r#type: "text",
                placeholder: "お名前を入力してください",
                value: "{name}",
                oninput: move |evt| name.set(evt.value()),
            }
            div { class: "survey-card__footer",
                button {
                    class: "btn btn-primary",
                    id: "survey-start",
                    r#type: "button",
                    disabled: !can_start,
                    onclick: move |_| on_intent.call(SurveyIntent::Start(name())),
                    "開始"
                }
            }
        }
    }
}
