use dioxus::prelude::*;

use crate::vm::{AnswerOptionVm, QuestionVm, SurveyIntent};

#[component]
pub(super) fn QuestionCard(
    question: QuestionVm,
    fading: bool,
    submitting: bool,
    on_intent: EventHandler<SurveyIntent>,
) -> Element {
    let body_class = if fading {
        "survey-question survey-question--fading"
    } else {
        "survey-question"
    };

    rsx! {
        div { class: "survey-card",
            header { class: "survey-card__header",
                h2 { class: "survey-card__title", "{question.heading}" }
                span { class: "survey-progress", "{question.progress_label}" }
            }
            div { class: "{body_class}",
                p { class: "survey-prompt", "{question.prompt}" }
                div { class: "survey-options",
                    for option in question.options.iter().cloned() {
                        OptionButton {
                            key: "{option.value}",
                            option,
                            disabled: fading || submitting,
                            on_intent,
                        }
                    }
                }
            }
            footer { class: "survey-card__footer",
                button {
                    class: "btn btn-secondary",
                    id: "survey-back",
                    r#type: "button",
                    disabled: !question.can_go_back || submitting,
                    onclick: move |_| on_intent.call(SurveyIntent::Back),
                    "戻る"
                }
                if question.can_submit {
                    button {
                        class: "btn btn-primary",
                        id: "survey-submit",
                        r#type: "button",
                        disabled: submitting,
                        onclick: move |_| on_intent.call(SurveyIntent::Submit),
                        "提出する"
                    }
                }
            }
        }
    }
}

#[component]
fn OptionButton(
    option: AnswerOptionVm,
    disabled: bool,
    on_intent: EventHandler<SurveyIntent>,
) -> Element {
    let class = if option.selected {
        "survey-option survey-option--selected"
    } else {
        "survey-option"
    };
    let value = option.value;

    rsx! {
        button {
            class,
            r#type: "button",
            aria_pressed: "{option.selected}",
            disabled,
            onclick: move |_| on_intent.call(SurveyIntent::Answer(value)),
            "{option.label}"
        }
    }
}
