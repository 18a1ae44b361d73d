use dioxus::prelude::*;
use survey_core::questionnaire::{
    ENGAGEMENT_DIMENSIONS, ENGAGEMENT_GUIDE_TITLE, REFERENCE_LABEL, REFERENCE_URL,
};

use crate::context::AppContext;

#[component]
pub(crate) fn EngagementGuide() -> Element {
    rsx! {
        section { class: "guide",
            h2 { class: "guide__title", "{ENGAGEMENT_GUIDE_TITLE}" }
            ul { class: "guide__list",
                for dimension in ENGAGEMENT_DIMENSIONS {
                    li { key: "{dimension.title}", class: "guide__item",
                        span { class: "guide__name", "{dimension.title}" }
                        ul {
                            li { "・{dimension.description}" }
                            li { "・{dimension.elements}" }
                        }
                    }
                }
            }
        }
    }
}

/// External reference, opened in the system browser rather than inside the app window.
#[component]
pub(crate) fn ReferenceLink() -> Element {
    let ctx = use_context::<AppContext>();
    let opener = ctx.link_opener();

    rsx! {
        div { class: "reference",
            p { class: "reference__arrow", "↓" }
            a {
                class: "reference__link",
                href: REFERENCE_URL,
                onclick: move |evt: MouseEvent| {
                    evt.prevent_default();
                    opener.open_url(REFERENCE_URL);
                },
                "{REFERENCE_LABEL}"
            }
        }
    }
}
