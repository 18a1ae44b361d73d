use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use survey_core::questionnaire::SURVEY_TITLE;

use crate::views::{AboutView, SurveyView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", SurveyView)] Survey {},
        #[route("/about", AboutView)] About {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    rsx! {
        header { class: "app-header",
            span { class: "app-header__title", "{SURVEY_TITLE}" }
            nav { class: "app-header__nav",
                Link { to: Route::Survey {}, "サーベイ" }
                Link { to: Route::About {}, "エンゲージメントとは" }
            }
        }
    }
}
