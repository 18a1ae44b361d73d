use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::guide::{EngagementGuide, ReferenceLink};

#[derive(Clone, Debug, PartialEq)]
struct CategoryRow {
    name: String,
    questions: String,
}

#[component]
pub fn AboutView() -> Element {
    let ctx = use_context::<AppContext>();
    let questionnaire = ctx.survey_loop().questionnaire();
    let rows: Vec<CategoryRow> = questionnaire
        .categories()
        .iter()
        .map(|category| CategoryRow {
            name: category.name().to_string(),
            questions: category
                .questions()
                .iter()
                .map(|question| format!("質問 {}", question.value()))
                .collect::<Vec<_>>()
                .join("・"),
        })
        .collect();

    rsx! {
        div { class: "page about-page",
            EngagementGuide {}
            section { class: "about__categories",
                h2 { "カテゴリーと質問" }
                table { class: "score-table",
                    thead {
                        tr {
                            th { "カテゴリー" }
                            th { "対象の質問" }
                        }
                    }
                    tbody {
                        for row in rows {
                            tr { key: "{row.name}",
                                td { "{row.name}" }
                                td { "{row.questions}" }
                            }
                        }
                    }
                }
            }
            ReferenceLink {}
        }
    }
}
