use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{SurveyIntent, SurveyScreen, SurveyVm};

use super::intro::IntroCard;
use super::question::QuestionCard;
use super::results::ResultsPanel;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn SurveyView() -> Element {
    let ctx = use_context::<AppContext>();
    let survey_loop = ctx.survey_loop();
    let transition = ctx.settings().transition;

    let vm = use_signal({
        let survey_loop = survey_loop.clone();
        move || SurveyVm::new(survey_loop.new_flow())
    });
    let error = use_signal(|| None::<ViewError>);
    let fading = use_signal(|| false);
    let fade_generation = use_signal(|| 0_u64);
    let submitting = use_signal(|| false);

    let dispatch_intent = use_callback(move |intent: SurveyIntent| {
        let mut vm = vm;
        let mut error = error;
        let mut fading = fading;
        let mut fade_generation = fade_generation;
        let mut submitting = submitting;

        match intent {
            SurveyIntent::Submit => {
                if submitting() {
                    return;
                }
                submitting.set(true);
                let survey_loop = survey_loop.clone();
                spawn(async move {
                    let mut local_vm = vm.read().clone();
                    let result = local_vm.submit(&survey_loop).await;

                    // The flow is only replaced once the append has settled.
                    vm.set(local_vm);
                    submitting.set(false);
                    match result {
                        Ok(_) => error.set(None),
                        Err(err) => {
                            warn!(?err, "survey submission failed");
                            error.set(Some(err));
                        }
                    }
                });
            }
            intent => {
                // The flow is replaced wholesale once a pending submission settles.
                if submitting() {
                    debug!(?intent, "ignored while submitting");
                    return;
                }
                // Answers are locked until the fade to the next question has finished.
                if matches!(intent, SurveyIntent::Answer(_)) && fading() {
                    return;
                }
                let fades = matches!(intent, SurveyIntent::Answer(_) | SurveyIntent::Back);
                let result = vm.write().apply(&intent);
                match result {
                    Ok(step) => {
                        error.set(None);
                        if fades && step.moved() && !transition.is_zero() {
                            let generation = fade_generation() + 1;
                            fade_generation.set(generation);
                            fading.set(true);
                            spawn(async move {
                                tokio::time::sleep(transition).await;
                                if fade_generation() == generation {
                                    fading.set(false);
                                }
                            });
                        }
                    }
                    Err(err) => error.set(Some(err)),
                }
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<SurveyTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let screen = vm.read().screen();
    let current_error = *error.read();
    let is_fading = fading();
    let is_submitting = submitting();

    rsx! {
        div { class: "page survey-page",
            if let Some(err) = current_error {
                p { class: "survey-error", role: "alert", "{err.message()}" }
            }
            match screen {
                SurveyScreen::Intro { title } => rsx! {
                    IntroCard { title, on_intent: dispatch_intent }
                },
                SurveyScreen::Question(question) => rsx! {
                    QuestionCard {
                        question,
                        fading: is_fading,
                        submitting: is_submitting,
                        on_intent: dispatch_intent,
                    }
                },
                SurveyScreen::Results { respondent, submission } => rsx! {
                    ResultsPanel {
                        key: "{submission}",
                        respondent,
                        on_retake: move |()| dispatch_intent.call(SurveyIntent::Retake),
                    }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SurveyTestHandles {
    dispatch: Rc<RefCell<Option<Callback<SurveyIntent>>>>,
    vm: Rc<RefCell<Option<Signal<SurveyVm>>>>,
}

#[cfg(test)]
impl SurveyTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<SurveyIntent>, vm: Signal<SurveyVm>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<SurveyIntent> {
        (*self.dispatch.borrow()).expect("survey dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<SurveyVm> {
        (*self.vm.borrow()).expect("survey vm registered")
    }
}
