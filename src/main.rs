//! Main module for the evaluation time form using Yew.
//! Wires field hooks, submission and the output sink.

use evaluation_form::sink::ConsoleSink;
use evaluation_form::{submit_evaluation, EvaluationField, SubmitError, TimeFormValues};
use log::{info, warn};
use yew::prelude::*;

mod components;
mod config;
mod hooks;

use components::{FormCard, SubmitButton, TimeInput};
use config::*;
use hooks::{use_time_field, TimeFieldHandle};

/// Render one field from its hook handle.
fn render_time_field(handle: &TimeFieldHandle) -> Html {
    html! {
        <TimeInput
            field={handle.field}
            value={handle.text.clone()}
            error={handle.error.clone()}
            oninput={handle.on_input.clone()}
            onblur={handle.on_blur.clone()}
        />
    }
}

/// Form component owning both time fields and the submit handler.
#[function_component(EvaluationForm)]
fn form_component() -> Html {
    // Once a submit was attempted, fields re-validate on every keystroke
    let submit_attempted = use_state(|| false);

    let prancha = use_time_field(EvaluationField::Prancha, *submit_attempted);
    let forca = use_time_field(EvaluationField::ForcaIsometricaMaos, *submit_attempted);

    let onsubmit = {
        let submit_attempted = submit_attempted.clone();
        let prancha = prancha.clone();
        let forca = forca.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit_attempted.set(true);

            let values = TimeFormValues {
                prancha: prancha.text.clone(),
                forca_isometrica_maos: forca.text.clone(),
            };

            match submit_evaluation(&values, &ConsoleSink) {
                Ok(_) => {
                    prancha.set_error.emit(None);
                    forca.set_error.emit(None);
                }
                Err(SubmitError::Invalid(errors)) => {
                    for handle in [&prancha, &forca] {
                        handle.set_error.emit(errors.get(handle.field).cloned());
                    }
                }
                Err(e) => warn!("Evaluation not delivered: {}", e),
            }
        })
    };

    html! {
        <FormCard title={PAGE_TITLE}>
            <form {onsubmit} novalidate={true}>
                { render_time_field(&prancha) }
                { render_time_field(&forca) }
                <SubmitButton label={SUBMIT_LABEL} />
            </form>
        </FormCard>
    }
}

#[function_component]
pub fn App() -> Html {
    html! { <EvaluationForm /> }
}

/// Entry point: installs panic and log hooks, then renders the App component.
fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(LOG_LEVEL) {
        web_sys::console::warn_1(&format!("Logger already installed: {}", e).into());
    }
    info!("Starting evaluation form");
    yew::Renderer::<App>::new().render();
}
