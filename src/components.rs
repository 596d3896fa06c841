//! Pure Yew view components for the evaluation form.
//!
//! Components render from props only; field state lives in the hooks.

use crate::config::{TIME_INPUT_MODE, TIME_INPUT_PATTERN, TIME_PLACEHOLDER};
use evaluation_form::{EvaluationField, TimeError};
use yew::prelude::*;

/// Renders the inline error text for a field, or nothing.
pub fn render_field_error(error: Option<&TimeError>) -> Html {
    match error {
        Some(e) => html! { <span class="field-error">{ e.to_string() }</span> },
        None => html! {},
    }
}

/// Labelled masked time input with its error region.
#[derive(Properties, PartialEq)]
pub struct TimeInputProps {
    pub field: EvaluationField,
    pub value: String,
    pub error: Option<TimeError>,
    pub oninput: Callback<InputEvent>,
    pub onblur: Callback<FocusEvent>,
}

#[function_component(TimeInput)]
pub fn time_input(props: &TimeInputProps) -> Html {
    let id = props.field.name();

    html! {
        <div class="form-group">
            <label for={id}>{ props.field.label() }</label>
            <input
                type="text"
                id={id}
                name={id}
                value={props.value.clone()}
                placeholder={TIME_PLACEHOLDER}
                pattern={TIME_INPUT_PATTERN}
                inputmode={TIME_INPUT_MODE}
                class={classes!("time-input", props.error.is_some().then_some("invalid"))}
                oninput={props.oninput.clone()}
                onblur={props.onblur.clone()}
            />
            { render_field_error(props.error.as_ref()) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SubmitButtonProps {
    pub label: AttrValue,
}

#[function_component(SubmitButton)]
pub fn submit_button(props: &SubmitButtonProps) -> Html {
    html! {
        <div class="form-actions">
            <button type="submit" class="btn-primary">{ props.label.clone() }</button>
        </div>
    }
}

/// Centered card holding the page title and its children.
#[derive(Properties, PartialEq)]
pub struct FormCardProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(FormCard)]
pub fn form_card(props: &FormCardProps) -> Html {
    html! {
        <main class="page">
            <div class="card">
                <h1>{ props.title.clone() }</h1>
                { props.children.clone() }
            </div>
        </main>
    }
}
