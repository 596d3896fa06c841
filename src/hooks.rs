use evaluation_form::mask::TimeMask;
use evaluation_form::{EvaluationField, TimeError};
use log::debug;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Holds the state and callbacks for one masked time input.
#[derive(Clone)]
pub struct TimeFieldHandle {
    pub field: EvaluationField,
    /// The current masked text of the input.
    pub text: String,
    /// Error currently shown under the input.
    pub error: Option<TimeError>,
    /// Callback for the input's `oninput` event. Applies the mask.
    pub on_input: Callback<InputEvent>,
    /// Callback for the input's `onblur` event. Validates the field.
    pub on_blur: Callback<FocusEvent>,
    /// Replace the shown error, used when a submit attempt fails.
    pub set_error: Callback<Option<TimeError>>,
}

/// Manage text and error state for a masked time field.
///
/// The field validates when it loses focus. With `revalidate_on_input` set
/// (after the first submit attempt) it also validates on every keystroke.
#[hook]
pub fn use_time_field(field: EvaluationField, revalidate_on_input: bool) -> TimeFieldHandle {
    let text_state_handle: UseStateHandle<String> = use_state(String::new);
    let error_state_handle: UseStateHandle<Option<TimeError>> = use_state(|| None::<TimeError>);
    let mask = use_mut_ref(TimeMask::default);

    let on_input = {
        let text_setter = text_state_handle.clone();
        let error_setter = error_state_handle.clone();
        let mask = mask.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let masked = mask.borrow_mut().update(&input.value());
            // Write back so rejected keystrokes never show up in the input
            if input.value() != masked {
                input.set_value(&masked);
            }
            if revalidate_on_input {
                error_setter.set(field.validate(&masked).err());
            }
            text_setter.set(masked);
        })
    };

    let on_blur = {
        let error_setter = error_state_handle.clone();
        Callback::from(move |e: FocusEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            // The value was already masked on input
            let verdict = field.validate(&input.value()).err();
            debug!("Blur on '{}': {:?}", field.name(), verdict);
            error_setter.set(verdict);
        })
    };

    let set_error = {
        let error_setter = error_state_handle.clone();
        Callback::from(move |error: Option<TimeError>| error_setter.set(error))
    };

    TimeFieldHandle {
        field,
        text: (*text_state_handle).clone(),
        error: (*error_state_handle).clone(),
        on_input,
        on_blur,
        set_error,
    }
}
