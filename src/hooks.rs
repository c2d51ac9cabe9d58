use web_sys::HtmlInputElement;
use yew::prelude::*;

/// State handle for one calculator form plus helpers to bind its fields.
#[derive(Clone)]
pub struct FormState<F: Clone + PartialEq + 'static> {
    /// The current form contents.
    pub form: F,
    handle: UseStateHandle<F>,
}

impl<F: Clone + PartialEq + 'static> FormState<F> {
    /// Callback for a text input's `oninput` event that writes into one field.
    pub fn bind(&self, field: impl Fn(&mut F) -> &mut String + 'static) -> Callback<InputEvent> {
        let handle = self.handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*handle).clone();
            *field(&mut next) = input.value();
            handle.set(next);
        })
    }

    /// Callback for a checkbox's `onchange` event.
    pub fn bind_checkbox(&self, field: fn(&mut F) -> &mut bool) -> Callback<Event> {
        let handle = self.handle.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*handle).clone();
            *field(&mut next) = input.checked();
            handle.set(next);
        })
    }

    /// Apply an arbitrary change (reset, unit conversion, mode switch).
    pub fn update(&self, change: impl FnOnce(&mut F)) {
        let mut next = (*self.handle).clone();
        change(&mut next);
        // Skip the re-render when nothing changed
        if next != *self.handle {
            self.handle.set(next);
        }
    }
}

/// Custom hook holding a form in component state, starting from its default.
#[hook]
pub fn use_form<F: Clone + PartialEq + Default + 'static>() -> FormState<F> {
    let handle: UseStateHandle<F> = use_state(F::default);
    FormState {
        form: (*handle).clone(),
        handle,
    }
}
