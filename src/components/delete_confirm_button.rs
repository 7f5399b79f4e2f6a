//! Delete Confirm Button Component
//!
//! Two-step delete shared by sensor rows, schedule rows and the section
//! dialog. Clicks never bubble, so a row or dialog behind it does not react.

use leptos::prelude::*;

/// `×` until pressed, then "Delete?" with confirm and cancel.
/// `on_confirm` runs once per confirmation and the button returns to `×`.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (armed, set_armed) = signal(false);

    let press = move |ev: web_sys::MouseEvent, confirmed: bool| {
        ev.stop_propagation();
        set_armed.set(false);
        if confirmed {
            on_confirm.run(());
        }
    };

    view! {
        <Show
            when=move || armed.get()
            fallback=move || view! {
                <button
                    type="button"
                    class=button_class.clone()
                    title="Delete"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_armed.set(true);
                    }
                >
                    "×"
                </button>
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button type="button" class="confirm-btn" on:click=move |ev| press(ev, true)>"✓"</button>
                <button type="button" class="cancel-btn" on:click=move |ev| press(ev, false)>"✗"</button>
            </span>
        </Show>
    }
}
