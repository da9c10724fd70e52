use leptos::prelude::*;

use crate::state::WidgetState;

/// Floating button that opens and closes the chat window.
#[component]
pub fn Launcher() -> impl IntoView {
    let state = expect_context::<WidgetState>();

    view! {
        <button
            class="chat-launcher"
            class:open=move || state.open.get()
            aria-label=move || if state.open.get() { "Close chat" } else { "Open chat" }
            on:click=move |_| state.toggle()
        >
            {move || if state.open.get() { "×" } else { "💬" }}
        </button>
    }
}
