mod api;
mod components;
mod state;
mod timer;

use atdigital_chat_core::WidgetConfig;
use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat::ChatWindow;
use components::launcher::Launcher;
use state::WidgetState;

const WIDGET_CONFIG: &str = include_str!("../widget.json");

fn load_config() -> WidgetConfig {
    WidgetConfig::from_json(WIDGET_CONFIG).unwrap_or_else(|e| {
        log::error!("Invalid widget config, using defaults: {e}");
        WidgetConfig::default()
    })
}

/// Root component: the floating launcher and the chat window it toggles.
#[component]
fn App() -> impl IntoView {
    let state = WidgetState::provide(load_config());
    on_cleanup(move || state.teardown());

    view! {
        <div class=state.container_class() style=state.theme_style()>
            <ChatWindow />
            <Launcher />
        </div>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
