use atdigital_chat_core::config::Position;
use atdigital_chat_core::{ChatPayload, Conversation, QuickReply, Tick, Viewport, WidgetConfig};
use gloo_timers::callback::Timeout;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::timer::IntervalScheduler;

/// How close to the bottom (in px) the reader must be for new text to keep
/// the list pinned.
const PIN_THRESHOLD_PX: i32 = 80;

type WidgetConversation = Conversation<IntervalScheduler>;

/// Shared widget state, provided via Leptos context.
///
/// The conversation lives in a local `StoredValue`; every mutation bumps
/// `revision`, which is what views subscribe to.
#[derive(Clone, Copy)]
pub struct WidgetState {
    conversation: StoredValue<Option<WidgetConversation>, LocalStorage>,
    revision: RwSignal<u64>,
    pub open: RwSignal<bool>,
    pub input: RwSignal<String>,
    pub input_focused: RwSignal<bool>,
    pub messages_ref: NodeRef<html::Div>,
    pub input_ref: NodeRef<html::Textarea>,
}

impl WidgetState {
    /// Create the widget state and provide it in the current Leptos context.
    pub fn provide(config: WidgetConfig) -> Self {
        let state = Self {
            conversation: StoredValue::new_local(None),
            revision: RwSignal::new(0),
            open: RwSignal::new(false),
            input: RwSignal::new(String::new()),
            input_focused: RwSignal::new(false),
            messages_ref: NodeRef::new(),
            input_ref: NodeRef::new(),
        };

        let scheduler = IntervalScheduler::new(move || state.tick());
        state.conversation.set_value(Some(Conversation::new(config, scheduler)));

        provide_context(state);
        state
    }

    /// Reads the conversation and subscribes the caller to changes.
    pub fn read<R>(&self, f: impl FnOnce(&WidgetConversation) -> R) -> Option<R> {
        self.revision.track();
        self.peek(f)
    }

    fn peek<R>(&self, f: impl FnOnce(&WidgetConversation) -> R) -> Option<R> {
        self.conversation.try_with_value(|c| c.as_ref().map(f)).flatten()
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut WidgetConversation) -> R) -> Option<R> {
        let result = self.conversation.try_update_value(|c| c.as_mut().map(f)).flatten();
        self.revision.try_update(|n| *n += 1);
        result
    }

    pub fn config<R>(&self, f: impl FnOnce(&WidgetConfig) -> R) -> Option<R> {
        self.peek(|c| f(c.config()))
    }

    pub fn container_class(&self) -> &'static str {
        match self.config(|c| c.style.position) {
            Some(Position::Left) => "chat-widget position-left",
            _ => "chat-widget position-right",
        }
    }

    /// Inline CSS variables for the configured colors.
    pub fn theme_style(&self) -> String {
        self.config(|c| {
            format!(
                "--chat-primary: {}; --chat-secondary: {}; --chat-background: {}; --chat-font: {};",
                c.style.primary_color, c.style.secondary_color, c.style.background_color, c.style.font_color
            )
        })
        .unwrap_or_default()
    }

    /// Opens or closes the window. The conversation starts on the first open.
    pub fn toggle(&self) {
        let open = !self.open.get_untracked();
        self.open.set(open);
        if open {
            if self.mutate(|c| c.start()) == Some(true) {
                log::debug!("Chat session started");
            }
            self.focus_input_soon();
        }
    }

    pub fn close(&self) {
        self.open.set(false);
    }

    /// Sends whatever is in the input box.
    pub fn send(&self) {
        let text = self.input.get_untracked();
        match self.mutate(|c| c.begin_send(&text)) {
            Some(Ok(payload)) => {
                self.input.set(String::new());
                self.dispatch(payload);
            }
            Some(Err(e)) => log::debug!("Send ignored: {e}"),
            None => {}
        }
    }

    pub fn send_quick(&self, reply: QuickReply) {
        match self.mutate(|c| c.begin_quick_reply(&reply)) {
            Some(Ok(payload)) => self.dispatch(payload),
            Some(Err(e)) => log::debug!("Quick reply ignored: {e}"),
            None => {}
        }
    }

    fn dispatch(&self, payload: ChatPayload) {
        let Some(endpoint) = self.config(|c| c.webhook.url.clone()) else {
            return;
        };
        self.scroll_soon(true);

        let state = *self;
        spawn_local(async move {
            let outcome = api::post_chat(&endpoint, &payload).await;
            state.mutate(|c| c.finish_send(outcome));
            state.scroll_soon(false);
        });
    }

    fn tick(&self) {
        let mut viewport = ScrollPin { node: self.messages_ref, force: false };
        match self.mutate(|c| c.tick(&mut viewport)) {
            Some(Tick::Completed { .. }) => self.scroll_soon(false),
            Some(Tick::Abandoned { id }) => log::debug!("Stopped typing {id}"),
            _ => {}
        }
    }

    /// Scrolls after the pending render has landed.
    fn scroll_soon(&self, force: bool) {
        let node = self.messages_ref;
        Timeout::new(0, move || {
            ScrollPin { node, force }.scroll_to_bottom();
        })
        .forget();
    }

    fn focus_input_soon(&self) {
        let node = self.input_ref;
        Timeout::new(0, move || {
            if let Some(input) = node.get_untracked() {
                if let Err(e) = input.focus() {
                    log::debug!("Could not focus chat input: {e:?}");
                }
            }
        })
        .forget();
    }

    pub fn teardown(&self) {
        self.mutate(|c| c.teardown());
    }
}

/// The message list as seen by the typewriter.
struct ScrollPin {
    node: NodeRef<html::Div>,
    force: bool,
}

impl Viewport for ScrollPin {
    fn scroll_to_bottom(&mut self) -> bool {
        let Some(list) = self.node.get_untracked() else {
            return false;
        };
        let distance = list.scroll_height() - list.scroll_top() - list.client_height();
        if self.force || distance <= PIN_THRESHOLD_PX {
            list.set_scroll_top(list.scroll_height());
        }
        true
    }
}
