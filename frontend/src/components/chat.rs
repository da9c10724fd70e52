use atdigital_chat_core::{CtaButton, MessageBody, MessageRole, Segment};
use leptos::ev;
use leptos::prelude::*;

use crate::state::WidgetState;

/// The chat window: header, transcript, quick replies and input.
#[component]
pub fn ChatWindow() -> impl IntoView {
    let state = expect_context::<WidgetState>();

    let brand = state.config(|c| c.brand_name().to_string()).unwrap_or_default();
    let logo = state.config(|c| c.branding.logo.clone()).unwrap_or_default();
    let response_time = state.config(|c| c.response_time_text().to_string()).unwrap_or_default();
    let hero_title = state.config(|c| c.welcome_text().to_string()).unwrap_or_default();
    let hero = state.config(|c| c.hero_subtext()).unwrap_or_default();
    let (powered_text, powered_link) = state
        .config(|c| (c.branding.powered_by.text.clone(), c.branding.powered_by.link.clone()))
        .unwrap_or_default();

    let avatar = if logo.is_empty() {
        let initial = brand.chars().next().unwrap_or('A').to_string();
        view! { <div class="brand-avatar">{initial}</div> }.into_any()
    } else {
        view! { <img class="brand-avatar" src=logo alt=brand.clone() /> }.into_any()
    };

    view! {
        <section class="chat-window" class:open=move || state.open.get()>
            <header class="chat-header">
                {avatar}
                <div class="brand-text">
                    <h2>{brand}</h2>
                    <p>{response_time}</p>
                </div>
                <button class="close-btn" aria-label="Close chat" on:click=move |_| state.close()>
                    "×"
                </button>
            </header>

            <div class="chat-hero">
                <h3>{hero_title}</h3>
                <p>{hero}</p>
            </div>

            <div class="messages" node_ref=state.messages_ref>
                {move || {
                    state
                        .read(|c| {
                            c.messages()
                                .iter()
                                .map(|m| (m.role, c.body(m), c.cta_buttons(&m.id)))
                                .collect::<Vec<_>>()
                        })
                        .unwrap_or_default()
                        .into_iter()
                        .map(|(role, body, ctas)| view! { <MessageBubble role body ctas /> })
                        .collect_view()
                }}
                <TypingIndicators />
            </div>

            <QuickReplies />
            <ChatInput />

            <footer class="powered-by">
                <a href=powered_link target="_blank" rel="noopener noreferrer">{powered_text}</a>
            </footer>
        </section>
    }
}

/// A single chat message bubble, with link buttons under finished bot replies.
#[component]
fn MessageBubble(role: MessageRole, body: MessageBody, ctas: Vec<CtaButton>) -> impl IntoView {
    let css_class = match role {
        MessageRole::User => "message user",
        MessageRole::Bot => "message bot",
    };

    let content = match body {
        MessageBody::Typing(text) => view! { <div class="message-text typing">{text}</div> }.into_any(),
        MessageBody::Final(segments) => {
            let parts = segments
                .into_iter()
                .map(|segment| match segment {
                    Segment::Text(text) => text.into_any(),
                    Segment::LineBreak => view! { <br /> }.into_any(),
                })
                .collect_view();
            view! { <div class="message-text">{parts}</div> }.into_any()
        }
    };

    view! {
        <div class=css_class>
            {content}
            <CtaRow ctas />
        </div>
    }
}

#[component]
fn CtaRow(ctas: Vec<CtaButton>) -> impl IntoView {
    (!ctas.is_empty()).then(|| {
        let buttons = ctas
            .into_iter()
            .map(|cta| {
                let url = cta.url;
                view! {
                    <button class="cta-btn" title=url.clone() on:click=move |_| open_link(&url)>
                        {cta.label}
                    </button>
                }
            })
            .collect_view();
        view! { <div class="cta-row">{buttons}</div> }
    })
}

fn open_link(url: &str) {
    if let Err(e) = window().open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer") {
        log::warn!("Could not open {url}: {e:?}");
    }
}

/// Dots for the bot while a reply is pending, and for the user while they type.
#[component]
fn TypingIndicators() -> impl IntoView {
    let state = expect_context::<WidgetState>();
    let is_sending = move || state.read(|c| c.is_sending()).unwrap_or(false);
    let user_typing = move || {
        state.input_focused.get() && !state.input.get().trim().is_empty() && !is_sending()
    };

    view! {
        <Show when=user_typing>
            <div class="message user typing-indicator"><span /><span /><span /></div>
        </Show>
        <Show when=is_sending>
            <div class="message bot typing-indicator"><span /><span /><span /></div>
        </Show>
    }
}

/// Suggested prompts, offered until the user has sent something.
#[component]
fn QuickReplies() -> impl IntoView {
    let state = expect_context::<WidgetState>();

    move || {
        let replies = state
            .read(|c| c.show_quick_replies().then(|| c.quick_replies()))
            .flatten()
            .unwrap_or_default();
        let is_sending = state.read(|c| c.is_sending()).unwrap_or(false);

        (!replies.is_empty()).then(|| {
            let buttons = replies
                .into_iter()
                .map(|reply| {
                    let label = reply.label.clone();
                    view! {
                        <button
                            class="quick-reply"
                            disabled=is_sending
                            on:click=move |_| state.send_quick(reply.clone())
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view();
            view! { <div class="quick-replies">{buttons}</div> }
        })
    }
}

/// Chat input with textarea and send button.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<WidgetState>();
    let placeholder = state.config(|c| c.input_placeholder()).unwrap_or_default();

    let is_sending = move || state.read(|c| c.is_sending()).unwrap_or(false);

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            state.send();
        }
    };

    view! {
        <div class="input-area">
            <textarea
                rows="1"
                placeholder=placeholder
                node_ref=state.input_ref
                prop:value=move || state.input.get()
                on:input=move |ev| state.input.set(event_target_value(&ev))
                on:focus=move |_| state.input_focused.set(true)
                on:blur=move |_| state.input_focused.set(false)
                on:keydown=on_keydown
            />
            <button
                class="send-btn"
                on:click=move |_| state.send()
                disabled=move || is_sending() || state.input.get().trim().is_empty()
            >
                {move || if is_sending() { "Sending..." } else { "Send" }}
            </button>
        </div>
    }
}
