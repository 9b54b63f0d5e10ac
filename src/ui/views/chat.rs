use crate::domain::{ChatMessage, ChatRole};
use crate::ui::components::{ButtonSize, ButtonVariant, Icon, button_class};
use crate::ui::escape;

/// One chat bubble.
#[must_use]
pub fn bubble(message: &ChatMessage) -> String {
    let (row, avatar) = match message.role {
        ChatRole::Assistant => (
            "bubble-row assistant",
            format!(
                r#"<span class="avatar bg-lavender-light">{}</span>"#,
                Icon::Bot.svg("icon-xs text-primary")
            ),
        ),
        ChatRole::User => (
            "bubble-row user",
            format!(
                r#"<span class="avatar bg-mint-light">{}</span>"#,
                Icon::User.svg("icon-xs text-secondary")
            ),
        ),
    };
    format!(
        r#"<div class="{row}" id="msg-{id}">{avatar}<div class="bubble"><p>{content}</p><time>{time}</time></div></div>"#,
        id = escape(&message.id),
        content = escape(&message.content),
        time = message.time_label(),
    )
}

/// Bubbles for a slice of messages, in order.
#[must_use]
pub fn bubbles(messages: &[ChatMessage]) -> String {
    messages.iter().map(bubble).collect()
}

/// Wellness chat view.
#[must_use]
pub fn render(messages: &[ChatMessage]) -> String {
    format!(
        r##"<div class="view chat">
    <div class="chat-header">
        <span class="avatar avatar-lg gradient">{bot}</span>
        <div class="grow">
            <h2>Asistente de Bienestar</h2>
            <p class="muted small">Siempre disponible para ti</p>
        </div>
        <form method="post" action="/chat/analyze" class="inline-form">
            <button type="submit" class="{analyze_class}">{brain}Evaluar mi estrés</button>
        </form>
    </div>

    <div class="chat-scroll" data-chat-scroll>
        <div id="chat-messages" class="chat-messages">{bubbles}</div>
        <div id="typing-indicator" class="bubble-row assistant typing htmx-indicator" aria-live="polite">
            <span class="avatar bg-lavender-light">{bot_small}</span>
            <div class="bubble"><span class="dot"></span><span class="dot"></span><span class="dot"></span></div>
        </div>
    </div>

    <form method="post" action="/chat" class="chat-input"
          hx-post="/chat" hx-target="#chat-messages" hx-swap="beforeend"
          hx-indicator="#typing-indicator" hx-disabled-elt="find button"
          hx-on::after-request="if (event.detail.successful) this.reset()">
        <input type="text" name="message" placeholder="Escribe cómo te sientes..." autocomplete="off" required>
        <button type="submit" class="{send_class}" aria-label="Enviar">{send}</button>
    </form>
</div>"##,
        bot = Icon::Bot.svg("icon-sm"),
        bot_small = Icon::Bot.svg("icon-xs text-primary"),
        brain = Icon::Brain.svg("icon-xs"),
        analyze_class = button_class(ButtonVariant::Lavender, ButtonSize::Sm, ""),
        bubbles = bubbles(messages),
        send_class = button_class(ButtonVariant::Gradient, ButtonSize::Icon, ""),
        send = Icon::Send.svg("icon-sm"),
    )
}
