use axum::{
    Extension, Form,
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{debug, info};

use super::{is_htmx, page};
use crate::AppState;
use crate::analysis::estimate_from_conversation;
use crate::domain::View;
use crate::domain::chat::{clean_input, summarize};
use crate::domain::ChatMessage;
use crate::session::{Session, Toast};
use crate::ui::views::chat;

/// GET /chat
pub async fn chat_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Response {
    page(&state, &session, View::Chat, &chat::render(&session.chat())).into_response()
}

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    message: String,
}

/// POST /chat - Append the visitor's message and the assistant's reply.
pub async fn chat_send(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    headers: HeaderMap,
    Form(form): Form<ChatForm>,
) -> Response {
    let htmx = is_htmx(&headers);

    let Some(text) = clean_input(&form.message) else {
        debug!(session_id = %session.id(), "Ignoring blank chat message");
        return if htmx {
            Html(String::new()).into_response()
        } else {
            Redirect::to(View::Chat.path()).into_response()
        };
    };

    let user = ChatMessage::user(text);
    session.push_chat(user.clone());

    let reply = ChatMessage::assistant(state.responder.reply().await);
    session.push_chat(reply.clone());
    info!(
        name: "chat.reply",
        session_id = %session.id(),
        chars = user.content.chars().count(),
        "Assistant replied"
    );

    if htmx {
        Html(chat::bubbles(&[user, reply])).into_response()
    } else {
        Redirect::to(View::Chat.path()).into_response()
    }
}

/// POST /chat/analyze - Turn the conversation into a stress estimate.
pub async fn chat_analyze(Extension(session): Extension<Session>) -> Redirect {
    let messages = session.chat();
    match estimate_from_conversation(&messages) {
        Ok(result) => {
            info!(
                name: "analysis.completed",
                session_id = %session.id(),
                kind = result.kind.as_str(),
                analyzer = "conversation",
                score = result.score.value(),
                "Chat analysis completed"
            );
            let note = summarize(&messages).unwrap_or_default();
            session.record_result(result, note);
            Redirect::to(View::Result.path())
        }
        Err(e) => {
            debug!(session_id = %session.id(), error = %e, "Chat analysis skipped");
            session.set_toast(Toast::new(
                "Cuéntame algo primero",
                "Escribe al menos un mensaje para evaluar tu estrés.",
            ));
            Redirect::to(View::Chat.path())
        }
    }
}
