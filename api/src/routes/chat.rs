//! Tutor chatbot route handlers
//!
//! Sessions and messages are stored here; generation happens at the external
//! LLM gateway. The stream endpoint appends the user's turn, forwards the
//! recent history to the gateway and passes the streamed reply through
//! byte-for-byte. The frontend appends the finished assistant turn via the
//! messages endpoint once the stream ends.

use actix_web::{web, HttpResponse};
use tracing::error;
use uuid::Uuid;

use crate::dto::chat::{
    AppendMessageRequest, ChatMessageResponse, ChatSessionResponse, CreateSessionRequest,
    StreamChatRequest,
};
use crate::handlers::error::handle_domain_error;
use crate::middleware::CurrentUser;
use crate::routes::AppState;

use gt_core::domain::entities::chat::{ChatMessage, ChatRole, ChatSession};
use gt_core::repositories::{ChatRepository, UserRepository};
use gt_core::services::email::EmailService;
use gt_infra::chat::RelayMessage;
use gt_shared::{error_codes, ErrorResponse};

/// Handler for POST /api/v1/chat/sessions
///
/// Opens a new conversation for the current user. Without a title the
/// session starts as "New chat".
pub async fn create_session<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
    request: web::Json<CreateSessionRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    let session = ChatSession::new(user.0.id, request.into_inner().title);

    match state.chat.create_session(session).await {
        Ok(created) => HttpResponse::Created().json(ChatSessionResponse::from(&created)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/chat/sessions
///
/// Lists the current user's sessions, most recently updated first.
pub async fn list_sessions<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    match state.chat.list_sessions_for_user(user.0.id).await {
        Ok(sessions) => {
            let data: Vec<ChatSessionResponse> =
                sessions.iter().map(ChatSessionResponse::from).collect();
            HttpResponse::Ok().json(data)
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/v1/chat/sessions/{id}/messages
///
/// Returns a session's messages in insertion order.
///
/// ## Errors
/// - 404 NOT_FOUND: no such session, or it belongs to someone else
pub async fn list_messages<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    let session = match find_owned_session(state.chat.as_ref(), path.into_inner(), user.0.id).await
    {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state.chat.list_messages(session.id).await {
        Ok(messages) => {
            let data: Vec<ChatMessageResponse> =
                messages.iter().map(ChatMessageResponse::from).collect();
            HttpResponse::Ok().json(data)
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/chat/sessions/{id}/messages
///
/// Appends a message to a session. The role defaults to `user`; the
/// frontend uses `assistant` to persist a streamed reply after it
/// finishes.
///
/// # Request Body
///
/// ```json
/// {
///     "content": "How do I simplify 4/8?",
///     "role": "user"
/// }
/// ```
///
/// ## Errors
/// - 400 VALIDATION_ERROR: unknown role string
/// - 404 NOT_FOUND: no such session, or it belongs to someone else
pub async fn append_message<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    request: web::Json<AppendMessageRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    let session = match find_owned_session(state.chat.as_ref(), path.into_inner(), user.0.id).await
    {
        Ok(session) => session,
        Err(response) => return response,
    };

    let request = request.into_inner();
    let role = match request.role.as_deref() {
        None => ChatRole::User,
        Some(raw) => match raw.parse::<ChatRole>() {
            Ok(role) => role,
            Err(_) => {
                return HttpResponse::BadRequest().json(ErrorResponse::new(
                    error_codes::VALIDATION_ERROR,
                    "role must be user or assistant",
                ))
            }
        },
    };

    let message = ChatMessage::new(session.id, role, request.content);
    match state.chat.append_message(message).await {
        Ok(stored) => HttpResponse::Created().json(ChatMessageResponse::from(&stored)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/chat/sessions/{id}/stream
///
/// Appends the user's turn, forwards the recent history to the LLM gateway
/// and streams the reply back unchanged. No additional timeout is applied
/// on top of the gateway's own pacing.
///
/// # Request Body
///
/// ```json
/// {
///     "content": "Explain photosynthesis simply"
/// }
/// ```
///
/// ## Errors
/// - 404 NOT_FOUND: no such session, or it belongs to someone else
/// - 503 SERVICE_UNAVAILABLE: the gateway is unreachable or unconfigured
pub async fn stream_chat<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    request: web::Json<StreamChatRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: EmailService + 'static,
{
    let session = match find_owned_session(state.chat.as_ref(), path.into_inner(), user.0.id).await
    {
        Ok(session) => session,
        Err(response) => return response,
    };

    // The user's turn is persisted before the gateway call so the
    // conversation survives even if the stream fails midway.
    let message = ChatMessage::new(session.id, ChatRole::User, request.into_inner().content);
    if let Err(error) = state.chat.append_message(message).await {
        return handle_domain_error(error);
    }

    let history = match state.chat.list_messages(session.id).await {
        Ok(history) => history,
        Err(error) => return handle_domain_error(error),
    };

    let skip = history.len().saturating_sub(state.chat_relay.history_limit());
    let turns: Vec<RelayMessage> = history[skip..].iter().map(RelayMessage::from).collect();

    match state.chat_relay.stream_chat(&turns).await {
        Ok(upstream) => {
            let content_type = upstream
                .headers()
                .get("content-type")
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
                .unwrap_or_else(|| "text/event-stream".to_string());

            HttpResponse::Ok()
                .content_type(content_type)
                .streaming(upstream.bytes_stream())
        }
        Err(error) => {
            error!(error = %error, "chat gateway unavailable");
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::SERVICE_UNAVAILABLE,
                "Chat service is temporarily unavailable",
            ))
        }
    }
}

/// Loads a session if it exists and belongs to `user_id`
///
/// Someone else's session id gets the same 404 as a missing one so session
/// ids cannot be probed.
async fn find_owned_session(
    chat: &dyn ChatRepository,
    session_id: Uuid,
    user_id: Uuid,
) -> Result<ChatSession, HttpResponse> {
    match chat.find_session(session_id).await {
        Ok(Some(session)) if session.user_id == user_id => Ok(session),
        Ok(_) => Err(HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            "Chat session not found",
        ))),
        Err(error) => Err(handle_domain_error(error)),
    }
}
