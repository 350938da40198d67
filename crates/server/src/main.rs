// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use order_bridge_domain::{OrderDocument, OrderRecord};
use order_bridge_messaging::{
    ChatCard, ChatMessageRef, ChatTransport, MessagingConfig, MessagingError, NotificationPayload,
    PushTransport, TransportError, on_chat_action, on_link_command, on_order_created,
    on_order_status_changed,
};
use order_bridge_persistence::Store;

/// The header the chat platform signs webhook calls with.
const WEBHOOK_SECRET_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Environment variable holding the webhook secret token.
const ENV_WEBHOOK_SECRET: &str = "ORDER_BRIDGE_WEBHOOK_SECRET";
/// Environment variable holding the partner link secret.
const ENV_LINK_SECRET: &str = "ORDER_BRIDGE_LINK_SECRET";

/// Greeting sent in response to `/start`.
const REPLY_GREETING: &str = "Привет! Этот бот помогает управлять предзаказами. \
     Используйте команду /link <branchId> <secret>, чтобы привязать заведение.";
/// Usage hint for a `/link` command with missing arguments.
const REPLY_LINK_USAGE: &str =
    "Укажите идентификатор филиала и секрет. Пример: /link branch-123 your-secret";
/// Reply when the update carries no sender to attribute the link to.
const REPLY_NO_SENDER: &str = "Не удалось определить чат. Попробуйте ещё раз.";

/// Order Bridge Server - HTTP server bridging the order store with the
/// partner chat and the push channel
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory
    /// database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Immutable runtime configuration, read once at startup.
#[derive(Debug, Clone)]
struct RelayConfig {
    /// Secret token expected on every webhook call.
    webhook_secret_token: String,
    /// Messaging-layer configuration (the partner link secret).
    messaging: MessagingConfig,
}

impl RelayConfig {
    /// Reads the configuration from the environment.
    fn from_env() -> Result<Self, String> {
        Ok(Self {
            webhook_secret_token: require_env(ENV_WEBHOOK_SECRET)?,
            messaging: MessagingConfig::new(require_env(ENV_LINK_SECRET)?),
        })
    }
}

/// Reads a required, non-blank environment variable.
fn require_env(name: &str) -> Result<String, String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("Missing required environment variable {name}")),
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The order/branch/user document store.
    store: Arc<Mutex<Store>>,
    /// The chat delivery seam.
    chat: Arc<dyn ChatTransport + Send + Sync>,
    /// The push delivery seam.
    push: Arc<dyn PushTransport + Send + Sync>,
    /// Runtime configuration.
    config: Arc<RelayConfig>,
}

// ============================================================================
// Chat update wire format
// ============================================================================

/// An incoming chat platform update. Only the parts this service consumes
/// are modeled.
#[derive(Debug, Clone, Deserialize)]
struct ChatUpdate {
    /// A plain chat message (commands arrive here).
    message: Option<IncomingMessage>,
    /// A pressed card button.
    callback_query: Option<CallbackQuery>,
}

/// A plain chat message.
#[derive(Debug, Clone, Deserialize)]
struct IncomingMessage {
    /// The chat the message was sent in.
    chat: ChatInfo,
    /// The sender, when the platform reports one.
    from: Option<UserInfo>,
    /// The message text.
    text: Option<String>,
}

/// A chat identifier.
#[derive(Debug, Clone, Copy, Deserialize)]
struct ChatInfo {
    id: i64,
}

/// A chat user identifier.
#[derive(Debug, Clone, Copy, Deserialize)]
struct UserInfo {
    id: i64,
}

/// A pressed card button.
#[derive(Debug, Clone, Deserialize)]
struct CallbackQuery {
    /// The pending query to acknowledge.
    id: String,
    /// The action token the button carried.
    data: Option<String>,
    /// The operator who pressed the button.
    from: Option<UserInfo>,
    /// The message the button lives on, for in-place edits.
    message: Option<CallbackMessage>,
}

/// The message a callback originated from.
#[derive(Debug, Clone, Copy, Deserialize)]
struct CallbackMessage {
    message_id: i64,
    chat: ChatInfo,
}

/// Body of the order-updated lifecycle hook.
#[derive(Debug, Clone, Deserialize)]
struct OrderUpdatedRequest {
    /// The order id.
    id: String,
    /// The document before the update.
    before: OrderDocument,
    /// The document after the update.
    after: OrderDocument,
}

/// Generic response for write endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
}

/// Error body returned to HTTP callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Always true; marks the body as an error.
    error: bool,
    /// Human-readable message.
    message: String,
}

/// An HTTP error with a status code.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<MessagingError> for HttpError {
    fn from(err: MessagingError) -> Self {
        match err {
            MessagingError::Storage(_) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            },
            MessagingError::Transport(_) => Self {
                status: StatusCode::BAD_GATEWAY,
                message: err.to_string(),
            },
        }
    }
}

/// Builds the actor identifier for an update sender.
fn actor_id(from: Option<&UserInfo>) -> String {
    from.map_or_else(
        || String::from("telegram:unknown"),
        |user| format!("telegram:{}", user.id),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Handler for POST `/telegram/webhook`.
///
/// Validates the platform's secret token header, then routes the update:
/// card button presses drive the transition flow, text commands drive the
/// greeting and link flows. Unrecognized updates are acknowledged and
/// dropped.
async fn handle_chat_webhook(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    Json(update): Json<ChatUpdate>,
) -> Result<Json<WriteResponse>, HttpError> {
    let provided = headers
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if provided != state.config.webhook_secret_token {
        warn!("Rejected webhook call because of invalid secret token");
        return Err(HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Unauthorized"),
        });
    }

    if let Some(callback) = update.callback_query {
        handle_callback(&state, callback).await?;
    } else if let Some(message) = update.message {
        handle_message(&state, message).await?;
    }

    Ok(Json(WriteResponse { success: true }))
}

/// Routes a pressed card button into the chat action flow.
async fn handle_callback(state: &AppState, callback: CallbackQuery) -> Result<(), HttpError> {
    let actor: String = actor_id(callback.from.as_ref());
    let raw_token: String = callback.data.unwrap_or_default();
    let message: Option<ChatMessageRef> = callback.message.map(|m| ChatMessageRef {
        chat_id: m.chat.id,
        message_id: m.message_id,
    });

    info!(actor = %actor, "Handling chat action");

    let mut store = state.store.lock().await;
    on_chat_action(
        &mut store,
        state.chat.as_ref(),
        &raw_token,
        &actor,
        message,
        &callback.id,
    )?;

    Ok(())
}

/// Routes a text message: `/start` and `/link` are commands, everything
/// else is ignored.
async fn handle_message(state: &AppState, message: IncomingMessage) -> Result<(), HttpError> {
    let Some(text) = message.text.as_deref() else {
        return Ok(());
    };

    let mut parts = text.split_whitespace();
    match parts.next() {
        Some("/start") => {
            state
                .chat
                .send_text(message.chat.id, REPLY_GREETING)
                .map_err(MessagingError::from)?;
        }
        Some("/link") => {
            let branch_id = parts.next();
            let secret = parts.next();

            let (Some(branch_id), Some(secret)) = (branch_id, secret) else {
                state
                    .chat
                    .send_text(message.chat.id, REPLY_LINK_USAGE)
                    .map_err(MessagingError::from)?;
                return Ok(());
            };

            let Some(from) = message.from else {
                state
                    .chat
                    .send_text(message.chat.id, REPLY_NO_SENDER)
                    .map_err(MessagingError::from)?;
                return Ok(());
            };

            info!(branch_id = %branch_id, chat_id = message.chat.id, "Handling link command");

            let mut store = state.store.lock().await;
            on_link_command(
                &mut store,
                state.chat.as_ref(),
                &state.config.messaging,
                branch_id,
                secret,
                message.chat.id,
                from.id,
            )?;
        }
        _ => {}
    }

    Ok(())
}

/// Handler for POST `/hooks/order-created`.
///
/// Sends the order card to the branch's linked chat, if any.
async fn handle_order_created(
    AxumState(state): AxumState<AppState>,
    Json(order): Json<OrderRecord>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(order_id = %order.id, branch_id = %order.document.branch_id, "Handling order-created hook");

    let store = state.store.lock().await;
    on_order_created(&store, state.chat.as_ref(), &order)?;

    Ok(Json(WriteResponse { success: true }))
}

/// Handler for POST `/hooks/order-updated`.
///
/// Pushes a status notification to the owning user when the status changed
/// and a template exists.
async fn handle_order_updated(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<OrderUpdatedRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(order_id = %req.id, "Handling order-updated hook");

    let after: OrderRecord = OrderRecord {
        id: req.id,
        document: req.after,
    };

    let store = state.store.lock().await;
    on_order_status_changed(&store, state.push.as_ref(), &req.before, &after)?;

    Ok(Json(WriteResponse { success: true }))
}

/// Builds the application router.
fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/telegram/webhook", post(handle_chat_webhook))
        .route("/hooks/order-created", post(handle_order_created))
        .route("/hooks/order-updated", post(handle_order_updated))
        .with_state(state)
}

// ============================================================================
// Placeholder transports
// ============================================================================

/// Log-only chat transport.
///
/// This is a minimal placeholder: it does NOT deliver anything. A
/// deployment replaces it with a real bot API client behind the same trait.
struct LogOnlyChatTransport;

impl ChatTransport for LogOnlyChatTransport {
    fn send_text(&self, chat_id: i64, text: &str) -> Result<(), TransportError> {
        info!(chat_id, text = %text, "chat send_text (log-only transport)");
        Ok(())
    }

    fn send_card(&self, chat_id: i64, card: &ChatCard) -> Result<(), TransportError> {
        info!(chat_id, actions = card.actions.len(), "chat send_card (log-only transport)");
        Ok(())
    }

    fn edit_card(&self, message: ChatMessageRef, card: &ChatCard) -> Result<(), TransportError> {
        info!(
            chat_id = message.chat_id,
            message_id = message.message_id,
            actions = card.actions.len(),
            "chat edit_card (log-only transport)"
        );
        Ok(())
    }

    fn answer(&self, query_id: &str, text: &str, alert: bool) -> Result<(), TransportError> {
        info!(query_id = %query_id, text = %text, alert, "chat answer (log-only transport)");
        Ok(())
    }
}

/// Log-only push transport.
///
/// Same placeholder arrangement as the chat side: a deployment wires the
/// real multicast client here.
struct LogOnlyPushTransport;

impl PushTransport for LogOnlyPushTransport {
    fn send_multicast(
        &self,
        tokens: &[String],
        payload: &NotificationPayload,
    ) -> Result<(), TransportError> {
        info!(
            token_count = tokens.len(),
            title = %payload.title,
            "push send_multicast (log-only transport)"
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Order Bridge Server");

    let config: RelayConfig = RelayConfig::from_env().map_err(|err| {
        error!("{err}");
        err
    })?;

    // Initialize the store (in-memory or file-based based on CLI argument)
    let store: Store = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Store::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Store::new_in_memory()?
    };

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(store)),
        chat: Arc::new(LogOnlyChatTransport),
        push: Arc::new(LogOnlyPushTransport),
        config: Arc::new(config),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
