//! HTTP webhook gateway.
//!
//! Thin transport around a [`SharedResponder`]:
//!
//! | Route | Body | Response |
//! |-------|------|----------|
//! | `GET /health` | (none) | `{"status":"ok"}` |
//! | `POST /whatsapp` | Twilio form (`Body`, `From`, ...) | TwiML `text/xml` |
//! | `POST /message` | `{"text": "..."}` | `{"reply": "..."}` |
//!
//! The sender is logged but not used to partition state: every request talks
//! to the same responder.

use crate::config::GatewayConfig;
use crate::responder::SharedResponder;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Form, Json, Router};

#[derive(Clone)]
struct GatewayState {
    responder: SharedResponder,
    bearer_token: Option<String>,
}

/// Fields of a Twilio messaging webhook we care about; the rest are ignored.
#[derive(Debug, Default, serde::Deserialize)]
struct TwilioWebhookBody {
    #[serde(rename = "Body", default)]
    body: String,
    #[serde(rename = "From", default)]
    from: String,
}

#[derive(Debug, serde::Deserialize)]
struct MessageBody {
    text: String,
}

/// Build the gateway router.
pub fn router(responder: SharedResponder, bearer_token: Option<String>) -> Router {
    let bearer_token = bearer_token
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty());
    let state = GatewayState {
        responder,
        bearer_token,
    };

    Router::new()
        .route("/health", get(gateway_health))
        .route("/whatsapp", post(whatsapp_inbound))
        .route("/message", post(message_inbound))
        .with_state(state)
}

/// Bind and serve until the listener fails.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server stops.
pub async fn run_gateway(config: &GatewayConfig, responder: SharedResponder) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.effective_port());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    let app = router(responder, config.bearer_token.clone());

    tracing::info!("gateway listening on http://{local_addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn gateway_health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}

fn bearer_is_valid(headers: &HeaderMap, expected: &Option<String>) -> bool {
    let Some(expected_token) = expected else {
        return true;
    };
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let candidate = header_value
        .strip_prefix("Bearer ")
        .unwrap_or_default()
        .trim();
    !expected_token.is_empty() && candidate == expected_token
}

async fn whatsapp_inbound(
    State(state): State<GatewayState>,
    Form(body): Form<TwilioWebhookBody>,
) -> impl IntoResponse {
    tracing::info!(from = %body.from, "inbound whatsapp message");
    match respond_blocking(state.responder, body.body).await {
        Some(reply) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/xml")],
            render_twiml(&reply),
        ),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/xml")],
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response/>".to_owned(),
        ),
    }
}

async fn message_inbound(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(body): Json<MessageBody>,
) -> impl IntoResponse {
    if !bearer_is_valid(&headers, &state.bearer_token) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "unauthorized"})),
        );
    }

    match respond_blocking(state.responder, body.text).await {
        Some(reply) => (StatusCode::OK, Json(serde_json::json!({ "reply": reply }))),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "responder unavailable"})),
        ),
    }
}

/// Run the responder on the blocking pool: it takes a std mutex and writes
/// the fact file synchronously.
async fn respond_blocking(responder: SharedResponder, text: String) -> Option<String> {
    match tokio::task::spawn_blocking(move || responder.respond(&text)).await {
        Ok(reply) => Some(reply),
        Err(e) => {
            tracing::error!("responder task failed: {e}");
            None
        }
    }
}

/// Wrap a reply in a TwiML messaging response.
#[must_use]
pub fn render_twiml(reply: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        escape_xml(reply)
    )
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
