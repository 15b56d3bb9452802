use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};
use vck_core::SearchRequest;
use vck_types::SearchResult;

use crate::auth::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::error::{ServerError, ServerResult};
use crate::slack::{parse_search_item, SlackMessage};
use crate::state::AppState;

/// The form fields of a slash command that we use.
#[derive(Clone, Debug, Deserialize)]
pub struct SlashCommand {
    #[serde(default)]
    pub text: Option<String>,
    pub response_url: String,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Slash command handler.
///
/// Verifies the signature, acknowledges at once, and answers through the
/// command's `response_url` in the background so Slack does not time out.
pub async fn slash_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ServerResult<StatusCode> {
    let timestamp = header(&headers, TIMESTAMP_HEADER)?;
    let signature = header(&headers, SIGNATURE_HEADER)?;
    if let Err(err) = state.verifier.verify(timestamp, signature, &body) {
        warn!(error = %err, "rejected slash command");
        return Err(err);
    }

    let command: SlashCommand =
        serde_urlencoded::from_bytes(&body).map_err(|e| ServerError::BadRequest(e.to_string()))?;
    info!(user = ?command.user_name, "received version check command");

    tokio::spawn(handle_event(state, command));
    Ok(StatusCode::OK)
}

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> ServerResult<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or(ServerError::MissingHeader(name))
}

/// Run the search for one command and post the outcome.
pub async fn handle_event(state: AppState, command: SlashCommand) {
    if let Err(err) = respond(&state, command).await {
        error!(error = %err, "failed to answer slash command");
    }
}

async fn respond(state: &AppState, command: SlashCommand) -> ServerResult<()> {
    let url = command.response_url.as_str();
    let text = command.text.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        warn!("pull request number or commit was not provided");
        return state.sink.post(url, &SlackMessage::missing_input()).await;
    }

    state.sink.post(url, &SlackMessage::searching()).await?;

    let item = parse_search_item(text);
    info!(item = %item.label, "searching for matches");
    let request = item.request.skip_fetch(!state.config.fetch_on_request);
    let message = match run_search(state, request).await {
        Ok(result) => {
            info!(
                item = %item.label,
                branches = result.branches.len(),
                tags = result.tags.len(),
                "search finished"
            );
            SlackMessage::results(&item.label, &result)
        }
        Err(err) => {
            warn!(item = %item.label, error = %err, "search failed");
            SlackMessage::failure(&item.label, &err)
        }
    };
    state.sink.post(url, &message).await
}

async fn run_search(state: &AppState, request: SearchRequest) -> ServerResult<SearchResult> {
    let _guard = state.search_lock.lock().await;
    let searcher = Arc::clone(&state.searcher);
    let result = tokio::task::spawn_blocking(move || searcher.search(&request))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;
    Ok(result)
}
