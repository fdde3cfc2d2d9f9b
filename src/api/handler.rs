//! Skill endpoints and the router that serves them.
//!
//! - `GET /`: health and endpoint listing
//! - `POST /basic`: topic utterance
//! - `POST /geeknews`: top GeekNews article, immediate or via callback

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

use super::helpers::{err_text, ok_callback_ack, ok_text};
use super::parsing::{extract_callback, extract_utterance, parse_skill_payload};
use super::state::AppState;
use crate::core::config::BasicMode;
use crate::core::models::{AnalysisResult, CallbackJob};
use crate::kakao::{
    ANALYSIS_PENDING_MESSAGE, CANNOT_RETRIEVE_MESSAGE, PROMPT_FOR_TOPIC_MESSAGE, SkillReply,
    placeholder_analysis_message,
};

/// Create the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/basic", post(basic))
        .route("/geeknews", post(geeknews))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /": "health check",
            "POST /basic": "topic analysis ({userRequest: {utterance}})",
            "POST /geeknews": "GeekNews top article ({userRequest: {callbackUrl?}})",
        },
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Scrape-only reply bounded by the synchronous reply budget.
async fn immediate_briefing(state: &AppState) -> AnalysisResult {
    match tokio::time::timeout(state.reply_budget, state.pipeline.quick_briefing()).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                budget_ms = state.reply_budget.as_millis() as u64,
                "Quick briefing exceeded reply budget"
            );
            AnalysisResult::new(CANNOT_RETRIEVE_MESSAGE)
        }
    }
}

#[instrument(level = "info", skip_all)]
pub async fn basic(State(state): State<AppState>, body: Bytes) -> Json<SkillReply> {
    let payload = match parse_skill_payload(&body) {
        Ok(p) => p,
        Err(e) => {
            error!("Rejecting /basic request: {}", e);
            return err_text(&e);
        }
    };
    let topic = match extract_utterance(&payload) {
        Ok(t) => t,
        Err(e) => {
            error!("Rejecting /basic request: {}", e);
            return err_text(&e);
        }
    };

    if topic.is_empty() {
        return ok_text(PROMPT_FOR_TOPIC_MESSAGE);
    }

    info!(%topic, mode = ?state.basic_mode, "Handling /basic");
    match state.basic_mode {
        BasicMode::Placeholder => ok_text(&placeholder_analysis_message(topic)),
        BasicMode::Headlines => ok_text(immediate_briefing(&state).await.text()),
    }
}

#[instrument(level = "info", skip_all)]
pub async fn geeknews(State(state): State<AppState>, body: Bytes) -> Json<SkillReply> {
    let callback = match parse_skill_payload(&body).and_then(|p| extract_callback(&p)) {
        Ok(c) => c,
        Err(e) => {
            error!("Rejecting /geeknews request: {}", e);
            return err_text(&e);
        }
    };

    let Some(callback) = callback else {
        info!("No callback URL, answering with quick briefing");
        return ok_text(immediate_briefing(&state).await.text());
    };

    let job = CallbackJob::new(callback);
    let correlation_id = job.correlation_id.clone();
    match state.dispatcher.submit(job) {
        Ok(()) => {
            info!(%correlation_id, "Queued deferred analysis");
            ok_callback_ack(ANALYSIS_PENDING_MESSAGE)
        }
        Err(e) => {
            error!(%correlation_id, "Failed to queue deferred analysis: {}", e);
            err_text(&e)
        }
    }
}
