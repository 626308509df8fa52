//! Session endpoints: create, read, submit a turn, close.
//!
//! Sessions live in the shared `DashMap` until deleted or swept after
//! `session_idle_ttl_secs` without a request. Reading a session counts as observing it,
//! which submits a pending initial message the first time.

use crate::{error_response, AppState};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use guidebot_core::{Domain, SessionController, SessionOptions, SessionSnapshot, TurnState};
use guidebot_skills::KnowledgeResponder;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// A live session and the domain it answers for.
#[derive(Clone)]
pub(crate) struct SessionHandle {
    pub(crate) domain: Domain,
    pub(crate) controller: SessionController,
    /// Time of the last request that named this session.
    pub(crate) last_seen: Instant,
}

#[derive(serde::Serialize)]
struct SessionView {
    domain: Domain,
    #[serde(flatten)]
    snapshot: SessionSnapshot,
}

impl SessionHandle {
    fn view(&self) -> SessionView {
        SessionView {
            domain: self.domain,
            snapshot: self.controller.snapshot(),
        }
    }
}

#[derive(serde::Deserialize, Default)]
pub(crate) struct CreateSessionRequest {
    #[serde(default)]
    domain: Option<String>,
    /// Question carried over from a landing page; submitted once.
    #[serde(default)]
    initial_message: Option<String>,
}

#[derive(serde::Deserialize)]
pub(crate) struct SubmitRequest {
    text: String,
}

fn lookup(state: &AppState, id: Uuid) -> Option<SessionHandle> {
    state.sessions.get_mut(&id).map(|mut entry| {
        entry.last_seen = Instant::now();
        entry.value().clone()
    })
}

/// Closes and drops sessions idle for at least `ttl`. A turn in flight keeps its session.
pub(crate) fn sweep_idle_sessions(sessions: &DashMap<Uuid, SessionHandle>, ttl: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|id, handle| {
        let expired = handle.last_seen.elapsed() >= ttl
            && handle.controller.turn_state() != TurnState::Submitting;
        if expired {
            handle.controller.close();
            tracing::info!(target: "guidebot::session", session = %id, "Session expired");
        }
        !expired
    });
    before.saturating_sub(sessions.len())
}

fn not_found(id: Uuid) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("session {} not found", id))
}

/// POST /v1/sessions – opens a session, optionally seeded with an initial message.
pub(crate) async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    let domain = match req.domain.as_deref() {
        Some(name) => match name.parse::<Domain>() {
            Ok(domain) => domain,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        },
        None => state.config.default_domain,
    };

    let responder = KnowledgeResponder::from_config(domain, Arc::clone(&state.knowledge), &state.config);
    let greeting = state.config.greeting_enabled.then(|| {
        guidebot_core::DomainProfile::for_domain(domain)
            .greeting
            .to_string()
    });
    let controller = SessionController::with_options(
        Arc::new(responder),
        SessionOptions {
            greeting,
            initial_message: req.initial_message,
        },
    );
    controller.observe();

    let handle = SessionHandle {
        domain,
        controller,
        last_seen: Instant::now(),
    };
    let id = handle.controller.id();
    state.sessions.insert(id, handle.clone());
    tracing::info!(target: "guidebot::session", session = %id, domain = %domain, "Session opened");

    (StatusCode::CREATED, Json(handle.view())).into_response()
}

/// GET /v1/sessions/:id – current log, turn state and notices.
pub(crate) async fn get_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let Some(handle) = lookup(&state, id) else {
        return not_found(id);
    };
    handle.controller.observe();
    Json(handle.view()).into_response()
}

/// POST /v1/sessions/:id/messages – submits one user turn (answer arrives asynchronously).
pub(crate) async fn submit_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitRequest>,
) -> Response {
    let Some(handle) = lookup(&state, id) else {
        return not_found(id);
    };
    if !handle.controller.submit(&req.text) {
        return error_response(
            StatusCode::CONFLICT,
            "submission rejected: message is blank or a turn is already in flight",
        );
    }
    (StatusCode::ACCEPTED, Json(handle.view())).into_response()
}

/// DELETE /v1/sessions/:id – closes the session; an in-flight answer is discarded.
pub(crate) async fn delete_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.sessions.remove(&id) {
        Some((_, handle)) => {
            handle.controller.close();
            tracing::info!(target: "guidebot::session", session = %id, "Session deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found(id),
    }
}
