//! Conversation session: ordered message log plus a small turn state machine.
//!
//! One user turn at a time. `submit` appends the user message synchronously and
//! hands the text to a [`Responder`] on a spawned task; the answer (or a failure
//! notice) is recorded when it resolves. A turn still in flight when the session is
//! closed or dropped is discarded.

use crate::error::SubmissionError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::watch;
use uuid::Uuid;

/// Id of the optional greeting message.
pub const GREETING_ID: &str = "welcome";

const FAILURE_TITLE: &str = "Error";
const FAILURE_DESCRIPTION: &str = "Failed to get response from the assistant. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        })
    }
}

/// One entry of the session log. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn numbered(seq: u64, sender: Sender, content: String) -> Self {
        Self {
            id: format!("msg-{:06}-{}", seq, sender),
            content,
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// User-visible failure record (one per rejected turn).
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub detail: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    Idle,
    Submitting,
    /// Transient; acknowledged straight back to `Idle` after the notice is recorded.
    Errored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    Submit,
    Resolve,
    Reject,
    Acknowledge,
}

impl TurnState {
    /// Next state for `event`, or `None` when the event is not allowed here.
    pub fn on(self, event: TurnEvent) -> Option<TurnState> {
        match (self, event) {
            (TurnState::Idle, TurnEvent::Submit) => Some(TurnState::Submitting),
            (TurnState::Submitting, TurnEvent::Resolve) => Some(TurnState::Idle),
            (TurnState::Submitting, TurnEvent::Reject) => Some(TurnState::Errored),
            (TurnState::Errored, TurnEvent::Acknowledge) => Some(TurnState::Idle),
            _ => None,
        }
    }
}

/// Produces the assistant reply for one user turn.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<String, SubmissionError>;
}

/// Construction options for [`SessionController::with_options`].
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Assistant message placed at the top of the log; not a turn.
    pub greeting: Option<String>,
    /// External message submitted once, the first time the session is observed.
    pub initial_message: Option<String>,
}

/// Point-in-time copy of a session, for callers that render it.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub turn_state: TurnState,
    pub messages: Vec<Message>,
    pub notices: Vec<Notice>,
    pub closed: bool,
}

struct SessionState {
    messages: Vec<Message>,
    notices: Vec<Notice>,
    turn: TurnState,
    next_seq: u64,
    pending_initial: Option<String>,
    initial_consumed: bool,
    closed: bool,
}

impl SessionState {
    fn append(&mut self, sender: Sender, content: String) {
        self.next_seq += 1;
        self.messages
            .push(Message::numbered(self.next_seq, sender, content));
    }
}

struct Inner {
    id: Uuid,
    responder: Arc<dyn Responder>,
    state: Mutex<SessionState>,
    turn_tx: watch::Sender<TurnState>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_turn(&self, state: &mut SessionState, next: TurnState) {
        state.turn = next;
        self.turn_tx.send_replace(next);
    }

    /// Applies the Submit transition. Returns the trimmed text to dispatch, or
    /// `None` when the submission is rejected (nothing changes).
    fn begin_turn(&self, state: &mut SessionState, text: &str) -> Option<String> {
        let text = text.trim();
        if state.closed || text.is_empty() {
            return None;
        }
        let Some(next) = state.turn.on(TurnEvent::Submit) else {
            tracing::debug!(
                target: "guidebot::session",
                session = %self.id,
                "Submission ignored; a turn is already in flight"
            );
            return None;
        };
        state.append(Sender::User, text.to_string());
        self.set_turn(state, next);
        Some(text.to_string())
    }

    fn settle(&self, outcome: Result<String, SubmissionError>) {
        let mut state = self.lock();
        if state.closed {
            tracing::debug!(
                target: "guidebot::session",
                session = %self.id,
                "Session closed before the turn resolved; result discarded"
            );
            return;
        }
        match outcome {
            Ok(reply) => {
                if let Some(next) = state.turn.on(TurnEvent::Resolve) {
                    state.append(Sender::Assistant, reply);
                    self.set_turn(&mut state, next);
                }
            }
            Err(err) => {
                let Some(errored) = state.turn.on(TurnEvent::Reject) else {
                    return;
                };
                tracing::warn!(
                    target: "guidebot::session",
                    session = %self.id,
                    error = %err,
                    "Turn failed"
                );
                self.set_turn(&mut state, errored);
                state.notices.push(Notice {
                    title: FAILURE_TITLE.to_string(),
                    description: FAILURE_DESCRIPTION.to_string(),
                    detail: err.to_string(),
                    at: Utc::now(),
                });
                if let Some(idle) = state.turn.on(TurnEvent::Acknowledge) {
                    self.set_turn(&mut state, idle);
                }
            }
        }
    }
}

/// Handle to one conversation. Cheap to clone; clones share the same log.
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Inner>,
}

impl SessionController {
    pub fn new(responder: Arc<dyn Responder>) -> Self {
        Self::with_options(responder, SessionOptions::default())
    }

    pub fn with_options(responder: Arc<dyn Responder>, options: SessionOptions) -> Self {
        let mut messages = Vec::new();
        if let Some(greeting) = options.greeting {
            messages.push(Message {
                id: GREETING_ID.to_string(),
                content: greeting,
                sender: Sender::Assistant,
                timestamp: Utc::now(),
            });
        }
        let pending_initial = options
            .initial_message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        let (turn_tx, _) = watch::channel(TurnState::Idle);
        let id = Uuid::new_v4();
        tracing::debug!(
            target: "guidebot::session",
            session = %id,
            has_initial = pending_initial.is_some(),
            "Session created"
        );
        Self {
            inner: Arc::new(Inner {
                id,
                responder,
                state: Mutex::new(SessionState {
                    messages,
                    notices: Vec::new(),
                    turn: TurnState::Idle,
                    next_seq: 0,
                    pending_initial,
                    initial_consumed: false,
                    closed: false,
                }),
                turn_tx,
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Submits one user turn. Returns false (and changes nothing) for blank text,
    /// a closed session, or while another turn is in flight.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, text: &str) -> bool {
        let accepted = {
            let mut state = self.inner.lock();
            self.inner.begin_turn(&mut state, text)
        };
        match accepted {
            Some(text) => {
                self.dispatch(text);
                true
            }
            None => false,
        }
    }

    /// Submits the pending initial message if it has not been consumed yet.
    ///
    /// The message stays pending while another turn is in flight; once submitted,
    /// further calls do nothing.
    pub fn observe(&self) -> bool {
        let accepted = {
            let mut state = self.inner.lock();
            if state.initial_consumed || state.closed || state.turn != TurnState::Idle {
                return false;
            }
            let Some(pending) = state.pending_initial.take() else {
                return false;
            };
            state.initial_consumed = true;
            self.inner.begin_turn(&mut state, &pending)
        };
        match accepted {
            Some(text) => {
                tracing::debug!(
                    target: "guidebot::session",
                    session = %self.inner.id,
                    "Initial message submitted"
                );
                self.dispatch(text);
                true
            }
            None => false,
        }
    }

    /// Offers an external initial message and observes the session. Ignored once an
    /// initial message has been consumed, including for the same text.
    pub fn offer_initial_message(&self, text: &str) -> bool {
        {
            let mut state = self.inner.lock();
            let text = text.trim();
            if state.initial_consumed || text.is_empty() {
                return false;
            }
            if state.pending_initial.is_none() {
                state.pending_initial = Some(text.to_string());
            }
        }
        self.observe()
    }

    /// Tears the session down. A turn still in flight is abandoned and its result
    /// discarded when it resolves.
    pub fn close(&self) {
        let mut state = self.inner.lock();
        if !state.closed {
            state.closed = true;
            self.inner.set_turn(&mut state, TurnState::Idle);
            tracing::debug!(target: "guidebot::session", session = %self.inner.id, "Session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    pub fn messages(&self) -> Vec<Message> {
        self.inner.lock().messages.clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.inner.lock().notices.clone()
    }

    pub fn turn_state(&self) -> TurnState {
        self.inner.lock().turn
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.lock();
        SessionSnapshot {
            id: self.inner.id,
            turn_state: state.turn,
            messages: state.messages.clone(),
            notices: state.notices.clone(),
            closed: state.closed,
        }
    }

    /// Waits until no turn is in flight.
    pub async fn wait_idle(&self) {
        let mut rx = self.inner.turn_tx.subscribe();
        // The sender lives in `inner`, which `self` keeps alive.
        let _ = rx.wait_for(|state| *state == TurnState::Idle).await;
    }

    fn dispatch(&self, text: String) {
        let responder = Arc::clone(&self.inner.responder);
        let session: Weak<Inner> = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            let outcome = responder.send_message(&text).await;
            match session.upgrade() {
                Some(inner) => inner.settle(outcome),
                None => tracing::debug!(
                    target: "guidebot::session",
                    "Session dropped before the turn resolved; result discarded"
                ),
            }
        });
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("id", &self.inner.id)
            .finish_non_exhaustive()
    }
}
