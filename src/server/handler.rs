use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::quiz_engine::{QuizQuestion, QuizSession, QuizSettings, SessionError};

/// Sessions kept in memory before the oldest is evicted.
pub const MAX_SESSIONS: usize = 1000;

// ---------------------------------------------------------------------------
// Shared state: in-memory sessions keyed by session_id
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, QuizSession>,
    order: VecDeque<String>,
}

impl SessionStore {
    /// Insert, evicting the oldest session once the cap is reached.
    pub fn insert(&mut self, id: String, session: QuizSession) {
        while self.sessions.len() >= MAX_SESSIONS {
            let Some(oldest) = self.order.pop_front() else { break };
            if self.sessions.remove(&oldest).is_some() {
                warn!(session_id = %oldest, "session store full, evicted oldest session");
            }
        }
        self.order.push_back(id.clone());
        self.sessions.insert(id, session);
    }

    pub fn get(&self, id: &str) -> Option<&QuizSession> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut QuizSession> {
        self.sessions.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

pub type SessionCache = Arc<Mutex<SessionStore>>;

pub fn new_cache() -> SessionCache {
    Arc::new(Mutex::new(SessionStore::default()))
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

fn lock(cache: &SessionCache) -> Result<MutexGuard<'_, SessionStore>, ApiError> {
    cache
        .lock()
        .map_err(|_| api_error(StatusCode::INTERNAL_SERVER_ERROR, "session store unavailable"))
}

// ---------------------------------------------------------------------------
// Body types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub settings: QuizSettings,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub session_id: String,
    pub selected: u64,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub session_id: String,
    pub question_count: usize,
    pub question: Value,
}

/// Question as the page sees it: no correctness flags, no result.
pub fn public_question(question: &QuizQuestion, index: usize, total: usize) -> Value {
    let choices: Vec<Value> = question
        .choices
        .iter()
        .map(|c| json!({ "id": c.id, "value": c.value }))
        .collect();

    json!({
        "question_id": question.question_id,
        "index":       index,
        "total":       total,
        "operator":    question.equation.operator,
        "numbers":     question.equation.numbers,
        "display":     question.display,
        "choices":     choices,
    })
}

fn current_view(session: &QuizSession) -> Option<Value> {
    session
        .current_question()
        .map(|q| public_question(q, session.position(), session.questions().len()))
}

fn new_session_id() -> String {
    format!("QZ-{:016X}", rand::random::<u64>())
}

// ---------------------------------------------------------------------------
// POST /api/session   body: { settings, seed? }
// ---------------------------------------------------------------------------

pub async fn create_session(
    State(cache): State<SessionCache>,
    Json(body): Json<StartRequest>,
) -> Result<Json<StartResponse>, ApiError> {
    let session = QuizSession::start(body.settings, body.seed)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    let question = current_view(&session)
        .ok_or_else(|| api_error(StatusCode::INTERNAL_SERVER_ERROR, "session has no questions"))?;
    let response = StartResponse {
        session_id: new_session_id(),
        question_count: session.questions().len(),
        question,
    };

    lock(&cache)?.insert(response.session_id.clone(), session);
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// GET /api/session/{id}/question
// ---------------------------------------------------------------------------

pub async fn current_question(
    State(cache): State<SessionCache>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let store = lock(&cache)?;
    let session = store
        .get(&session_id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Session not found or expired"))?;

    current_view(session)
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::CONFLICT, "Session already finished"))
}

// ---------------------------------------------------------------------------
// POST /api/session/answer   body: { session_id, selected }
// ---------------------------------------------------------------------------

pub async fn submit_answer(
    State(cache): State<SessionCache>,
    Json(body): Json<AnswerRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut store = lock(&cache)?;
    let session = store
        .get_mut(&body.session_id)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Session not found or expired"))?;

    let feedback = session.answer(body.selected).map_err(|e| match e {
        SessionError::Finished(_) => api_error(StatusCode::CONFLICT, e.to_string()),
    })?;

    let next_question = current_view(session);
    let summary = if feedback.finished { Some(session.summary()) } else { None };

    Ok(Json(json!({
        "correct":        feedback.correct,
        "correct_answer": feedback.correct_answer,
        "finished":       feedback.finished,
        "next_question":  next_question,
        "summary":        summary,
    })))
}
