use axum::{routing::{get, post}, Router};

use super::assets::{app_js, index, style_css};
use super::handler::{create_session, current_question, submit_answer, SessionCache};

pub fn router(cache: SessionCache) -> Router {
    Router::new()
        .route("/",                            get(index))
        .route("/app.js",                      get(app_js))
        .route("/style.css",                   get(style_css))
        .route("/api/session",                 post(create_session))
        .route("/api/session/{id}/question",   get(current_question))
        .route("/api/session/answer",          post(submit_answer))
        .with_state(cache)
}
