//! HTTP surface: the static page plus a small JSON API that drives a
//! [`QuizSession`](crate::quiz_engine::QuizSession) per player.
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /`, `/app.js`, `/style.css` | embedded page assets |
//! | `POST /api/session` | start a session, returns the first question |
//! | `GET /api/session/{id}/question` | current question |
//! | `POST /api/session/answer` | answer, returns feedback and the next question or the summary |

pub mod assets;
pub mod handler;
pub mod routes;

pub use handler::{new_cache, SessionCache};
pub use routes::router;
