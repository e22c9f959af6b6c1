//! Core quiz engine — equation generation, distractors, and session flow.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `models`      | Shared types: digit levels, operators, configs, equations, questions |
//! | `random`      | Injectable `RandomSource`, scripted source for tests, Fisher-Yates shuffle |
//! | `equation`    | Per-operator equation construction with bounded fallback tiers |
//! | `distractors` | Three plausible wrong answers per question |
//! | `format`      | Horizontal / stacked rendering of an equation |
//! | `generator`   | Single entry point `generate_question()` — equation + shuffled choices |
//! | `session`     | Quiz session: settings validation, dedup, answers, scoring |
//! | `error`       | Configuration and session errors |

pub mod distractors;
pub mod equation;
pub mod error;
pub mod format;
pub mod generator;
pub mod models;
pub mod random;
pub mod session;

// Re-export the public API surface so callers can use
// `quiz_engine::generate_question` without reaching into sub-modules.
pub use distractors::generate_distractors;
pub use equation::generate_equation;
pub use error::{ConfigError, SessionError};
pub use generator::generate_question;
pub use models::{
    AnswerOption, AnswerRecord, DigitLevel, DisplayFormat, Equation, EquationDisplay,
    GenerationConfig, Operator, QuestionRequest, QuizQuestion,
};
pub use random::{RandomSource, ScriptedSource};
pub use session::{AnswerFeedback, QuizSession, QuizSettings, QuizSummary};
