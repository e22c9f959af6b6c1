//! # equationator
//!
//! An arithmetic quiz: a static page, a small JSON API, and the engine that
//! makes the questions.
//!
//! The engine turns a difficulty configuration into a solvable equation with
//! exactly one integer answer, plus three plausible wrong answers. Every
//! construction is bounded: subtraction never crosses zero, division always
//! divides evenly, sums and products stay inside the digit level, and
//! distractor search falls back to fixed offsets instead of spinning.
//!
//! ## How it works
//!
//! 1. Build a [`GenerationConfig`] (digit level, operand count, operator).
//!    Invalid combinations, such as division with three operands, are
//!    rejected here.
//! 2. Call [`generate_question`] — the engine builds the equation, asks the
//!    distractor generator for three wrong answers, shuffles all four and
//!    labels them A–D.
//! 3. Or run a whole quiz through [`QuizSession`], which also deduplicates
//!    equations and keeps score.
//!
//! Randomness is injected: the lower-level [`generate_equation`] and
//! [`generate_distractors`] take any [`RandomSource`], which every
//! `rand::Rng` implements and [`ScriptedSource`] replays from a fixed list.
//!
//! ## Quick start
//!
//! ```rust
//! use equationator::{
//!     generate_question, DigitLevel, GenerationConfig, Operator, QuestionRequest,
//! };
//!
//! let config = GenerationConfig::new(DigitLevel::Medium, 2, Operator::Divide).unwrap();
//! let question = generate_question(QuestionRequest {
//!     config,
//!     display_format: Default::default(),
//!     rng_seed: Some(42),
//! });
//!
//! println!("{}", question.display.horizontal);
//! for choice in &question.choices {
//!     let mark = if choice.is_correct { "+" } else { " " };
//!     println!("[{mark}] {} {}", choice.id, choice.value);
//! }
//! assert_eq!(question.equation.numbers[0] % question.equation.numbers[1], 0);
//! ```

pub mod config;
pub mod quiz_engine;
pub mod server;

// Convenience re-exports so callers can use `equationator::generate_question`
// directly without reaching into `quiz_engine::`.
pub use quiz_engine::{
    generate_distractors, generate_equation, generate_question, AnswerFeedback, AnswerOption,
    AnswerRecord, ConfigError, DigitLevel, DisplayFormat, Equation, EquationDisplay,
    GenerationConfig, Operator, QuestionRequest, QuizQuestion, QuizSession, QuizSettings,
    QuizSummary, RandomSource, ScriptedSource, SessionError,
};
