//! Error types surfaced by the engine.
//!
//! Generation itself never fails: every branch has a terminating fallback.
//! What can fail is building a configuration (rejected before generation)
//! and driving a session past its last question.

use thiserror::Error;

/// A configuration the generator refuses to accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown digit level '{0}' (expected one of 1, 2, 3, 4)")]
    UnknownDigitLevel(String),

    #[error("unknown operator '{0}' (expected one of + - * /)")]
    UnknownOperator(String),

    #[error("operand count {got} is outside {min}..={max}")]
    ParamCountOutOfRange { got: usize, min: usize, max: usize },

    /// Division is always `dividend / divisor`.
    #[error("division takes exactly 2 operands, got {0}")]
    DivisionArity(usize),

    #[error("select at least one operator")]
    NoOperators,

    #[error("question count {got} is outside 1..={max}")]
    QuestionCountOutOfRange { got: usize, max: usize },

    #[error("equation '{0}' does not evaluate to its stated result")]
    InconsistentEquation(String),
}

/// Misuse of a running quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("all {0} questions have already been answered")]
    Finished(usize),
}
