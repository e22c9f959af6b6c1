//! Quiz session: settings in, a fixed list of questions out, answers back in,
//! score at the end.
//!
//! All questions are generated up front from one seeded RNG, so a session is
//! reproducible from `(settings, seed)`. A per-session history of
//! `numbers+operator` keys discourages repeats without ever stalling.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::{rngs::StdRng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::quiz_engine::{
    error::{ConfigError, SessionError},
    generator::build_question,
    models::{
        AnswerRecord, DigitLevel, DisplayFormat, GenerationConfig, Operator, QuizQuestion,
    },
    random::pick_index,
};

/// Regenerations tried for a repeated equation before accepting it.
pub const MAX_REGENERATIONS: usize = 5;
/// Upper bound on questions per session.
pub const MAX_QUESTION_COUNT: usize = 100;

/// What the player picked on the start page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    pub digit_level: DigitLevel,
    /// Operand count for `+ - *`; division always uses two.
    pub param_count: usize,
    pub operators: Vec<Operator>,
    pub question_count: usize,
    #[serde(default)]
    pub display_format: DisplayFormat,
}

impl Default for QuizSettings {
    fn default() -> Self {
        QuizSettings {
            digit_level: DigitLevel::Small,
            param_count: 2,
            operators: vec![Operator::Add],
            question_count: 10,
            display_format: DisplayFormat::default(),
        }
    }
}

impl QuizSettings {
    /// Generation config for one operator under these settings.
    pub fn config_for(&self, operator: Operator) -> Result<GenerationConfig, ConfigError> {
        let count = if operator == Operator::Divide { 2 } else { self.param_count };
        GenerationConfig::new(self.digit_level, count, operator)
    }

    /// Fail fast before any generation happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.operators.is_empty() {
            return Err(ConfigError::NoOperators);
        }
        if !(1..=MAX_QUESTION_COUNT).contains(&self.question_count) {
            return Err(ConfigError::QuestionCountOutOfRange {
                got: self.question_count,
                max: MAX_QUESTION_COUNT,
            });
        }
        for &op in &self.operators {
            self.config_for(op)?;
        }
        Ok(())
    }
}

/// Seen `numbers+operator` keys within one session.
#[derive(Debug, Default)]
pub struct DedupHistory {
    seen: HashSet<String>,
}

impl DedupHistory {
    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    pub fn insert(&mut self, key: String) {
        self.seen.insert(key);
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Generate a question whose equation has not been seen yet, regenerating up
/// to [`MAX_REGENERATIONS`] times. After that the history is cleared and the
/// repeat is accepted.
pub fn fresh_question<R: RngCore>(
    config: &GenerationConfig,
    display_format: DisplayFormat,
    history: &mut DedupHistory,
    rng: &mut R,
) -> QuizQuestion {
    let mut question = build_question(config, display_format, rng);
    for _ in 0..MAX_REGENERATIONS {
        if !history.contains(&question.equation.dedup_key()) {
            history.insert(question.equation.dedup_key());
            return question;
        }
        question = build_question(config, display_format, rng);
    }

    let key = question.equation.dedup_key();
    if history.contains(&key) {
        debug!(key = %key, seen = history.len(), "dedup ceiling reached, clearing history");
        history.clear();
    }
    history.insert(key);
    question
}

/// Result of answering the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_answer: u64,
    /// True once the last question has been answered.
    pub finished: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionReview {
    pub equation: String,
    pub selected: u64,
    pub correct_answer: u64,
    pub correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub correct: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent.
    pub percentage: u32,
    pub elapsed_secs: u64,
    pub review: Vec<QuestionReview>,
}

/// A running quiz.
#[derive(Debug)]
pub struct QuizSession {
    settings: QuizSettings,
    questions: Vec<QuizQuestion>,
    answers: Vec<AnswerRecord>,
    started_at: Instant,
}

impl QuizSession {
    /// Validate settings and pre-generate every question.
    pub fn start(settings: QuizSettings, rng_seed: Option<u64>) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut rng: StdRng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };

        let mut history = DedupHistory::default();
        let mut questions = Vec::with_capacity(settings.question_count);
        for _ in 0..settings.question_count {
            let op = settings.operators[pick_index(&mut rng, settings.operators.len())];
            let config = settings.config_for(op)?;
            questions.push(fresh_question(&config, settings.display_format, &mut history, &mut rng));
        }

        info!(
            level = settings.digit_level.id(),
            param_count = settings.param_count,
            questions = questions.len(),
            "quiz session started"
        );

        Ok(QuizSession {
            settings,
            questions,
            answers: Vec::new(),
            started_at: Instant::now(),
        })
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Zero-based index of the question awaiting an answer.
    pub fn position(&self) -> usize {
        self.answers.len()
    }

    pub fn is_finished(&self) -> bool {
        self.answers.len() >= self.questions.len()
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.answers.len())
    }

    /// Record `selected` against the current question and advance.
    pub fn answer(&mut self, selected: u64) -> Result<AnswerFeedback, SessionError> {
        let question = self
            .current_question()
            .ok_or(SessionError::Finished(self.questions.len()))?;
        let correct_answer = question.equation.result;
        let correct = selected == correct_answer;

        self.answers.push(AnswerRecord { selected, correct });
        let finished = self.is_finished();
        if finished {
            info!(
                correct = self.correct_count(),
                total = self.questions.len(),
                "quiz session finished"
            );
        }

        Ok(AnswerFeedback { correct, correct_answer, finished })
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.correct).count()
    }

    /// Score so far, timed against `now`.
    pub fn summary_at(&self, now: Instant) -> QuizSummary {
        let total = self.questions.len();
        let correct = self.correct_count();
        let percentage = if total == 0 {
            0
        } else {
            ((correct as f64 / total as f64) * 100.0).round() as u32
        };
        let elapsed = now.saturating_duration_since(self.started_at);

        let review = self
            .answers
            .iter()
            .zip(&self.questions)
            .map(|(answer, question)| QuestionReview {
                equation: question.display.horizontal.clone(),
                selected: answer.selected,
                correct_answer: question.equation.result,
                correct: answer.correct,
            })
            .collect();

        QuizSummary {
            correct,
            total,
            percentage,
            elapsed_secs: round_secs(elapsed),
            review,
        }
    }

    pub fn summary(&self) -> QuizSummary {
        self.summary_at(Instant::now())
    }
}

fn round_secs(d: Duration) -> u64 {
    (d.as_millis() as u64 + 500) / 1000
}
