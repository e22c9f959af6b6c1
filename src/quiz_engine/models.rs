use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::quiz_engine::error::ConfigError;

/// Smallest operand count any operator accepts.
pub const MIN_PARAM_COUNT: usize = 2;
/// Largest operand count any operator accepts.
pub const MAX_PARAM_COUNT: usize = 6;

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Numeric magnitude tier. Serialized as `"1"`..`"4"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DigitLevel {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl DigitLevel {
    pub const ALL: [DigitLevel; 4] = [
        DigitLevel::Small,
        DigitLevel::Medium,
        DigitLevel::Large,
        DigitLevel::ExtraLarge,
    ];

    /// Wire identifier used by the page and the API.
    pub fn id(self) -> &'static str {
        match self {
            DigitLevel::Small      => "1",
            DigitLevel::Medium     => "2",
            DigitLevel::Large      => "3",
            DigitLevel::ExtraLarge => "4",
        }
    }

    /// Number of decimal digits an operand at this level has.
    pub fn digits(self) -> u32 {
        match self {
            DigitLevel::Small      => 1,
            DigitLevel::Medium     => 2,
            DigitLevel::Large      => 3,
            DigitLevel::ExtraLarge => 4,
        }
    }

    /// Smallest operand drawn at this level (1, 10, 100, 1000).
    pub fn operand_min(self) -> u64 {
        match self {
            DigitLevel::Small => 1,
            other => 10u64.pow(other.digits() - 1),
        }
    }

    /// Largest operand drawn at this level (9, 99, 999, 9999).
    pub fn operand_max(self) -> u64 {
        self.max_value()
    }

    /// Largest number representable with this level's digit count.
    /// Addition and multiplication results never exceed it.
    pub fn max_value(self) -> u64 {
        10u64.pow(self.digits()) - 1
    }
}

impl fmt::Display for DigitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigitLevel::Small      => write!(f, "1 digit"),
            DigitLevel::Medium     => write!(f, "2 digits"),
            DigitLevel::Large      => write!(f, "3 digits"),
            DigitLevel::ExtraLarge => write!(f, "4 digits"),
        }
    }
}

impl FromStr for DigitLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DigitLevel::ALL
            .into_iter()
            .find(|level| level.id() == s)
            .ok_or_else(|| ConfigError::UnknownDigitLevel(s.to_string()))
    }
}

impl TryFrom<String> for DigitLevel {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DigitLevel> for String {
    fn from(level: DigitLevel) -> Self {
        level.id().to_string()
    }
}

// ---------------------------------------------------------------------------
// Operator
// ---------------------------------------------------------------------------

/// One of the four arithmetic operators. Serialized as `"+" "-" "*" "/"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// ASCII symbol used on the wire.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add      => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide   => "/",
        }
    }

    /// Symbol shown to players.
    pub fn display_symbol(self) -> &'static str {
        match self {
            Operator::Add      => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide   => "÷",
        }
    }

    /// Left-to-right reduction of `numbers`. `None` on overflow, underflow,
    /// division by zero or an inexact quotient.
    pub fn fold(self, numbers: &[u64]) -> Option<u64> {
        let (&first, rest) = numbers.split_first()?;
        rest.iter().try_fold(first, |acc, &n| match self {
            Operator::Add      => acc.checked_add(n),
            Operator::Subtract => acc.checked_sub(n),
            Operator::Multiply => acc.checked_mul(n),
            Operator::Divide   => {
                if n == 0 || acc % n != 0 {
                    None
                } else {
                    Some(acc / n)
                }
            }
        })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operator::Add      => "Addition",
            Operator::Subtract => "Subtraction",
            Operator::Multiply => "Multiplication",
            Operator::Divide   => "Division",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Operator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+"        => Ok(Operator::Add),
            "-"        => Ok(Operator::Subtract),
            "*" | "×"  => Ok(Operator::Multiply),
            "/" | "÷"  => Ok(Operator::Divide),
            _ => Err(ConfigError::UnknownOperator(s.to_string())),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.symbol().to_string()
    }
}

/// How the page lays an equation out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    #[default]
    Horizontal,
    Vertical,
    Both,
}

// ---------------------------------------------------------------------------
// Generation input / output
// ---------------------------------------------------------------------------

/// Validated input to the equation generator.
///
/// Fields are private so the only way to obtain one is through
/// [`GenerationConfig::new`] (or deserialization, which runs the same checks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGenerationConfig")]
pub struct GenerationConfig {
    digit_level: DigitLevel,
    param_count: usize,
    operator: Operator,
}

#[derive(Deserialize)]
struct RawGenerationConfig {
    digit_level: DigitLevel,
    param_count: usize,
    operator: Operator,
}

impl TryFrom<RawGenerationConfig> for GenerationConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGenerationConfig) -> Result<Self, Self::Error> {
        GenerationConfig::new(raw.digit_level, raw.param_count, raw.operator)
    }
}

impl GenerationConfig {
    /// Reject operand counts outside `2..=6` and division with anything
    /// other than two operands.
    pub fn new(
        digit_level: DigitLevel,
        param_count: usize,
        operator: Operator,
    ) -> Result<Self, ConfigError> {
        if !(MIN_PARAM_COUNT..=MAX_PARAM_COUNT).contains(&param_count) {
            return Err(ConfigError::ParamCountOutOfRange {
                got: param_count,
                min: MIN_PARAM_COUNT,
                max: MAX_PARAM_COUNT,
            });
        }
        if operator == Operator::Divide && param_count != 2 {
            return Err(ConfigError::DivisionArity(param_count));
        }
        Ok(GenerationConfig { digit_level, param_count, operator })
    }

    pub fn digit_level(&self) -> DigitLevel {
        self.digit_level
    }

    pub fn param_count(&self) -> usize {
        self.param_count
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }
}

/// A generated equation. `result == operator.fold(numbers)` always holds;
/// deserialization rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEquation")]
pub struct Equation {
    pub numbers: Vec<u64>,
    pub operator: Operator,
    pub result: u64,
}

#[derive(Deserialize)]
struct RawEquation {
    numbers: Vec<u64>,
    operator: Operator,
    result: u64,
}

impl TryFrom<RawEquation> for Equation {
    type Error = ConfigError;

    fn try_from(raw: RawEquation) -> Result<Self, Self::Error> {
        let eq = Equation { numbers: raw.numbers, operator: raw.operator, result: raw.result };
        if eq.numbers.len() < MIN_PARAM_COUNT || eq.operator.fold(&eq.numbers) != Some(eq.result) {
            return Err(ConfigError::InconsistentEquation(eq.dedup_key()));
        }
        Ok(eq)
    }
}

impl Equation {
    /// Session dedup key, e.g. `"28,4/"`.
    pub fn dedup_key(&self) -> String {
        let joined = self.numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(",");
        format!("{}{}", joined, self.operator.symbol())
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = format!(" {} ", self.operator.display_symbol());
        let lhs = self.numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(&sep);
        write!(f, "{} = {}", lhs, self.result)
    }
}

// ---------------------------------------------------------------------------
// Question request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub config: GenerationConfig,
    #[serde(default)]
    pub display_format: DisplayFormat,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl QuestionRequest {
    /// Horizontal layout, entropy seed.
    pub fn new(config: GenerationConfig) -> Self {
        QuestionRequest { config, display_format: DisplayFormat::default(), rng_seed: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub value: u64,
    pub is_correct: bool,
    pub explanation: String,
}

/// Rendered equation, ready for the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationDisplay {
    /// Layout actually used; `Both` may collapse to `Horizontal`.
    pub format: DisplayFormat,
    /// Single-line form, e.g. `"28 ÷ 4 ="`.
    pub horizontal: String,
    /// Right-aligned stacked lines; empty when only horizontal applies.
    pub stacked: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question_id: String,
    pub equation: Equation,
    pub display: EquationDisplay,
    /// Exactly four options, shuffled, one correct.
    pub choices: Vec<AnswerOption>,
}

/// One submitted answer, kept for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub selected: u64,
    pub correct: bool,
}
