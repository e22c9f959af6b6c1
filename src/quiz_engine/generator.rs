use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::quiz_engine::{
    distractors::generate_distractors,
    equation::generate_equation,
    format::render,
    models::{
        AnswerOption, DisplayFormat, Equation, GenerationConfig, Operator, QuestionRequest,
        QuizQuestion,
    },
    random::{shuffle, RandomSource},
};

const CHOICE_IDS: [&str; 4] = ["A", "B", "C", "D"];

/// Generate a question ID from operator + RNG, e.g. `DIV-1A2B3C4D`.
pub fn make_question_id(op: Operator, rng: &mut impl RngCore) -> String {
    let prefix = match op {
        Operator::Add      => "ADD",
        Operator::Subtract => "SUB",
        Operator::Multiply => "MUL",
        Operator::Divide   => "DIV",
    };
    format!("{}-{:08X}", prefix, rng.next_u32())
}

/// Shuffle the correct answer in among its distractors and label A-D.
pub fn choice_set<S: RandomSource + ?Sized>(eq: &Equation, rng: &mut S) -> Vec<AnswerOption> {
    let distractors = generate_distractors(eq.result, eq.operator, rng);
    let mut values = vec![distractors[0], distractors[1], distractors[2], eq.result];
    shuffle(rng, &mut values);

    values
        .into_iter()
        .zip(CHOICE_IDS)
        .map(|(value, id)| {
            let is_correct = value == eq.result;
            let explanation = if is_correct {
                format!("Correct: {eq}.")
            } else {
                format!("Not quite: {eq}, not {value}.")
            };
            AnswerOption { id: id.to_string(), value, is_correct, explanation }
        })
        .collect()
}

/// Build a full question from an already-seeded RNG. The session uses this
/// directly so that one RNG drives the whole quiz.
pub fn build_question<R: RngCore>(
    config: &GenerationConfig,
    display_format: DisplayFormat,
    rng: &mut R,
) -> QuizQuestion {
    let question_id = make_question_id(config.operator(), rng);
    let equation = generate_equation(config, rng);
    let choices = choice_set(&equation, rng);
    let display = render(&equation, display_format);

    QuizQuestion { question_id, equation, display, choices }
}

/// Single entry point: seeds an RNG and builds one question.
pub fn generate_question(request: QuestionRequest) -> QuizQuestion {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    build_question(&request.config, request.display_format, &mut rng)
}
