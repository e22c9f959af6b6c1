//! End-to-end walkthrough of the engine.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. One seeded question per operator, printed the way the page shows it.
//! 2. The scripted 28 ÷ 4 example, showing how a `ScriptedSource` pins
//!    every random pick.
//! 3. A short quiz session answered half right, then its summary.

use equationator::{
    generate_equation, generate_question, DigitLevel, DisplayFormat, GenerationConfig, Operator,
    QuestionRequest, QuizSession, QuizSettings, ScriptedSource,
};

fn print_question(op: Operator, count: usize, seed: u64) {
    let config = match GenerationConfig::new(DigitLevel::Medium, count, op) {
        Ok(c) => c,
        Err(e) => {
            println!("  skipped: {e}");
            return;
        }
    };
    let q = generate_question(QuestionRequest {
        config,
        display_format: DisplayFormat::Both,
        rng_seed: Some(seed),
    });

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  [{}]  ID: {}", op, q.question_id);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {}", q.display.horizontal);
    for line in &q.display.stacked {
        println!("      {line}");
    }
    for c in &q.choices {
        let marker = if c.is_correct { "✓" } else { " " };
        println!("  [{}] {marker} {:>5}   {}", c.id, c.value, c.explanation);
    }
    println!();
}

fn main() {
    for op in Operator::ALL {
        let count = if op == Operator::Divide { 2 } else { 3 };
        print_question(op, count, 42);
    }

    println!("══ Scripted source ══");
    let mut src = ScriptedSource::new(vec![4, 7]);
    let config = GenerationConfig::new(DigitLevel::Medium, 2, Operator::Divide)
        .expect("division with two operands is valid");
    let eq = generate_equation(&config, &mut src);
    println!("  picks [4, 7] -> {eq}");
    println!();

    println!("══ Session ══");
    let settings = QuizSettings {
        digit_level: DigitLevel::Medium,
        param_count: 2,
        operators: Operator::ALL.to_vec(),
        question_count: 4,
        display_format: DisplayFormat::Horizontal,
    };
    let mut session = QuizSession::start(settings, Some(7)).expect("settings are valid");
    let mut i = 0;
    while let Some(q) = session.current_question() {
        let pick = if i % 2 == 0 {
            q.equation.result
        } else {
            q.choices.iter().find(|c| !c.is_correct).map_or(0, |c| c.value)
        };
        let text = q.display.horizontal.clone();
        let fb = session.answer(pick).expect("session still running");
        println!("  {text} {pick}  {}", if fb.correct { "✔" } else { "✘" });
        i += 1;
    }
    let summary = session.summary();
    println!("  Score: {}/{} ({}%)", summary.correct, summary.total, summary.percentage);
}
