//! Plausible wrong answers.
//!
//! Candidates come from a rotation of strategies sized by an operator-tuned
//! variance. If the rotation has not produced three distinct values within
//! [`MAX_STRATEGY_ATTEMPTS`], deterministic offsets finish the set.

use tracing::debug;

use crate::quiz_engine::{
    models::Operator,
    random::{pick_index, RandomSource},
};

/// Wrong answers per question.
pub const DISTRACTOR_COUNT: usize = 3;
/// Randomized attempts before the deterministic offsets take over.
pub const MAX_STRATEGY_ATTEMPTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Anywhere in `correct ± variance`.
    Symmetric,
    /// Exactly `correct + variance` or `correct - variance`.
    Boundary,
    /// A one-factor slip: `a*(b±1)` for products, `q±1` for quotients.
    FactorSlip,
}

fn strategies(op: Operator) -> &'static [Strategy] {
    match op {
        Operator::Add | Operator::Subtract => &[Strategy::Symmetric, Strategy::Boundary],
        Operator::Multiply | Operator::Divide => {
            &[Strategy::Symmetric, Strategy::Boundary, Strategy::FactorSlip]
        }
    }
}

/// How far from the correct answer a "close" mistake may land.
pub fn variance(correct: u64, op: Operator) -> u64 {
    match op {
        Operator::Add | Operator::Subtract => (correct / 10).max(2),
        Operator::Multiply                 => (correct / 5).max(2),
        Operator::Divide                   => (correct / 10).clamp(2, 5),
    }
}

/// Small factors of `correct` in `2..=12`, the likely "other operand" of a product.
fn small_factors(correct: u64) -> Vec<u64> {
    (2..=12u64).filter(|f| correct % f == 0).collect()
}

/// `correct + delta` or `correct - delta` depending on `up`; `None` below 1.
fn shifted(correct: u64, delta: u64, up: bool) -> Option<u64> {
    if up {
        correct.checked_add(delta)
    } else {
        correct.checked_sub(delta).filter(|&v| v > 0)
    }
}

fn candidate<S: RandomSource + ?Sized>(
    rng: &mut S,
    strategy: Strategy,
    correct: u64,
    op: Operator,
    variance: u64,
) -> Option<u64> {
    match strategy {
        Strategy::Symmetric => {
            let offset = rng.int_in(0, 2 * variance);
            correct
                .checked_add(offset)
                .and_then(|v| v.checked_sub(variance))
                .filter(|&v| v > 0)
        }
        Strategy::Boundary => {
            let up = rng.int_in(0, 1) == 1;
            shifted(correct, variance, up)
        }
        Strategy::FactorSlip => {
            let step = match op {
                Operator::Multiply => {
                    let factors = small_factors(correct);
                    if factors.is_empty() {
                        1
                    } else {
                        factors[pick_index(rng, factors.len())]
                    }
                }
                _ => 1,
            };
            let up = rng.int_in(0, 1) == 1;
            shifted(correct, step, up)
        }
    }
}

/// Exactly three positive values, pairwise distinct and all different from
/// `correct`. Order is insertion order; callers shuffle.
pub fn generate_distractors<S: RandomSource + ?Sized>(
    correct: u64,
    op: Operator,
    rng: &mut S,
) -> [u64; DISTRACTOR_COUNT] {
    let variance = variance(correct, op);
    let rotation = strategies(op);
    let mut picked: Vec<u64> = Vec::with_capacity(DISTRACTOR_COUNT);

    for attempt in 0..MAX_STRATEGY_ATTEMPTS {
        if picked.len() == DISTRACTOR_COUNT {
            break;
        }
        let strategy = rotation[attempt % rotation.len()];
        if let Some(value) = candidate(rng, strategy, correct, op, variance) {
            if value != correct && !picked.contains(&value) {
                picked.push(value);
            }
        }
    }

    if picked.len() < DISTRACTOR_COUNT {
        debug!(correct, ?op, found = picked.len(), "distractor attempts exhausted, using offsets");
        fill_with_offsets(correct, &mut picked);
    }

    [picked[0], picked[1], picked[2]]
}

/// `correct - 1, correct - 2, ...`, reflected to `correct + d` once the
/// subtraction would reach zero.
fn fill_with_offsets(correct: u64, picked: &mut Vec<u64>) {
    let mut delta = 1u64;
    while picked.len() < DISTRACTOR_COUNT {
        let value = correct
            .checked_sub(delta)
            .filter(|&v| v > 0)
            .or_else(|| correct.checked_add(delta));
        if let Some(value) = value {
            if value != correct && !picked.contains(&value) {
                picked.push(value);
            }
        }
        delta += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz_engine::random::ScriptedSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_valid(correct: u64, set: [u64; 3]) {
        for v in set {
            assert!(v > 0, "non-positive distractor in {set:?}");
            assert_ne!(v, correct, "distractor equals answer in {set:?}");
        }
        assert_ne!(set[0], set[1]);
        assert_ne!(set[0], set[2]);
        assert_ne!(set[1], set[2]);
    }

    #[test]
    fn variance_per_operator() {
        assert_eq!(variance(150, Operator::Add), 15);
        assert_eq!(variance(5, Operator::Subtract), 2);
        assert_eq!(variance(150, Operator::Multiply), 30);
        assert_eq!(variance(7, Operator::Divide), 2);
        assert_eq!(variance(35, Operator::Divide), 3);
        assert_eq!(variance(900, Operator::Divide), 5);
    }

    #[test]
    fn division_by_seven_never_zero_negative_or_seven() {
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let set = generate_distractors(7, Operator::Divide, &mut rng);
            assert_valid(7, set);
        }
    }

    #[test]
    fn answer_of_one_still_gets_three_distractors() {
        for op in Operator::ALL {
            for seed in 0..200 {
                let mut rng = StdRng::seed_from_u64(seed);
                assert_valid(1, generate_distractors(1, op, &mut rng));
            }
        }
    }

    #[test]
    fn stuck_source_falls_back_to_offsets() {
        // An exhausted script always returns the lower bound, so every
        // symmetric draw lands on `correct - variance` and every boundary
        // draw goes down: only one distinct value comes out of the rotation.
        let mut src = ScriptedSource::new(Vec::new());
        let set = generate_distractors(50, Operator::Add, &mut src);
        assert_eq!(set, [45, 49, 48]);
    }

    #[test]
    fn offsets_reflect_across_zero() {
        let mut picked = Vec::new();
        fill_with_offsets(2, &mut picked);
        assert_eq!(picked, vec![1, 4, 5]);
    }

    #[test]
    fn answers_near_u64_max_do_not_overflow() {
        for op in Operator::ALL {
            for seed in 0..50 {
                let mut rng = StdRng::seed_from_u64(seed);
                let correct = u64::MAX - 1;
                assert_valid(correct, generate_distractors(correct, op, &mut rng));
            }
        }
        let mut src = ScriptedSource::new(vec![u64::MAX]);
        let v = variance(u64::MAX, Operator::Add);
        assert_eq!(candidate(&mut src, Strategy::Symmetric, u64::MAX, Operator::Add, v), None);

        let mut picked = Vec::new();
        fill_with_offsets(u64::MAX, &mut picked);
        assert_eq!(picked, vec![u64::MAX - 1, u64::MAX - 2, u64::MAX - 3]);
    }

    #[test]
    fn factor_slip_moves_product_by_a_factor() {
        // Factors of 36 in 2..=12 are [2, 3, 4, 6, 9, 12]: index 3 picks 6,
        // direction 1 goes up.
        let mut src = ScriptedSource::new(vec![3, 1]);
        let v = variance(36, Operator::Multiply);
        let value = candidate(&mut src, Strategy::FactorSlip, 36, Operator::Multiply, v);
        assert_eq!(value, Some(42));
    }

    #[test]
    fn quotient_slip_is_off_by_one() {
        let mut src = ScriptedSource::new(vec![0]);
        let value = candidate(&mut src, Strategy::FactorSlip, 7, Operator::Divide, 2);
        assert_eq!(value, Some(6));
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_distractors(84, Operator::Multiply, &mut rng)
        };
        assert_eq!(run(3), run(3));
    }

    #[test]
    fn seeded_sweep_is_always_valid() {
        let mut rng = StdRng::seed_from_u64(11);
        for op in Operator::ALL {
            for correct in 1..=300u64 {
                assert_valid(correct, generate_distractors(correct, op, &mut rng));
            }
        }
    }
}
