//! Equation generator.
//!
//! Each operator has its own construction. Addition and subtraction are
//! correct by construction; multiplication and division degrade through
//! three tiers (normal draw, one smaller retry, fixed fallback). No branch
//! loops more than a constant number of times.

use tracing::debug;

use crate::quiz_engine::{
    models::{DigitLevel, Equation, GenerationConfig, Operator},
    random::RandomSource,
};

/// Every subtrahend needs at least this much headroom per remaining step.
pub const MIN_CHUNK: u64 = 2;
/// Upper bound on subtraction construction attempts before the fixed fallback.
pub const MAX_ATTEMPTS: usize = 8;
/// Tier 3 multiplication factors never exceed this.
pub const FALLBACK_FACTOR_MAX: u64 = 3;
/// Tier 2 division quotients are drawn from `2..=MODERATED_QUOTIENT_MAX`.
pub const MODERATED_QUOTIENT_MAX: u64 = 9;

/// Divisor and quotient ranges for division at each digit level.
///
/// The divisor never exceeds half the level maximum, so the fixed
/// `divisor * 2` fallback always fits.
pub fn division_ranges(level: DigitLevel) -> ((u64, u64), (u64, u64)) {
    match level {
        DigitLevel::Small      => ((2, 4),  (2, 4)),
        DigitLevel::Medium     => ((2, 12), (2, 12)),
        DigitLevel::Large      => ((2, 31), (2, 40)),
        DigitLevel::ExtraLarge => ((2, 99), (2, 120)),
    }
}

/// Generate one equation for `config`. Never fails and always terminates.
pub fn generate_equation<S: RandomSource + ?Sized>(
    config: &GenerationConfig,
    rng: &mut S,
) -> Equation {
    let level = config.digit_level();
    let count = config.param_count();

    let numbers = match config.operator() {
        Operator::Add      => addition_operands(rng, level, count),
        Operator::Subtract => subtraction_operands(rng, level, count),
        Operator::Multiply => multiplication_operands(rng, level, count),
        Operator::Divide   => division_operands(rng, level),
    };

    let result = reduce(config.operator(), &numbers);
    Equation { numbers, operator: config.operator(), result }
}

/// Left fold of operands every construction below has already proven valid.
fn reduce(op: Operator, numbers: &[u64]) -> u64 {
    numbers[1..].iter().fold(numbers[0], |acc, &n| match op {
        Operator::Add      => acc + n,
        Operator::Subtract => acc - n,
        Operator::Multiply => acc * n,
        Operator::Divide   => acc / n,
    })
}

/// True when every prefix reduction of `numbers` stays above zero.
pub fn partials_positive(numbers: &[u64]) -> bool {
    let Some((&first, rest)) = numbers.split_first() else {
        return false;
    };
    let mut running = first;
    for &n in rest {
        if n >= running {
            return false;
        }
        running -= n;
    }
    running > 0
}

// ---------------------------------------------------------------------------
// Addition
// ---------------------------------------------------------------------------

/// Each operand takes at most its fair share of what is left of the level
/// maximum, so the sum can never exceed it.
fn addition_operands<S: RandomSource + ?Sized>(
    rng: &mut S,
    level: DigitLevel,
    count: usize,
) -> Vec<u64> {
    let mut remaining = level.max_value();
    let mut numbers = Vec::with_capacity(count);
    for i in 0..count {
        let left = (count - i) as u64;
        let hi = level.operand_max().min(remaining / left).max(1);
        let lo = level.operand_min().min(hi);
        let n = rng.int_in(lo, hi);
        remaining -= n;
        numbers.push(n);
    }
    numbers
}

// ---------------------------------------------------------------------------
// Subtraction
// ---------------------------------------------------------------------------

fn subtraction_operands<S: RandomSource + ?Sized>(
    rng: &mut S,
    level: DigitLevel,
    count: usize,
) -> Vec<u64> {
    for _ in 0..MAX_ATTEMPTS {
        let numbers = subtraction_attempt(rng, level, count);
        if partials_positive(&numbers) {
            return numbers;
        }
    }
    debug!(count, "subtraction attempts exhausted, using fixed fallback");
    subtraction_fallback(count)
}

/// One construction pass. The first operand leaves `MIN_CHUNK` per
/// subtrahend; each subtrahend takes at most half of its fair share of the
/// running value, which keeps at least `MIN_CHUNK` per step in reserve.
fn subtraction_attempt<S: RandomSource + ?Sized>(
    rng: &mut S,
    level: DigitLevel,
    count: usize,
) -> Vec<u64> {
    let first_lo = level.operand_min().max(count as u64 * MIN_CHUNK);
    let first_hi = level.operand_max().max(first_lo);
    let first = rng.int_in(first_lo, first_hi);

    let mut numbers = Vec::with_capacity(count);
    numbers.push(first);
    let mut running = first;
    for i in 1..count {
        let left = (count - i) as u64;
        let hi = (running / (2 * left)).max(1);
        let lo = level.operand_min().min(hi);
        let n = rng.int_in(lo, hi);
        running = running.saturating_sub(n);
        numbers.push(n);
    }
    numbers
}

/// `[count, 1, 1, ...]`: every partial is at least 1.
fn subtraction_fallback(count: usize) -> Vec<u64> {
    let mut numbers = vec![1; count];
    numbers[0] = count as u64;
    numbers
}

// ---------------------------------------------------------------------------
// Multiplication
// ---------------------------------------------------------------------------

/// Largest `r` with `r^n <= value`.
pub fn integer_root(value: u64, n: usize) -> u64 {
    let exp = n as u32;
    let mut r = 1u64;
    while (r + 1).checked_pow(exp).is_some_and(|p| p <= value) {
        r += 1;
    }
    r
}

fn draw_factors<S: RandomSource + ?Sized>(rng: &mut S, count: usize, cap: u64) -> Vec<u64> {
    (0..count).map(|_| rng.int_in(2, cap)).collect()
}

fn product_within(numbers: &[u64], max: u64) -> bool {
    Operator::Multiply.fold(numbers).is_some_and(|p| p <= max)
}

fn multiplication_operands<S: RandomSource + ?Sized>(
    rng: &mut S,
    level: DigitLevel,
    count: usize,
) -> Vec<u64> {
    let max = level.max_value();

    let cap = (level.operand_max() / count as u64).max(2);
    let numbers = draw_factors(rng, count, cap);
    if product_within(&numbers, max) {
        return numbers;
    }

    let cap = integer_root(max, count).max(2);
    let numbers = draw_factors(rng, count, cap);
    if product_within(&numbers, max) {
        debug!(?level, count, cap, "multiplication settled on tier 2");
        return numbers;
    }

    debug!(?level, count, "multiplication falling back to small factors");
    multiplication_fallback(rng, max, count)
}

/// Small factors, each capped by what the running product can still absorb.
fn multiplication_fallback<S: RandomSource + ?Sized>(
    rng: &mut S,
    max: u64,
    count: usize,
) -> Vec<u64> {
    let mut product = 1u64;
    let mut numbers = Vec::with_capacity(count);
    for _ in 0..count {
        let hi = FALLBACK_FACTOR_MAX.min(max / product).max(1);
        let n = rng.int_in(1, hi);
        product *= n;
        numbers.push(n);
    }
    numbers
}

// ---------------------------------------------------------------------------
// Division
// ---------------------------------------------------------------------------

/// Always `[dividend, divisor]` with `dividend = divisor * quotient`.
fn division_operands<S: RandomSource + ?Sized>(rng: &mut S, level: DigitLevel) -> Vec<u64> {
    let max = level.max_value();
    let ((d_lo, d_hi), (q_lo, q_hi)) = division_ranges(level);

    let divisor = rng.int_in(d_lo, d_hi);
    let quotient = rng.int_in(q_lo, q_hi);
    let dividend = divisor * quotient;
    if dividend <= max {
        return vec![dividend, divisor];
    }

    let quotient = rng.int_in(2, MODERATED_QUOTIENT_MAX.min(q_hi).max(2));
    let dividend = divisor * quotient;
    if dividend <= max {
        debug!(?level, divisor, quotient, "division settled on moderated quotient");
        return vec![dividend, divisor];
    }

    debug!(?level, divisor, "division falling back to divisor * 2");
    vec![divisor * 2, divisor]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz_engine::random::ScriptedSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cfg(level: DigitLevel, count: usize, op: Operator) -> GenerationConfig {
        GenerationConfig::new(level, count, op).unwrap()
    }

    #[test]
    fn scripted_division_yields_28_over_4() {
        let mut src = ScriptedSource::new(vec![4, 7]);
        let eq = generate_equation(&cfg(DigitLevel::Medium, 2, Operator::Divide), &mut src);
        assert_eq!(eq.numbers, vec![28, 4]);
        assert_eq!(eq.result, 7);
        assert_eq!(eq.operator, Operator::Divide);
    }

    #[test]
    fn division_uses_moderated_quotient_when_first_draw_overflows() {
        // 12 * 12 = 144 > 99, then 12 * 8 = 96.
        let mut src = ScriptedSource::new(vec![12, 12, 8]);
        let eq = generate_equation(&cfg(DigitLevel::Medium, 2, Operator::Divide), &mut src);
        assert_eq!(eq.numbers, vec![96, 12]);
        assert_eq!(eq.result, 8);
    }

    #[test]
    fn division_falls_back_to_divisor_times_two() {
        // Small: 4 * 4 = 16 > 9, moderated 4 * 4 = 16 > 9, fallback 8 / 4.
        let mut src = ScriptedSource::new(vec![4, 4, 4]);
        let eq = generate_equation(&cfg(DigitLevel::Small, 2, Operator::Divide), &mut src);
        assert_eq!(eq.numbers, vec![8, 4]);
        assert_eq!(eq.result, 2);
    }

    #[test]
    fn division_fallback_fits_every_level() {
        for level in DigitLevel::ALL {
            let ((_, d_hi), _) = division_ranges(level);
            assert!(d_hi * 2 <= level.max_value(), "{level:?}");
        }
    }

    #[test]
    fn multiplication_tier_one_accepts_in_range_product() {
        // Medium, 2 factors: tier 1 cap is 49; 7 * 9 = 63.
        let mut src = ScriptedSource::new(vec![7, 9]);
        let eq = generate_equation(&cfg(DigitLevel::Medium, 2, Operator::Multiply), &mut src);
        assert_eq!(eq.numbers, vec![7, 9]);
        assert_eq!(eq.result, 63);
        assert_eq!(src.consumed(), 2);
    }

    #[test]
    fn multiplication_tier_two_uses_integer_root_cap() {
        // 40 * 40 overflows; tier 2 cap is integer_root(99, 2) = 9.
        let mut src = ScriptedSource::new(vec![40, 40, 50, 50]);
        let eq = generate_equation(&cfg(DigitLevel::Medium, 2, Operator::Multiply), &mut src);
        assert_eq!(eq.numbers, vec![9, 9]);
        assert_eq!(eq.result, 81);
    }

    #[test]
    fn multiplication_tier_three_stays_under_max() {
        // Small, 4 factors: tiers 1 and 2 both cap at 2 and 2^4 = 16 > 9.
        let mut src = ScriptedSource::new(vec![2, 2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3]);
        let eq = generate_equation(&cfg(DigitLevel::Small, 4, Operator::Multiply), &mut src);
        assert_eq!(eq.numbers, vec![3, 3, 1, 1]);
        assert_eq!(eq.result, 9);
    }

    #[test]
    fn integer_root_is_floor() {
        assert_eq!(integer_root(99, 2), 9);
        assert_eq!(integer_root(100, 2), 10);
        assert_eq!(integer_root(9, 4), 1);
        assert_eq!(integer_root(9999, 6), 4);
    }

    #[test]
    fn addition_budget_keeps_sum_in_range() {
        let mut src = ScriptedSource::new(vec![u64::MAX; 6]);
        let eq = generate_equation(&cfg(DigitLevel::Small, 6, Operator::Add), &mut src);
        assert!(eq.result <= 9, "{eq:?}");
        assert!(eq.numbers.iter().all(|&n| n >= 1));
    }

    #[test]
    fn subtraction_partials_stay_positive_for_greedy_picks() {
        // Always taking the largest allowed subtrahend still stays above zero.
        for level in DigitLevel::ALL {
            for count in 2..=6 {
                let mut src = ScriptedSource::new(vec![u64::MAX; count]);
                let eq = generate_equation(&cfg(level, count, Operator::Subtract), &mut src);
                assert!(partials_positive(&eq.numbers), "{level:?} {count}: {eq:?}");
                assert_eq!(eq.numbers.len(), count);
            }
        }
    }

    #[test]
    fn subtraction_with_smallest_first_operand_is_valid() {
        let mut src = ScriptedSource::new(Vec::new());
        let eq = generate_equation(&cfg(DigitLevel::Small, 6, Operator::Subtract), &mut src);
        assert_eq!(eq.numbers[0], 12);
        assert!(partials_positive(&eq.numbers), "{eq:?}");
    }

    #[test]
    fn partials_positive_rejects_zero_and_negative() {
        assert!(partials_positive(&[10, 3, 6]));
        assert!(!partials_positive(&[10, 4, 6]));
        assert!(!partials_positive(&[10, 11]));
        assert!(!partials_positive(&[]));
    }

    #[test]
    fn subtraction_fallback_shape() {
        assert_eq!(subtraction_fallback(3), vec![3, 1, 1]);
        assert!(partials_positive(&subtraction_fallback(6)));
    }

    #[test]
    fn seeded_sweep_holds_all_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        for level in DigitLevel::ALL {
            for op in Operator::ALL {
                let counts = if op == Operator::Divide { 2..=2 } else { 2..=6 };
                for count in counts {
                    for _ in 0..200 {
                        let eq = generate_equation(&cfg(level, count, op), &mut rng);
                        assert_eq!(op.fold(&eq.numbers), Some(eq.result), "{eq:?}");
                        assert!(eq.result > 0, "{eq:?}");
                        match op {
                            Operator::Add | Operator::Multiply => {
                                assert!(eq.result <= level.max_value(), "{eq:?}");
                                assert_eq!(eq.numbers.len(), count);
                            }
                            Operator::Subtract => {
                                assert!(partials_positive(&eq.numbers), "{eq:?}");
                            }
                            Operator::Divide => {
                                assert_eq!(eq.numbers.len(), 2);
                                assert!(eq.numbers[1] >= 2);
                                assert_eq!(eq.numbers[0] % eq.numbers[1], 0);
                                assert!(eq.numbers[0] <= level.max_value());
                            }
                        }
                    }
                }
            }
        }
    }
}
