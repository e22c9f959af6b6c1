use rand::Rng;

/// The only source of nondeterminism the engine touches.
///
/// Every `rand::Rng` is a `RandomSource`, so callers normally pass a seeded
/// `StdRng`. Tests that need exact picks use [`ScriptedSource`].
pub trait RandomSource {
    /// Uniform integer in `min..=max`. Callers guarantee `min <= max`.
    fn int_in(&mut self, min: u64, max: u64) -> u64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn int_in(&mut self, min: u64, max: u64) -> u64 {
        self.gen_range(min..=max)
    }
}

/// Replays a fixed list of picks, one per `int_in` call.
///
/// A scripted value outside the requested range is clamped into it; once the
/// script is exhausted every call returns the lower bound.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    picks: Vec<u64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(picks: Vec<u64>) -> Self {
        ScriptedSource { picks, cursor: 0 }
    }

    /// Number of picks consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn int_in(&mut self, min: u64, max: u64) -> u64 {
        match self.picks.get(self.cursor) {
            Some(&pick) => {
                self.cursor += 1;
                pick.clamp(min, max)
            }
            None => min,
        }
    }
}

/// Index in `0..len` drawn from `rng`. `len` must be non-zero.
pub fn pick_index<S: RandomSource + ?Sized>(rng: &mut S, len: usize) -> usize {
    rng.int_in(0, len as u64 - 1) as usize
}

/// Fisher-Yates shuffle driven by a [`RandomSource`].
pub fn shuffle<T, S: RandomSource + ?Sized>(rng: &mut S, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.int_in(0, i as u64) as usize;
        items.swap(i, j);
    }
}
