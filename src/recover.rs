//! Recovery sessions: feed observed draws, solve, replay.

use crate::error::{Error, Result};
use crate::gf2::Form;
use crate::mersenne::{STATE_BITS, W};
use crate::solution::Solution;
use crate::solver::Solver;
use crate::symbolic::{SymMt, SymWord};
use num_bigint::BigUint;

const RANDOM_SCALE: f64 = 9007199254740992.0;

/// How state word 0 is pinned before anything is observed. Its 31 low bits
/// never reach any output, so without an anchor the rank tops out 31 short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Whole word is `0x80000000`, as left by seeding from a key array.
    #[default]
    Seeded,
    /// Low 31 bits are zero; the top bit is left to the observations.
    LowBits,
    /// Nothing pinned.
    Free,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub anchor: Anchor,
}

pub struct Recovery {
    mt: SymMt,
    solver: Solver,
}

impl Recovery {
    pub fn new(config: Config) -> Self {
        let mt = SymMt::new();
        let mut solver = Solver::new(STATE_BITS);
        let first = mt.word(0);
        match config.anchor {
            Anchor::Seeded => solver.add_word(first, 0x80000000),
            Anchor::LowBits => solver.add_word(&first[..W - 1], 0),
            Anchor::Free => {}
        }
        tracing::debug!(anchor = ?config.anchor, rank = solver.rank(), "recovery started");
        Recovery { mt, solver }
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    pub fn rank(&self) -> usize {
        self.solver.rank()
    }

    pub fn is_solved(&self) -> bool {
        self.solver.solution().is_ok()
    }

    pub fn observe_word(&mut self, value: u32) -> Result<()> {
        let word = self.mt.nxt();
        self.solver.add_word(&word, value);
        self.check()
    }

    pub fn observe_bits(&mut self, k: usize, value: &BigUint) -> Result<()> {
        // reject before drawing so the cursor stays paired with the stream
        if value.bits() > k as u64 {
            return Err(Error::Malformed {
                width: k,
                value: value.clone(),
            });
        }
        let bits = self.mt.getrandbits(k);
        self.solver.add_bits(&bits, value)?;
        self.check()
    }

    pub fn observe_random(&mut self, value: f64) -> Result<()> {
        let scaled = value * RANDOM_SCALE;
        if !(0.0..RANDOM_SCALE).contains(&scaled) || scaled.fract() != 0.0 {
            return Err(Error::NotRandomDraw(value));
        }
        let bits = self.mt.random();
        self.solver.add_bits(&bits, &BigUint::from(scaled as u64))?;
        self.check()
    }

    /// A raw symbolic draw, for protocols that only reveal relations between
    /// draws. Pair it with [`Recovery::constrain_equal`].
    pub fn draw_bits(&mut self, k: usize) -> Vec<Form> {
        self.mt.getrandbits(k)
    }

    pub fn draw_word(&mut self) -> SymWord {
        self.mt.nxt()
    }

    pub fn constrain_equal(&mut self, lhs: &[Form], rhs: &[Form]) -> Result<()> {
        self.solver.add_equal(lhs, rhs);
        self.check()
    }

    pub fn skip(&mut self, words: usize) {
        self.mt.skip(words);
    }

    pub fn solution(&self) -> Result<&Solution> {
        self.solver.solution()
    }

    /// Hands the symbolic generator over for replay, rewound to the start.
    pub fn into_predictor(self) -> Result<Predictor> {
        let solution = self.solver.solution()?.clone();
        let mut mt = self.mt;
        mt.reset();
        Ok(Predictor { mt, solution })
    }

    fn check(&self) -> Result<()> {
        match self.solver.solution() {
            Err(e @ Error::Contradictory { .. }) => Err(e),
            _ => Ok(()),
        }
    }
}

/// Replays the generator from its recovered state.
pub struct Predictor {
    mt: SymMt,
    solution: Solution,
}

impl Predictor {
    pub fn new(solution: Solution) -> Self {
        Predictor {
            mt: SymMt::new(),
            solution,
        }
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn reset(&mut self) {
        self.mt.reset();
    }

    pub fn next_word(&mut self) -> u32 {
        self.solution.evaluate_word(&self.mt.nxt())
    }

    pub fn next_bits(&mut self, k: usize) -> BigUint {
        self.solution.evaluate_bits(&self.mt.getrandbits(k))
    }

    pub fn next_random(&mut self) -> f64 {
        let mantissa = self.solution.evaluate_bits(&self.mt.random());
        let mantissa = mantissa.iter_u64_digits().next().unwrap_or(0);
        mantissa as f64 / RANDOM_SCALE
    }
}

/// Outcome of replaying an observed stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    pub checked: usize,
    pub mismatches: Vec<usize>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Replays from the start and compares each word with `observed`.
pub fn verify(solution: &Solution, observed: &[u32]) -> Report {
    let mut predictor = Predictor::new(solution.clone());
    let mut report = Report::default();
    for (i, &value) in observed.iter().enumerate() {
        if predictor.next_word() != value {
            report.mismatches.push(i);
        }
        report.checked += 1;
    }
    if !report.is_clean() {
        tracing::warn!(
            checked = report.checked,
            mismatches = report.mismatches.len(),
            "replay disagrees with observations"
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mersenne::{getrandbits, nxt, seed_mt_by_array};

    #[test]
    fn anchors_set_rank() {
        assert_eq!(Recovery::new(Config::default()).rank(), W);
        let low = Recovery::new(Config {
            anchor: Anchor::LowBits,
        });
        assert_eq!(low.rank(), W - 1);
        let free = Recovery::new(Config {
            anchor: Anchor::Free,
        });
        assert_eq!(free.rank(), 0);
    }

    #[test]
    fn unsolved_session_refuses() {
        let mut recovery = Recovery::new(Config::default());
        let mut state = seed_mt_by_array(&[1, 2, 3]);
        for _ in 0..10 {
            recovery.observe_word(nxt(&mut state)).expect("consistent");
        }
        assert!(!recovery.is_solved());
        assert_eq!(
            recovery.solution().err(),
            Some(Error::Underdetermined {
                rank: W * 11,
                vars: STATE_BITS
            })
        );
        assert!(recovery.into_predictor().is_err());
    }

    #[test]
    fn bad_float_is_rejected() {
        let mut recovery = Recovery::new(Config::default());
        assert_eq!(
            recovery.observe_random(1.5),
            Err(Error::NotRandomDraw(1.5))
        );
        assert_eq!(
            recovery.observe_random(1e-300),
            Err(Error::NotRandomDraw(1e-300))
        );
        assert!(recovery.observe_random(0.5).is_ok());
    }

    #[test]
    fn wide_value_is_rejected() {
        let mut recovery = Recovery::new(Config::default());
        assert!(matches!(
            recovery.observe_bits(5, &BigUint::from(32u8)),
            Err(Error::Malformed { width: 5, .. })
        ));
    }

    #[test]
    fn rejected_value_keeps_draws_in_step() {
        let mut state = seed_mt_by_array(&[11]);
        let truth = Solution::from_state(&state.1);
        let mut recovery = Recovery::new(Config::default());
        assert!(recovery.observe_bits(5, &BigUint::from(32u8)).is_err());
        let real = getrandbits(&mut state, 5);
        recovery.observe_bits(5, &real).expect("consistent");

        let mut expected = Solver::new(STATE_BITS);
        let mut mt = SymMt::new();
        expected.add_word(mt.word(0), 0x80000000);
        expected
            .add_bits(&mt.getrandbits(5), &real)
            .expect("fits in 5 bits");
        assert_eq!(recovery.rank(), expected.rank());
        for i in 0..STATE_BITS {
            assert_eq!(recovery.solver().row(i), expected.row(i));
        }
        for i in 0..STATE_BITS {
            if let Some(row) = recovery.solver().row(i) {
                assert!(!truth.evaluate(row));
            }
        }
    }

    #[test]
    fn verify_reports_mismatches() {
        let mut state = seed_mt_by_array(&[9]);
        let solution = Solution::from_state(&state.1);
        let mut observed: Vec<_> = (0..20).map(|_| nxt(&mut state)).collect();
        assert!(verify(&solution, &observed).is_clean());
        observed[3] ^= 1;
        observed[17] ^= 1 << 31;
        let report = verify(&solution, &observed);
        assert_eq!(report.checked, 20);
        assert_eq!(report.mismatches, vec![3, 17]);
    }

    #[test]
    fn predictor_replays_from_start() {
        let mut state = seed_mt_by_array(&[5]);
        let mut predictor = Predictor::new(Solution::from_state(&state.1));
        let first = predictor.next_word();
        assert_eq!(first, nxt(&mut state));
        predictor.reset();
        assert_eq!(predictor.next_word(), first);
    }
}
