//! Randomness source for every roll in the game
//!
//! Nothing in the engine touches a thread-local RNG. Callers hand in a
//! [`Dice`] so that a mission can be replayed from its seed, and tests can
//! script exact rolls with [`ScriptedDice`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform randomness used by generation, resolution and simulation
pub trait Dice {
    /// Uniform integer in 1..=20
    fn d20(&mut self) -> i32;

    /// True with the given probability (clamped to 0.0..=1.0)
    fn chance(&mut self, probability: f64) -> bool;

    /// Uniform index in 0..len. Returns 0 when `len` is 0.
    fn pick(&mut self, len: usize) -> usize;
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn d20(&mut self) -> i32 {
        (**self).d20()
    }

    fn chance(&mut self, probability: f64) -> bool {
        (**self).chance(probability)
    }

    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

/// Adapts any `rand` generator into [`Dice`]
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> Dice for RngDice<R> {
    fn d20(&mut self) -> i32 {
        self.rng.gen_range(1..=20)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Deterministic dice backed by ChaCha8
pub type SeededDice = RngDice<ChaCha8Rng>;

impl RngDice<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

/// Replays a fixed script of rolls
///
/// `d20` cycles through the scripted rolls, `chance` always answers with the
/// configured verdict and `pick` always returns the configured index (clamped
/// to the collection length).
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: Vec<i32>,
    cursor: usize,
    chance_verdict: bool,
    pick_index: usize,
}

impl ScriptedDice {
    pub fn new(rolls: Vec<i32>) -> Self {
        Self {
            rolls,
            cursor: 0,
            chance_verdict: false,
            pick_index: 0,
        }
    }

    /// Every roll comes up `value`
    pub fn always(value: i32) -> Self {
        Self::new(vec![value])
    }

    pub fn with_chance(mut self, verdict: bool) -> Self {
        self.chance_verdict = verdict;
        self
    }

    pub fn with_pick(mut self, index: usize) -> Self {
        self.pick_index = index;
        self
    }
}

impl Dice for ScriptedDice {
    fn d20(&mut self) -> i32 {
        if self.rolls.is_empty() {
            return 10;
        }
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }

    fn chance(&mut self, probability: f64) -> bool {
        // Certain outcomes stay certain even under a script
        if probability >= 1.0 {
            return true;
        }
        if probability <= 0.0 {
            return false;
        }
        self.chance_verdict
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.pick_index.min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d20_stays_in_range() {
        let mut dice = SeededDice::seeded(7);
        for _ in 0..1000 {
            let roll = dice.d20();
            assert!((1..=20).contains(&roll));
        }
    }

    #[test]
    fn test_seeded_dice_reproducible() {
        let mut a = SeededDice::seeded(42);
        let mut b = SeededDice::seeded(42);
        let rolls_a: Vec<i32> = (0..50).map(|_| a.d20()).collect();
        let rolls_b: Vec<i32> = (0..50).map(|_| b.d20()).collect();
        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn test_pick_handles_empty() {
        let mut dice = SeededDice::seeded(1);
        assert_eq!(dice.pick(0), 0);
        for _ in 0..100 {
            assert!(dice.pick(3) < 3);
        }
    }

    #[test]
    fn test_scripted_dice_cycles() {
        let mut dice = ScriptedDice::new(vec![1, 20, 7]);
        assert_eq!(dice.d20(), 1);
        assert_eq!(dice.d20(), 20);
        assert_eq!(dice.d20(), 7);
        assert_eq!(dice.d20(), 1);
    }

    #[test]
    fn test_scripted_chance_respects_certainty() {
        let mut dice = ScriptedDice::always(10).with_chance(false);
        assert!(dice.chance(1.0));
        assert!(!dice.chance(0.5));
        let mut dice = ScriptedDice::always(10).with_chance(true);
        assert!(!dice.chance(0.0));
        assert!(dice.chance(0.2));
    }

    #[test]
    fn test_dice_through_mut_ref() {
        fn roll_twice(mut dice: impl Dice) -> (i32, i32) {
            (dice.d20(), dice.d20())
        }
        let mut dice = ScriptedDice::new(vec![3, 4]);
        assert_eq!(roll_twice(&mut dice), (3, 4));
        assert_eq!(dice.d20(), 3);
    }
}
