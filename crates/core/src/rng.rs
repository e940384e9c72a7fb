//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization used by modern falling-block games:
//! a shuffled permutation of all seven kinds is dealt out completely before
//! the next permutation is generated, bounding how long any kind can stay
//! absent. Backed by a small seeded LCG so sequences are reproducible in
//! tests and harnesses.

use blockfall_types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod 2^32, Numerical Recipes constants
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (restarting from it reproduces the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
///
/// Holds one shuffled permutation plus a cursor. The bag refills eagerly
/// the moment the last piece is drawn, so [`SevenBag::peek`] is always
/// defined. Within one bag every kind appears exactly once; no guarantee
/// is made across a bag boundary (the same kind can close one bag and open
/// the next).
#[derive(Debug, Clone)]
pub struct SevenBag {
    /// Current permutation of the seven kinds
    bag: [PieceKind; 7],
    /// Index of the next piece to hand out
    cursor: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl SevenBag {
    /// Create a new bag with the given seed
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: PieceKind::ALL,
            cursor: 0,
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    /// Generate a fresh shuffled permutation and rewind the cursor
    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.cursor = 0;
    }

    /// Peek at the next piece without advancing
    pub fn peek(&self) -> PieceKind {
        self.bag[self.cursor]
    }

    /// Draw the next piece, refilling when the permutation is exhausted
    pub fn next(&mut self) -> PieceKind {
        let piece = self.bag[self.cursor];
        self.cursor += 1;
        if self.cursor == self.bag.len() {
            self.refill();
        }
        piece
    }

    /// Discard the remaining bag and deal a fresh permutation
    ///
    /// The RNG keeps rolling: a session restart does not replay the
    /// previous piece sequence.
    pub fn reset(&mut self) {
        self.refill();
    }

    /// Current RNG state (for diagnostics and reproducing sequences)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    /// Remaining pieces of the current permutation, for testing/debugging
    #[cfg(test)]
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.cursor..]
    }
}

impl Default for SevenBag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = SevenBag::new(1);

        let mut drawn = Vec::new();
        for _ in 0..7 {
            drawn.push(bag.next());
        }

        assert_eq!(drawn.len(), 7);
        for kind in PieceKind::ALL {
            assert!(drawn.contains(&kind), "missing piece: {:?}", kind);
        }
    }

    #[test]
    fn test_bag_peek_matches_next() {
        let mut bag = SevenBag::new(42);

        for _ in 0..21 {
            let peeked = bag.peek();
            assert_eq!(peeked, bag.next());
        }
    }

    #[test]
    fn test_bag_refills_across_boundary() {
        let mut bag = SevenBag::new(7);

        // Drain three full bags; each window of 7 is a permutation.
        for _ in 0..3 {
            let mut counts = [0u8; 7];
            for _ in 0..7 {
                let kind = bag.next();
                let idx = PieceKind::ALL.iter().position(|&k| k == kind).unwrap();
                counts[idx] += 1;
            }
            assert!(counts.iter().all(|&c| c == 1), "not a permutation: {counts:?}");
        }
    }

    #[test]
    fn test_bag_deterministic_for_seed() {
        let mut a = SevenBag::new(999);
        let mut b = SevenBag::new(999);

        for _ in 0..50 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn test_bag_reset_discards_remaining() {
        let mut bag = SevenBag::new(5);
        bag.next();
        bag.next();
        assert_eq!(bag.remaining().len(), 5);

        bag.reset();
        assert_eq!(bag.remaining().len(), 7);
    }
}
