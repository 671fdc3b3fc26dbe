//! 7-bag randomizer for piece generation
//!
//! Tetris uses a "7-bag" system where all 7 pieces are shuffled,
//! then dealt out before reshuffling. This prevents long droughts.
//! Whole bags are only ever appended, so dequeued kinds stay aligned to
//! bag boundaries no matter how previews and draws interleave.

use crate::error::GameError;
use crate::piece::Piece;
use crate::tetromino::PieceKind;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Largest preview a caller may request
pub const MAX_PREVIEW: usize = 7;

/// The 7-bag piece randomizer
#[derive(Debug, Clone)]
pub struct Bag<R = ChaCha8Rng> {
    /// Upcoming pieces, front is next
    queue: VecDeque<PieceKind>,
    rng: R,
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Bag {
    /// Create a bag seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    /// Create a bag with a deterministic shuffle sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Bag<R> {
    /// Create an empty bag drawing its shuffles from `rng`
    pub fn from_rng(rng: R) -> Self {
        Self {
            queue: VecDeque::with_capacity(2 * MAX_PREVIEW),
            rng,
        }
    }

    /// Preview the next `n` kinds without consuming them
    pub fn sniff(&mut self, n: usize) -> Result<Vec<PieceKind>, GameError> {
        if n == 0 || n > MAX_PREVIEW {
            return Err(GameError::InvalidPreviewSize(n));
        }
        if self.queue.len() < n {
            self.refill();
        }
        Ok(self.queue.iter().take(n).copied().collect())
    }

    /// Dequeue the next kind and spawn it at the spawn position
    pub fn next(&mut self) -> Piece {
        Piece::new(self.next_kind())
    }

    pub fn next_kind(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.queue.pop_front() {
                return kind;
            }
            self.refill();
        }
    }

    /// Drop every queued kind, keeping the generator's position
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Append one freshly shuffled bag
    fn refill(&mut self) {
        let mut new_bag = PieceKind::all();
        new_bag.shuffle(&mut self.rng);
        self.queue.extend(new_bag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use std::collections::HashSet;

    fn is_permutation(kinds: &[PieceKind]) -> bool {
        kinds.len() == 7 && kinds.iter().collect::<HashSet<_>>().len() == 7
    }

    #[test]
    fn test_bag_contains_all_pieces() {
        let mut bag = Bag::with_seed(1);
        let pieces: Vec<_> = (0..7).map(|_| bag.next_kind()).collect();
        assert!(is_permutation(&pieces));
    }

    #[test]
    fn test_two_bags_are_two_permutations() {
        let mut bag = Bag::with_seed(2);
        let pieces: Vec<_> = (0..14).map(|_| bag.next_kind()).collect();
        assert!(is_permutation(&pieces[..7]));
        assert!(is_permutation(&pieces[7..]));
    }

    #[test]
    fn test_sniff_matches_next() {
        let mut bag = Bag::with_seed(3);
        let preview = bag.sniff(6).unwrap();
        let drawn: Vec<_> = (0..6).map(|_| bag.next().kind).collect();
        assert_eq!(preview, drawn);
    }

    #[test]
    fn test_sniff_does_not_consume() {
        let mut bag = Bag::with_seed(4);
        let first = bag.sniff(3).unwrap();
        let second = bag.sniff(3).unwrap();
        assert_eq!(first, second);
        assert_eq!(bag.len(), 7);
    }

    #[test]
    fn test_interleaved_sniff_keeps_bag_boundaries() {
        let mut bag = Bag::with_seed(5);
        let mut drawn = Vec::new();
        for _ in 0..35 {
            bag.sniff(7).unwrap();
            drawn.push(bag.next_kind());
        }
        for chunk in drawn.chunks(7) {
            assert!(is_permutation(chunk));
        }
    }

    #[test]
    fn test_sniff_rejects_bad_sizes() {
        let mut bag = Bag::with_seed(6);
        assert_eq!(bag.sniff(0), Err(GameError::InvalidPreviewSize(0)));
        assert_eq!(bag.sniff(8), Err(GameError::InvalidPreviewSize(8)));
        assert!(bag.is_empty());
    }

    #[test]
    fn test_drought_is_bounded() {
        let mut bag = Bag::with_seed(7);
        let mut last_seen = [None::<usize>; 7];
        for i in 0..700 {
            let kind = bag.next_kind();
            if let Some(prev) = last_seen[kind.index()] {
                assert!(i - prev <= 13, "{kind} gap of {}", i - prev - 1);
            }
            last_seen[kind.index()] = Some(i);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Bag::with_seed(42);
        let mut b = Bag::with_seed(42);
        for _ in 0..50 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }

    #[test]
    fn test_injected_generator() {
        let mut bag = Bag::from_rng(StepRng::new(0, 0));
        let pieces: Vec<_> = (0..7).map(|_| bag.next().kind).collect();
        assert!(is_permutation(&pieces));
    }

    #[test]
    fn test_next_spawns_fresh_piece() {
        let mut bag = Bag::with_seed(8);
        let expected = bag.sniff(1).unwrap()[0];
        assert_eq!(bag.next(), Piece::new(expected));
    }
}
