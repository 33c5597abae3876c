//! Player id generation.
//!
//! Ids are 128 bits drawn from ChaCha8 and printed in the lowercase
//! UUID-v4 layout (`xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`), the same shape
//! the browser scorecard produced, so old and new ids mix freely.
//!
//! ## Determinism
//!
//! ```
//! use dutch_scorecard::core::IdGenerator;
//!
//! let mut a = IdGenerator::new(42);
//! let mut b = IdGenerator::new(42);
//! assert_eq!(a.next_id(|_| false), b.next_id(|_| false));
//! ```

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::player::PlayerId;

/// Source of fresh player ids.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    inner: ChaCha8Rng,
}

impl IdGenerator {
    /// Create a generator with a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Draw an id for which `taken` returns false.
    ///
    /// Collisions are astronomically unlikely, but ids must never repeat
    /// within a game, so a taken id is simply redrawn.
    pub fn next_id(&mut self, taken: impl Fn(&PlayerId) -> bool) -> PlayerId {
        loop {
            let id = self.draw();
            if !taken(&id) {
                return id;
            }
            tracing::debug!(%id, "player id collision, redrawing");
        }
    }

    fn draw(&mut self) -> PlayerId {
        let mut bytes = [0u8; 16];
        self.inner.fill_bytes(&mut bytes);

        // Version 4, RFC 4122 variant.
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        PlayerId::new(format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        ))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_id_shape() {
        let mut gen = IdGenerator::new(7);
        let id = gen.next_id(|_| false);
        let text = id.as_str();

        assert_eq!(text.len(), 36);
        let groups: Vec<_> = text.split('-').map(str::len).collect();
        assert_eq!(groups, vec![8, 4, 4, 4, 12]);
        assert_eq!(&text[14..15], "4");
        assert!(matches!(&text[19..20], "8" | "9" | "a" | "b"));
        assert!(text.chars().all(|c| c == '-' || (c.is_ascii_hexdigit() && !c.is_ascii_uppercase())));
    }

    #[test]
    fn test_same_seed_same_ids() {
        let mut a = IdGenerator::new(42);
        let mut b = IdGenerator::new(42);
        for _ in 0..5 {
            assert_eq!(a.next_id(|_| false), b.next_id(|_| false));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = IdGenerator::new(1);
        let mut b = IdGenerator::new(2);
        assert_ne!(a.next_id(|_| false), b.next_id(|_| false));
    }

    #[test]
    fn test_ids_unique_over_many_draws() {
        let mut gen = IdGenerator::new(99);
        let mut seen = FxHashSet::default();
        for _ in 0..1000 {
            assert!(seen.insert(gen.next_id(|_| false)));
        }
    }

    #[test]
    fn test_taken_id_is_redrawn() {
        let first = IdGenerator::new(5).next_id(|_| false);

        let mut gen = IdGenerator::new(5);
        let id = gen.next_id(|candidate| *candidate == first);
        assert_ne!(id, first);
    }
}
