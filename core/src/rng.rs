//! Random sources for battle resolution
//!
//! Settlement draws luck from OS entropy so that nobody can predict a
//! monster's roll. Duel previews and tests use the seeded XorShift generator.

use rand::rngs::OsRng;
use rand::{Rng, RngCore};

/// Trait for random number generation in battles
pub trait BattleRng {
    /// Generate a random u32
    fn next_u32(&mut self) -> u32;

    /// Generate a random number in range [0, max)
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }

    /// Generate a float in [0, 1)
    fn next_unit(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }
}

impl<R: BattleRng + ?Sized> BattleRng for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn gen_range(&mut self, max: usize) -> usize {
        (**self).gen_range(max)
    }

    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// XorShift32 RNG - simple, fast, deterministic
///
/// The same seed will always produce the same sequence.
#[derive(Debug, Clone)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Create a new RNG from a u64 seed
    ///
    /// The seed is combined into a u32, ensuring state is never 0.
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = ((seed as u32) ^ ((seed >> 32) as u32)).max(1);
        Self { state }
    }
}

impl BattleRng for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

/// Unseeded RNG backed by the operating system's entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyRng;

impl BattleRng for EntropyRng {
    fn next_u32(&mut self) -> u32 {
        OsRng.next_u32()
    }

    // Uniform without the modulo bias of the default.
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        OsRng.gen_range(0..max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xorshift_deterministic() {
        let mut rng1 = XorShiftRng::seed_from_u64(12345);
        let mut rng2 = XorShiftRng::seed_from_u64(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_xorshift_zero_seed_is_usable() {
        let mut rng = XorShiftRng::seed_from_u64(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_gen_range() {
        let mut rng = XorShiftRng::seed_from_u64(42);

        for _ in 0..100 {
            let val = rng.gen_range(41);
            assert!(val <= 40);
        }
        assert_eq!(rng.gen_range(0), 0);
    }

    #[test]
    fn test_next_unit_range() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v), "value out of range: {v}");
        }
    }

    #[test]
    fn test_entropy_gen_range_bounds() {
        let mut rng = EntropyRng;
        for _ in 0..200 {
            assert!(rng.gen_range(41) <= 40);
        }
    }

    #[test]
    fn test_borrowed_rng_advances_owner() {
        fn draw(mut rng: impl BattleRng) -> u32 {
            rng.next_u32()
        }

        let mut owner = XorShiftRng::seed_from_u64(99);
        let mut reference = owner.clone();
        assert_eq!(draw(&mut owner), reference.next_u32());
        assert_eq!(owner.next_u32(), reference.next_u32());
    }
}
