//! Deterministic random rolls for hit checks and hurt reactions.
//!
//! Rolls are pure functions of a seed. A character derives the seed from its
//! own base seed, a per-roll nonce and a context tag, so two runs fed the same
//! inputs produce the same fights.

/// Seeded random source.
pub trait RngOracle {
    /// Random u32 for a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn roll_unit(&self, seed: u64) -> f32 {
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Die with N sides (1-N inclusive).
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (self.next_u32(seed) % sides) + 1
    }

    /// `true` with probability `1 / n`.
    fn one_in(&self, seed: u64, n: u32) -> bool {
        n <= 1 || self.roll_die(seed, n) == 1
    }
}

/// PCG-XSH-RR generator: 64-bit LCG state, 32-bit permuted output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Source that returns the same raw value for every seed.
///
/// `FixedRng(0)` makes every hit land and every hurt roll succeed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Roll purposes mixed into the seed so one action can roll independently
/// several times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Hit = 0,
    Hurt = 1,
}

/// Mixes the character seed, a roll counter, the character id and the roll
/// purpose into one seed.
pub fn compute_seed(base_seed: u64, nonce: u64, actor: u32, context: RollContext) -> u64 {
    let mut hash = base_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
