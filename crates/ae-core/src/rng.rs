//! Deterministic per-agent RNG.
//!
//! Only the kinematic reference backend draws random numbers (optional
//! actuation noise); the action engine itself is fully deterministic.
//! Each agent gets its own `SmallRng` seeded by
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! so adding agents never disturbs the noise sequence of existing ones.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-agent deterministic RNG.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Multiplicative jitter in `[1 - amplitude, 1 + amplitude]`.
    ///
    /// Returns exactly `1.0` when `amplitude <= 0`, without consuming state,
    /// so noise-free runs stay bit-identical regardless of seed.
    pub fn jitter(&mut self, amplitude: f32) -> f32 {
        if amplitude <= 0.0 {
            return 1.0;
        }
        1.0 + self.0.gen_range(-amplitude..=amplitude)
    }
}
