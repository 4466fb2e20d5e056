//! Deterministic linear-congruential generator.
//!
//! Reproducible, not random: the same seed and call sequence always yields
//! the same values. Used to pick each solid's rotation axis at startup.

use glam::Vec3;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u32 = 12345;

const MULTIPLIER: u64 = 1_103_515_245;
const INCREMENT: u64 = 12_345;
const MASK: u64 = 0x7fff_ffff;

/// 31-bit LCG (`state = (state * 1103515245 + 12345) & 0x7fffffff`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Generator starting from `seed`.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed) & MASK,
        }
    }

    /// Advance and return the raw 31-bit state.
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_u31(&mut self) -> u32 {
        self.state =
            self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT) & MASK;
        self.state as u32
    }

    /// Next value in `[0, 1]`.
    #[allow(clippy::cast_precision_loss)]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u31()) / MASK as f64
    }

    /// Next value in `[0, 1]` as `f32`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_f32(&mut self) -> f32 {
        self.next_f64() as f32
    }

    /// Uniformly distributed direction on the unit sphere.
    ///
    /// Consumes two values: azimuth first, then the polar cosine.
    #[allow(clippy::cast_possible_truncation)]
    pub fn unit_vector(&mut self) -> Vec3 {
        let theta = self.next_f64() * std::f64::consts::TAU;
        let phi = (2.0 * self.next_f64() - 1.0).clamp(-1.0, 1.0).acos();
        Vec3::new(
            (phi.sin() * theta.cos()) as f32,
            (phi.sin() * theta.sin()) as f32,
            phi.cos() as f32,
        )
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
