//! Hand-written transform math and the seeded axis generator.

/// Deterministic linear-congruential generator.
pub mod lcg;
/// Column-major 4x4 matrix operations.
pub mod transform;
