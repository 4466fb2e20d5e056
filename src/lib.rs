// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Real-time wgpu renderer for the five Platonic solids.
//!
//! Each solid is drawn as a ball-and-stick model: a sphere at every vertex
//! and a cylinder along every edge, both instanced from a single shared
//! primitive mesh. The five solids sit in a row, each spinning about its own
//! seeded random axis, shaded by a near-to-far depth gradient centered on
//! the solid.
//!
//! # Key entry points
//!
//! - [`engine::host::RenderLoop`] - mounts the engine into a host
//!   [`Container`](engine::host::Container) and drives it frame by frame
//! - [`engine::SolidsEngine`] - owns the GPU objects and draws one frame
//! - [`options::Options`] - TOML-configurable scene, camera, and palette
//! - `Viewer` - a winit window host (feature `viewer`)
//!
//! # Architecture
//!
//! Data flows one way. The [`catalog`] and the [`geometry`] generators
//! produce CPU-side data once; [`gpu::resources`] uploads it into
//! fixed-size buffers; each frame the engine recomputes every transform
//! with [`math::transform`] and rewrites one uniform block per solid before
//! encoding a single render pass.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod math;
pub mod options;
pub mod renderer;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::host::{Container, LoopControl, LoopState, RenderLoop};
pub use engine::SolidsEngine;
pub use error::PlatonicError;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
