//! # CubeIso Core Library
//!
//! A library for analyzing volumetric scalar fields stored in the cube file format
//! used throughout computational chemistry, mapping integration percentages to
//! isovalues (and back) for electron densities and molecular orbitals.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict two-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`CubeGrid`),
//!   the cube file parser, pure numeric routines (voxel geometry, the density-mode
//!   and orbital-mode integration algorithms), and unit detection/conversion.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing layer.
//!   It ties the `core` components together to execute a complete analysis run,
//!   from a parsed grid to a fully populated report, including the orbital
//!   sign-resolution policy that sits above the raw integration routines.

pub mod core;
pub mod workflows;
