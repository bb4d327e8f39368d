//! # Workflows Module
//!
//! This module provides the high-level workflow that orchestrates a complete
//! cube file analysis in CubeIso.
//!
//! ## Overview
//!
//! Workflows are the top-level entry points for users of the library. They tie
//! the core components (voxel geometry, native-unit detection, the integration
//! algorithms, and threshold conversion) into a single run over a parsed grid,
//! and own the policies that sit above the raw numerics, such as orbital sign
//! resolution.
//!
//! ## Architecture
//!
//! - **Analysis Workflow** ([`analyze`]) - Maps a percentage to an isovalue or
//!   an isovalue to a percentage and assembles the full [`analyze::AnalysisReport`].

pub mod analyze;
