//! # Core Models Module
//!
//! This module contains the fundamental data structures used to represent a parsed
//! cube file, providing the foundation for all analysis operations.
//!
//! ## Key Components
//!
//! - [`grid`] - The cube header, the flat value grid, and the classification enums
//!   for calculation provenance and data kind

pub mod grid;
