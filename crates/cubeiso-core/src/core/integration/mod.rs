//! # Integration Module
//!
//! The order-statistics core of the library: mapping an integration percentage
//! to the scalar threshold (isovalue) enclosing that fraction of the total
//! quantity, and the inverse mapping from a threshold back to a percentage.
//!
//! Two algorithm families exist, selected by the grid's [`DataKind`]:
//!
//! - [`density`] integrates the raw grid values, split by sign: positive and
//!   negative lobes are physically distinct quantities and are integrated
//!   separately.
//! - [`orbital`] integrates the squared grid values (the orbital density) over
//!   all points regardless of sign, returning the signed amplitude at the
//!   threshold crossing.
//!
//! Both families are pure functions over a borrowed value slice; nothing here
//! allocates beyond the sort buffers or mutates the grid.
//!
//! [`DataKind`]: crate::core::models::grid::DataKind

pub mod density;
pub mod orbital;

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Sign selection for density-mode integration.
///
/// Advisory only for orbital data, where the integration runs over squared
/// values and the workflow-level policy resolves the effective sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Returns true if `value` belongs to this sign's selection.
    ///
    /// Zero belongs to neither selection.
    pub fn selects(&self, value: f64) -> bool {
        match self {
            Sign::Positive => value > 0.0,
            Sign::Negative => value < 0.0,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Positive => write!(f, "positive"),
            Sign::Negative => write!(f, "negative"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrationError {
    #[error("No grid points match the requested selection")]
    EmptySelection,

    #[error("Total integrated quantity for the requested selection is zero")]
    ZeroTotal,
}
