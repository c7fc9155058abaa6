//! # Codec Configuration
//!
//! Format constants and the per-buffer truncation policy.
//!
//! - [`constants`]: byte markers, padding bytes and width limits of the format
//! - [`policy`]: `TruncationPolicy`, the three independent truncation switches

pub mod constants;
pub mod policy;

pub use constants::*;
pub use policy::TruncationPolicy;
