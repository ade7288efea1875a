//! Leveling curve, XP/level conversion and goal pacing.

#![allow(unused_imports)]

pub mod constants;
pub mod pacing;
pub mod progression;
pub mod tiers;

pub use constants::*;
pub use pacing::*;
pub use progression::*;
pub use tiers::*;
