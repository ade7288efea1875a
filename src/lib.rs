//! Questlog - gamified habit tracker.
//!
//! Missions logged per day earn XP; XP maps onto a tiered leveling curve with
//! a goal of completing level 100 by a target date.

pub mod config;
pub mod core;
pub mod error;
pub mod ledger;
pub mod missions;
pub mod profile;
pub mod rewards;
pub mod stats;
pub mod utils;
