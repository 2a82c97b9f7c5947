//! Golf league tracker.
//!
//! Leagues own players, rounds and a table of point weights. Each round a
//! player is given a point allocation (a count per scoring category, or a
//! precomputed total); totals and standings are always derived from the stored
//! allocations and the league's current weights.

pub mod api;
pub mod config;
pub mod error;
pub mod league;
pub mod output;
pub mod scoring;
pub mod store;
