//! Shared UI crate for Statcard. Chart engine, sheet state and views live here.

pub mod chart;
pub mod core;
pub mod export;
pub mod portrait;
pub mod sheet;
pub mod views;
