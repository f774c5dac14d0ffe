//! Platform-agnostic building blocks: colours, polar geometry, stat data and theme.

pub mod color;
pub mod error;
pub mod format;
pub mod layout;
pub mod platform;
pub mod stats;
pub mod theme;
pub mod timing;
