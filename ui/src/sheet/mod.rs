//! The character sheet: state authority plus the components that drive it.

pub mod sync;
mod view;

pub use sync::{InitialInputs, LayoutTicket, OverlayState, SummaryText, SyncController};
pub use view::StatSheet;
