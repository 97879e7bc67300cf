// Schedule Layout Library
// Exports all modules for testing and reuse

pub mod models;
pub mod services;
pub mod utils;

pub use services::layout::{FrameLayout, LayoutEngine, ViewportState};
pub use utils::date::DayCalendar;
