// Module exports for models

pub mod display;
pub mod event;
pub mod geometry;
pub mod segment;
pub mod settings;
