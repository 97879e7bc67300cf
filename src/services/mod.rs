// Service module exports

pub mod layout;
pub mod schedule;
pub mod scroll;
pub mod settings;
