// Scroll coordination
// Settled-position notifications and staged programmatic scrolling

mod debounce;
mod sequencer;

pub use debounce::Debouncer;
pub use sequencer::{ScrollCommand, ScrollSequencer, ScrollTarget, ScrollTicket};
