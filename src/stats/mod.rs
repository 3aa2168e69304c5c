//! Outage statistics derived from the event log.
//!
//! Everything here is pure: same events and window in, same figures out.

mod durations;
mod periods;
mod window;

pub use durations::*;
pub use periods::*;
pub use window::*;
