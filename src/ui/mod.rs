pub mod draw;
pub mod events;

pub use events::{ConfigSubmission, EventHandler, EventOutcome};
