pub mod engine;

pub use engine::{PollEngine, TickReport};
