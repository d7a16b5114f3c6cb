pub mod sample;
pub mod status;

pub use sample::{AreaStats, HistoryPoint, Sample};
pub use status::{ConnectionStatus, OccupancyLevel};
