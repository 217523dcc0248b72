//! Telemetry module - readings, plants, and metric selection

mod metric;
mod plant;
mod reading;
mod simulator;

pub use metric::Metric;
pub use plant::Plant;
pub use reading::Reading;
pub use simulator::PlantSimulator;
