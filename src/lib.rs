pub mod io;
pub mod sim;
pub mod units;

// Prelude
pub use sim::params::SimulationParams;
pub use sim::series::OutdoorSeries;
pub use sim::simulation::{TimestepRecord, Trajectory, run_simulation};
pub use sim::thermostat::Mode;
