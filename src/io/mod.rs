pub mod results;
pub mod weather;

pub use results::{read_trajectory_csv, write_carbon_csv, write_trajectory_csv};
pub use weather::read_weather_csv;
