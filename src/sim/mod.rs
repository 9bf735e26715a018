pub mod carbon;
pub mod hvac;
pub mod params;
pub mod report;
pub mod series;
pub mod simulation;
pub mod thermal;
pub mod thermostat;
