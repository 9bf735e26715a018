use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rczone::io::{read_trajectory_csv, read_weather_csv, write_carbon_csv, write_trajectory_csv};
use rczone::sim::carbon::{CarbonAnalysis, DEFAULT_EMISSIONS_FACTOR};
use rczone::sim::report::Summary;
use rczone::units::fahrenheit_delta_to_celsius;
use rczone::units::fahrenheit_to_celsius;
use rczone::{SimulationParams, run_simulation};

#[derive(Parser)]
#[command(name = "rczone")]
#[command(about = "Single-zone RC thermostat simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs the thermal simulation over a weather CSV
    Simulate {
        /// Weather CSV (DateTime + Temperature columns)
        #[arg(short, long)]
        weather: PathBuf,

        /// Output trajectory CSV
        #[arg(short, long, default_value = "sim_rc_thermostat.csv")]
        output: PathBuf,

        /// Simulation parameters as a JSON file; flags below override nothing
        /// when this is given
        #[arg(short, long)]
        params: Option<PathBuf>,

        /// Thermostat setpoint (°F)
        #[arg(long, default_value_t = 70.0)]
        setpoint_f: f64,

        /// Deadband width (°F)
        #[arg(long, default_value_t = 2.0)]
        deadband_f: f64,

        /// Initial indoor temperature (°F)
        #[arg(long, default_value_t = 70.0)]
        initial_f: f64,

        /// Envelope conductance UA (W/K)
        #[arg(long, default_value_t = 250.0)]
        ua: f64,

        /// Zone thermal capacitance (J/K)
        #[arg(long, default_value_t = 3.0e7)]
        capacitance: f64,

        /// Maximum heating capacity (W)
        #[arg(long, default_value_t = 12000.0)]
        max_heat: f64,

        /// Maximum cooling capacity (W)
        #[arg(long, default_value_t = 12000.0)]
        max_cool: f64,

        /// Internal gains (W)
        #[arg(long, default_value_t = 2000.0)]
        internal_gains: f64,

        /// Heating COP
        #[arg(long, default_value_t = 3.0)]
        cop: f64,

        /// Timestep (s)
        #[arg(long, default_value_t = 900.0)]
        dt: f64,
    },

    /// Adds electricity/CO2 columns for COP scenarios to a results CSV
    Carbon {
        /// Trajectory CSV produced by `simulate`
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV with carbon columns
        #[arg(short, long, default_value = "sim_with_carbon.csv")]
        output: PathBuf,

        /// COP scenarios to compare
        #[arg(long, num_args = 1.., default_values_t = [1.0, 3.0])]
        cops: Vec<f64>,

        /// Electricity emissions factor (kg CO2 per kWh)
        #[arg(long, default_value_t = DEFAULT_EMISSIONS_FACTOR)]
        emissions_factor: f64,

        /// Simulation timestep the trajectory was produced with (s)
        #[arg(long, default_value_t = 900.0)]
        dt: f64,
    },

    /// Prints an aggregate summary of a results CSV
    Report {
        /// Trajectory CSV produced by `simulate`
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            weather,
            output,
            params,
            setpoint_f,
            deadband_f,
            initial_f,
            ua,
            capacitance,
            max_heat,
            max_cool,
            internal_gains,
            cop,
            dt,
        } => {
            let params = match params {
                Some(path) => {
                    let content = std::fs::read_to_string(&path).with_context(|| {
                        format!("Failed to read params file: {}", path.display())
                    })?;
                    let p: SimulationParams = serde_json::from_str(&content)
                        .with_context(|| format!("Invalid params file: {}", path.display()))?;
                    p.validate()?;
                    p
                }
                None => SimulationParams::new(
                    fahrenheit_to_celsius(setpoint_f),
                    fahrenheit_delta_to_celsius(deadband_f),
                    fahrenheit_to_celsius(initial_f),
                    ua,
                    capacitance,
                    max_heat,
                    max_cool,
                    internal_gains,
                    cop,
                    dt,
                )?,
            };

            let series = read_weather_csv(&weather)?;
            tracing::info!(
                samples = series.len(),
                dt_s = params.dt_s,
                "loaded weather series"
            );

            let trajectory = run_simulation(&params, &series)?;
            write_trajectory_csv(&output, &trajectory)?;

            println!("Simulation finished. Results saved to: {}", output.display());
            println!(
                "Total heating electricity over window: {:.2} kWh (COP={})",
                trajectory.total_energy_kwh(),
                params.cop
            );
        }

        Commands::Carbon {
            input,
            output,
            cops,
            emissions_factor,
            dt,
        } => {
            let trajectory = read_trajectory_csv(&input)?;
            let analysis = CarbonAnalysis::from_trajectory(&trajectory, dt, &cops, emissions_factor)?;
            write_carbon_csv(&output, &trajectory, &analysis)?;
            println!("Saved: {}", output.display());

            println!("\n==== Carbon Summary (total over window) ====");
            for s in &analysis.scenarios {
                println!(
                    "COP={}: Elec={:.2} kWh, CO2={:.2} kg",
                    s.cop,
                    s.total_electricity_kwh(),
                    s.total_co2_kg()
                );
            }
            if let Some((saved_kg, saved_pct)) = analysis.co2_reduction() {
                println!("\nBest vs worst COP CO2 reduction: {saved_kg:.2} kg ({saved_pct:.1}%)");
            }
        }

        Commands::Report { input } => {
            let trajectory = read_trajectory_csv(&input)?;
            let summary = Summary::from_trajectory(&trajectory)?;
            println!("{summary}");
        }
    }

    Ok(())
}
