mod viz_app;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cyclotron_core::{
    list_species, run_to_completion, ParametersConfig, SimulationParameters, TrajectoryEngine,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cyclotron")]
#[command(about = "Cyclotron - an interactive particle accelerator simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the particle species that can be accelerated
    Species,
    /// Run a simulation without a window until the particle leaves
    Run {
        #[command(flatten)]
        params: ParamArgs,
        /// Give up after this many batches
        #[arg(long, default_value_t = 100_000)]
        max_batches: usize,
    },
    /// Run a simulation, then print one replayed frame
    Frame {
        /// Frame index (0 is the first integration step)
        #[arg(allow_negative_numbers = true)]
        index: isize,
        #[command(flatten)]
        params: ParamArgs,
        #[arg(long, default_value_t = 100_000)]
        max_batches: usize,
    },
    /// Open the interactive simulator
    Gui {
        #[command(flatten)]
        params: ParamArgs,
    },
}

#[derive(Args, Clone)]
struct ParamArgs {
    /// YAML preset with simulation parameters; flags below override it
    #[arg(long)]
    params: Option<PathBuf>,
    #[arg(long)]
    species: Option<String>,
    /// Magnetic field in T
    #[arg(long)]
    field: Option<f64>,
    /// Accelerating voltage in V
    #[arg(long)]
    voltage: Option<f64>,
    /// Multiplier on the 1.5e5 m/s injection speed
    #[arg(long)]
    speed_factor: Option<f64>,
    /// Integration sub-steps per animation tick
    #[arg(long)]
    steps_per_tick: Option<u32>,
}

impl ParamArgs {
    fn resolve(&self) -> Result<SimulationParameters> {
        let mut config = match &self.params {
            Some(path) => ParametersConfig::load(path)?,
            None => ParametersConfig::default(),
        };
        if let Some(species) = &self.species {
            config.species = species.clone();
        }
        if let Some(field) = self.field {
            config.magnetic_field = field;
        }
        if let Some(voltage) = self.voltage {
            config.accelerating_voltage = voltage;
        }
        if let Some(factor) = self.speed_factor {
            config.initial_speed_factor = factor;
        }
        if let Some(steps) = self.steps_per_tick {
            config.steps_per_tick = steps;
        }
        Ok(config.to_parameters()?)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run_command(cli.command) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Species => {
            for species in list_species() {
                println!(
                    "{:<14} m = {:.3e} kg  q = {:.3e} C  {}",
                    species.name, species.mass, species.charge, species.description
                );
            }
            Ok(())
        }
        Commands::Run { params, max_batches } => {
            let params = params.resolve()?;
            let mut engine = TrajectoryEngine::new();
            let summary = run_to_completion(&mut engine, &params, max_batches);

            println!("species          = {}", params.species.name);
            println!("cyclotron freq   = {:.4} MHz", params.cyclotron_frequency() / 1e6);
            println!("finished         = {}", summary.finished);
            println!("batches          = {}", summary.batches);
            println!("steps            = {}", summary.steps);
            println!("gap crossings    = {}", summary.gap_crossings);
            println!("final radius     = {:.4} m", summary.final_position.length());
            println!("final speed      = {:.4e} m/s", summary.final_speed);
            println!("kinetic energy   = {:.3} MeV", summary.kinetic_energy_mev);
            Ok(())
        }
        Commands::Frame {
            index,
            params,
            max_batches,
        } => {
            let params = params.resolve()?;
            let mut engine = TrajectoryEngine::new();
            run_to_completion(&mut engine, &params, max_batches);

            let record = engine.replay(index)?;
            println!("frame            = {} / {}", record.index, engine.history_len() - 1);
            println!("position         = ({:.6}, {:.6}) m", record.position.x, record.position.y);
            println!("radius           = {:.6} m", record.position.length());
            println!("phase            = {}", record.phase().label());
            println!("gap direction    = {}", record.gap_direction.signum());
            println!("trajectory       = {} points", record.trajectory_x.len());
            Ok(())
        }
        Commands::Gui { params } => {
            let initial = params.resolve()?;
            viz_app::launch(initial, params.params)
        }
    }
}
