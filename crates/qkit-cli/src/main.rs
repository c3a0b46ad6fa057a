//! qkit Command-Line Interface
//!
//! Generate random circuits, print their reference matrices, render state
//! vectors in ket notation and decompose single-qubit unitaries.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{common, decompose, gates, ket, matrix, random, version};

/// qkit - random circuits, reference matrices and display helpers
#[derive(Parser)]
#[command(name = "qkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file (defaults come from QKIT_* variables)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random circuit
    Random {
        /// Number of qubits
        #[arg(short, long)]
        qubits: Option<u32>,

        /// Number of gates (drawn from the configured range when omitted)
        #[arg(short, long)]
        gates: Option<usize>,

        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Comma-separated gate names to draw from (all native gates when omitted)
        #[arg(long, value_delimiter = ',')]
        gate_set: Vec<String>,

        /// Print the circuit as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the expected matrix of a random single-qubit-gate circuit
    Matrix {
        /// Number of qubits
        #[arg(short, long)]
        qubits: Option<u32>,

        /// Number of gates
        #[arg(short, long)]
        gates: Option<usize>,

        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Decimal places (overrides the configured precision)
        #[arg(short, long)]
        precision: Option<u32>,
    },

    /// Render a state vector in ket notation
    Ket {
        /// Amplitudes, e.g. 0.5 -1j 0.5+0.5j
        #[arg(required = true, allow_hyphen_values = true)]
        amplitudes: Vec<String>,
    },

    /// Decompose the single-qubit unitary e^{i·phase}·U(θ, φ, λ) into the u + cx basis
    Decompose {
        /// Polar angle θ
        #[arg(long, allow_hyphen_values = true)]
        theta: f64,

        /// Azimuthal angle φ
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        phi: f64,

        /// Azimuthal angle λ
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        lambda: f64,

        /// Extra global phase applied to the matrix
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        phase: f64,
    },

    /// List native gates and their parameter domains
    Gates,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = common::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Random {
            qubits,
            gates,
            seed,
            gate_set,
            json,
        } => random::execute(&config, qubits, gates, seed, &gate_set, json),
        Commands::Matrix {
            qubits,
            gates,
            seed,
            precision,
        } => matrix::execute(&config, qubits, gates, seed, precision),
        Commands::Ket { amplitudes } => ket::execute(&config, &amplitudes),
        Commands::Decompose {
            theta,
            phi,
            lambda,
            phase,
        } => decompose::execute(theta, phi, lambda, phase),
        Commands::Gates => {
            gates::execute();
            Ok(())
        }
        Commands::Version => {
            version::execute();
            Ok(())
        }
    });

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
