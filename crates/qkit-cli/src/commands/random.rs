//! Random command implementation.

use anyhow::{Context, Result};
use console::style;

use qkit_tools::{RandomCircuit, ToolsConfig};

use super::common::parse_gate_set;

/// Execute the random command.
pub fn execute(
    config: &ToolsConfig,
    qubits: Option<u32>,
    gates: Option<usize>,
    seed: Option<u64>,
    gate_set: &[String],
    json: bool,
) -> Result<()> {
    let kinds = parse_gate_set(gate_set)?;
    let num_qubits = qubits.unwrap_or(config.random.num_qubits);

    let mut generator = RandomCircuit::new(kinds, num_qubits)
        .with_gate_range(config.random.min_gates, config.random.max_gates);
    if let Some(n) = gates {
        generator = generator.with_num_gates(n);
    }
    let circuit = generator.generate_seeded(seed)?;

    if json {
        let text = serde_json::to_string_pretty(&circuit).context("Failed to serialize circuit")?;
        println!("{text}");
        return Ok(());
    }

    println!(
        "{} Random circuit: {} qubits, {} gates, depth {}",
        style("→").cyan().bold(),
        circuit.num_qubits(),
        circuit.gate_count(),
        circuit.depth()
    );
    if let Some(seed) = seed {
        println!("  Seed: {}", style(seed).yellow());
    }
    println!("{circuit}");

    Ok(())
}
