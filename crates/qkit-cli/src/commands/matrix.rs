//! Matrix command implementation.

use anyhow::Result;
use console::style;

use qkit_ir::NativeKind;
use qkit_tools::display::clean_matrix_with_precision;
use qkit_tools::{RandomCircuit, ToolsConfig, compute_expected_matrix};

/// Execute the matrix command.
pub fn execute(
    config: &ToolsConfig,
    qubits: Option<u32>,
    gates: Option<usize>,
    seed: Option<u64>,
    precision: Option<u32>,
) -> Result<()> {
    let num_qubits = qubits.unwrap_or(config.random.num_qubits);
    let precision = precision.unwrap_or(config.display.precision);

    let single_qubit = NativeKind::ALL
        .iter()
        .copied()
        .filter(|k| k.num_qubits() == 1);
    let mut generator = RandomCircuit::new(single_qubit, num_qubits)
        .with_gate_range(config.random.min_gates, config.random.max_gates);
    if let Some(n) = gates {
        generator = generator.with_num_gates(n);
    }
    let circuit = generator.generate_seeded(seed)?;

    println!("{circuit}");
    println!();

    let matrix = compute_expected_matrix(&circuit)?;
    println!(
        "{} Expected matrix ({}x{}):",
        style("✓").green().bold(),
        matrix.nrows(),
        matrix.ncols()
    );
    println!("{}", clean_matrix_with_precision(&matrix, precision));

    Ok(())
}
