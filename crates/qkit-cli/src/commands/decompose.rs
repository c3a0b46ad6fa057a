//! Decompose command implementation.

use anyhow::Result;
use console::style;
use num_complex::Complex64;

use qkit_ir::{QubitId, Unitary2x2};
use qkit_tools::decompose::custom_unitary_instruction;
use qkit_tools::display::clean_matrix;
use qkit_tools::{EulerTranspiler, replace_custom_gate};

/// Execute the decompose command.
pub fn execute(theta: f64, phi: f64, lambda: f64, phase: f64) -> Result<()> {
    let unitary = Unitary2x2::u(theta, phi, lambda).scale(Complex64::from_polar(1.0, phase));
    let matrix = unitary.to_array();

    println!("{} Decomposing:", style("→").cyan().bold());
    println!("{}", clean_matrix(&matrix));
    println!();

    let instruction = custom_unitary_instruction("unitary", &matrix, [QubitId(0)])?;
    let (circuit, global_phase) = replace_custom_gate(&EulerTranspiler, &instruction, 1)?;

    println!("{} Decomposition complete", style("✓").green().bold());
    for inst in circuit.instructions() {
        println!("  {inst}");
    }
    println!("  Global phase: {}", style(format!("{global_phase:.6}")).yellow());

    Ok(())
}
