//! Ket command implementation.

use anyhow::Result;
use ndarray::Array1;

use qkit_tools::ToolsConfig;
use qkit_tools::display::state_vector_ket_shape_with;

use super::common::parse_complex;

/// Execute the ket command.
pub fn execute(config: &ToolsConfig, amplitudes: &[String]) -> Result<()> {
    let values = amplitudes
        .iter()
        .map(|a| parse_complex(a))
        .collect::<Result<Vec<_>>>()?;
    let sv = Array1::from(values);

    let norm: f64 = sv.iter().map(|v| v.norm_sqr()).sum();
    if (norm - 1.0).abs() > 1e-6 {
        tracing::warn!(norm, "state vector is not normalized");
    }

    println!(
        "{}",
        state_vector_ket_shape_with(&sv, config.display.ket_precision)?
    );
    Ok(())
}
