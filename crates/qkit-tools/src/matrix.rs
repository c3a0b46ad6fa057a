//! Reference matrix computation for circuits of single-qubit gates.

use ndarray::Array2;
use ndarray::linalg::kron;
use num_complex::Complex64;
use tracing::debug;

use qkit_ir::{Circuit, Gate, IrError, QubitId, Unitary2x2};

use crate::error::{ToolsError, ToolsResult};

/// Widest circuit [`compute_expected_matrix`] accepts (a 4096 × 4096 matrix).
pub const MAX_MATRIX_QUBITS: u32 = 12;

fn check_width(num_qubits: u32) -> ToolsResult<()> {
    if num_qubits > MAX_MATRIX_QUBITS {
        return Err(ToolsError::TooManyQubits {
            num_qubits,
            max: MAX_MATRIX_QUBITS,
        });
    }
    Ok(())
}

/// Expand a single-qubit matrix acting on `target` to the full width
/// `I(2^t) ⊗ U ⊗ I(2^(n-t-1))`.
///
/// Fails when `target` is outside the circuit or the width exceeds
/// [`MAX_MATRIX_QUBITS`].
pub fn expand_single_qubit(
    gate: &Unitary2x2,
    target: QubitId,
    num_qubits: u32,
) -> ToolsResult<Array2<Complex64>> {
    check_width(num_qubits)?;
    if target.0 >= num_qubits {
        return Err(IrError::QubitNotFound {
            qubit: target,
            gate_name: None,
        }
        .into());
    }
    let before: Array2<Complex64> = Array2::eye(1 << target.0);
    let after: Array2<Complex64> = Array2::eye(1 << (num_qubits - target.0 - 1));
    Ok(kron(&before, &kron(&gate.to_array(), &after)))
}

/// Compute the unitary of a circuit made only of single-qubit gates.
///
/// Gates are taken in reverse program order, each expanded to the full
/// circuit width and right-multiplied into the accumulator, which yields
/// `M_last · … · M_first`. Measurements and barriers are ignored.
///
/// Fails with [`ToolsError::UnsupportedGate`] on the first gate that acts on
/// more than one qubit, and with [`ToolsError::TooManyQubits`] before
/// allocating anything for circuits wider than [`MAX_MATRIX_QUBITS`].
/// A gate whose operands are out of range fails with [`ToolsError::Ir`].
pub fn compute_expected_matrix(circuit: &Circuit) -> ToolsResult<Array2<Complex64>> {
    let num_qubits = circuit.num_qubits();
    check_width(num_qubits)?;
    let dim = 1usize << num_qubits;
    let mut result: Array2<Complex64> = Array2::eye(dim);

    let gates: Vec<(&Gate, &[QubitId])> = circuit.gates().collect();
    for (gate, qubits) in gates.into_iter().rev() {
        let matrix = gate
            .kind
            .single_qubit_matrix()
            .ok_or_else(|| ToolsError::UnsupportedGate {
                name: gate.name().to_string(),
                num_qubits: gate.num_qubits(),
            })?;
        let &[target] = qubits else {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: 1,
                got: qubits.len() as u32,
            }
            .into());
        };
        if target.0 >= num_qubits {
            return Err(IrError::QubitNotFound {
                qubit: target,
                gate_name: Some(gate.name().to_string()),
            }
            .into());
        }
        let expanded = expand_single_qubit(&matrix, target, num_qubits)?;
        result = result.dot(&expanded);
    }

    debug!(dim, gates = circuit.gate_count(), "computed expected matrix");
    Ok(result)
}

/// Whether `matrix` is square and `M·M† = I` entry-wise within `atol`.
pub fn is_unitary(matrix: &Array2<Complex64>, atol: f64) -> bool {
    if !matrix.is_square() {
        return false;
    }
    let dagger = matrix.t().mapv(|v| v.conj());
    let product = matrix.dot(&dagger);
    product.indexed_iter().all(|((i, j), v)| {
        let expected = if i == j { 1.0 } else { 0.0 };
        (v - Complex64::new(expected, 0.0)).norm() <= atol
    })
}

/// Entry-wise comparison of two matrices within `atol`.
pub fn allclose(a: &Array2<Complex64>, b: &Array2<Complex64>, atol: f64) -> bool {
    a.dim() == b.dim() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() <= atol)
}
