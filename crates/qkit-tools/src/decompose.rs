//! Custom unitary decomposition into `U` + `CX`.
//!
//! The heavy lifting is delegated to a [`Transpiler`]. The only logic here is
//! the recovery path: when the transpiler reports the two-qubit Weyl
//! decomposition singularity, the matrix is snapped to the closest unitary
//! and the transpilation is retried once.

use nalgebra::DMatrix;
use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

use qkit_ir::{Circuit, CustomGate, GateKind, Instruction};

use crate::error::{ToolsError, ToolsResult};

/// Basis gates a transpilation targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisGates {
    /// List of gate names in the basis.
    gates: Vec<String>,
}

impl BasisGates {
    /// Create a new basis gates set.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gates: gates.into_iter().map(Into::into).collect(),
        }
    }

    /// The `{u, cx}` basis custom unitaries are decomposed into.
    pub fn u_cx() -> Self {
        Self::new(["u", "cx"])
    }

    /// Check if a gate is in the basis.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Get the basis gates.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }
}

impl fmt::Display for BasisGates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.gates.join(", "))
    }
}

/// Errors reported by a [`Transpiler`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TranspileError {
    /// The two-qubit Weyl decomposition hit a numerical singularity,
    /// typically because the input matrix drifted away from unitarity.
    #[error("TwoQubitWeylDecomposition failed: {0}")]
    WeylSingularity(String),

    /// A gate cannot be expressed in the requested basis.
    #[error("gate '{gate}' cannot be expressed in basis {basis}")]
    Unsupported {
        /// Gate name.
        gate: String,
        /// The requested basis.
        basis: BasisGates,
    },

    /// Any other transpiler failure.
    #[error("{0}")]
    Other(String),
}

/// A routine that rewrites a circuit into a given basis.
///
/// Implementations record any phase they introduce in the returned circuit's
/// global phase.
pub trait Transpiler {
    /// Rewrite `circuit` using only gates from `basis`.
    fn transpile(&self, circuit: &Circuit, basis: &BasisGates) -> Result<Circuit, TranspileError>;
}

impl<T: Transpiler + ?Sized> Transpiler for &T {
    fn transpile(&self, circuit: &Circuit, basis: &BasisGates) -> Result<Circuit, TranspileError> {
        (**self).transpile(circuit, basis)
    }
}

/// Decompose a custom unitary instruction into `U` and `CX` gates.
///
/// `num_qubits` is the width of the circuit the instruction came from. Returns
/// the decomposed circuit together with the global phase the decomposition
/// introduced, so callers can correct state vectors afterwards.
///
/// On [`TranspileError::WeylSingularity`] the matrix is replaced by its
/// closest unitary and the transpilation retried once. Every other error, and
/// any error from the retry, is returned as is.
pub fn replace_custom_gate<T: Transpiler + ?Sized>(
    transpiler: &T,
    custom_unitary: &Instruction,
    num_qubits: u32,
) -> ToolsResult<(Circuit, f64)> {
    let Some(GateKind::Custom(custom)) = custom_unitary.as_gate().map(|g| &g.kind) else {
        return Err(ToolsError::NotCustomGate(custom_unitary.name().to_string()));
    };

    let basis = BasisGates::u_cx();
    let circuit = wrap_instruction(custom_unitary.clone(), num_qubits)?;

    let transpiled = match transpiler.transpile(&circuit, &basis) {
        Ok(transpiled) => transpiled,
        Err(TranspileError::WeylSingularity(reason)) => {
            warn!(
                gate = %custom.name(),
                %reason,
                "Weyl decomposition failed, retrying with the closest unitary"
            );
            let fixed = closest_unitary(&custom.to_array())?;
            let mut patched = custom.clone();
            patched.set_matrix(&fixed)?;
            let mut instruction = custom_unitary.clone();
            if let Some(gate) = instruction.as_gate_mut() {
                gate.kind = GateKind::Custom(patched);
            }
            let retry = wrap_instruction(instruction, num_qubits)?;
            transpiler.transpile(&retry, &basis)?
        }
        Err(e) => return Err(e.into()),
    };

    let global_phase = transpiled.global_phase();
    debug!(
        gate = %custom.name(),
        gates = transpiled.gate_count(),
        global_phase,
        "decomposed custom unitary"
    );
    Ok((transpiled, global_phase))
}

fn wrap_instruction(instruction: Instruction, num_qubits: u32) -> ToolsResult<Circuit> {
    let mut circuit = Circuit::with_size("transpilation", num_qubits, 0);
    circuit.apply(instruction)?;
    Ok(circuit)
}

/// The unitary closest to `matrix` in Frobenius norm.
///
/// With the SVD `A = V·Σ·Wᴴ` this is the polar factor `V·Wᴴ`.
pub fn closest_unitary(matrix: &Array2<Complex64>) -> ToolsResult<Array2<Complex64>> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(ToolsError::Decomposition(format!(
            "closest unitary needs a square matrix, got {rows}x{cols}"
        )));
    }

    let a = DMatrix::<Complex64>::from_fn(rows, cols, |i, j| matrix[[i, j]]);
    let svd = a.svd(true, true);
    let u = svd
        .u
        .ok_or_else(|| ToolsError::Decomposition("SVD did not produce U".into()))?;
    let v_t = svd
        .v_t
        .ok_or_else(|| ToolsError::Decomposition("SVD did not produce Vᴴ".into()))?;
    let polar = u * v_t;

    Ok(Array2::from_shape_fn((rows, cols), |(i, j)| polar[(i, j)]))
}

/// Built-in transpiler for single-qubit work.
///
/// Gates already in the basis pass through. Any other single-qubit gate,
/// native or custom, becomes one `U(θ, φ, λ)` through its ZYZ Euler angles,
/// and the leftover phase is added to the circuit's global phase. Multi-qubit
/// gates outside the basis are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerTranspiler;

impl Transpiler for EulerTranspiler {
    fn transpile(&self, circuit: &Circuit, basis: &BasisGates) -> Result<Circuit, TranspileError> {
        let ir = |e: qkit_ir::IrError| TranspileError::Other(e.to_string());
        let unsupported = |gate: &str| TranspileError::Unsupported {
            gate: gate.to_string(),
            basis: basis.clone(),
        };

        let mut out = Circuit::with_size(circuit.name(), circuit.num_qubits(), circuit.num_clbits());
        out.set_global_phase(circuit.global_phase());

        for inst in circuit.instructions() {
            let Some(gate) = inst.as_gate() else {
                out.apply(inst.clone()).map_err(ir)?;
                continue;
            };
            if matches!(gate.kind, GateKind::Native(_)) && basis.contains(gate.name()) {
                out.apply(inst.clone()).map_err(ir)?;
                continue;
            }

            let matrix = gate
                .kind
                .single_qubit_matrix()
                .ok_or_else(|| unsupported(gate.name()))?;
            if !basis.contains("u") {
                return Err(unsupported(gate.name()));
            }
            if !matrix.is_unitary() {
                return Err(TranspileError::Other(format!(
                    "matrix of '{}' is not unitary",
                    gate.name()
                )));
            }

            let &[qubit] = inst.qubits.as_slice() else {
                return Err(TranspileError::Other(format!(
                    "'{}' expects 1 qubit, got {}",
                    gate.name(),
                    inst.qubits.len()
                )));
            };
            let (theta, phi, lambda, phase) = matrix.u_decomposition();
            out.u(theta, phi, lambda, qubit).map_err(ir)?;
            out.add_global_phase(phase);
        }

        Ok(out)
    }
}

/// Build a custom unitary instruction on `qubits` from a square matrix.
pub fn custom_unitary_instruction(
    name: impl Into<String>,
    matrix: &Array2<Complex64>,
    qubits: impl IntoIterator<Item = qkit_ir::QubitId>,
) -> ToolsResult<Instruction> {
    let gate = CustomGate::from_array(name, matrix)?;
    Ok(Instruction::gate(gate, qubits))
}
