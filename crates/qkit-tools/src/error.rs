//! Error types for the tools crate.

use thiserror::Error;

use crate::decompose::TranspileError;

/// Errors produced by the qkit tools.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ToolsError {
    /// A candidate gate needs more qubits than the circuit has.
    #[error("number of qubits too low for gate '{gate}': needs {required}, circuit has {available}")]
    InsufficientQubits {
        /// Name of the offending gate kind.
        gate: &'static str,
        /// Qubits the gate acts on.
        required: u32,
        /// Qubits in the circuit.
        available: u32,
    },

    /// No candidate gate kinds were given.
    #[error("gate set is empty, nothing to draw from")]
    EmptyGateSet,

    /// Gate-count range for random generation is empty.
    #[error("gate count range {min}..{max} is empty")]
    EmptyGateRange {
        /// Inclusive lower bound.
        min: usize,
        /// Exclusive upper bound.
        max: usize,
    },

    /// Only single-qubit gates can be expanded into a reference matrix.
    #[error("unsupported gate '{name}' ({num_qubits} qubits): only single-qubit gates can be computed")]
    UnsupportedGate {
        /// Gate name.
        name: String,
        /// Gate width.
        num_qubits: u32,
    },

    /// The circuit is too wide for a dense reference matrix.
    #[error("circuit has {num_qubits} qubits, the reference matrix supports at most {max}")]
    TooManyQubits {
        /// Qubits in the circuit.
        num_qubits: u32,
        /// Widest circuit accepted.
        max: u32,
    },

    /// A state vector must be one-dimensional.
    #[error("input state should be a vector (1-dimensional), got {ndim} dimensions")]
    NotAVector {
        /// Number of dimensions of the input.
        ndim: usize,
    },

    /// A state vector must have a power-of-two length.
    #[error("input state should have a power of 2 size, got {len}")]
    NotPowerOfTwo {
        /// Length of the input.
        len: usize,
    },

    /// Decomposition was asked for an instruction with no matrix.
    #[error("instruction '{0}' is not a custom unitary gate")]
    NotCustomGate(String),

    /// Numerical decomposition failed.
    #[error("decomposition failed: {0}")]
    Decomposition(String),

    /// The transpiler rejected the circuit.
    #[error("transpilation failed: {0}")]
    Transpile(#[from] TranspileError),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qkit_ir::IrError),
}

/// Result type for tools operations.
pub type ToolsResult<T> = Result<T, ToolsError>;
