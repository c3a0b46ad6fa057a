//! qkit test and display tooling
//!
//! Helpers around the [`qkit_ir`] circuit model that test suites and
//! interactive sessions lean on:
//!
//! - [`random`]: random circuits over a chosen set of native gates
//! - [`matrix`]: the reference unitary of a circuit of single-qubit gates
//! - [`decompose`]: custom unitary decomposition into `U` + `CX` through an
//!   injected [`Transpiler`]
//! - [`display`]: Python-style rendering of amplitudes, vectors and matrices
//!
//! # Example: Random Circuit and its Matrix
//!
//! ```rust
//! use qkit_ir::NativeKind;
//! use qkit_tools::{compute_expected_matrix, display::clean_matrix, random_circuit};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let circuit = random_circuit(&[NativeKind::H, NativeKind::T], 2, Some(4), &mut rng).unwrap();
//!
//! let matrix = compute_expected_matrix(&circuit).unwrap();
//! assert_eq!(matrix.dim(), (4, 4));
//! println!("{}", clean_matrix(&matrix));
//! ```
//!
//! # Architecture
//!
//! ```text
//! RandomCircuit ──► Circuit ──► compute_expected_matrix ──► clean_matrix
//!                      │
//!                      └──► replace_custom_gate ──► dyn Transpiler ──► (Circuit, phase)
//! ```

pub mod config;
pub mod decompose;
pub mod display;
pub mod error;
pub mod matrix;
pub mod random;

pub use config::{ConfigError, DisplayConfig, RandomConfig, ToolsConfig};
pub use decompose::{
    BasisGates, EulerTranspiler, TranspileError, Transpiler, closest_unitary, replace_custom_gate,
};
pub use display::{clean_1d_array, clean_matrix, state_vector_ket_shape, with_sign};
pub use error::{ToolsError, ToolsResult};
pub use matrix::{MAX_MATRIX_QUBITS, compute_expected_matrix};
pub use random::{RandomCircuit, random_circuit};
