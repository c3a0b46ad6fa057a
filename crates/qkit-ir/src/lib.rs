//! qkit circuit model
//!
//! The data structures the qkit tools operate on: qubit indices, native gate
//! kinds with their capability table, gate matrices, instructions and an
//! ordered [`Circuit`] with operand validation.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qkit_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.gate_count(), 2);
//! ```
//!
//! # Native Gates
//!
//! | Gate | Qubits | Parameters |
//! |------|--------|------------|
//! | `Id`, `X`, `Y`, `Z`, `H`, `S`, `T` | 1 | none |
//! | `P`, `Rx`, `Ry`, `Rz` | 1 | angle in [0, 2π) |
//! | `Rk` | 1 | level k in [1, 10) |
//! | `U` | 1 | three angles |
//! | `Swap`, `CX`, `CZ` | 2 | none |
//! | `CRk` | 2 | level k in [0, 10) |
//! | `Ccx` | 3 | none |
//!
//! The table is available at runtime through [`NativeKind::spec`].

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod unitary;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, GateKind, GateSpec, NativeGate, NativeKind, ParamDomain};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
pub use unitary::Unitary2x2;
