//! Gate kinds, the native gate capability table, and gate instances.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::unitary::Unitary2x2;

/// Domain a gate parameter is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDomain {
    /// A real angle in `[0, 2π)`.
    Angle,
    /// An integer level in `[min, max)`.
    Level {
        /// Inclusive lower bound.
        min: u32,
        /// Exclusive upper bound.
        max: u32,
    },
}

impl ParamDomain {
    /// Upper bound of an angle domain.
    pub const ANGLE_MAX: f64 = TAU;
}

/// Static capabilities of a native gate kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSpec {
    /// Lower-case gate name.
    pub name: &'static str,
    /// Total number of qubits (controls + targets).
    pub num_qubits: u32,
    /// Number of leading control qubits.
    pub num_controls: u32,
    /// Parameters, in constructor order.
    pub params: &'static [ParamDomain],
}

const NO_PARAMS: &[ParamDomain] = &[];
const ONE_ANGLE: &[ParamDomain] = &[ParamDomain::Angle];
const THREE_ANGLES: &[ParamDomain] = &[ParamDomain::Angle, ParamDomain::Angle, ParamDomain::Angle];
const RK_LEVEL: &[ParamDomain] = &[ParamDomain::Level { min: 1, max: 10 }];
const CRK_LEVEL: &[ParamDomain] = &[ParamDomain::Level { min: 0, max: 10 }];

const fn spec(
    name: &'static str,
    num_qubits: u32,
    num_controls: u32,
    params: &'static [ParamDomain],
) -> GateSpec {
    GateSpec {
        name,
        num_qubits,
        num_controls,
        params,
    }
}

/// Tag for each native gate kind, without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeKind {
    /// Identity.
    Id,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
    /// S gate.
    S,
    /// T gate.
    T,
    /// Phase gate P(λ).
    P,
    /// X rotation.
    Rx,
    /// Y rotation.
    Ry,
    /// Z rotation.
    Rz,
    /// Phase gate with angle 2π/2^k.
    Rk,
    /// Universal single-qubit gate.
    U,
    /// SWAP.
    Swap,
    /// CNOT.
    CX,
    /// Controlled-Z.
    CZ,
    /// Controlled Rk.
    CRk,
    /// Toffoli.
    Ccx,
}

impl NativeKind {
    /// Every native gate kind.
    pub const ALL: &'static [NativeKind] = &[
        NativeKind::Id,
        NativeKind::X,
        NativeKind::Y,
        NativeKind::Z,
        NativeKind::H,
        NativeKind::S,
        NativeKind::T,
        NativeKind::P,
        NativeKind::Rx,
        NativeKind::Ry,
        NativeKind::Rz,
        NativeKind::Rk,
        NativeKind::U,
        NativeKind::Swap,
        NativeKind::CX,
        NativeKind::CZ,
        NativeKind::CRk,
        NativeKind::Ccx,
    ];

    /// Capability table entry for this kind.
    pub const fn spec(self) -> GateSpec {
        match self {
            NativeKind::Id => spec("id", 1, 0, NO_PARAMS),
            NativeKind::X => spec("x", 1, 0, NO_PARAMS),
            NativeKind::Y => spec("y", 1, 0, NO_PARAMS),
            NativeKind::Z => spec("z", 1, 0, NO_PARAMS),
            NativeKind::H => spec("h", 1, 0, NO_PARAMS),
            NativeKind::S => spec("s", 1, 0, NO_PARAMS),
            NativeKind::T => spec("t", 1, 0, NO_PARAMS),
            NativeKind::P => spec("p", 1, 0, ONE_ANGLE),
            NativeKind::Rx => spec("rx", 1, 0, ONE_ANGLE),
            NativeKind::Ry => spec("ry", 1, 0, ONE_ANGLE),
            NativeKind::Rz => spec("rz", 1, 0, ONE_ANGLE),
            NativeKind::Rk => spec("rk", 1, 0, RK_LEVEL),
            NativeKind::U => spec("u", 1, 0, THREE_ANGLES),
            NativeKind::Swap => spec("swap", 2, 0, NO_PARAMS),
            NativeKind::CX => spec("cx", 2, 1, NO_PARAMS),
            NativeKind::CZ => spec("cz", 2, 1, NO_PARAMS),
            NativeKind::CRk => spec("crk", 2, 1, CRK_LEVEL),
            NativeKind::Ccx => spec("ccx", 3, 2, NO_PARAMS),
        }
    }

    /// Gate name.
    #[inline]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Number of qubits the gate acts on.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        self.spec().num_qubits
    }

    /// Look up a kind by its name (case-insensitive).
    ///
    /// A few common aliases are accepted: `cnot`, `toffoli`/`tof`, `i`.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let canonical = match lower.as_str() {
            "cnot" => "cx",
            "toffoli" | "tof" => "ccx",
            "i" => "id",
            other => other,
        };
        Self::ALL.iter().copied().find(|k| k.name() == canonical)
    }
}

impl fmt::Display for NativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A native gate with concrete parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NativeGate {
    /// Identity.
    Id,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
    /// S gate.
    S,
    /// T gate.
    T,
    /// Phase gate P(λ).
    P(f64),
    /// X rotation.
    Rx(f64),
    /// Y rotation.
    Ry(f64),
    /// Z rotation.
    Rz(f64),
    /// Phase gate P(2π/2^k).
    Rk(u32),
    /// Universal gate U(θ, φ, λ).
    U(f64, f64, f64),
    /// SWAP.
    Swap,
    /// CNOT (control, target).
    CX,
    /// Controlled-Z (control, target).
    CZ,
    /// Controlled Rk (control, target).
    CRk(u32),
    /// Toffoli (control, control, target).
    Ccx,
}

impl NativeGate {
    /// The kind tag of this gate.
    pub fn kind(&self) -> NativeKind {
        match self {
            NativeGate::Id => NativeKind::Id,
            NativeGate::X => NativeKind::X,
            NativeGate::Y => NativeKind::Y,
            NativeGate::Z => NativeKind::Z,
            NativeGate::H => NativeKind::H,
            NativeGate::S => NativeKind::S,
            NativeGate::T => NativeKind::T,
            NativeGate::P(_) => NativeKind::P,
            NativeGate::Rx(_) => NativeKind::Rx,
            NativeGate::Ry(_) => NativeKind::Ry,
            NativeGate::Rz(_) => NativeKind::Rz,
            NativeGate::Rk(_) => NativeKind::Rk,
            NativeGate::U(..) => NativeKind::U,
            NativeGate::Swap => NativeKind::Swap,
            NativeGate::CX => NativeKind::CX,
            NativeGate::CZ => NativeKind::CZ,
            NativeGate::CRk(_) => NativeKind::CRk,
            NativeGate::Ccx => NativeKind::Ccx,
        }
    }

    /// Build a gate of `kind` from parameter values in constructor order.
    ///
    /// Level parameters are truncated to integers.
    pub fn from_params(kind: NativeKind, params: &[f64]) -> IrResult<Self> {
        let expected = kind.spec().params.len();
        if params.len() != expected {
            return Err(IrError::ParameterCountMismatch {
                gate_name: kind.name().to_string(),
                expected,
                got: params.len(),
            });
        }
        let level = |v: f64| v.max(0.0) as u32;
        Ok(match kind {
            NativeKind::Id => NativeGate::Id,
            NativeKind::X => NativeGate::X,
            NativeKind::Y => NativeGate::Y,
            NativeKind::Z => NativeGate::Z,
            NativeKind::H => NativeGate::H,
            NativeKind::S => NativeGate::S,
            NativeKind::T => NativeGate::T,
            NativeKind::P => NativeGate::P(params[0]),
            NativeKind::Rx => NativeGate::Rx(params[0]),
            NativeKind::Ry => NativeGate::Ry(params[0]),
            NativeKind::Rz => NativeGate::Rz(params[0]),
            NativeKind::Rk => NativeGate::Rk(level(params[0])),
            NativeKind::U => NativeGate::U(params[0], params[1], params[2]),
            NativeKind::Swap => NativeGate::Swap,
            NativeKind::CX => NativeGate::CX,
            NativeKind::CZ => NativeGate::CZ,
            NativeKind::CRk => NativeGate::CRk(level(params[0])),
            NativeKind::Ccx => NativeGate::Ccx,
        })
    }

    /// Gate name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.kind().num_qubits()
    }

    /// Parameter values in constructor order.
    pub fn params(&self) -> Vec<f64> {
        match self {
            NativeGate::P(v) | NativeGate::Rx(v) | NativeGate::Ry(v) | NativeGate::Rz(v) => {
                vec![*v]
            }
            NativeGate::Rk(k) | NativeGate::CRk(k) => vec![f64::from(*k)],
            NativeGate::U(theta, phi, lambda) => vec![*theta, *phi, *lambda],
            _ => vec![],
        }
    }

    /// The 2x2 matrix of a single-qubit gate, `None` otherwise.
    pub fn single_qubit_matrix(&self) -> Option<Unitary2x2> {
        Some(match self {
            NativeGate::Id => Unitary2x2::identity(),
            NativeGate::X => Unitary2x2::x(),
            NativeGate::Y => Unitary2x2::y(),
            NativeGate::Z => Unitary2x2::z(),
            NativeGate::H => Unitary2x2::h(),
            NativeGate::S => Unitary2x2::s(),
            NativeGate::T => Unitary2x2::t(),
            NativeGate::P(lambda) => Unitary2x2::p(*lambda),
            NativeGate::Rx(theta) => Unitary2x2::rx(*theta),
            NativeGate::Ry(theta) => Unitary2x2::ry(*theta),
            NativeGate::Rz(theta) => Unitary2x2::rz(*theta),
            NativeGate::Rk(k) => Unitary2x2::rk(*k),
            NativeGate::U(theta, phi, lambda) => Unitary2x2::u(*theta, *phi, *lambda),
            _ => return None,
        })
    }

    /// Full matrix of the gate over its own qubits, controls first.
    pub fn matrix(&self) -> Array2<Complex64> {
        if let Some(m) = self.single_qubit_matrix() {
            return m.to_array();
        }
        match self {
            NativeGate::Swap => {
                let mut m = Array2::zeros((4, 4));
                for (row, col) in [(0, 0), (1, 2), (2, 1), (3, 3)] {
                    m[[row, col]] = Complex64::new(1.0, 0.0);
                }
                m
            }
            NativeGate::CX => controlled(&Unitary2x2::x(), 1),
            NativeGate::CZ => controlled(&Unitary2x2::z(), 1),
            NativeGate::CRk(k) => controlled(&Unitary2x2::rk(*k), 1),
            NativeGate::Ccx => controlled(&Unitary2x2::x(), 2),
            _ => unreachable!("single-qubit gates handled above"),
        }
    }
}

/// Embed `u` as the target block of a gate with `num_controls` leading controls.
fn controlled(u: &Unitary2x2, num_controls: u32) -> Array2<Complex64> {
    let dim = 1usize << (num_controls + 1);
    let mut m = Array2::eye(dim);
    let off = dim - 2;
    let [a, b, c, d] = u.data;
    m[[off, off]] = a;
    m[[off, off + 1]] = b;
    m[[off + 1, off]] = c;
    m[[off + 1, off + 1]] = d;
    m
}

impl fmt::Display for NativeGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        match self {
            NativeGate::Rk(k) | NativeGate::CRk(k) => write!(f, "({k})"),
            _ => {
                let params = self.params();
                if params.is_empty() {
                    return Ok(());
                }
                let joined: Vec<String> = params.iter().map(|p| format!("{p:.4}")).collect();
                write!(f, "({})", joined.join(", "))
            }
        }
    }
}

/// A named gate defined by its unitary matrix.
///
/// The matrix always holds `(2^n)^2` entries, also after deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CustomGateData")]
pub struct CustomGate {
    /// The name of the gate.
    name: String,
    /// The number of qubits it operates on.
    num_qubits: u32,
    /// Unitary matrix, row-major, 2^n × 2^n.
    matrix: Vec<Complex64>,
}

#[derive(Deserialize)]
struct CustomGateData {
    name: String,
    num_qubits: u32,
    matrix: Vec<Complex64>,
}

impl TryFrom<CustomGateData> for CustomGate {
    type Error = IrError;

    fn try_from(data: CustomGateData) -> IrResult<Self> {
        Self::new(data.name, data.num_qubits, data.matrix)
    }
}

impl CustomGate {
    /// Create a custom gate from a row-major matrix.
    pub fn new(name: impl Into<String>, num_qubits: u32, matrix: Vec<Complex64>) -> IrResult<Self> {
        let name = name.into();
        check_matrix_len(&name, num_qubits, matrix.len())?;
        Ok(Self {
            name,
            num_qubits,
            matrix,
        })
    }

    /// Create a custom gate from a square `ndarray` matrix.
    pub fn from_array(name: impl Into<String>, matrix: &Array2<Complex64>) -> IrResult<Self> {
        let name = name.into();
        let dim = matrix.nrows();
        if !dim.is_power_of_two() || matrix.ncols() != dim {
            return Err(IrError::InvalidMatrix {
                gate_name: name,
                expected: dim.next_power_of_two().pow(2),
                got: matrix.len(),
            });
        }
        let num_qubits = dim.trailing_zeros();
        Self::new(name, num_qubits, matrix.iter().copied().collect())
    }

    /// The name of the gate.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of qubits it operates on.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Row-major matrix entries.
    pub fn matrix_entries(&self) -> &[Complex64] {
        &self.matrix
    }

    /// The matrix as an owned `ndarray` matrix.
    pub fn to_array(&self) -> Array2<Complex64> {
        let dim = 1usize << self.num_qubits;
        Array2::from_shape_fn((dim, dim), |(i, j)| self.matrix[i * dim + j])
    }

    /// Replace the matrix, keeping the gate width.
    pub fn set_matrix(&mut self, matrix: &Array2<Complex64>) -> IrResult<()> {
        check_matrix_len(&self.name, self.num_qubits, matrix.len())?;
        self.matrix = matrix.iter().copied().collect();
        Ok(())
    }
}

fn check_matrix_len(name: &str, num_qubits: u32, len: usize) -> IrResult<()> {
    // Saturates for widths whose matrix could never be allocated.
    let expected = num_qubits
        .checked_mul(2)
        .and_then(|bits| 1usize.checked_shl(bits))
        .unwrap_or(usize::MAX);
    if len != expected {
        return Err(IrError::InvalidMatrix {
            gate_name: name.to_string(),
            expected,
            got: len,
        });
    }
    Ok(())
}

/// A gate, either native or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A native gate with known semantics.
    Native(NativeGate),
    /// A gate defined by an explicit matrix.
    Custom(CustomGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Native(g) => g.name(),
            GateKind::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Native(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits,
        }
    }

    /// Number of leading control qubits. Custom gates have none.
    pub fn num_controls(&self) -> u32 {
        match self {
            GateKind::Native(g) => g.kind().spec().num_controls,
            GateKind::Custom(_) => 0,
        }
    }

    /// Full matrix of the gate over its own qubits.
    pub fn matrix(&self) -> Array2<Complex64> {
        match self {
            GateKind::Native(g) => g.matrix(),
            GateKind::Custom(g) => g.to_array(),
        }
    }

    /// 2x2 matrix when the gate acts on a single qubit.
    pub fn single_qubit_matrix(&self) -> Option<Unitary2x2> {
        match self {
            GateKind::Native(g) => g.single_qubit_matrix(),
            GateKind::Custom(g) if g.num_qubits == 1 => Unitary2x2::from_slice(&g.matrix),
            GateKind::Custom(_) => None,
        }
    }
}

/// A gate with associated metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// Optional label for the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a gate from a native gate.
    pub fn native(gate: NativeGate) -> Self {
        Self {
            kind: GateKind::Native(gate),
            label: None,
        }
    }

    /// Create a gate from a custom gate.
    pub fn custom(gate: CustomGate) -> Self {
        Self {
            kind: GateKind::Custom(gate),
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// Whether the gate acts on exactly one qubit.
    pub fn is_single_qubit(&self) -> bool {
        self.num_qubits() == 1
    }
}

impl From<NativeGate> for Gate {
    fn from(gate: NativeGate) -> Self {
        Gate::native(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::custom(gate)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            GateKind::Native(g) => write!(f, "{g}"),
            GateKind::Custom(g) => write!(f, "{}", g.name),
        }
    }
}
