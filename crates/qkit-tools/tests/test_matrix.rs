//! Reference matrices checked against a direct state-vector evolution.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use proptest::prelude::*;
use qkit_ir::{Circuit, CustomGate, NativeKind, QubitId, Unitary2x2};
use qkit_tools::matrix::{allclose, is_unitary};
use qkit_tools::{MAX_MATRIX_QUBITS, ToolsError, compute_expected_matrix, random_circuit};
use rand::SeedableRng;
use rand::rngs::StdRng;

const SINGLE_QUBIT: &[NativeKind] = &[
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
];

/// Apply a 2x2 matrix to `target` of a state vector, qubit 0 being the most
/// significant bit of the basis index.
fn apply_single_qubit(state: &mut Array1<Complex64>, u: &Unitary2x2, target: u32, n: u32) {
    let m = u.to_array();
    let stride = 1usize << (n - target - 1);
    for i in 0..state.len() {
        if i & stride != 0 {
            continue;
        }
        let j = i | stride;
        let (a0, a1) = (state[i], state[j]);
        state[i] = m[[0, 0]] * a0 + m[[0, 1]] * a1;
        state[j] = m[[1, 0]] * a0 + m[[1, 1]] * a1;
    }
}

/// Build the circuit's unitary column by column by evolving basis states.
fn evolve_columns(circuit: &Circuit) -> Array2<Complex64> {
    let n = circuit.num_qubits();
    let dim = 1usize << n;
    let mut out = Array2::zeros((dim, dim));
    for col in 0..dim {
        let mut state = Array1::zeros(dim);
        state[col] = Complex64::new(1.0, 0.0);
        for (gate, qubits) in circuit.gates() {
            let u = gate.kind.single_qubit_matrix().unwrap();
            apply_single_qubit(&mut state, &u, qubits[0].0, n);
        }
        out.column_mut(col).assign(&state);
    }
    out
}

// ---------------------------------------------------------------------------
// Composition order
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn matches_state_vector_evolution(
        num_qubits in 1_u32..=4,
        num_gates in 0_usize..12,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let circuit = random_circuit(SINGLE_QUBIT, num_qubits, Some(num_gates), &mut rng).unwrap();

        let matrix = compute_expected_matrix(&circuit).unwrap();
        prop_assert!(is_unitary(&matrix, 1e-9));
        prop_assert!(allclose(&matrix, &evolve_columns(&circuit), 1e-9));
    }
}

#[test]
fn hadamard_on_each_qubit() {
    let mut circuit = Circuit::with_size("hh", 2, 0);
    circuit.h(QubitId(0)).unwrap();
    circuit.h(QubitId(1)).unwrap();
    let m = compute_expected_matrix(&circuit).unwrap();
    for v in m.iter() {
        assert!((v - Complex64::new(0.5, 0.0)).norm() < 1e-12 || (v + Complex64::new(0.5, 0.0)).norm() < 1e-12);
    }
    // |11⟩ row picks up the sign of both Hadamards
    assert!((m[[3, 3]] - Complex64::new(0.5, 0.0)).norm() < 1e-12);
    assert!((m[[3, 1]] + Complex64::new(0.5, 0.0)).norm() < 1e-12);
}

#[test]
fn single_qubit_custom_gate_counts() {
    let sx = ndarray::array![
        [Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5)],
        [Complex64::new(0.5, -0.5), Complex64::new(0.5, 0.5)],
    ];
    let mut circuit = Circuit::with_size("sx", 1, 0);
    circuit
        .unitary(CustomGate::from_array("sx", &sx).unwrap(), [QubitId(0)])
        .unwrap();
    circuit
        .unitary(CustomGate::from_array("sx", &sx).unwrap(), [QubitId(0)])
        .unwrap();
    let m = compute_expected_matrix(&circuit).unwrap();
    assert!(allclose(&m, &Unitary2x2::x().to_array(), 1e-12));
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[test]
fn any_multi_qubit_gate_fails() {
    for kind in [NativeKind::Swap, NativeKind::CX, NativeKind::CZ, NativeKind::CRk, NativeKind::Ccx] {
        let mut rng = StdRng::seed_from_u64(11);
        let circuit = random_circuit(&[kind], 3, Some(1), &mut rng).unwrap();
        let err = compute_expected_matrix(&circuit).unwrap_err();
        assert!(
            matches!(err, ToolsError::UnsupportedGate { ref name, .. } if name == kind.name()),
            "{kind}: {err}"
        );
    }
}

#[test]
fn wide_circuit_is_an_error_not_an_abort() {
    let err = compute_expected_matrix(&Circuit::with_size("wide", 64, 0)).unwrap_err();
    assert!(matches!(err, ToolsError::TooManyQubits { num_qubits: 64, .. }));
    assert!(err.to_string().contains("at most"));

    let mut rng = StdRng::seed_from_u64(5);
    let circuit = random_circuit(SINGLE_QUBIT, MAX_MATRIX_QUBITS + 1, Some(10), &mut rng).unwrap();
    let err = compute_expected_matrix(&circuit).unwrap_err();
    assert!(matches!(err, ToolsError::TooManyQubits { max: MAX_MATRIX_QUBITS, .. }));
}

#[test]
fn narrowed_circuit_json_does_not_reach_the_matrix() {
    let mut circuit = Circuit::with_size("narrowed", 3, 0);
    circuit.x(QubitId(2)).unwrap();
    let mut value = serde_json::to_value(&circuit).unwrap();
    value["num_qubits"] = serde_json::json!(2);
    assert!(serde_json::from_value::<Circuit>(value).is_err());

    let mut tampered = circuit.clone();
    tampered.instructions_mut()[0].qubits[0] = QubitId(3);
    let err = compute_expected_matrix(&tampered).unwrap_err();
    assert!(matches!(
        err,
        ToolsError::Ir(qkit_ir::IrError::QubitNotFound { qubit: QubitId(3), .. })
    ));
}
