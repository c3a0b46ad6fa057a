//! Invariants of the random circuit generator across widths, gate sets and seeds.

use proptest::prelude::*;
use qkit_ir::{GateKind, NativeKind};
use qkit_tools::{RandomCircuit, ToolsError, random_circuit};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn arb_gate_set() -> impl Strategy<Value = Vec<NativeKind>> {
    prop::sample::subsequence(NativeKind::ALL.to_vec(), 1..=NativeKind::ALL.len())
}

// ---------------------------------------------------------------------------
// Valid configurations
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn valid_configurations_never_fail(
        kinds in arb_gate_set(),
        num_qubits in 3_u32..=6,
        num_gates in 0_usize..40,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let circuit = random_circuit(&kinds, num_qubits, Some(num_gates), &mut rng).unwrap();

        prop_assert_eq!(circuit.num_qubits(), num_qubits);
        prop_assert_eq!(circuit.gate_count(), num_gates);
        prop_assert_eq!(circuit.len(), num_gates);

        for inst in circuit.instructions() {
            let gate = inst.as_gate().unwrap();
            let GateKind::Native(native) = &gate.kind else {
                panic!("random circuits hold native gates only");
            };
            prop_assert!(kinds.contains(&native.kind()));
            prop_assert_eq!(inst.qubits.len() as u32, gate.num_qubits());
            for (i, q) in inst.qubits.iter().enumerate() {
                prop_assert!(q.0 < num_qubits);
                prop_assert!(!inst.qubits[..i].contains(q));
            }
            for c in inst.controls() {
                prop_assert!(!inst.targets().contains(c));
            }
        }
    }

    #[test]
    fn drawn_gate_count_stays_in_range(
        seed in any::<u64>(),
        min in 0_usize..5,
        span in 1_usize..5,
    ) {
        let circuit = RandomCircuit::new([NativeKind::H, NativeKind::CX], 2)
            .with_gate_range(min, min + span)
            .generate_seeded(Some(seed))
            .unwrap();
        prop_assert!((min..min + span).contains(&circuit.gate_count()));
    }

    #[test]
    fn narrow_circuits_reject_multi_qubit_kinds(
        kinds in arb_gate_set(),
        num_qubits in 0_u32..=1,
        seed in any::<u64>(),
    ) {
        prop_assume!(kinds.iter().any(|k| k.num_qubits() > 1) || num_qubits == 0);
        let mut rng = StdRng::seed_from_u64(seed);
        let err = random_circuit(&kinds, num_qubits, Some(3), &mut rng).unwrap_err();
        let is_insufficient = matches!(err, ToolsError::InsufficientQubits { .. });
        prop_assert!(is_insufficient);
    }
}

// ---------------------------------------------------------------------------
// Reproducibility
// ---------------------------------------------------------------------------

#[test]
fn same_seed_same_circuit() {
    let a = random_circuit(NativeKind::ALL, 4, Some(25), &mut StdRng::seed_from_u64(42)).unwrap();
    let b = random_circuit(NativeKind::ALL, 4, Some(25), &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_seeds_differ() {
    let a = random_circuit(NativeKind::ALL, 4, Some(25), &mut StdRng::seed_from_u64(1)).unwrap();
    let b = random_circuit(NativeKind::ALL, 4, Some(25), &mut StdRng::seed_from_u64(2)).unwrap();
    assert_ne!(a, b);
}

#[test]
fn shared_rng_advances_between_calls() {
    let mut rng = StdRng::seed_from_u64(5);
    let a = random_circuit(&[NativeKind::U], 2, Some(3), &mut rng).unwrap();
    let b = random_circuit(&[NativeKind::U], 2, Some(3), &mut rng).unwrap();
    assert_ne!(a, b);
}

// ---------------------------------------------------------------------------
// Operand layout
// ---------------------------------------------------------------------------

#[test]
fn toffoli_operands_are_controls_then_target() {
    let circuit = random_circuit(&[NativeKind::Ccx], 3, Some(30), &mut StdRng::seed_from_u64(3))
        .unwrap();
    for inst in circuit.instructions() {
        assert_eq!(inst.controls().len(), 2);
        assert_eq!(inst.targets().len(), 1);
    }
}
