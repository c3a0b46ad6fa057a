//! Random circuit generation.
//!
//! Each draw picks a gate kind uniformly from the candidates, a target
//! uniformly from all qubits, the controls (or second operand) from the
//! remaining qubits without replacement, and every parameter from the domain
//! the capability table assigns to it.
//!
//! The random source is always passed in by the caller:
//!
//! ```rust
//! use qkit_ir::NativeKind;
//! use qkit_tools::random::RandomCircuit;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(123);
//! let circuit = RandomCircuit::new([NativeKind::U, NativeKind::Ccx], 3)
//!     .with_num_gates(4)
//!     .generate(&mut rng)
//!     .unwrap();
//! assert_eq!(circuit.gate_count(), 4);
//! ```

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use qkit_ir::{Circuit, NativeGate, NativeKind, ParamDomain, QubitId};

use crate::config::RandomConfig;
use crate::error::{ToolsError, ToolsResult};

/// Random circuit generator.
#[derive(Debug, Clone)]
pub struct RandomCircuit {
    gate_kinds: Vec<NativeKind>,
    num_qubits: u32,
    /// Fixed gate count; `None` draws one from `gate_range`.
    num_gates: Option<usize>,
    /// Half-open range the gate count is drawn from.
    gate_range: (usize, usize),
    name: String,
}

impl RandomCircuit {
    /// Generator over `gate_kinds` for a circuit of `num_qubits` qubits.
    pub fn new(gate_kinds: impl IntoIterator<Item = NativeKind>, num_qubits: u32) -> Self {
        let defaults = RandomConfig::default();
        Self {
            gate_kinds: gate_kinds.into_iter().collect(),
            num_qubits,
            num_gates: None,
            gate_range: (defaults.min_gates, defaults.max_gates),
            name: "random".into(),
        }
    }

    /// Generator over every native gate, sized and ranged by `config`.
    pub fn from_config(config: &RandomConfig) -> Self {
        Self::new(NativeKind::ALL.iter().copied(), config.num_qubits)
            .with_gate_range(config.min_gates, config.max_gates)
    }

    /// Fix the number of gates.
    #[must_use]
    pub fn with_num_gates(mut self, num_gates: usize) -> Self {
        self.num_gates = Some(num_gates);
        self
    }

    /// Draw the gate count from `min..max` when no count is fixed.
    #[must_use]
    pub fn with_gate_range(mut self, min: usize, max: usize) -> Self {
        self.gate_range = (min, max);
        self
    }

    /// Name of the generated circuit.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Check that every candidate gate fits in the circuit.
    pub fn validate(&self) -> ToolsResult<()> {
        if self.gate_kinds.is_empty() {
            return Err(ToolsError::EmptyGateSet);
        }
        if let Some(kind) = self
            .gate_kinds
            .iter()
            .find(|k| k.num_qubits() > self.num_qubits)
        {
            return Err(ToolsError::InsufficientQubits {
                gate: kind.name(),
                required: kind.num_qubits(),
                available: self.num_qubits,
            });
        }
        let (min, max) = self.gate_range;
        if self.num_gates.is_none() && min >= max {
            return Err(ToolsError::EmptyGateRange { min, max });
        }
        Ok(())
    }

    /// Generate a circuit, drawing every random choice from `rng`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> ToolsResult<Circuit> {
        self.validate()?;

        let num_gates = match self.num_gates {
            Some(n) => n,
            None => rng.gen_range(self.gate_range.0..self.gate_range.1),
        };

        let mut circuit = Circuit::with_size(self.name.clone(), self.num_qubits, 0);
        for _ in 0..num_gates {
            let (gate, qubits) = self.draw_gate(rng)?;
            trace!(gate = %gate, ?qubits, "drew gate");
            circuit.gate(gate, qubits)?;
        }

        debug!(
            num_qubits = self.num_qubits,
            num_gates,
            candidates = self.gate_kinds.len(),
            "generated random circuit"
        );
        Ok(circuit)
    }

    /// Generate with a generator seeded from `seed`, or from OS entropy when
    /// `seed` is `None`.
    pub fn generate_seeded(&self, seed: Option<u64>) -> ToolsResult<Circuit> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate(&mut rng)
    }

    fn draw_gate<R: Rng + ?Sized>(&self, rng: &mut R) -> ToolsResult<(NativeGate, Vec<QubitId>)> {
        let kind = *self
            .gate_kinds
            .choose(rng)
            .ok_or(ToolsError::EmptyGateSet)?;
        let spec = kind.spec();

        // Controls without replacement: redraw on a qubit already taken.
        let width = spec.num_qubits as usize;
        let mut qubits = Vec::with_capacity(width);
        let target = QubitId(rng.gen_range(0..self.num_qubits));
        while qubits.len() + 1 < width {
            let control = QubitId(rng.gen_range(0..self.num_qubits));
            if control != target && !qubits.contains(&control) {
                qubits.push(control);
            }
        }
        qubits.push(target);

        let params: Vec<f64> = spec
            .params
            .iter()
            .map(|domain| match *domain {
                ParamDomain::Angle => rng.gen_range(0.0..ParamDomain::ANGLE_MAX),
                ParamDomain::Level { min, max } => f64::from(rng.gen_range(min..max)),
            })
            .collect();

        Ok((NativeGate::from_params(kind, &params)?, qubits))
    }
}

/// Build a circuit of randomly chosen gates.
///
/// When `num_gates` is `None` the count is drawn uniformly from `[5, 10)`.
/// Fails before drawing anything when a candidate gate needs more qubits
/// than `num_qubits`.
pub fn random_circuit<R: Rng + ?Sized>(
    gate_kinds: &[NativeKind],
    num_qubits: u32,
    num_gates: Option<usize>,
    rng: &mut R,
) -> ToolsResult<Circuit> {
    let mut generator = RandomCircuit::new(gate_kinds.iter().copied(), num_qubits);
    if let Some(n) = num_gates {
        generator = generator.with_num_gates(n);
    }
    generator.generate(rng)
}
