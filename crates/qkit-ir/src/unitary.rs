//! 2x2 unitary matrices for single-qubit gates.
//!
//! Every single-qubit native gate maps to a [`Unitary2x2`]. The ZYZ Euler
//! decomposition here is what turns an arbitrary one-qubit unitary back into
//! a `U(θ, φ, λ)` gate.

use ndarray::Array2;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Tolerance for floating point comparisons.
pub const EPSILON: f64 = 1e-10;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A 2x2 matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 matrix.
    pub const fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Diagonal matrix diag(a, d).
    pub const fn diag(a: Complex64, d: Complex64) -> Self {
        Self::new(a, ZERO, ZERO, d)
    }

    /// Build from a row-major slice of exactly four entries.
    pub fn from_slice(entries: &[Complex64]) -> Option<Self> {
        match entries {
            [a, b, c, d] => Some(Self::new(*a, *b, *c, *d)),
            _ => None,
        }
    }

    /// The identity matrix.
    pub const fn identity() -> Self {
        Self::diag(ONE, ONE)
    }

    /// Hadamard.
    pub fn h() -> Self {
        let s = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        Self::new(s, s, s, -s)
    }

    /// Pauli-X.
    pub const fn x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    /// Pauli-Y.
    pub const fn y() -> Self {
        Self::new(ZERO, Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0), ZERO)
    }

    /// Pauli-Z.
    pub const fn z() -> Self {
        Self::diag(ONE, Complex64::new(-1.0, 0.0))
    }

    /// S gate (sqrt(Z)).
    pub const fn s() -> Self {
        Self::diag(ONE, Complex64::new(0.0, 1.0))
    }

    /// T gate (fourth root of Z).
    pub fn t() -> Self {
        Self::p(PI / 4.0)
    }

    /// Phase gate P(λ) = diag(1, e^{iλ}).
    pub fn p(lambda: f64) -> Self {
        Self::diag(ONE, Complex64::from_polar(1.0, lambda))
    }

    /// Rk gate: P(2π / 2^k).
    pub fn rk(k: u32) -> Self {
        Self::p(2.0 * PI / 2f64.powi(k as i32))
    }

    /// Rotation around X.
    pub fn rx(theta: f64) -> Self {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let s = Complex64::new(0.0, -(theta / 2.0).sin());
        Self::new(c, s, s, c)
    }

    /// Rotation around Y.
    pub fn ry(theta: f64) -> Self {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let s = Complex64::new((theta / 2.0).sin(), 0.0);
        Self::new(c, -s, s, c)
    }

    /// Rotation around Z.
    pub fn rz(theta: f64) -> Self {
        Self::diag(
            Complex64::from_polar(1.0, -theta / 2.0),
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// Universal gate U(θ, φ, λ).
    pub fn u(theta: f64, phi: f64, lambda: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        )
    }

    /// Matrix product `self * other`.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Multiply every entry by a scalar.
    pub fn scale(&self, factor: Complex64) -> Self {
        Self {
            data: self.data.map(|v| v * factor),
        }
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        let [a, b, c, d] = self.data;
        Self::new(a.conj(), c.conj(), b.conj(), d.conj())
    }

    /// Entry-wise comparison within `atol`.
    pub fn approx_eq(&self, other: &Self, atol: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(x, y)| (x - y).norm() <= atol)
    }

    /// Whether `U·U†` is the identity to within 1e-8.
    pub fn is_unitary(&self) -> bool {
        self.mul(&self.dagger())
            .approx_eq(&Self::identity(), 1e-8)
    }

    /// Convert into an owned `ndarray` matrix.
    pub fn to_array(&self) -> Array2<Complex64> {
        let [a, b, c, d] = self.data;
        ndarray::array![[a, b], [c, d]]
    }

    /// Decompose into `e^{i·phase} · Rz(α) · Ry(β) · Rz(γ)`.
    ///
    /// Returns `(α, β, γ, phase)`.
    pub fn zyz_decomposition(&self) -> (f64, f64, f64, f64) {
        let [a, b, c, d] = self.data;

        let det = a * d - b * c;
        let global_phase = det.arg() / 2.0;

        // Strip the phase so the remaining matrix is in SU(2):
        // [[cos(β/2)·e^{-i(α+γ)/2}, -sin(β/2)·e^{-i(α-γ)/2}],
        //  [sin(β/2)·e^{ i(α-γ)/2},  cos(β/2)·e^{ i(α+γ)/2}]]
        let phase_factor = Complex64::from_polar(1.0, -global_phase);
        let a = a * phase_factor;
        let b = b * phase_factor;
        let c = c * phase_factor;

        let beta = 2.0 * a.norm().clamp(0.0, 1.0).acos();

        if beta.abs() < EPSILON {
            let half_sum = -a.arg();
            return (half_sum, 0.0, half_sum, global_phase);
        }

        if (beta - PI).abs() < EPSILON {
            let half_diff = -(-b).arg();
            return (half_diff, PI, -half_diff, global_phase);
        }

        let alpha_plus_gamma = -2.0 * a.arg();
        let alpha_minus_gamma = 2.0 * c.arg();
        let alpha = f64::midpoint(alpha_plus_gamma, alpha_minus_gamma);
        let gamma = (alpha_plus_gamma - alpha_minus_gamma) / 2.0;

        (alpha, beta, gamma, global_phase)
    }

    /// Decompose into `e^{i·phase} · U(θ, φ, λ)`.
    ///
    /// Returns `(θ, φ, λ, phase)`.
    pub fn u_decomposition(&self) -> (f64, f64, f64, f64) {
        let (alpha, beta, gamma, phase) = self.zyz_decomposition();
        // U(θ, φ, λ) = e^{i(φ+λ)/2} · Rz(φ) · Ry(θ) · Rz(λ)
        (beta, alpha, gamma, phase - (alpha + gamma) / 2.0)
    }

    /// Normalize an angle to [-π, π].
    pub fn normalize_angle(angle: f64) -> f64 {
        if !angle.is_finite() {
            return 0.0;
        }
        let mut a = angle.rem_euclid(2.0 * PI);
        if a > PI {
            a -= 2.0 * PI;
        }
        a
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_reconstructs(m: Unitary2x2) {
        let (theta, phi, lambda, phase) = m.u_decomposition();
        let rebuilt = Unitary2x2::u(theta, phi, lambda).scale(Complex64::from_polar(1.0, phase));
        assert!(
            rebuilt.approx_eq(&m, 1e-9),
            "expected {m:?}, rebuilt {rebuilt:?}"
        );
    }

    #[test]
    fn test_paulis_square_to_identity() {
        for m in [Unitary2x2::x(), Unitary2x2::y(), Unitary2x2::z(), Unitary2x2::h()] {
            assert!((m * m).approx_eq(&Unitary2x2::identity(), EPSILON));
        }
    }

    #[test]
    fn test_s_squared_is_z() {
        let s = Unitary2x2::s();
        assert!((s * s).approx_eq(&Unitary2x2::z(), EPSILON));
    }

    #[test]
    fn test_rk_matches_phase() {
        assert!(Unitary2x2::rk(1).approx_eq(&Unitary2x2::z(), EPSILON));
        assert!(Unitary2x2::rk(2).approx_eq(&Unitary2x2::s(), EPSILON));
        assert!(Unitary2x2::rk(3).approx_eq(&Unitary2x2::t(), EPSILON));
        assert!(Unitary2x2::rk(0).approx_eq(&Unitary2x2::identity(), EPSILON));
    }

    #[test]
    fn test_all_gates_unitary() {
        let gates = [
            Unitary2x2::h(),
            Unitary2x2::t(),
            Unitary2x2::rx(0.3),
            Unitary2x2::ry(1.7),
            Unitary2x2::rz(-2.2),
            Unitary2x2::u(0.4, 1.1, 5.9),
        ];
        for g in gates {
            assert!(g.is_unitary(), "{g:?} is not unitary");
        }
    }

    #[test]
    fn test_u_decomposition_reconstructs() {
        assert_reconstructs(Unitary2x2::identity());
        assert_reconstructs(Unitary2x2::h());
        assert_reconstructs(Unitary2x2::x());
        assert_reconstructs(Unitary2x2::y());
        assert_reconstructs(Unitary2x2::s());
        assert_reconstructs(Unitary2x2::u(2.8, 3.0, 3.7));
        assert_reconstructs(Unitary2x2::rx(1.0) * Unitary2x2::rz(0.5));
    }

    #[test]
    fn test_normalize_angle() {
        assert!((Unitary2x2::normalize_angle(3.0 * PI) - PI).abs() < EPSILON);
        assert!((Unitary2x2::normalize_angle(-0.5) + 0.5).abs() < EPSILON);
        assert_eq!(Unitary2x2::normalize_angle(f64::NAN), 0.0);
    }

    #[test]
    fn test_from_slice() {
        let m = Unitary2x2::x();
        assert_eq!(Unitary2x2::from_slice(&m.data), Some(m));
        assert_eq!(Unitary2x2::from_slice(&m.data[..3]), None);
    }
}
