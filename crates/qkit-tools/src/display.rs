//! Text rendering of amplitudes, vectors and matrices.
//!
//! Numbers are printed the way a Python shell would print them: shortest
//! round-trip digits, scientific notation below `1e-4`, and integral values
//! without a trailing `.0`.
//!
//! ```rust
//! use num_complex::Complex64;
//! use qkit_tools::display::{clean_1d_array, state_vector_ket_shape, with_sign};
//!
//! assert_eq!(with_sign(Complex64::new(-2.0, 0.0)), "- 2");
//! assert_eq!(clean_1d_array(&[Complex64::new(1.0, 2.0)], 7), "[1+2j]");
//!
//! let sv = ndarray::array![
//!     Complex64::new(1.0, 0.0),
//!     Complex64::new(0.0, 0.0),
//!     Complex64::new(0.0, 0.0),
//!     Complex64::new(0.0, 0.0),
//! ];
//! assert_eq!(state_vector_ket_shape(&sv).unwrap(), "+ |00⟩");
//! ```

use std::fmt::{self, Debug};

use ndarray::{ArrayBase, Data, Dimension, Ix2};
use num_complex::Complex64;

use crate::error::{ToolsError, ToolsResult};

/// Decimal places kept by [`clean_1d_array`] callers that have no preference.
pub const DEFAULT_PRECISION: u32 = 7;

/// Decimal places amplitudes are rounded to in ket notation.
pub const KET_PRECISION: u32 = 3;

/// Render an amplitude as `"<sign> <value>"` after rounding to 3 decimals.
pub fn with_sign(value: Complex64) -> String {
    with_sign_precision(value, KET_PRECISION)
}

/// [`with_sign`] with an explicit number of decimals.
pub fn with_sign_precision(value: Complex64, decimals: u32) -> String {
    let re = round_half_even(value.re, decimals);
    let im = round_half_even(value.im, decimals);

    if im == 0.0 {
        if re == 1.0 {
            return "+ ".to_string();
        }
        if re == 0.0 {
            return "+ 0j".to_string();
        }
        if re < 0.0 {
            return format!("- {}", PyNumber(-re));
        }
        return format!("+ {}", PyNumber(re));
    }

    if re == 0.0 {
        let sign = if im >= 0.0 { "+ " } else { "- " };
        return format!("{sign}{}j", PyNumber(im.abs()));
    }

    let text = PyComplex(re, im).to_string();
    if text.starts_with("(-") {
        format!("- {}", PyComplex(-re, -im))
    } else {
        format!("+ {text}")
    }
}

/// Render a vector as `[a, b, …]` with every part rounded to `precision`
/// decimals.
///
/// Integral parts lose their decimals, a zero real part is dropped in front of
/// a non-zero imaginary part, and a zero imaginary part is dropped entirely.
pub fn clean_1d_array(values: &[Complex64], precision: u32) -> String {
    let cleaned: Vec<String> = values
        .iter()
        .map(|v| clean_element(*v, precision))
        .collect();
    format!("[{}]", cleaned.join(", "))
}

fn clean_element(value: Complex64, precision: u32) -> String {
    let re = round_half_even(value.re, precision);
    let im = round_half_even(value.im, precision);

    let real = if re == 0.0 && im != 0.0 {
        String::new()
    } else {
        PyNumber(re).to_string()
    };

    if im == 0.0 {
        return real;
    }
    let imag = format!("{}j", PyNumber(im));
    if !real.is_empty() && !imag.starts_with('-') {
        format!("{real}+{imag}")
    } else {
        format!("{real}{imag}")
    }
}

/// Render a matrix row by row with [`clean_1d_array`] at the default precision.
pub fn clean_matrix<S>(matrix: &ArrayBase<S, Ix2>) -> String
where
    S: Data<Elem = Complex64>,
{
    clean_matrix_with_precision(matrix, DEFAULT_PRECISION)
}

/// [`clean_matrix`] with an explicit precision.
pub fn clean_matrix_with_precision<S>(matrix: &ArrayBase<S, Ix2>, precision: u32) -> String
where
    S: Data<Elem = Complex64>,
{
    let rows: Vec<String> = matrix
        .rows()
        .into_iter()
        .map(|row| clean_1d_array(&row.to_vec(), precision))
        .collect();
    format!("[{}]", rows.join(",\n "))
}

/// Print [`clean_matrix`] to stdout.
pub fn pprint<S>(matrix: &ArrayBase<S, Ix2>)
where
    S: Data<Elem = Complex64>,
{
    println!("{}", clean_matrix(matrix));
}

/// Render a state vector in ket notation, `+ |00⟩ - 0.5j|11⟩`.
///
/// Amplitudes that round to zero at 3 decimals are skipped. Qubit 0 is the
/// leftmost character of each label. A one-element vector is labelled `|0⟩`.
pub fn state_vector_ket_shape<S, D>(sv: &ArrayBase<S, D>) -> ToolsResult<String>
where
    S: Data<Elem = Complex64>,
    D: Dimension,
{
    state_vector_ket_shape_with(sv, KET_PRECISION)
}

/// [`state_vector_ket_shape`] with an explicit rounding precision.
pub fn state_vector_ket_shape_with<S, D>(sv: &ArrayBase<S, D>, decimals: u32) -> ToolsResult<String>
where
    S: Data<Elem = Complex64>,
    D: Dimension,
{
    if sv.ndim() != 1 {
        return Err(ToolsError::NotAVector { ndim: sv.ndim() });
    }
    let len = sv.len();
    if !len.is_power_of_two() {
        return Err(ToolsError::NotPowerOfTwo { len });
    }
    let width = (len.trailing_zeros() as usize).max(1);

    let terms: Vec<String> = sv
        .iter()
        .enumerate()
        .filter(|(_, amp)| {
            round_half_even(amp.re, decimals) != 0.0 || round_half_even(amp.im, decimals) != 0.0
        })
        .map(|(i, amp)| format!("{}|{i:0width$b}⟩", with_sign_precision(*amp, decimals)))
        .collect();
    Ok(terms.join(" "))
}

/// `Debug` representation with every whitespace run collapsed to one space.
pub fn one_lined_repr<T: Debug + ?Sized>(value: &T) -> String {
    format!("{value:?}")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Round to `decimals` places, ties to even.
fn round_half_even(x: f64, decimals: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let scale = 10f64.powi(decimals as i32);
    let scaled = x * scale;
    if !scaled.is_finite() {
        return x;
    }
    scaled.round_ties_even() / scale
}

/// A real number printed like Python prints it, integral values as integers.
struct PyNumber(f64);

impl fmt::Display for PyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = self.0;
        if x.is_nan() {
            return f.write_str("nan");
        }
        if x.is_infinite() {
            return f.write_str(if x > 0.0 { "inf" } else { "-inf" });
        }
        if x.fract() == 0.0 {
            // `+ 0.0` folds -0 into 0
            return write!(f, "{}", x + 0.0);
        }
        write_float(f, x)
    }
}

/// A complex number printed like Python's `complex.__repr__`.
struct PyComplex(f64, f64);

impl fmt::Display for PyComplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(re, im) = *self;
        let sign = if im < 0.0 || (im == 0.0 && im.is_sign_negative()) {
            '-'
        } else {
            '+'
        };
        write!(f, "({}{sign}{}j)", PyNumber(re), PyNumber(im.abs()))
    }
}

/// Shortest round-trip digits, scientific below `1e-4` and from `1e16`.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let sci = format!("{x:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return write!(f, "{x}");
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if exp < -4 || exp >= 16 {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        write!(f, "{mantissa}e{exp_sign}{:02}", exp.abs())
    } else {
        write!(f, "{x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, array};

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn reals(values: &[f64]) -> Vec<Complex64> {
        values.iter().map(|&v| c(v, 0.0)).collect()
    }

    // -------------------------------------------------------------------------
    // with_sign
    // -------------------------------------------------------------------------

    #[test]
    fn test_with_sign_one_is_bare_plus() {
        assert_eq!(with_sign(c(1.0, 0.0)), "+ ");
        assert_eq!(with_sign(c(0.9999, 0.0)), "+ ");
    }

    #[test]
    fn test_with_sign_reals() {
        assert_eq!(with_sign(c(-2.0, 0.0)), "- 2");
        assert_eq!(with_sign(c(0.5, 0.0)), "+ 0.5");
        assert_eq!(with_sign(c(-0.70710678, 0.0)), "- 0.707");
        assert_eq!(with_sign(c(3.0, 0.0004)), "+ 3");
    }

    #[test]
    fn test_with_sign_imaginary() {
        assert_eq!(with_sign(c(0.0, 3.0)), "+ 3j");
        assert_eq!(with_sign(c(0.0, -0.5)), "- 0.5j");
        assert_eq!(with_sign(c(0.0001, -1.0)), "- 1j");
    }

    #[test]
    fn test_with_sign_zero() {
        assert_eq!(with_sign(c(0.0, 0.0)), "+ 0j");
    }

    #[test]
    fn test_with_sign_complex() {
        assert_eq!(with_sign(c(1.0, 2.0)), "+ (1+2j)");
        assert_eq!(with_sign(c(0.5, -0.5)), "+ (0.5-0.5j)");
        assert_eq!(with_sign(c(-1.0, 2.0)), "- (1-2j)");
        assert_eq!(with_sign(c(-0.25, -0.125)), "- (0.25+0.125j)");
    }

    // -------------------------------------------------------------------------
    // clean_1d_array / clean_matrix
    // -------------------------------------------------------------------------

    #[test]
    fn test_clean_integral_reals() {
        assert_eq!(clean_1d_array(&reals(&[1.0, 2.0, 3.0]), 7), "[1, 2, 3]");
        assert_eq!(
            clean_1d_array(&[c(1.0, 0.0), c(0.0, 0.0), c(5.0, 0.0)], 7),
            "[1, 0, 5]"
        );
    }

    #[test]
    fn test_clean_rounds_to_precision() {
        let values = reals(&[1.234567895546, 2.3456789645645, 3.45678945645]);
        assert_eq!(
            clean_1d_array(&values, DEFAULT_PRECISION),
            "[1.2345679, 2.345679, 3.4567895]"
        );
        assert_eq!(clean_1d_array(&reals(&[0.123456]), 2), "[0.12]");
    }

    #[test]
    fn test_clean_complex_parts() {
        assert_eq!(
            clean_1d_array(&[c(1.0, 2.0), c(3.0, 4.0), c(5.0, 6.0)], 7),
            "[1+2j, 3+4j, 5+6j]"
        );
        assert_eq!(clean_1d_array(&[c(0.0, -1.0), c(2.0, -0.5)], 7), "[-1j, 2-0.5j]");
    }

    #[test]
    fn test_clean_small_values_use_exponent() {
        let values = [
            c(-0.01e-09, 9.82811211e-01),
            c(1.90112689e-01, 5.22320655e-09),
            c(2.91896816e-09, -2.15963155e-09),
            c(9.44235988e-08, -8.58300965e-01),
            c(-5.42123454e-08, 2.07957438e-07),
            c(-0.175980538, -1.44108434e-07),
        ];
        assert_eq!(
            clean_1d_array(&values, 7),
            "[0.9828112j, 0.1901127, 0, 1e-07-0.858301j, -1e-07+2e-07j, -0.1759805-1e-07j]"
        );
    }

    #[test]
    fn test_clean_negative_zero_is_zero() {
        assert_eq!(clean_1d_array(&[c(-1e-12, 0.0)], 7), "[0]");
    }

    #[test]
    fn test_clean_matrix_rows() {
        let m: Array2<Complex64> = array![
            [c(1.234567895546, 0.0), c(2.3456789645645, 0.0), c(3.45678945645, 0.0)],
            [c(1.0, 0.0), c(0.0, 0.0), c(5.0, 0.0)],
            [c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0)],
        ];
        assert_eq!(
            clean_matrix(&m),
            "[[1.2345679, 2.345679, 3.4567895],\n [1, 0, 5],\n [1, 2, 3]]"
        );
    }

    #[test]
    fn test_clean_matrix_of_view() {
        let m: Array2<Complex64> = Array2::eye(2);
        assert_eq!(clean_matrix(&m.t()), "[[1, 0],\n [0, 1]]");
    }

    // -------------------------------------------------------------------------
    // state_vector_ket_shape
    // -------------------------------------------------------------------------

    #[test]
    fn test_ket_basis_state() {
        let sv = Array1::from(reals(&[1.0, 0.0, 0.0, 0.0]));
        assert_eq!(state_vector_ket_shape(&sv).unwrap(), "+ |00⟩");
    }

    #[test]
    fn test_ket_superposition() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let sv = Array1::from(vec![c(h, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, -h)]);
        assert_eq!(state_vector_ket_shape(&sv).unwrap(), "+ 0.707|00⟩ - 0.707j|11⟩");
    }

    #[test]
    fn test_ket_skips_rounded_zeros() {
        let sv = Array1::from(reals(&[0.0004, -1.0]));
        assert_eq!(state_vector_ket_shape(&sv).unwrap(), "- 1|1⟩");
    }

    #[test]
    fn test_ket_single_amplitude() {
        let sv = Array1::from(reals(&[1.0]));
        assert_eq!(state_vector_ket_shape(&sv).unwrap(), "+ |0⟩");
        let sv = Array1::from(vec![Complex64::new(0.0, -1.0)]);
        assert_eq!(state_vector_ket_shape(&sv).unwrap(), "- 1j|0⟩");
    }

    #[test]
    fn test_ket_all_zero() {
        let sv = Array1::from(reals(&[0.0, 0.0]));
        assert_eq!(state_vector_ket_shape(&sv).unwrap(), "");
    }

    #[test]
    fn test_ket_rejects_bad_shapes() {
        let m: Array2<Complex64> = Array2::eye(2);
        assert!(matches!(
            state_vector_ket_shape(&m),
            Err(ToolsError::NotAVector { ndim: 2 })
        ));

        let sv = Array1::from(reals(&[1.0, 0.0, 0.0]));
        assert!(matches!(
            state_vector_ket_shape(&sv),
            Err(ToolsError::NotPowerOfTwo { len: 3 })
        ));

        let empty: Array1<Complex64> = Array1::from(vec![]);
        assert!(matches!(
            state_vector_ket_shape(&empty),
            Err(ToolsError::NotPowerOfTwo { len: 0 })
        ));
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    #[test]
    fn test_python_float_format() {
        assert_eq!(PyNumber(0.0001).to_string(), "0.0001");
        assert_eq!(PyNumber(0.00001234).to_string(), "1.234e-05");
        assert_eq!(PyNumber(-1e-7).to_string(), "-1e-07");
        assert_eq!(PyNumber(2.5).to_string(), "2.5");
        assert_eq!(PyNumber(-0.0).to_string(), "0");
        assert_eq!(PyNumber(f64::NAN).to_string(), "nan");
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(0.5, 0), 0.0);
        assert_eq!(round_half_even(1.5, 0), 2.0);
        assert_eq!(round_half_even(2.5, 0), 2.0);
    }

    #[test]
    fn test_one_lined_repr() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Pair {
            a: u8,
            b: &'static str,
        }
        assert_eq!(
            one_lined_repr(&Pair { a: 1, b: "x" }),
            "Pair { a: 1, b: \"x\" }"
        );
        assert_eq!(one_lined_repr(&vec![1, 2]), "[1, 2]");
        assert_eq!(one_lined_repr(&Some((1.5, "a  b"))), "Some((1.5, \"a b\"))");
    }
}
