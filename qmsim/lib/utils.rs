//! Miscellaneous tools.

use std::ops::Range;
use ndarray::{ self as nd, Ix1 };
use num_traits::Float;

/// Integrate using the trapezoidal rule.
///
/// *Panics if `y` has length less than 2*.
pub fn trapz<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = y.len();
    let two = A::one() + A::one();
    let inner = y.iter().skip(1).take(n - 2)
        .fold(A::zero(), |acc, yk| acc + *yk);
    (dx / two) * (y[0] + two * inner + y[n - 1])
}

/// Calculate the norm of a wavefunction, treating it as a sampled function
/// with grid spacing `dx`.
///
/// *Panics if `q` has length less than 2*.
pub fn wf_norm<S, A>(q: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    trapz(&q.mapv(|qk| qk * qk), dx)
}

/// Calculate the inner product of two wavefunctions, treating them as sampled
/// functions with grid spacing `dx`.
///
/// *Panics if either array has length less than 2*.
pub fn wf_dot<S, T, A>(
    q: &nd::ArrayBase<S, Ix1>,
    p: &nd::ArrayBase<T, Ix1>,
    dx: A,
) -> A
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = q.len().min(p.len());
    let two = A::one() + A::one();
    (dx / two) * (
        q[0] * p[0]
        + two * q.iter().zip(p).skip(1).take(n - 2)
            .fold(A::zero(), |acc, (qk, pk)| acc + *qk * *pk)
        + q[n - 1] * p[n - 1]
    )
}

/// Return a copy of a wavefunction normalized to the continuum measure over a
/// grid with spacing `dx` (see [`wf_norm`]).
///
/// *Panics if `q` has length less than 2*.
pub fn wf_normalized<S, A>(q: &nd::ArrayBase<S, Ix1>, dx: A) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let norm = wf_norm(q, dx).sqrt();
    q.mapv(|qk| qk / norm)
}

/// Calculate the plain Euclidean norm of an array.
pub fn l2_norm<S, A>(q: &nd::ArrayBase<S, Ix1>) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    q.iter().fold(A::zero(), |acc, qk| acc + *qk * *qk).sqrt()
}

/// Sum the squared amplitudes of `q` over a range of indices.
///
/// For a unit-norm eigenvector this is the probability of finding the
/// particle inside the corresponding region of the grid.
///
/// *Panics if `window` is out of bounds*.
pub fn window_probability<S, A>(q: &nd::ArrayBase<S, Ix1>, window: Range<usize>)
    -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    q.slice(nd::s![window]).iter()
        .fold(A::zero(), |acc, qk| acc + *qk * *qk)
}

/// Count the sign changes of `q`, ignoring elements with magnitude below
/// `threshold` times the largest magnitude.
pub fn node_count<S, A>(q: &nd::ArrayBase<S, Ix1>, threshold: A) -> usize
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let cutoff = threshold * q.iter().fold(A::zero(), |acc, qk| acc.max(qk.abs()));
    let mut nodes: usize = 0;
    let mut last_sign: Option<bool> = None;
    for qk in q.iter().filter(|qk| qk.abs() > cutoff) {
        let sign = qk.is_sign_positive();
        if last_sign.is_some_and(|s| s != sign) { nodes += 1; }
        last_sign = Some(sign);
    }
    nodes
}

/// Return the potential scaled so that its maximum is 1.
///
/// A potential that is zero everywhere is returned unchanged.
pub fn normalized_potential<S, A>(V: &nd::ArrayBase<S, Ix1>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let vmax = V.iter().fold(A::zero(), |acc, vk| acc.max(vk.abs()));
    if vmax == A::zero() {
        V.to_owned()
    } else {
        V.mapv(|vk| vk / vmax)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use super::*;

    #[test]
    fn trapz_integrates_linear_exactly() {
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 2.0, 11);
        let dx = x[1] - x[0];
        assert_abs_diff_eq!(trapz(&(3.0 * &x + 1.0), dx), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn wavefunction_norms() {
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 2001);
        let dx = x[1] - x[0];
        let q = x.mapv(|xk| (std::f64::consts::PI * xk).sin());
        let qn = wf_normalized(&q, dx);
        assert_abs_diff_eq!(wf_norm(&qn, dx), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wf_dot(&qn, &qn, dx), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wf_norm(&q, dx), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn windowed_probability_and_l2() {
        let q = nd::array![0.6, 0.0, 0.8];
        assert_abs_diff_eq!(l2_norm(&q), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(window_probability(&q, 0..2), 0.36, epsilon = 1e-15);
        assert_abs_diff_eq!(window_probability(&q, 1..3), 0.64, epsilon = 1e-15);
    }

    #[test]
    fn nodes() {
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 501);
        for k in 1..5 {
            let q = x.mapv(|xk| (k as f64 * std::f64::consts::PI * xk).sin());
            assert_eq!(node_count(&q, 1e-6), k - 1);
        }
    }

    #[test]
    fn potential_scaling() {
        let v = nd::array![0.0, 5.0, 5.0, 0.0];
        assert_eq!(normalized_potential(&v), nd::array![0.0, 1.0, 1.0, 0.0]);
        let z: nd::Array1<f64> = nd::Array1::zeros(3);
        assert_eq!(normalized_potential(&z), z);
    }
}
