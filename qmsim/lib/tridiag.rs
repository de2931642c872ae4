//! Eigen-decomposition of real symmetric tridiagonal matrices via the
//! implicitly shifted QL algorithm.
//!
//! A matrix is described by its main diagonal `d` (length *N*) and its
//! off-diagonal `e` (length *N* - 1), where `e[i]` couples rows `i` and
//! `i + 1`. Eigenvalues are returned in ascending order; eigenvectors are
//! returned as the *rows* of an *N*×*N* array, each with unit Euclidean norm.
//!
//! ```
//! use ndarray as nd;
//! use qmsim::tridiag::eigh_tridiagonal;
//!
//! // [[2, -1, 0], [-1, 2, -1], [0, -1, 2]]
//! let d = nd::array![2.0, 2.0, 2.0];
//! let e = nd::array![-1.0, -1.0];
//! let (evals, evecs) = eigh_tridiagonal(&d, &e).unwrap();
//! let expected = [
//!     2.0 - 2.0_f64.sqrt(),
//!     2.0,
//!     2.0 + 2.0_f64.sqrt(),
//! ];
//! assert!(
//!     evals.iter().zip(expected)
//!         .all(|(computed, expected)| (computed - expected).abs() < 1e-12)
//! );
//! assert!(
//!     evecs.rows().into_iter()
//!         .all(|v| (v.dot(&v) - 1.0).abs() < 1e-12)
//! );
//! ```

use ndarray as nd;
use crate::{
    Arr1,
    error::{ LengthError, XError },
};

pub type TResult<T> = Result<T, XError>;

/// Maximum number of QL sweeps spent isolating a single eigenvalue.
pub const MAX_SWEEPS: usize = 30;

/// A real symmetric tridiagonal matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Tridiagonal {
    diag: nd::Array1<f64>,
    off: nd::Array1<f64>,
}

impl Tridiagonal {
    /// Create a new `Tridiagonal` from its main diagonal and off-diagonal.
    ///
    /// Fails if `off` is not exactly one element shorter than `diag`, or if
    /// any element is not finite.
    pub fn new(diag: nd::Array1<f64>, off: nd::Array1<f64>) -> TResult<Self> {
        LengthError::check_bands(&diag, &off)?;
        check_finite(&diag, &off)?;
        Ok(Self { diag, off })
    }

    /// Build the finite-difference Hamiltonian for a particle of mass `mass`
    /// on a uniform grid with step `step` in a potential `potential`:
    /// ```text
    /// H[i, i]     = 2 ħ² / (m a²) + V[i]
    /// H[i, i ± 1] =  -ħ² / (m a²)
    /// ```
    ///
    /// Fails with [`XError::CouplingOverflow`] if `ħ² / (m a²)` (or twice it)
    /// is not representable.
    pub fn finite_difference<S>(
        hbar: f64,
        mass: f64,
        step: f64,
        potential: &Arr1<S>,
    ) -> TResult<Self>
    where S: nd::Data<Elem = f64>
    {
        XError::check_positive("hbar", hbar)?;
        XError::check_positive("mass", mass)?;
        XError::check_positive("step", step)?;
        let n = potential.len();
        XError::check_dimension(n)?;
        let coupling = hbar.powi(2) / (mass * step.powi(2));
        if !(2.0 * coupling).is_finite() {
            return Err(XError::CouplingOverflow(hbar, mass, step));
        }
        let diag: nd::Array1<f64> = potential.mapv(|vk| 2.0 * coupling + vk);
        let off: nd::Array1<f64> = nd::Array1::from_elem(n - 1, -coupling);
        Self::new(diag, off)
    }

    /// Get a reference to the main diagonal.
    pub fn diag(&self) -> &nd::Array1<f64> { &self.diag }

    /// Get a reference to the off-diagonal.
    pub fn off(&self) -> &nd::Array1<f64> { &self.off }

    /// Get the dimension of the matrix.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.diag.len() }

    /// Compute the matrix-vector product `H v`.
    ///
    /// *Panics if `v` does not have the same length as the diagonal*.
    pub fn dot<S>(&self, v: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        let n = self.len();
        let mut hv: nd::Array1<f64> = &self.diag * v;
        for i in 0..n - 1 {
            hv[i] += self.off[i] * v[i + 1];
            hv[i + 1] += self.off[i] * v[i];
        }
        hv
    }

    /// Compute all eigenvalues and eigenvectors. See [`eigh_tridiagonal`].
    pub fn eigh(&self) -> TResult<(nd::Array1<f64>, nd::Array2<f64>)> {
        eigh_tridiagonal(&self.diag, &self.off)
    }

    /// Compute all eigenvalues only. See [`eigvalsh_tridiagonal`].
    pub fn eigvalsh(&self) -> TResult<nd::Array1<f64>> {
        eigvalsh_tridiagonal(&self.diag, &self.off)
    }
}

fn check_finite<S, T>(d: &Arr1<S>, e: &Arr1<T>) -> TResult<()>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    if let Some(k) = d.iter().position(|dk| !dk.is_finite()) {
        return Err(XError::NonFinite("diag", k));
    }
    if let Some(k) = e.iter().position(|ek| !ek.is_finite()) {
        return Err(XError::NonFinite("off", k));
    }
    Ok(())
}

// apply the rotation
//   z[i]     ← c z[i] - s z[i + 1]
//   z[i + 1] ← s z[i] + c z[i + 1]
// to rows `i` and `i + 1` of the row-major vector block `z`
fn rotate_rows(z: &mut [f64], n: usize, i: usize, c: f64, s: f64) {
    let (lo, hi) = z.split_at_mut((i + 1) * n);
    let zi = &mut lo[i * n..];
    let zip1 = &mut hi[..n];
    for (a, b) in zi.iter_mut().zip(zip1.iter_mut()) {
        let f = *b;
        *b = s * *a + c * f;
        *a = c * *a - s * f;
    }
}

// Implicit QL iteration on the diagonal `d` and off-diagonal `e`, where `e`
// has been padded to length N with a trailing zero. On return, `d` holds the
// (unsorted) eigenvalues. If `z` is given, it must hold the N×N identity in
// row-major order, and on return its rows hold the corresponding
// eigenvectors.
fn tql(d: &mut [f64], e: &mut [f64], mut z: Option<&mut [f64]>)
    -> TResult<usize>
{
    let n = d.len();
    let mut total_sweeps: usize = 0;
    for l in 0..n {
        let mut sweeps: usize = 0;
        loop {
            // look for a single small off-diagonal element to split the
            // matrix
            let mut m = l;
            while m < n - 1 {
                let dd = d[m].abs() + d[m + 1].abs();
                if e[m].abs() <= f64::EPSILON * dd { break; }
                m += 1;
            }
            if m == l { break; }
            if sweeps == MAX_SWEEPS { return Err(XError::NoConvergence(l)); }
            sweeps += 1;

            // shift from the eigenvalue of the leading 2×2 block closer to
            // d[l]
            let mut g = (d[l + 1] - d[l]) / (2.0 * e[l]);
            let mut r = g.hypot(1.0);
            g = d[m] - d[l] + e[l] / (g + r.copysign(g));
            let (mut s, mut c, mut p) = (1.0, 1.0, 0.0);
            let mut deflated = false;
            for i in (l..m).rev() {
                let f = s * e[i];
                let b = c * e[i];
                r = f.hypot(g);
                e[i + 1] = r;
                if r == 0.0 {
                    // underflow; recover and start the sweep over
                    d[i + 1] -= p;
                    e[m] = 0.0;
                    deflated = true;
                    break;
                }
                s = f / r;
                c = g / r;
                g = d[i + 1] - p;
                r = (d[i] - g) * s + 2.0 * c * b;
                p = s * r;
                d[i + 1] = g + p;
                g = c * r - b;
                if let Some(z) = z.as_deref_mut() {
                    rotate_rows(z, n, i, c, s);
                }
            }
            if deflated { continue; }
            d[l] -= p;
            e[l] = g;
            e[m] = 0.0;
        }
        total_sweeps += sweeps;
    }
    Ok(total_sweeps)
}

fn padded_bands<S, T>(d: &Arr1<S>, e: &Arr1<T>) -> TResult<(Vec<f64>, Vec<f64>)>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check_bands(d, e)?;
    check_finite(d, e)?;
    let dd: Vec<f64> = d.to_vec();
    let mut ee: Vec<f64> = e.to_vec();
    ee.push(0.0);
    Ok((dd, ee))
}

/// Compute all eigenvalues and eigenvectors of the real symmetric
/// tridiagonal matrix with main diagonal `d` and off-diagonal `e`.
///
/// Eigenvalues are returned in ascending order. Row `k` of the returned array
/// is the unit-norm eigenvector belonging to eigenvalue `k`.
pub fn eigh_tridiagonal<S, T>(d: &Arr1<S>, e: &Arr1<T>)
    -> TResult<(nd::Array1<f64>, nd::Array2<f64>)>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let (mut dd, mut ee) = padded_bands(d, e)?;
    let n = dd.len();
    let mut z: Vec<f64> = vec![0.0; n * n];
    z.iter_mut().step_by(n + 1).for_each(|zkk| { *zkk = 1.0; });
    let sweeps = tql(&mut dd, &mut ee, Some(z.as_mut_slice()))?;
    log::debug!("tridiag: {n}×{n} eigen-decomposition in {sweeps} QL sweeps");

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| dd[a].total_cmp(&dd[b]));
    let evals: nd::Array1<f64> = order.iter().map(|&k| dd[k]).collect();
    let mut evecs: nd::Array2<f64> = nd::Array2::zeros((n, n));
    for (mut row, &k) in evecs.rows_mut().into_iter().zip(&order) {
        row.iter_mut().zip(&z[k * n..(k + 1) * n])
            .for_each(|(vj, zj)| { *vj = *zj; });
    }
    Ok((evals, evecs))
}

/// Compute all eigenvalues of the real symmetric tridiagonal matrix with main
/// diagonal `d` and off-diagonal `e`, in ascending order.
pub fn eigvalsh_tridiagonal<S, T>(d: &Arr1<S>, e: &Arr1<T>)
    -> TResult<nd::Array1<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let (mut dd, mut ee) = padded_bands(d, e)?;
    let sweeps = tql(&mut dd, &mut ee, None)?;
    log::debug!("tridiag: {} eigenvalues in {sweeps} QL sweeps", dd.len());
    dd.sort_by(|a, b| a.total_cmp(b));
    Ok(nd::Array1::from(dd))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use approx::assert_abs_diff_eq;
    use super::*;

    // -1, 2, -1 matrix has eigenvalues 2 - 2 cos(kπ / (N + 1))
    fn laplacian(n: usize) -> Tridiagonal {
        Tridiagonal::new(
            nd::Array1::from_elem(n, 2.0),
            nd::Array1::from_elem(n - 1, -1.0),
        ).unwrap()
    }

    #[test]
    fn constant_band_matches_closed_form() {
        let n = 50;
        let evals = laplacian(n).eigvalsh().unwrap();
        for (k, ek) in evals.iter().enumerate() {
            let expected
                = 2.0 - 2.0 * ((k + 1) as f64 * PI / (n + 1) as f64).cos();
            assert_abs_diff_eq!(*ek, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn eigvalsh_agrees_with_eigh() {
        let d = nd::array![4.0, -1.0, 3.5, 0.25, 7.0, 2.0];
        let e = nd::array![1.0, 0.5, -2.0, 3.0, 0.1];
        let (evals, _) = eigh_tridiagonal(&d, &e).unwrap();
        let evals_only = eigvalsh_tridiagonal(&d, &e).unwrap();
        for (a, b) in evals.iter().zip(&evals_only) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn eigenpairs_satisfy_eigen_equation() {
        let h = Tridiagonal::new(
            nd::array![4.0, -1.0, 3.5, 0.25, 7.0, 2.0],
            nd::array![1.0, 0.5, -2.0, 3.0, 0.1],
        ).unwrap();
        let (evals, evecs) = h.eigh().unwrap();
        assert!(evals.windows(2).into_iter().all(|w| w[0] <= w[1]));
        for (ek, v) in evals.iter().zip(evecs.rows()) {
            let residual = &h.dot(&v) - &v.mapv(|vj| ek * vj);
            assert!(residual.iter().all(|rj| rj.abs() < 1e-10));
        }
    }

    #[test]
    fn eigenvectors_are_orthonormal() {
        let (_, evecs) = laplacian(40).eigh().unwrap();
        let gram = evecs.dot(&evecs.t());
        for ((i, j), gij) in gram.indexed_iter() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(*gij, expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn decoupled_blocks() {
        // zero off-diagonal: eigenvalues are the (sorted) diagonal
        let d = nd::array![3.0, 1.0, 2.0];
        let e = nd::array![0.0, 0.0];
        let (evals, evecs) = eigh_tridiagonal(&d, &e).unwrap();
        assert_eq!(evals, nd::array![1.0, 2.0, 3.0]);
        assert_abs_diff_eq!(evecs[[0, 1]].abs(), 1.0);
        assert_abs_diff_eq!(evecs[[1, 2]].abs(), 1.0);
        assert_abs_diff_eq!(evecs[[2, 0]].abs(), 1.0);
    }

    #[test]
    fn single_element() {
        let (evals, evecs)
            = eigh_tridiagonal(&nd::array![5.0], &nd::Array1::<f64>::zeros(0))
            .unwrap();
        assert_eq!(evals, nd::array![5.0]);
        assert_eq!(evecs, nd::array![[1.0]]);
    }

    #[test]
    fn bad_bands() {
        let res = Tridiagonal::new(nd::array![1.0, 2.0], nd::array![1.0, 1.0]);
        assert!(matches!(res, Err(XError::Length(LengthError(2, 2)))));
        let res = eigvalsh_tridiagonal(
            &nd::array![1.0, f64::NAN], &nd::array![1.0]);
        assert!(matches!(res, Err(XError::NonFinite("diag", 1))));
        let res = eigvalsh_tridiagonal(
            &nd::array![1.0, 2.0, 3.0], &nd::array![0.5, f64::INFINITY]);
        assert!(matches!(res, Err(XError::NonFinite("off", 1))));
    }

    #[test]
    fn finite_difference_bands() {
        let v = nd::array![0.0, 5.0, 0.0];
        let h = Tridiagonal::finite_difference(1.0, 2.0, 0.5, &v).unwrap();
        // ħ² / (m a²) = 1 / (2 · 0.25) = 2
        assert_eq!(h.diag(), &nd::array![4.0, 9.0, 4.0]);
        assert_eq!(h.off(), &nd::array![-2.0, -2.0]);
    }

    #[test]
    fn finite_difference_overflow() {
        let v = nd::Array1::<f64>::zeros(50);
        let res = Tridiagonal::finite_difference(1e200, 1.0, 0.2, &v);
        assert!(matches!(res, Err(XError::CouplingOverflow(..))));
        // finite coupling, but the diagonal 2 ħ² / (m a²) overflows
        let res = Tridiagonal::finite_difference(1e154, 1.0, 1.0, &v);
        assert!(matches!(res, Err(XError::CouplingOverflow(..))));
    }
}
