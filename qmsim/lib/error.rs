//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring arrays of related lengths encounters
/// arrays with incompatible lengths.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }

    /// Check that `off` is exactly one element shorter than `diag`, as
    /// required of the two bands of a tridiagonal matrix.
    pub(crate) fn check_bands<S, T>(
        diag: &nd::ArrayBase<S, nd::Ix1>,
        off: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        let ndiag = diag.len();
        let noff = off.len();
        (ndiag > 0 && noff + 1 == ndiag).then_some(()).ok_or(Self(ndiag, noff))
    }
}

/// Returned from the eigensolver functions in [`tridiag`][crate::tridiag] and
/// [`solve`][crate::solve].
#[derive(Debug, Error)]
pub enum XError {
    /// Returned when one of ħ, the particle mass, or the box length is not
    /// strictly positive.
    #[error("{0} must be greater than 0; got {1}")]
    NonPositiveParameter(&'static str, f64),

    /// Returned when the number of grid points is too small to form a
    /// tridiagonal system.
    #[error("number of grid points must be greater than 1; got {0}")]
    InvalidDimension(usize),

    /// Returned when the fractional barrier bounds are inverted or fall
    /// outside `[0, 1]`.
    #[error("barrier bounds must satisfy 0 <= start < end <= 1; got [{0}, {1})")]
    InvalidRange(f64, f64),

    /// Returned when the barrier height is negative or not finite.
    #[error("barrier height must be finite and non-negative; got {0}")]
    NegativeBarrier(f64),

    /// Returned when a matrix element is NaN or infinite. The first field
    /// names the band (`"diag"` or `"off"`).
    #[error("tridiagonal matrix contains a non-finite {0} element at index {1}")]
    NonFinite(&'static str, usize),

    /// Returned when the kinetic coupling `ħ² / (m a²)` overflows for
    /// otherwise valid ħ, mass, and step.
    #[error("kinetic coupling hbar^2 / (mass * step^2) overflows; got hbar = {0}, mass = {1}, step = {2}")]
    CouplingOverflow(f64, f64, f64),

    /// Returned when the QL iteration fails to isolate an eigenvalue within
    /// the allowed number of sweeps.
    #[error("tridiag: QL iteration failed to converge for eigenvalue {0}")]
    NoConvergence(usize),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl XError {
    pub(crate) fn check_positive(name: &'static str, val: f64)
        -> Result<(), Self>
    {
        (val > 0.0).then_some(()).ok_or(Self::NonPositiveParameter(name, val))
    }

    pub(crate) fn check_dimension(n: usize) -> Result<(), Self> {
        (n > 1).then_some(()).ok_or(Self::InvalidDimension(n))
    }

    pub(crate) fn check_range(start: f64, end: f64) -> Result<(), Self> {
        (0.0 <= start && start < end && end <= 1.0)
            .then_some(())
            .ok_or(Self::InvalidRange(start, end))
    }

    pub(crate) fn check_height(height: f64) -> Result<(), Self> {
        (height.is_finite() && height >= 0.0)
            .then_some(())
            .ok_or(Self::NegativeBarrier(height))
    }
}

/// Returned from the random sampling functions in [`cloud`][crate::cloud].
#[derive(Debug, Error)]
pub enum CloudError {
    /// Returned when a size, scale, or step parameter is not strictly
    /// positive.
    #[error("{0} must be greater than 0; got {1}")]
    NonPositive(&'static str, f64),

    /// Returned when an atom or ion symbol does not name a one-electron
    /// species.
    #[error("{0} is not a Bohr atom")]
    NotBohrAtom(String),

    /// Returned when a sampling distribution cannot be constructed.
    #[error("exponential distribution error: {0}")]
    Exp(#[from] rand_distr::ExpError),
}

impl CloudError {
    pub(crate) fn check_positive(name: &'static str, val: f64)
        -> Result<(), Self>
    {
        (val > 0.0).then_some(()).ok_or(Self::NonPositive(name, val))
    }

    pub(crate) fn check_count(name: &'static str, n: usize)
        -> Result<(), Self>
    {
        (n != 0).then_some(()).ok_or(Self::NonPositive(name, n as f64))
    }
}

/// Returned from the orbital density functions in
/// [`orbital`][crate::orbital].
#[derive(Debug, Error)]
pub enum OrbitalError {
    /// Returned when the radial extent or nuclear charge is not strictly
    /// positive.
    #[error("{0} must be greater than 0; got {1}")]
    NonPositive(&'static str, f64),

    /// Returned when a coordinate axis would have fewer than 2 points.
    #[error("{0} must have at least 2 points; got {1}")]
    TooFewPoints(&'static str, usize),
}

impl OrbitalError {
    pub(crate) fn check_positive(name: &'static str, val: f64)
        -> Result<(), Self>
    {
        (val > 0.0).then_some(()).ok_or(Self::NonPositive(name, val))
    }

    pub(crate) fn check_points(name: &'static str, n: usize)
        -> Result<(), Self>
    {
        (n > 1).then_some(()).ok_or(Self::TooFewPoints(name, n))
    }
}
