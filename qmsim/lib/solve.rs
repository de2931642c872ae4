//! Functions to compute the low-lying eigenstates of a particle confined to a
//! box `[0, L]` with a rectangular potential barrier, via the finite-difference
//! approximation to the one-dimensional, time-independent Schrödinger equation
//! (TISE).
//!
//! ```
//! use qmsim::solve::solve;
//!
//! // ħ = 1, m = 1, L = 10, N = 200, V₀ = 5, barrier over [0.4, 0.6)
//! let res = solve(1.0, 1.0, 10.0, 200, 5.0, 0.4, 0.6).unwrap();
//! assert_eq!(res.len(), 200);
//! assert!(res.energies().windows(2).into_iter().all(|w| w[0] <= w[1]));
//! ```

use std::{ cmp, f64::consts::PI, ops::Range };
use ndarray as nd;
use crate::{
    Arr1,
    error::{ LengthError, XError },
    tridiag::Tridiagonal,
};

pub type XResult<T> = Result<T, XError>;

/// A single solution to the TISE.
///
/// This struct is usually only returned by a solver function; you probably
/// won't ever instantiate it yourself. The wavefunction is allowed to be
/// missing in the case that only energies were computed.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Energy
    pub e: f64,
    /// Wavefunction
    pub wf: Option<nd::Array1<f64>>,
}

impl Solution {
    /// Compare two `Solution`s by their energy.
    pub fn cmp_energy(&self, other: &Self) -> Option<cmp::Ordering> {
        self.e.partial_cmp(&other.e)
    }

    /// Return the probability density `|wf|²`, if the wavefunction is
    /// present.
    pub fn density(&self) -> Option<nd::Array1<f64>> {
        self.wf.as_ref().map(|wf| wf.mapv(|q| q * q))
    }
}

/// A uniform coordinate grid over `[0, L]`.
///
/// Coordinates are generated "linspace-style" (both endpoints included, `N`
/// points), while the step used to discretize the kinetic term is `L / N`.
#[derive(Clone, Debug)]
pub struct Grid {
    // coordinate array
    x: nd::Array1<f64>,
    // discretization step
    step: f64,
    // box length
    length: f64,
}

impl Grid {
    /// Create a new `Grid` of `n` points over `[0, length]`.
    pub fn new(length: f64, n: usize) -> XResult<Self> {
        XError::check_positive("length", length)?;
        XError::check_dimension(n)?;
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, length, n);
        let step = length / n as f64;
        Ok(Self { x, step, length })
    }

    /// Get a reference to the coordinate array.
    pub fn x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get the discretization step `L / N`.
    pub fn step(&self) -> f64 { self.step }

    /// Get the box length.
    pub fn length(&self) -> f64 { self.length }

    /// Get the number of grid points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.x.len() }
}

/// A rectangular potential barrier of height `height` spanning the fractional
/// range `[start, end)` of a grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Barrier {
    /// Barrier height.
    pub height: f64,
    /// Fractional lower bound (inclusive).
    pub start: f64,
    /// Fractional upper bound (exclusive).
    pub end: f64,
}

impl Barrier {
    /// Create a new `Barrier`.
    ///
    /// Fails if `height` is negative or the bounds do not satisfy
    /// `0 <= start < end <= 1`.
    pub fn new(height: f64, start: f64, end: f64) -> XResult<Self> {
        XError::check_height(height)?;
        XError::check_range(start, end)?;
        Ok(Self { height, start, end })
    }

    /// Return the range of grid indices covered by the barrier on a grid of
    /// `n` points, taking the floor of each fractional bound times `n`.
    pub fn index_range(&self, n: usize) -> Range<usize> {
        let nf = n as f64;
        let i0 = ((self.start * nf).floor() as usize).min(n);
        let i1 = ((self.end * nf).floor() as usize).min(n);
        i0..i1
    }

    /// Sample the potential profile over `grid`.
    pub fn sample(&self, grid: &Grid) -> nd::Array1<f64> {
        let mut v: nd::Array1<f64> = nd::Array1::zeros(grid.len());
        v.slice_mut(nd::s![self.index_range(grid.len())]).fill(self.height);
        v
    }
}

/// Eigenstates of a discretized Hamiltonian.
///
/// Energies are sorted in ascending order, and row `k` of the state array is
/// the eigenvector belonging to energy `k`, with unit Euclidean norm over the
/// grid points.
#[derive(Clone, Debug, PartialEq)]
pub struct EigenResult {
    energies: nd::Array1<f64>,
    states: nd::Array2<f64>,
}

impl EigenResult {
    /// Get a reference to the energy array.
    pub fn energies(&self) -> &nd::Array1<f64> { &self.energies }

    /// Get a reference to the state array.
    pub fn states(&self) -> &nd::Array2<f64> { &self.states }

    /// Get the number of eigenpairs.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.energies.len() }

    /// Get a view of the `k`-th eigenvector.
    ///
    /// *Panics if `k` is out of bounds*.
    pub fn state(&self, k: usize) -> nd::ArrayView1<'_, f64> {
        self.states.row(k)
    }

    /// Compute the squared amplitudes of the `k`-th eigenvector.
    ///
    /// *Panics if `k` is out of bounds*.
    pub fn density(&self, k: usize) -> nd::Array1<f64> {
        self.state(k).mapv(|q| q * q)
    }

    /// Copy out the `k`-th eigenpair as a [`Solution`].
    pub fn solution(&self, k: usize) -> Option<Solution> {
        (k < self.len()).then(|| {
            Solution { e: self.energies[k], wf: Some(self.state(k).to_owned()) }
        })
    }

    /// Copy out (at most) the `k` lowest eigenpairs.
    pub fn lowest(&self, k: usize) -> Vec<Solution> {
        (0..k.min(self.len()))
            .filter_map(|j| self.solution(j))
            .collect()
    }
}

impl From<(nd::Array1<f64>, nd::Array2<f64>)> for EigenResult {
    fn from(pair: (nd::Array1<f64>, nd::Array2<f64>)) -> Self {
        Self { energies: pair.0, states: pair.1 }
    }
}

/// Simple record to keep track of the coordinate grid, potential array, and
/// physical constants of a system.
///
/// The potential array is guaranteed to have the same length as the grid.
#[derive(Clone, Debug)]
pub struct System {
    // coordinate grid
    grid: Grid,
    // potential array
    V: nd::Array1<f64>,
    // reduced Planck constant
    hbar: f64,
    // particle mass
    mass: f64,
}

impl System {
    /// Create a new `System` for a box with a rectangular barrier.
    ///
    /// Parameters are validated in the order: positivity of `hbar`, `mass`,
    /// and `length`; the number of points; then the barrier.
    pub fn barrier(
        hbar: f64,
        mass: f64,
        length: f64,
        n: usize,
        barrier: Barrier,
    ) -> XResult<Self> {
        XError::check_positive("hbar", hbar)?;
        XError::check_positive("mass", mass)?;
        XError::check_positive("length", length)?;
        XError::check_dimension(n)?;
        let barrier = Barrier::new(barrier.height, barrier.start, barrier.end)?;
        let grid = Grid::new(length, n)?;
        let V = barrier.sample(&grid);
        Ok(Self { grid, V, hbar, mass })
    }

    /// Create a new `System` from a grid and an arbitrary potential sampled
    /// over it.
    pub fn from_potential(
        hbar: f64,
        mass: f64,
        grid: Grid,
        V: nd::Array1<f64>,
    ) -> XResult<Self> {
        XError::check_positive("hbar", hbar)?;
        XError::check_positive("mass", mass)?;
        LengthError::check(grid.x(), &V)?;
        Ok(Self { grid, V, hbar, mass })
    }

    /// Get a reference to the coordinate grid.
    pub fn grid(&self) -> &Grid { &self.grid }

    /// Get a reference to the potential array.
    pub fn get_V(&self) -> &nd::Array1<f64> { &self.V }

    /// Get the length of the coordinate and potential arrays.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.grid.len() }

    /// Build the finite-difference Hamiltonian.
    pub fn hamiltonian(&self) -> XResult<Tridiagonal> {
        Tridiagonal::finite_difference(
            self.hbar, self.mass, self.grid.step(), &self.V)
    }

    /// Compute all eigenstates.
    pub fn solve(&self) -> XResult<EigenResult> {
        log::debug!(
            "solve: {} grid points, step {:.3e}, max potential {:.3e}",
            self.len(),
            self.grid.step(),
            self.V.fold(0.0_f64, |acc, vk| acc.max(*vk)),
        );
        let h = self.hamiltonian()?;
        h.eigh().map(EigenResult::from)
    }

    /// Compute all energies only.
    pub fn energies(&self) -> XResult<nd::Array1<f64>> {
        self.hamiltonian()?.eigvalsh()
    }
}

/// Compute all eigenstates of a particle of mass `mass` in a box of length
/// `length` discretized over `n` points, with a barrier of height
/// `barrier_height` spanning the fractional range
/// `[barrier_start, barrier_end)`.
///
/// The Hamiltonian is the symmetric tridiagonal matrix
/// ```text
/// H[i, i]     = 2 ħ² / (m a²) + V[i]
/// H[i, i ± 1] =  -ħ² / (m a²)
/// ```
/// with `a = length / n`. All inputs are validated before any numerical work
/// is done. Parameters that are individually valid but make `ħ² / (m a²)`
/// overflow are reported as [`XError::CouplingOverflow`].
pub fn solve(
    hbar: f64,
    mass: f64,
    length: f64,
    n: usize,
    barrier_height: f64,
    barrier_start: f64,
    barrier_end: f64,
) -> XResult<EigenResult>
{
    let barrier = Barrier {
        height: barrier_height,
        start: barrier_start,
        end: barrier_end,
    };
    System::barrier(hbar, mass, length, n, barrier)?.solve()
}

/// Energy of the `n`-th level (`n >= 1`) of a particle of mass `mass` in an
/// infinite square well of width `length`:
/// ```text
/// E = n² π² ħ² / (2 m L²)
/// ```
pub fn box_energy(n: usize, hbar: f64, mass: f64, length: f64) -> f64 {
    (n as f64 * PI * hbar / length).powi(2) / (2.0 * mass)
}

/// Return the ground-state energies for a sequence of barrier heights, keeping
/// all other parameters fixed.
pub fn ground_energy_scan<S>(
    hbar: f64,
    mass: f64,
    length: f64,
    n: usize,
    heights: &Arr1<S>,
    range: (f64, f64),
) -> XResult<nd::Array1<f64>>
where S: nd::Data<Elem = f64>
{
    heights.iter()
        .map(|&height| -> XResult<f64> {
            let barrier = Barrier { height, start: range.0, end: range.1 };
            let energies
                = System::barrier(hbar, mass, length, n, barrier)?.energies()?;
            Ok(energies[0])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use crate::utils::{
        l2_norm,
        wf_dot,
        wf_norm,
        wf_normalized,
        window_probability,
    };
    use super::*;

    #[test]
    fn barrier_indices_use_floor() {
        let barrier = Barrier::new(1.0, 0.4, 0.6).unwrap();
        assert_eq!(barrier.index_range(1000), 400..600);
        assert_eq!(barrier.index_range(7), 2..4);
        let grid = Grid::new(1.0, 7).unwrap();
        assert_eq!(
            barrier.sample(&grid),
            nd::array![0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0],
        );
    }

    #[test]
    fn grid_step_is_length_over_points() {
        let grid = Grid::new(10.0, 1000).unwrap();
        assert_eq!(grid.len(), 1000);
        assert_relative_eq!(grid.step(), 0.01);
        assert_relative_eq!(grid.x()[999], 10.0);
    }

    #[test]
    fn invalid_inputs() {
        assert!(matches!(
            solve(0.0, 1.0, 10.0, 100, 5.0, 0.4, 0.6),
            Err(XError::NonPositiveParameter("hbar", _)),
        ));
        assert!(matches!(
            solve(1.0, -1.0, 10.0, 100, 5.0, 0.4, 0.6),
            Err(XError::NonPositiveParameter("mass", _)),
        ));
        assert!(matches!(
            solve(1.0, 1.0, 0.0, 100, 5.0, 0.4, 0.6),
            Err(XError::NonPositiveParameter("length", _)),
        ));
        assert!(matches!(
            solve(1.0, 1.0, 10.0, 1, 5.0, 0.4, 0.6),
            Err(XError::InvalidDimension(1)),
        ));
        assert!(matches!(
            solve(1.0, 1.0, 10.0, 100, 5.0, 0.6, 0.4),
            Err(XError::InvalidRange(..)),
        ));
        assert!(matches!(
            solve(1.0, 1.0, 10.0, 100, 5.0, 0.5, 0.5),
            Err(XError::InvalidRange(..)),
        ));
        assert!(matches!(
            solve(1.0, 1.0, 10.0, 100, 5.0, -0.1, 0.6),
            Err(XError::InvalidRange(..)),
        ));
        assert!(matches!(
            solve(1.0, 1.0, 10.0, 100, 5.0, 0.4, 1.1),
            Err(XError::InvalidRange(..)),
        ));
        assert!(matches!(
            solve(1.0, 1.0, 10.0, 100, -5.0, 0.4, 0.6),
            Err(XError::NegativeBarrier(_)),
        ));
        // positivity is checked before dimension and range
        assert!(matches!(
            solve(1.0, 0.0, 10.0, 0, 5.0, 0.6, 0.4),
            Err(XError::NonPositiveParameter("mass", _)),
        ));
        assert!(matches!(
            solve(1.0, 1.0, 10.0, 0, 5.0, 0.6, 0.4),
            Err(XError::InvalidDimension(0)),
        ));
        assert!(matches!(
            solve(1e200, 1.0, 10.0, 50, 1.0, 0.4, 0.6),
            Err(XError::CouplingOverflow(..)),
        ));
    }

    #[test]
    fn full_width_barrier_shifts_spectrum() {
        let (n, v0) = (64, 3.0);
        let barrier = Barrier::new(v0, 0.0, 1.0).unwrap();
        assert_eq!(barrier.index_range(n), 0..n);
        let free = solve(1.0, 1.0, 10.0, n, 0.0, 0.0, 1.0).unwrap();
        let raised = solve(1.0, 1.0, 10.0, n, v0, 0.0, 1.0).unwrap();
        assert_eq!(raised.len(), n);
        for (e_raised, e_free) in raised.energies().iter().zip(free.energies()) {
            assert_relative_eq!(*e_raised, e_free + v0, max_relative = 1e-10);
        }

        let res = solve(1.0, 1.0, 1.0, 7, 3.0, 0.0, 1.0).unwrap();
        let a = 1.0 / 7.0;
        let expected = 3.0 + 2.0 / (a * a) * (1.0 - (PI / 8.0).cos());
        assert_relative_eq!(res.energies()[0], expected, max_relative = 1e-10);
        for j in 0..7 {
            assert_relative_eq!(l2_norm(&res.state(j)), 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn narrow_barrier_rounds_to_nothing() {
        let barrier = Barrier::new(5.0, 0.41, 0.42).unwrap();
        assert_eq!(barrier.index_range(10), 4..4);
        let system
            = System::barrier(1.0, 1.0, 10.0, 10, barrier).unwrap();
        assert!(system.get_V().iter().all(|vk| *vk == 0.0));
        let res = system.solve().unwrap();
        let free = solve(1.0, 1.0, 10.0, 10, 0.0, 0.41, 0.42).unwrap();
        assert_eq!(res, free);
    }

    #[test]
    fn spectrum_is_complete_ascending_and_orthonormal() {
        let n = 120;
        let res = solve(1.0, 1.0, 10.0, n, 5.0, 0.4, 0.6).unwrap();
        assert_eq!(res.len(), n);
        assert_eq!(res.states().dim(), (n, n));
        assert!(res.energies().windows(2).into_iter().all(|w| w[0] <= w[1]));
        for j in 0..n {
            assert_relative_eq!(l2_norm(&res.state(j)), 1.0, epsilon = 1e-9);
            for k in j + 1..n {
                assert!(res.state(j).dot(&res.state(k)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn free_box_ground_state() {
        let (hbar, mass, length) = (1.0, 1.0, 10.0);
        let mut last_err = f64::INFINITY;
        for n in [50, 100, 200, 400] {
            let res = solve(hbar, mass, length, n, 0.0, 0.4, 0.6).unwrap();
            let a = length / n as f64;
            // exact discrete ground state of the free -1, 2, -1 stencil
            let discrete = 2.0 * hbar.powi(2) / (mass * a * a)
                * (1.0 - (PI / (n + 1) as f64).cos());
            assert_relative_eq!(
                res.energies()[0], discrete, max_relative = 1e-9);
            // the stencil carries -ħ²/m ∂², i.e. an effective mass m / 2
            let continuum = box_energy(1, hbar, mass / 2.0, length);
            let err = (res.energies()[0] - continuum).abs() / continuum;
            assert!(err < last_err);
            last_err = err;
        }
        assert!(last_err < 1e-2);
    }

    #[test]
    fn ground_energy_grows_with_barrier() {
        let heights = nd::array![0.0, 0.5, 1.0, 2.5, 5.0, 10.0, 50.0];
        let ground
            = ground_energy_scan(1.0, 1.0, 10.0, 200, &heights, (0.4, 0.6))
            .unwrap();
        assert!(ground.windows(2).into_iter().all(|w| w[0] <= w[1]));
    }

    #[test]
    fn tunneling_scenario() {
        let n = 1000;
        let res = solve(1.0, 1.0, 10.0, n, 5.0, 0.4, 0.6).unwrap();
        assert_eq!(res.len(), n);
        assert!(res.energies().windows(2).into_iter().all(|w| w[0] <= w[1]));

        let rho = res.density(0);
        let inside = 400..600;
        let p_inside = window_probability(&res.state(0), inside.clone());
        assert!(p_inside > 1e-4);
        assert!(p_inside < 0.1);
        let max_inside = rho.slice(nd::s![inside.clone()])
            .fold(0.0_f64, |acc, r| acc.max(*r));
        let max_outside = rho.slice(nd::s![..inside.start])
            .fold(0.0_f64, |acc, r| acc.max(*r));
        assert!(max_inside > 0.0);
        assert!(max_inside < max_outside);
    }

    #[test]
    fn continuum_normalized_states() {
        let system = System::barrier(
            1.0, 1.0, 10.0, 200, Barrier::new(5.0, 0.4, 0.6).unwrap()).unwrap();
        let res = system.solve().unwrap();
        let x = system.grid().x();
        let dx = x[1] - x[0];
        let q0 = wf_normalized(&res.state(0), dx);
        let q1 = wf_normalized(&res.state(1), dx);
        assert_relative_eq!(wf_norm(&q0, dx), 1.0, epsilon = 1e-12);
        assert_relative_eq!(wf_norm(&q1, dx), 1.0, epsilon = 1e-12);
        // trapezoid weights differ from the plain sum only at the ends
        assert!(wf_dot(&q0, &q1, dx).abs() < 1e-3);
    }

    #[test]
    fn repeated_solves_are_identical() {
        let a = solve(1.0, 1.0, 10.0, 150, 5.0, 0.4, 0.6).unwrap();
        let b = solve(1.0, 1.0, 10.0, 150, 5.0, 0.4, 0.6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn energies_only_match_full_solve() {
        let system = System::barrier(
            1.0, 1.0, 10.0, 80, Barrier::new(5.0, 0.4, 0.6).unwrap())
            .unwrap();
        let full = system.solve().unwrap();
        let energies = system.energies().unwrap();
        for (a, b) in full.energies().iter().zip(&energies) {
            assert_relative_eq!(*a, *b, max_relative = 1e-10);
        }
    }

    #[test]
    fn lowest_solutions() {
        let res = solve(1.0, 1.0, 10.0, 60, 5.0, 0.4, 0.6).unwrap();
        let sols = res.lowest(2);
        assert_eq!(sols.len(), 2);
        assert!(sols[0].cmp_energy(&sols[1]).unwrap().is_le());
        assert_eq!(sols[1].density().unwrap(), res.density(1));
        assert!(res.solution(60).is_none());
        assert_eq!(res.lowest(100).len(), 60);
    }

    #[test]
    fn arbitrary_potential_length_mismatch() {
        let grid = Grid::new(1.0, 5).unwrap();
        let res = System::from_potential(1.0, 1.0, grid, nd::Array1::zeros(4));
        assert!(matches!(res, Err(XError::Length(LengthError(5, 4)))));
    }
}
