//! Closed-form probability density of the 2p_z orbital of a hydrogen-like atom,
//! sampled over a cross-section in the (r, θ) plane.
//!
//! Lengths are in Bohr radii. The radial part uses the hydrogen prefactor
//! `1 / (4√6)` with the exponent scaled by the nuclear charge *Z*, so only the
//! shape (not the normalization) changes with *Z*.

use std::f64::consts::PI;
use ndarray as nd;
use crate::error::OrbitalError;

pub type OResult<T> = Result<T, OrbitalError>;

/// Radial part of the 2p orbital, `r exp(-Z r / 2) / (4√6)`.
pub fn radial_2p(r: f64, z: f64) -> f64 {
    r * (-z * r / 2.0).exp() / (4.0 * 6.0_f64.sqrt())
}

/// Spherical harmonic Y₁₀, `cos θ / √(4π)`.
pub fn angular_y10(theta: f64) -> f64 {
    theta.cos() / (4.0 * PI).sqrt()
}

/// Probability density `|R₂₁(r) Y₁₀(θ)|²`.
pub fn density_2pz(r: f64, theta: f64, z: f64) -> f64 {
    (radial_2p(r, z) * angular_y10(theta)).powi(2)
}

/// Brightness factor `sin(0.1 i) + 1.5` applied to the density in animation
/// frame `i`. Always lies in `[0.5, 2.5]`.
pub fn pulse(i: usize) -> f64 { (0.1 * i as f64).sin() + 1.5 }

/// The 2p_z density on an (r, θ) meshgrid, together with the Cartesian
/// coordinates of the cross-section `x = r sin θ`, `y = r cos θ`.
///
/// Two-dimensional arrays have shape `(n_theta, n_r)`.
#[derive(Clone, Debug)]
pub struct DensityMap {
    /// Radial coordinates.
    pub r: nd::Array1<f64>,
    /// Polar angles.
    pub theta: nd::Array1<f64>,
    /// Cross-section abscissae.
    pub x: nd::Array2<f64>,
    /// Cross-section ordinates.
    pub y: nd::Array2<f64>,
    /// Probability density.
    pub density: nd::Array2<f64>,
    /// Nuclear charge.
    pub z: f64,
}

impl DensityMap {
    /// Sample the density over `n_r` radii in `[0, r_max]` and `n_theta`
    /// angles in `[0, π]` for nuclear charge `z`.
    pub fn new(r_max: f64, n_r: usize, n_theta: usize, z: f64) -> OResult<Self> {
        OrbitalError::check_positive("r_max", r_max)?;
        OrbitalError::check_positive("z", z)?;
        OrbitalError::check_points("r", n_r)?;
        OrbitalError::check_points("theta", n_theta)?;
        let r: nd::Array1<f64> = nd::Array1::linspace(0.0, r_max, n_r);
        let theta: nd::Array1<f64> = nd::Array1::linspace(0.0, PI, n_theta);
        let shape = (n_theta, n_r);
        let x = nd::Array2::from_shape_fn(shape, |(i, j)| r[j] * theta[i].sin());
        let y = nd::Array2::from_shape_fn(shape, |(i, j)| r[j] * theta[i].cos());
        let density = nd::Array2::from_shape_fn(
            shape, |(i, j)| density_2pz(r[j], theta[i], z));
        Ok(Self { r, theta, x, y, density, z })
    }

    /// Return the density scaled for animation frame `i`; see
    /// [`pulse`].
    pub fn frame(&self, i: usize) -> nd::Array2<f64> {
        let scale = pulse(i);
        self.density.mapv(|d| d * scale)
    }

    /// Get the meshgrid shape `(n_theta, n_r)`.
    pub fn dim(&self) -> (usize, usize) { self.density.dim() }

    /// Return the `(r, θ)` coordinates and value of the largest sampled
    /// density.
    pub fn peak(&self) -> (f64, f64, f64) {
        let ((i, j), val)
            = self.density.indexed_iter()
            .fold(((0, 0), f64::NEG_INFINITY), |best, (idx, d)| {
                if *d > best.1 { (idx, *d) } else { best }
            });
        (self.r[j], self.theta[i], val)
    }
}
