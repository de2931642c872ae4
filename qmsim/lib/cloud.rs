//! Random point clouds and surfaces depicting the electron of a one-electron
//! ("Bohr") atom.
//!
//! Spherical coordinates follow the convention `(r, θ, φ)` with θ the
//! azimuthal angle in `[0, 2π)` and φ the polar angle in `[0, π)`. Both angles
//! are drawn uniformly, so points bunch up near the poles; this is the
//! intended look of the clouds rather than an area-uniform distribution.
//!
//! ```
//! use rand::{ SeedableRng, rngs::StdRng };
//! use qmsim::cloud::{ BohrAtom, exponential_cloud };
//!
//! let atom: BohrAtom = "Li2+".parse().unwrap();
//! assert_eq!(atom.nuclear_charge(), 3);
//! let mut rng = StdRng::seed_from_u64(10546);
//! let cloud = exponential_cloud(1000, 1.0, &mut rng).unwrap();
//! assert_eq!(cloud.len(), 1000);
//! ```

use std::{ f64::consts::PI, fmt, str::FromStr };
use ndarray as nd;
use rand::Rng;
use rand_distr::{ Distribution, Exp };
use crate::error::CloudError;

pub type CResult<T> = Result<T, CloudError>;

/// A one-electron atom or ion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BohrAtom {
    /// Hydrogen
    H,
    /// Singly ionized helium
    HePlus,
    /// Doubly ionized lithium
    Li2Plus,
    /// Triply ionized beryllium
    Be3Plus,
    /// Quintuply ionized carbon
    C5Plus,
}

impl BohrAtom {
    /// All supported species.
    pub const ALL: [Self; 5] = [
        Self::H, Self::HePlus, Self::Li2Plus, Self::Be3Plus, Self::C5Plus,
    ];

    /// Chemical symbol with charge state, e.g. `"He+"`.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::H => "H",
            Self::HePlus => "He+",
            Self::Li2Plus => "Li2+",
            Self::Be3Plus => "Be3+",
            Self::C5Plus => "C5+",
        }
    }

    /// Nuclear charge *Z*.
    pub fn nuclear_charge(&self) -> u32 {
        match self {
            Self::H => 1,
            Self::HePlus => 2,
            Self::Li2Plus => 3,
            Self::Be3Plus => 4,
            Self::C5Plus => 6,
        }
    }

    /// Number of bound electrons.
    pub fn electrons(&self) -> u32 { 1 }

    /// Mean radius of the 1s orbital in Bohr radii, `3 / (2 Z)`.
    pub fn mean_radius(&self) -> f64 {
        1.5 / self.nuclear_charge() as f64
    }
}

impl fmt::Display for BohrAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BohrAtom {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL.into_iter()
            .find(|atom| atom.symbol() == s)
            .ok_or_else(|| CloudError::NotBohrAtom(s.to_string()))
    }
}

/// Convert spherical coordinates (θ azimuthal, φ polar) to Cartesian.
pub fn spherical_to_cartesian(r: f64, theta: f64, phi: f64) -> (f64, f64, f64) {
    let (sin_th, cos_th) = theta.sin_cos();
    let (sin_ph, cos_ph) = phi.sin_cos();
    (r * sin_ph * cos_th, r * sin_ph * sin_th, r * cos_ph)
}

/// A set of points in three dimensions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cloud {
    /// x-coordinates
    pub x: nd::Array1<f64>,
    /// y-coordinates
    pub y: nd::Array1<f64>,
    /// z-coordinates
    pub z: nd::Array1<f64>,
}

impl Cloud {
    fn from_points(points: Vec<(f64, f64, f64)>) -> Self {
        let x: nd::Array1<f64> = points.iter().map(|p| p.0).collect();
        let y: nd::Array1<f64> = points.iter().map(|p| p.1).collect();
        let z: nd::Array1<f64> = points.iter().map(|p| p.2).collect();
        Self { x, y, z }
    }

    /// Get the number of points.
    pub fn len(&self) -> usize { self.x.len() }

    /// Return `true` if the cloud has no points.
    pub fn is_empty(&self) -> bool { self.x.is_empty() }

    /// Compute the distance of every point from the origin.
    pub fn radii(&self) -> nd::Array1<f64> {
        nd::Zip::from(&self.x).and(&self.y).and(&self.z)
            .map_collect(|x, y, z| (x * x + y * y + z * z).sqrt())
    }

    /// Displace every point by independent offsets drawn uniformly from
    /// `[-step, step]` along each axis.
    pub fn diffuse<R>(&mut self, step: f64, rng: &mut R) -> CResult<()>
    where R: Rng + ?Sized
    {
        CloudError::check_positive("step", step)?;
        nd::Zip::from(&mut self.x).and(&mut self.y).and(&mut self.z)
            .for_each(|x, y, z| {
                *x += rng.random_range(-step..=step);
                *y += rng.random_range(-step..=step);
                *z += rng.random_range(-step..=step);
            });
        Ok(())
    }
}

fn random_angles<R>(rng: &mut R) -> (f64, f64)
where R: Rng + ?Sized
{
    (rng.random_range(0.0..2.0 * PI), rng.random_range(0.0..PI))
}

/// Sample `n` points with exponentially distributed radii of mean `scale` and
/// uniformly distributed angles.
pub fn exponential_cloud<R>(n: usize, scale: f64, rng: &mut R)
    -> CResult<Cloud>
where R: Rng + ?Sized
{
    CloudError::check_count("n", n)?;
    CloudError::check_positive("scale", scale)?;
    let radial = Exp::new(scale.recip())?;
    let points: Vec<(f64, f64, f64)>
        = (0..n)
        .map(|_| {
            let r: f64 = radial.sample(rng);
            let (theta, phi) = random_angles(rng);
            spherical_to_cartesian(r, theta, phi)
        })
        .collect();
    log::debug!("cloud: sampled {n} points with radial scale {scale}");
    Ok(Cloud::from_points(points))
}

/// Sample a cloud for a particular atom, with the radial scale set to the
/// atom's mean 1s radius.
pub fn atom_cloud<R>(atom: BohrAtom, n: usize, rng: &mut R) -> CResult<Cloud>
where R: Rng + ?Sized
{
    exponential_cloud(n, atom.mean_radius(), rng)
}

/// Draw `trials` candidate points with radii uniform in `[0, r_max)` and
/// uniformly distributed angles, keeping each with probability
/// `exp(-r² / 2σ²)`.
pub fn gaussian_cloud<R>(trials: usize, r_max: f64, sigma: f64, rng: &mut R)
    -> CResult<Cloud>
where R: Rng + ?Sized
{
    CloudError::check_count("trials", trials)?;
    CloudError::check_positive("r_max", r_max)?;
    CloudError::check_positive("sigma", sigma)?;
    let mut points: Vec<(f64, f64, f64)> = Vec::with_capacity(trials);
    for _ in 0..trials {
        let r: f64 = rng.random_range(0.0..r_max);
        let (theta, phi) = random_angles(rng);
        let p = (-r.powi(2) / (2.0 * sigma.powi(2))).exp();
        if rng.random::<f64>() < p {
            points.push(spherical_to_cartesian(r, theta, phi));
        }
    }
    log::debug!("cloud: accepted {} of {trials} candidates", points.len());
    if points.is_empty() {
        log::warn!("cloud: no candidates accepted; try more trials");
    }
    Ok(Cloud::from_points(points))
}

/// A sphere of constant radius, sampled over a (θ, φ) meshgrid.
///
/// Arrays have shape `(n_phi, n_theta)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ShellSurface {
    /// x-coordinates
    pub x: nd::Array2<f64>,
    /// y-coordinates
    pub y: nd::Array2<f64>,
    /// z-coordinates
    pub z: nd::Array2<f64>,
}

impl ShellSurface {
    /// Return the surface deformed for animation frame `i`:
    /// ```text
    /// x → x cos(0.1 i)
    /// y → y sin(0.1 i)
    /// z → z
    /// ```
    pub fn frame(&self, i: usize) -> Self {
        let (s, c) = (0.1 * i as f64).sin_cos();
        Self {
            x: self.x.mapv(|xk| xk * c),
            y: self.y.mapv(|yk| yk * s),
            z: self.z.clone(),
        }
    }

    /// Get the meshgrid shape `(n_phi, n_theta)`.
    pub fn dim(&self) -> (usize, usize) { self.x.dim() }
}

/// Generate a sphere of radius `radius` over `n_theta` azimuthal points in
/// `[0, 2π]` and `n_phi` polar points in `[0, π]`.
pub fn shell_surface(radius: f64, n_theta: usize, n_phi: usize)
    -> CResult<ShellSurface>
{
    CloudError::check_positive("radius", radius)?;
    CloudError::check_count("n_theta", n_theta)?;
    CloudError::check_count("n_phi", n_phi)?;
    let theta: nd::Array1<f64> = nd::Array1::linspace(0.0, 2.0 * PI, n_theta);
    let phi: nd::Array1<f64> = nd::Array1::linspace(0.0, PI, n_phi);
    let mut x: nd::Array2<f64> = nd::Array2::zeros((n_phi, n_theta));
    let mut y: nd::Array2<f64> = nd::Array2::zeros((n_phi, n_theta));
    let mut z: nd::Array2<f64> = nd::Array2::zeros((n_phi, n_theta));
    for (i, &ph) in phi.iter().enumerate() {
        for (j, &th) in theta.iter().enumerate() {
            let (xij, yij, zij) = spherical_to_cartesian(radius, th, ph);
            x[[i, j]] = xij;
            y[[i, j]] = yij;
            z[[i, j]] = zij;
        }
    }
    Ok(ShellSurface { x, y, z })
}
