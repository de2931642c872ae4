//! Parameter sets for each computation, with defaults matching the classic
//! demonstration values.
//!
//! All structs implement [`serde::Deserialize`] with `#[serde(default)]`, so a
//! configuration file needs to name only the fields it changes.

use serde::{ Deserialize, Serialize };
use crate::{
    cloud::{ self, BohrAtom, CResult, Cloud, ShellSurface },
    error::CloudError,
    orbital::{ DensityMap, OResult },
    solve::{ self, Barrier, EigenResult, System, XResult },
};

/// Parameters for the barrier tunneling computation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelParams {
    /// Reduced Planck constant.
    pub hbar: f64,
    /// Particle mass.
    pub mass: f64,
    /// Box length.
    pub length: f64,
    /// Number of grid points.
    pub points: usize,
    /// Barrier height.
    pub barrier_height: f64,
    /// Fractional barrier bounds `[start, end)`.
    pub barrier_range: (f64, f64),
    /// Number of lowest states to report.
    pub states: usize,
}

impl Default for TunnelParams {
    fn default() -> Self {
        Self {
            hbar: 1.0,
            mass: 1.0,
            length: 10.0,
            points: 1000,
            barrier_height: 5.0,
            barrier_range: (0.4, 0.6),
            states: 2,
        }
    }
}

impl TunnelParams {
    /// Get the barrier described by these parameters.
    pub fn barrier(&self) -> Barrier {
        Barrier {
            height: self.barrier_height,
            start: self.barrier_range.0,
            end: self.barrier_range.1,
        }
    }

    /// Build the corresponding [`System`].
    pub fn system(&self) -> XResult<System> {
        System::barrier(
            self.hbar, self.mass, self.length, self.points, self.barrier())
    }

    /// Compute all eigenstates; see [`solve::solve`].
    pub fn solve(&self) -> XResult<EigenResult> {
        solve::solve(
            self.hbar,
            self.mass,
            self.length,
            self.points,
            self.barrier_height,
            self.barrier_range.0,
            self.barrier_range.1,
        )
    }
}

/// Which sampling scheme to use for an electron cloud.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudKind {
    /// Exponential radii; see [`cloud::exponential_cloud`].
    Exponential,
    /// Gaussian rejection sampling; see [`cloud::gaussian_cloud`].
    Gaussian,
}

impl CloudKind {
    /// Number of points (or candidates) drawn when none is given.
    pub fn default_points(self) -> usize {
        match self {
            Self::Exponential => 10_000,
            Self::Gaussian => 80,
        }
    }
}

/// Parameters for electron cloud sampling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudParams {
    /// Atom or ion symbol; must name a [`BohrAtom`].
    pub atom: String,
    /// Sampling scheme.
    pub kind: CloudKind,
    /// Number of points (exponential) or candidate points (gaussian); `None`
    /// uses [`CloudKind::default_points`].
    pub points: Option<usize>,
    /// Mean radius for exponential sampling; `None` uses the atom's mean 1s
    /// radius scaled so that hydrogen gets 1.
    pub scale: Option<f64>,
    /// Radial cutoff for gaussian sampling.
    pub r_max: f64,
    /// Width of the gaussian acceptance profile.
    pub sigma: f64,
    /// Random seed.
    pub seed: u64,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            atom: "H".to_string(),
            kind: CloudKind::Exponential,
            points: None,
            scale: Some(1.0),
            r_max: 3.0,
            sigma: 0.8,
            seed: 10546,
        }
    }
}

impl CloudParams {
    /// Parse the atom symbol.
    pub fn bohr_atom(&self) -> CResult<BohrAtom> { self.atom.parse() }

    /// Radial scale for exponential sampling.
    pub fn radial_scale(&self) -> CResult<f64> {
        let atom = self.bohr_atom()?;
        let scale = self.scale
            .unwrap_or_else(|| atom.mean_radius() / BohrAtom::H.mean_radius());
        CloudError::check_positive("scale", scale)?;
        Ok(scale)
    }

    /// Number of points (or candidates) to draw.
    pub fn num_points(&self) -> usize {
        self.points.unwrap_or_else(|| self.kind.default_points())
    }

    /// Sample a cloud using `rng`.
    pub fn sample<R>(&self, rng: &mut R) -> CResult<Cloud>
    where R: rand::Rng + ?Sized
    {
        self.bohr_atom()?;
        match self.kind {
            CloudKind::Exponential => {
                cloud::exponential_cloud(
                    self.num_points(), self.radial_scale()?, rng)
            },
            CloudKind::Gaussian => {
                cloud::gaussian_cloud(
                    self.num_points(), self.r_max, self.sigma, rng)
            },
        }
    }
}

/// Parameters for the orbital shell surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellParams {
    /// Atom or ion symbol; must name a [`BohrAtom`].
    pub atom: String,
    /// Shell radius.
    pub radius: f64,
    /// Number of azimuthal points.
    pub n_theta: usize,
    /// Number of polar points.
    pub n_phi: usize,
    /// Number of animation frames to generate.
    pub frames: usize,
}

impl Default for ShellParams {
    fn default() -> Self {
        Self {
            atom: "H".to_string(),
            radius: 1.0,
            n_theta: 100,
            n_phi: 50,
            frames: 100,
        }
    }
}

impl ShellParams {
    /// Generate the undeformed surface.
    pub fn surface(&self) -> CResult<ShellSurface> {
        self.atom.parse::<BohrAtom>()?;
        cloud::shell_surface(self.radius, self.n_theta, self.n_phi)
    }
}

/// Parameters for the 2p_z density map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitalParams {
    /// Radial extent in Bohr radii.
    pub r_max: f64,
    /// Number of radial points.
    pub n_r: usize,
    /// Number of polar points.
    pub n_theta: usize,
    /// Nuclear charge.
    pub z: f64,
    /// Number of animation frames to generate.
    pub frames: usize,
}

impl Default for OrbitalParams {
    fn default() -> Self {
        Self { r_max: 20.0, n_r: 200, n_theta: 200, z: 3.0, frames: 100 }
    }
}

impl OrbitalParams {
    /// Sample the density map.
    pub fn density_map(&self) -> OResult<DensityMap> {
        DensityMap::new(self.r_max, self.n_r, self.n_theta, self.z)
    }
}

#[cfg(test)]
mod tests {
    use rand::{ SeedableRng, rngs::StdRng };
    use crate::error::XError;
    use super::*;

    #[test]
    fn tunnel_defaults() {
        let params = TunnelParams::default();
        assert_eq!(params.points, 1000);
        assert_eq!(params.barrier().index_range(params.points), 400..600);
        let system = params.system().unwrap();
        assert_eq!(system.get_V()[400], 5.0);
        assert_eq!(system.get_V()[600], 0.0);
    }

    #[test]
    fn tunnel_params_validate() {
        let params = TunnelParams { points: 1, ..Default::default() };
        assert!(matches!(params.solve(), Err(XError::InvalidDimension(1))));
        let params = TunnelParams {
            barrier_range: (0.7, 0.2),
            ..Default::default()
        };
        assert!(matches!(params.system(), Err(XError::InvalidRange(..))));
    }

    #[test]
    fn cloud_params_sample() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = CloudParams { points: Some(50), ..Default::default() };
        assert_eq!(params.sample(&mut rng).unwrap().len(), 50);
        let params = CloudParams {
            atom: "Ne".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            params.sample(&mut rng),
            Err(CloudError::NotBohrAtom(_)),
        ));
        let params = CloudParams {
            atom: "He+".to_string(),
            scale: None,
            ..Default::default()
        };
        assert_eq!(params.radial_scale().unwrap(), 0.5);
    }

    #[test]
    fn cloud_point_count_follows_kind() {
        let params: CloudParams
            = serde_json::from_str(r#"{ "kind": "gaussian" }"#).unwrap();
        assert_eq!(params.num_points(), 80);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(params.sample(&mut rng).unwrap().len() <= 80);
        assert_eq!(CloudParams::default().num_points(), 10_000);
        let params: CloudParams
            = serde_json::from_str(r#"{ "kind": "gaussian", "points": 500 }"#)
            .unwrap();
        assert_eq!(params.num_points(), 500);
    }

    #[test]
    fn shell_and_orbital_defaults() {
        let shell = ShellParams::default().surface().unwrap();
        assert_eq!(shell.dim(), (50, 100));
        let map = OrbitalParams::default().density_map().unwrap();
        assert_eq!(map.dim(), (200, 200));
        assert_eq!(OrbitalParams::default().frames, 100);
    }
}
