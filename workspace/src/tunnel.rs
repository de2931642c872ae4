use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use ndarray as nd;
use lib::{ init_logging, load_params, write_json };
use qmsim::{ config::TunnelParams, utils };
use serde_json::json;

// lowest eigenstates of a particle in a box with a rectangular barrier in the
// middle; the ground state leaks into the barrier

#[derive(Debug, Parser)]
#[command(name = "tunnel", about = "Solve for the lowest states of a box with a barrier.")]
struct Args {
    /// JSON file with parameters; unspecified fields take default values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of grid points.
    #[arg(long)]
    points: Option<usize>,

    /// Barrier height.
    #[arg(long)]
    height: Option<f64>,

    /// Number of lowest states to write.
    #[arg(long)]
    states: Option<usize>,

    /// Output directory.
    #[arg(long, value_name = "PATH", default_value = lib::OUTDIR)]
    outdir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let mut params: TunnelParams = load_params(args.config.as_deref())?;
    if let Some(n) = args.points { params.points = n; }
    if let Some(v0) = args.height { params.barrier_height = v0; }
    if let Some(k) = args.states { params.states = k; }
    log::info!("{params:?}");

    let system = params.system().context("invalid tunneling parameters")?;
    let res = system.solve().context("eigen-decomposition failed")?;
    let sols = res.lowest(params.states);
    let window = params.barrier().index_range(params.points);
    for (k, sol) in sols.iter().enumerate() {
        let Some(wf) = sol.wf.as_ref() else { continue; };
        log::info!(
            "state {k}: E = {:.6e}, nodes = {}, P(barrier) = {:.3e}",
            sol.e,
            utils::node_count(wf, 1e-8),
            utils::window_probability(wf, window.clone()),
        );
    }

    // continuum normalization over the sample positions
    let x = system.grid().x();
    let dx = x[1] - x[0];
    let psi: Vec<nd::Array1<f64>>
        = sols.iter()
        .filter_map(|sol| sol.wf.as_ref())
        .map(|wf| utils::wf_normalized(wf, dx))
        .collect();
    for (k, pair) in psi.windows(2).enumerate() {
        log::debug!(
            "<ψ{k}|ψ{}> = {:.3e}", k + 1, utils::wf_dot(&pair[0], &pair[1], dx));
    }

    let densities: Vec<Vec<f64>>
        = sols.iter()
        .filter_map(|sol| sol.density())
        .map(|rho| rho.to_vec())
        .collect();
    let densities_continuum: Vec<Vec<f64>>
        = psi.iter()
        .map(|q| q.iter().map(|qk| qk * qk).collect())
        .collect();
    let energies: Vec<f64> = sols.iter().map(|sol| sol.e).collect();
    write_json(
        &args.outdir,
        "tunnel",
        &json!({
            "params": params,
            "x": system.grid().x().to_vec(),
            "v": system.get_V().to_vec(),
            "v_norm": utils::normalized_potential(system.get_V()).to_vec(),
            "e": energies,
            "density": densities,
            "density_continuum": densities_continuum,
        }),
    )?;
    Ok(())
}
