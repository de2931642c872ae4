use std::path::PathBuf;
use clap::Parser;
use lib::{ init_logging, load_params, rows, write_json };
use qmsim::{ config::OrbitalParams, orbital };
use serde_json::json;

// probability density of the 2p_z orbital; lithium by default

#[derive(Debug, Parser)]
#[command(name = "orbital_density", about = "Sample the 2p_z probability density.")]
struct Args {
    /// JSON file with parameters; unspecified fields take default values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Nuclear charge.
    #[arg(long)]
    z: Option<f64>,

    /// Number of frames.
    #[arg(long)]
    frames: Option<usize>,

    /// Output directory.
    #[arg(long, value_name = "PATH", default_value = lib::OUTDIR)]
    outdir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let mut params: OrbitalParams = load_params(args.config.as_deref())?;
    if let Some(z) = args.z { params.z = z; }
    if let Some(frames) = args.frames { params.frames = frames; }

    let map = params.density_map()?;
    let (r, theta, peak) = map.peak();
    log::info!("peak density {peak:.3e} at r = {r:.3}, θ = {theta:.3}");

    // frame i is the static map scaled by pulse[i]
    let pulse: Vec<f64> = (0..params.frames).map(orbital::pulse).collect();
    let frame_peak: Vec<f64>
        = (0..params.frames)
        .map(|i| map.frame(i).fold(0.0_f64, |acc, d| acc.max(*d)))
        .collect();
    log::info!(
        "{} frames, peak density between {:.3e} and {:.3e}",
        params.frames,
        frame_peak.iter().copied().fold(f64::INFINITY, f64::min),
        frame_peak.iter().copied().fold(0.0, f64::max),
    );

    write_json(
        &args.outdir,
        "orbital_density",
        &json!({
            "params": params,
            "r": map.r.to_vec(),
            "theta": map.theta.to_vec(),
            "x": rows(&map.x),
            "y": rows(&map.y),
            "density": rows(&map.density),
            "pulse": pulse,
            "frame_peak": frame_peak,
        }),
    )?;
    Ok(())
}
