use std::path::PathBuf;
use clap::Parser;
use lib::{ init_logging, load_params, write_json };
use qmsim::{
    config::{ CloudKind, CloudParams },
    error::CloudError,
};
use rand::{ SeedableRng, rngs::StdRng };
use serde_json::json;

// random electron cloud for a one-electron atom or ion

#[derive(Debug, Parser)]
#[command(name = "electron_cloud", about = "Sample an electron cloud for a Bohr atom.")]
struct Args {
    /// Atom or ion symbol (H, He+, Li2+, Be3+, C5+).
    atom: Option<String>,

    /// JSON file with parameters; unspecified fields take default values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Use gaussian rejection sampling instead of exponential radii.
    #[arg(long)]
    gaussian: bool,

    /// Number of (candidate) points.
    #[arg(long)]
    points: Option<usize>,

    /// Number of random-walk steps to apply after sampling.
    #[arg(long, default_value_t = 0)]
    diffuse: usize,

    /// Size of each random-walk step.
    #[arg(long, default_value_t = 0.05)]
    step: f64,

    /// Random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory.
    #[arg(long, value_name = "PATH", default_value = lib::OUTDIR)]
    outdir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let mut params: CloudParams = load_params(args.config.as_deref())?;
    if let Some(atom) = args.atom { params.atom = atom; }
    if args.gaussian { params.kind = CloudKind::Gaussian; }
    if let Some(n) = args.points { params.points = Some(n); }
    if let Some(seed) = args.seed { params.seed = seed; }

    let atom = match params.bohr_atom() {
        Ok(atom) => atom,
        Err(err @ CloudError::NotBohrAtom(_)) => {
            log::error!("{err}; no simulation available");
            return Ok(());
        },
        Err(err) => return Err(err.into()),
    };
    log::info!(
        "{atom} is a Bohr atom; sampling electron cloud from {} {:?} draws",
        params.num_points(), params.kind,
    );

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut cloud = params.sample(&mut rng)?;
    for _ in 0..args.diffuse {
        cloud.diffuse(args.step, &mut rng)?;
    }
    log::info!("{} points", cloud.len());

    write_json(
        &args.outdir,
        "electron_cloud",
        &json!({
            "params": params,
            "atom": atom.symbol(),
            "z": atom.nuclear_charge(),
            "x": cloud.x.to_vec(),
            "y": cloud.y.to_vec(),
            "z_coord": cloud.z.to_vec(),
        }),
    )?;
    Ok(())
}
