use std::path::PathBuf;
use clap::Parser;
use lib::{ init_logging, load_params, rows, write_json };
use qmsim::config::ShellParams;
use serde_json::json;

// constant-radius orbital shell and its deformation frames

#[derive(Debug, Parser)]
#[command(name = "electron_shell", about = "Generate orbital shell frames for a Bohr atom.")]
struct Args {
    /// Atom or ion symbol (H, He+, Li2+, Be3+, C5+).
    atom: Option<String>,

    /// JSON file with parameters; unspecified fields take default values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

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
    let mut params: ShellParams = load_params(args.config.as_deref())?;
    if let Some(atom) = args.atom { params.atom = atom; }
    if let Some(frames) = args.frames { params.frames = frames; }

    let shell = params.surface()?;
    log::info!(
        "{}: shell of radius {} on a {:?} grid, {} frames",
        params.atom, params.radius, shell.dim(), params.frames,
    );
    let frames: Vec<serde_json::Value>
        = (0..params.frames)
        .map(|i| {
            let f = shell.frame(i);
            json!({ "x": rows(&f.x), "y": rows(&f.y), "z": rows(&f.z) })
        })
        .collect();

    write_json(
        &args.outdir,
        "electron_shell",
        &json!({ "params": params, "frames": frames }),
    )?;
    Ok(())
}
