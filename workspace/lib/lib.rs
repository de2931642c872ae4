//! Shared plumbing for the programs in `src/`: logging setup, parameter
//! loading, and output files.

use std::{ fs, path::{ Path, PathBuf } };
use anyhow::Context;
use ndarray as nd;
use serde::{ Serialize, de::DeserializeOwned };

/// Default output directory, relative to the working directory.
pub const OUTDIR: &str = "output";

/// Initialize `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"))
        .init();
}

/// Load a parameter set from a JSON file, or fall back to its defaults if no
/// file is given.
pub fn load_params<T>(path: Option<&Path>) -> anyhow::Result<T>
where T: DeserializeOwned + Default
{
    match path {
        Some(p) => {
            let text = fs::read_to_string(p)
                .with_context(|| format!("couldn't read {}", p.display()))?;
            let params: T = serde_json::from_str(&text)
                .with_context(|| format!("couldn't parse {}", p.display()))?;
            log::info!("loaded parameters from {}", p.display());
            Ok(params)
        },
        None => Ok(T::default()),
    }
}

/// Create `dir` (and parents) if it doesn't already exist.
pub fn mkdir(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("couldn't create {}", dir.display()))
}

/// Serialize `value` as pretty-printed JSON to `outdir/name.json`, creating
/// `outdir` if needed, and return the path written.
pub fn write_json<T>(outdir: &Path, name: &str, value: &T)
    -> anyhow::Result<PathBuf>
where T: Serialize + ?Sized
{
    mkdir(outdir)?;
    let path = outdir.join(format!("{name}.json"));
    let text = serde_json::to_string_pretty(value)
        .context("couldn't serialize output")?;
    fs::write(&path, text)
        .with_context(|| format!("couldn't write {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(path)
}

/// Convert a 2D array to nested rows for serialization.
pub fn rows<S>(a: &nd::ArrayBase<S, nd::Ix2>) -> Vec<Vec<f64>>
where S: nd::Data<Elem = f64>
{
    a.rows().into_iter().map(|row| row.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use qmsim::config::TunnelParams;
    use super::*;

    #[test]
    fn params_default_without_file() {
        let params: TunnelParams = load_params(None).unwrap();
        assert_eq!(params, TunnelParams::default());
    }

    #[test]
    fn params_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tunnel.json");
        fs::write(&path, r#"{ "points": 64, "barrier_range": [0.25, 0.5] }"#)
            .unwrap();
        let params: TunnelParams = load_params(Some(path.as_path())).unwrap();
        assert_eq!(params.points, 64);
        assert_eq!(params.barrier_range, (0.25, 0.5));
        assert_eq!(params.barrier_height, 5.0);
    }

    #[test]
    fn params_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ points: }").unwrap();
        assert!(load_params::<TunnelParams>(Some(path.as_path())).is_err());
        assert!(
            load_params::<TunnelParams>(Some(dir.path().join("missing.json").as_path()))
                .is_err()
        );
    }

    #[test]
    fn json_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let outdir = dir.path().join("nested").join("output");
        let a = nd::array![[1.0, 2.0], [3.0, 4.0]];
        let path = write_json(&outdir, "a", &rows(&a)).unwrap();
        assert_eq!(path, outdir.join("a.json"));
        let back: Vec<Vec<f64>>
            = serde_json::from_str(&fs::read_to_string(&path).unwrap())
            .unwrap();
        assert_eq!(back, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }
}
