use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use clipscan::multinom;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use tracing::info;

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct DrawArg {
    /// Path to a JSON array of probability rows
    matrix: PathBuf,

    /// Random seed (drawn from the OS if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DrawArg) -> anyhow::Result<()> {
    let matrix = util::read_matrix_file(&arg.matrix)?;
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    info!(seed, rows = matrix.len(), "drawing categories");

    let mut rng = Pcg32::seed_from_u64(seed);
    let draws = multinom::draw_categories(&matrix, &mut rng)
        .with_context(|| format!("Failed to draw from {}", arg.matrix.display()))?;
    Output::save_json(&draws, arg.output.clone())
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use super::*;

    #[test]
    fn test_draw_from_matrix_file() {
        let dir = env::temp_dir().join(format!("clipscan-draw-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let matrix_path = dir.join("matrix.json");
        let output_path = dir.join("draws.json");
        fs::write(&matrix_path, "[[0.0, 1.0], [0.0, 0.0, 2.5], [4.0]]").unwrap();

        let arg = DrawArg {
            matrix: matrix_path.clone(),
            seed: Some(3),
            output: Some(output_path.clone()),
        };
        run(&arg).unwrap();

        let draws: Vec<usize> = util::read_json_file("draws", &output_path).unwrap();
        assert_eq!(draws, vec![2, 3, 1]);

        fs::write(&matrix_path, "[[0.0, 0.0]]").unwrap();
        assert!(run(&arg).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rejects_non_matrix_json() {
        let dir = env::temp_dir().join(format!("clipscan-draw-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("matrix.json");
        fs::write(&path, r#"{"rows": [[1.0]]}"#).unwrap();
        assert!(util::read_matrix_file(&path).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
