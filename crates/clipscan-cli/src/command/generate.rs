use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Args;
use clipscan::{Observation, ObservationTable};
use rand::{Rng, SeedableRng as _};
use rand_distr::{Distribution as _, Geometric};
use rand_pcg::Pcg32;
use tracing::info;

use crate::util::Output;

#[derive(Debug, Clone, Args)]
pub(crate) struct GenerateArg {
    /// Number of entities in the panel
    #[arg(long, default_value_t = 100)]
    entities: u32,

    /// Each entity is observed at periods `1..=MAX_PERIOD`
    #[arg(long, default_value_t = 12)]
    max_period: u32,

    /// Per-period probability of the first event
    #[arg(long, default_value_t = 0.15)]
    hazard: f64,

    /// Random seed (drawn from the OS if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Builds a balanced panel: every entity is observed at every period, and
/// the event flag is set at the period of its first event, if that falls
/// within the observation window.
fn generate_panel<R>(
    entities: u32,
    max_period: u32,
    hazard: f64,
    rng: &mut R,
) -> anyhow::Result<ObservationTable>
where
    R: Rng + ?Sized,
{
    let geometric = Geometric::new(hazard).context("Invalid hazard")?;

    let mut rows = Vec::new();
    for entity in 1..=entities {
        // Failures before the first success, so the event falls on period `n + 1`.
        let event_at = geometric.sample(rng).saturating_add(1);
        rows.extend((1..=max_period).map(|period| Observation {
            entity_id: i64::from(entity),
            period: i64::from(period),
            event_flag: u64::from(period) == event_at,
        }));
    }
    Ok(rows.into_iter().collect())
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    if arg.entities == 0 || arg.max_period == 0 {
        bail!("--entities and --max-period must be positive");
    }
    if arg.hazard.is_nan() || arg.hazard <= 0.0 || arg.hazard > 1.0 {
        bail!("--hazard must be in (0, 1], got {}", arg.hazard);
    }

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    info!(
        seed,
        entities = arg.entities,
        max_period = arg.max_period,
        hazard = arg.hazard,
        "generating panel"
    );

    let mut rng = Pcg32::seed_from_u64(seed);
    let table = generate_panel(arg.entities, arg.max_period, arg.hazard, &mut rng)?;
    Output::save_json(&table, arg.output.clone())
}
