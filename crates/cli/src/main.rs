use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use warehouse_core::{EntityKind, ItemId, LocationId, OrderId, UnitConfig, UnitNormalizer};
use warehouse_graph::{Dataset, Warehouse};
use warehouse_heatmap::HeatMap;

#[derive(Parser)]
#[command(name = "warehouse")]
#[command(version, about = "Warehouse entity graph: joins and location heat map")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a dataset and print per-location frequency, intensity and color.
    Heatmap {
        /// JSON file with `locations`, `items`, `inventory` and `orders` rows
        dataset: PathBuf,
    },

    /// Print the ids reachable from the given ids.
    Query {
        dataset: PathBuf,
        #[arg(value_enum)]
        from: Kind,
        #[arg(value_enum)]
        to: Kind,
        /// Source ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Print entity counts, snapshot dates and map bounds.
    Summary { dataset: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Locations,
    Items,
    Orders,
}

#[derive(Serialize)]
struct Summary {
    counts: Vec<(EntityKind, usize)>,
    snapshot_dates: Vec<String>,
    aggregated_snapshot: Option<String>,
    bounds: Option<warehouse_graph::MapBounds>,
}

fn main() -> Result<()> {
    warehouse_observability::init();

    let cli = Cli::parse();
    let units = UnitNormalizer::new(UnitConfig::from_env());

    match cli.command {
        Commands::Heatmap { dataset } => {
            let warehouse = load(&dataset, &units)?;
            print_json(&HeatMap::from_store(warehouse.store()))
        }
        Commands::Query {
            dataset,
            from,
            to,
            ids,
        } => {
            let warehouse = load(&dataset, &units)?;
            let reached = run_query(&warehouse, from, to, &ids)?;
            print_json(&reached)
        }
        Commands::Summary { dataset } => {
            let warehouse = load(&dataset, &units)?;
            let store = warehouse.store();
            let summary = Summary {
                counts: EntityKind::ALL
                    .iter()
                    .map(|&kind| (kind, store.count(kind)))
                    .collect(),
                snapshot_dates: store
                    .snapshot_dates()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                aggregated_snapshot: warehouse.snapshot_date().map(|d| d.to_string()),
                bounds: warehouse.bounds(),
            };
            print_json(&summary)
        }
    }
}

fn load(path: &Path, units: &UnitNormalizer) -> Result<Warehouse> {
    let file =
        File::open(path).with_context(|| format!("failed to open dataset {}", path.display()))?;
    let dataset: Dataset = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to decode dataset {}", path.display()))?;
    tracing::info!(path = %path.display(), "dataset read");

    Warehouse::load(&dataset, units)
        .with_context(|| format!("failed to load dataset {}", path.display()))
}

fn run_query(
    warehouse: &Warehouse,
    from: Kind,
    to: Kind,
    ids: &[String],
) -> Result<BTreeSet<String>> {
    let q = warehouse.query();
    let locations = || ids.iter().map(|s| LocationId::new(s.as_str())).collect::<Vec<_>>();
    let items = || ids.iter().map(|s| ItemId::new(s.as_str())).collect::<Vec<_>>();
    let orders = || ids.iter().map(|s| OrderId::new(s.as_str())).collect::<Vec<_>>();

    let reached: BTreeSet<String> = match (from, to) {
        (Kind::Locations, Kind::Items) => strings(q.items_for_locations(&locations())?),
        (Kind::Orders, Kind::Items) => strings(q.items_for_orders(&orders())?),
        (Kind::Items, Kind::Locations) => strings(q.locations_for_items(&items())?),
        (Kind::Orders, Kind::Locations) => strings(q.locations_for_orders(&orders())?),
        (Kind::Items, Kind::Orders) => strings(q.orders_for_items(&items())?),
        (Kind::Locations, Kind::Orders) => strings(q.orders_for_locations(&locations())?),
        (from, to) => bail!("no join from {from:?} to {to:?}"),
    };
    Ok(reached)
}

fn strings<T: ToString>(ids: impl IntoIterator<Item = T>) -> BTreeSet<String> {
    ids.into_iter().map(|id| id.to_string()).collect()
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("failed to write output")?;
    writeln!(out)?;
    Ok(())
}
