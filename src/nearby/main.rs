//! Radius search over a CSV of candidate points.
//!
//! Loads candidates, rejects them against the search bounding box, checks
//! the survivors with the exact great-circle distance and prints the
//! matches as JSON, nearest first.

mod config;
mod points;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use radius::proximity::{par_within_radius, within_radius, Match, PointIndex};
use radius::GeoProximityFilter;

use crate::config::{Config, SearchConfig};
use crate::points::{load_candidates, Candidate};

#[derive(Parser, Debug)]
#[command(name = "nearby")]
#[command(about = "Find points within a great-circle radius")]
struct Args {
    /// CSV file with id, lat and lon columns
    #[arg(short, long)]
    points: PathBuf,

    /// Optional TOML file with a [search] section
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Center latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Center longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Search radius in kilometers
    #[arg(short, long)]
    radius_km: Option<f64>,

    /// Maximum number of results
    #[arg(short, long)]
    limit: Option<usize>,

    /// Scan candidates on the rayon thread pool
    #[arg(long, conflicts_with = "index")]
    parallel: bool,

    /// Build an R-tree over the candidates before querying
    #[arg(long)]
    index: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

/// Output row
#[derive(Debug, Serialize)]
struct NearbyResult {
    id: String,
    lat: f64,
    lon: f64,
    distance_km: f64,
}

fn to_results(matches: Vec<Match<'_, Candidate>>, limit: Option<usize>) -> Vec<NearbyResult> {
    matches
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|m| NearbyResult {
            id: m.item.id.clone(),
            lat: m.item.at.lat,
            lon: m.item.at.lon,
            distance_km: m.distance_km,
        })
        .collect()
}

/// Build the filter from merged search settings; center and radius are required
fn resolve_search(search: &SearchConfig) -> Result<(GeoProximityFilter, Option<usize>)> {
    let lat = search
        .lat
        .context("Missing center latitude (--lat or [search].lat)")?;
    let lon = search
        .lon
        .context("Missing center longitude (--lon or [search].lon)")?;
    let radius_km = search
        .radius_km
        .context("Missing radius (--radius-km or [search].radius_km)")?;

    let filter =
        GeoProximityFilter::new(radius_km, lat, lon).context("Invalid search parameters")?;
    Ok((filter, search.limit))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout carries the results, RUST_LOG wins over --verbose
    let default_level = if args.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let file_search = match &args.config {
        Some(path) => Config::load_from_file(path)?.search,
        None => SearchConfig::default(),
    };
    let search = SearchConfig {
        lat: args.lat,
        lon: args.lon,
        radius_km: args.radius_km,
        limit: args.limit,
    }
    .or(file_search);

    let (filter, limit) = resolve_search(&search)?;
    let center = filter.center();
    info!(
        "Searching {}km around ({}, {}), bbox {:?}",
        filter.radius_km(),
        center.lat,
        center.lon,
        filter.bounding_box().to_degrees()
    );

    let candidates = load_candidates(&args.points)?;

    let results = if args.index {
        let index = PointIndex::build(candidates);
        to_results(index.query(&filter), limit)
    } else if args.parallel {
        to_results(par_within_radius(&filter, &candidates), limit)
    } else {
        to_results(within_radius(&filter, &candidates), limit)
    };

    info!("Found {} points", results.len());
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
