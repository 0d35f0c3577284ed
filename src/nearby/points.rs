use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use radius::{GeoPoint, Located};

/// One row of the candidate file
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub at: GeoPoint,
}

impl Located for Candidate {
    fn location(&self) -> GeoPoint {
        self.at
    }
}

/// Load candidates from a CSV file with `id`, `lat` and `lon` columns
pub fn load_candidates(path: &Path) -> Result<Vec<Candidate>> {
    info!("Loading candidates from {}", path.display());

    let file = File::open(path).context("Failed to open points file")?;
    let candidates = read_candidates(file)?;

    info!("Loaded {} candidates", candidates.len());
    Ok(candidates)
}

pub fn read_candidates<R: Read>(reader: R) -> Result<Vec<Candidate>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();

    // Find column indices
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("Column '{}' not found", name))
    };
    let id_idx = column("id")?;
    let lat_idx = column("lat")?;
    let lon_idx = column("lon")?;

    let mut candidates = Vec::new();
    let mut skipped = 0usize;

    for (row, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping row {}: {}", row + 1, e);
                skipped += 1;
                continue;
            }
        };
        let id = record.get(id_idx).unwrap_or_default();
        let lat = record.get(lat_idx).and_then(|v| v.parse::<f64>().ok());
        let lon = record.get(lon_idx).and_then(|v| v.parse::<f64>().ok());

        let point = match (lat, lon) {
            (Some(lat), Some(lon)) => GeoPoint::validated(lat, lon),
            _ => {
                warn!("Skipping row {} ({}): unparseable coordinates", row + 1, id);
                skipped += 1;
                continue;
            }
        };

        match point {
            Ok(at) => candidates.push(Candidate {
                id: id.to_string(),
                at,
            }),
            Err(e) => {
                warn!("Skipping row {} ({}): {}", row + 1, id, e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} invalid rows", skipped);
    }

    Ok(candidates)
}
