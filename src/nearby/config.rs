use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct SearchConfig {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius_km: Option<f64>,
    pub limit: Option<usize>,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl SearchConfig {
    /// Fill unset values from `other`; values already set here win
    pub fn or(self, other: SearchConfig) -> SearchConfig {
        SearchConfig {
            lat: self.lat.or(other.lat),
            lon: self.lon.or(other.lon),
            radius_km: self.radius_km.or(other.radius_km),
            limit: self.limit.or(other.limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[search]\nlat = 52.52\nlon = 13.405\nradius_km = 25.0\nlimit = 10"
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(
            config.search,
            SearchConfig {
                lat: Some(52.52),
                lon: Some(13.405),
                radius_km: Some(25.0),
                limit: Some(10),
            }
        );
    }

    #[test]
    fn test_missing_section_is_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[search\nlat = ").unwrap();
        let err = Config::load_from_file(file.path()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse config file");
    }

    #[test]
    fn test_cli_overrides_file() {
        let cli = SearchConfig {
            radius_km: Some(5.0),
            ..Default::default()
        };
        let file = SearchConfig {
            lat: Some(1.0),
            lon: Some(2.0),
            radius_km: Some(25.0),
            limit: None,
        };
        let merged = cli.or(file);
        assert_eq!(merged.lat, Some(1.0));
        assert_eq!(merged.lon, Some(2.0));
        assert_eq!(merged.radius_km, Some(5.0));
        assert_eq!(merged.limit, None);
    }
}
