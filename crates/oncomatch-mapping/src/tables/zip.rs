//! US zip code → coordinate index.
//!
//! Loaded once from a bulk CSV download (uszips.csv format: `zip`,
//! `lat`, `lng` columns, further columns ignored) and queried by the
//! distance rule. Tests build small indexes in memory instead.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use oncomatch_common::{MatchError, Result};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Default)]
pub struct ZipIndex {
    by_zip: HashMap<String, LatLng>,
}

impl ZipIndex {
    /// An index that resolves nothing. Distance filtering is effectively
    /// disabled until a real index is supplied.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, LatLng)>,
    {
        Self {
            by_zip: entries.into_iter().collect(),
        }
    }

    /// Load the index from a zip CSV file.
    ///
    /// Missing file is a configuration error carrying download
    /// instructions; malformed rows are skipped.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MatchError::Config(format!(
                "zip code data not found at {path:?}\n\
                 Download uszips.csv from https://simplemaps.com/data/us-zips \
                 and point zip_data_path at it"
            )));
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let header = lines
            .next()
            .ok_or_else(|| MatchError::Config(format!("zip code file {path:?} is empty")))??;
        let columns: Vec<String> = header
            .split(',')
            .map(|c| c.trim().trim_matches('"').to_string())
            .collect();
        let zip_idx = column_index(&columns, "zip", path)?;
        let lat_idx = column_index(&columns, "lat", path)?;
        let lng_idx = column_index(&columns, "lng", path)?;

        let mut by_zip = HashMap::new();
        for line in lines {
            let line = line?;
            let cols: Vec<&str> = line.split(',').map(|c| c.trim_matches('"')).collect();
            if cols.len() <= zip_idx.max(lat_idx).max(lng_idx) {
                continue;
            }
            let (Ok(lat), Ok(lng)) = (cols[lat_idx].parse::<f64>(), cols[lng_idx].parse::<f64>())
            else {
                debug!(zip = cols[zip_idx], "skipping zip row with bad coordinates");
                continue;
            };
            by_zip.insert(cols[zip_idx].to_string(), LatLng { lat, lng });
        }

        info!(n_zips = by_zip.len(), path = %path.display(), "Loaded zip code index");
        Ok(Self { by_zip })
    }

    pub fn resolve(&self, zip_code: &str) -> Option<LatLng> {
        self.by_zip.get(zip_code).copied()
    }

    pub fn len(&self) -> usize {
        self.by_zip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_zip.is_empty()
    }
}

fn column_index(columns: &[String], name: &str, path: &Path) -> Result<usize> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| MatchError::Config(format!("zip code file {path:?} missing {name} column")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_from_entries() {
        let index = ZipIndex::from_entries([(
            "01730".to_string(),
            LatLng { lat: 42.49, lng: -71.28 },
        )]);
        let point = index.resolve("01730").unwrap();
        assert!((point.lat - 42.49).abs() < f64::EPSILON);
        assert_eq!(index.resolve("99999"), None);
    }

    #[test]
    fn test_load_from_csv() {
        let dir = std::env::temp_dir().join("oncomatch-zip-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("uszips.csv");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "\"zip\",\"lat\",\"lng\",\"city\"").unwrap();
        writeln!(f, "\"01730\",\"42.49\",\"-71.28\",\"Bedford\"").unwrap();
        writeln!(f, "\"00000\",\"bad\",\"row\",\"Nowhere\"").unwrap();

        let index = ZipIndex::load_from_path(&path).unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.resolve("01730").is_some());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = ZipIndex::load_from_path(Path::new("/nonexistent/uszips.csv")).unwrap_err();
        assert!(matches!(err, MatchError::Config(_)));
    }
}
