//! Static sky tables and the per-render data set
//!
//! The constellation tables are whitespace separated text, one record per
//! line, with `#` starting a comment line:
//!
//! ```text
//! # name        ra1      dec1    ra2      dec2      (degrees)
//! Ursa_Major    165.93   61.75   165.46   56.38
//!
//! # name        ra       dec     ...                (ra in hours)
//! Ursa_Major    11.0     58.0
//! ```

use std::path::{Path, PathBuf};

use crate::catalog::{Star, StarCatalog};
use crate::custom_objects::{self, CustomObject};
use crate::error::{PlanisphereError, Result};

/// One stroke of a constellation stick figure, endpoints in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationSegment {
    pub name: String,
    pub ra1: f64,
    pub dec1: f64,
    pub ra2: f64,
    pub dec2: f64,
}

/// Where a constellation's name is written
#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationLabel {
    pub name: String,
    /// Right ascension in hours
    pub ra_hours: f64,
    pub dec: f64,
}

impl ConstellationLabel {
    pub fn ra_degrees(&self) -> f64 {
        self.ra_hours * 360.0 / 24.0
    }
}

/// Records of a whitespace-delimited table with their line numbers,
/// skipping blank and comment lines
fn records(content: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    content.lines().enumerate().filter_map(|(i, line)| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        Some((i + 1, line.split_whitespace().collect()))
    })
}

fn number(file: &str, line: usize, field: &str, what: &str) -> Result<f64> {
    field.parse::<f64>().map_err(|_| {
        PlanisphereError::data_format(file, line, format!("invalid {} '{}'", what, field))
    })
}

/// Parse the stick figure table; every record has exactly five fields
pub fn parse_stick_figures(file: &str, content: &str) -> Result<Vec<ConstellationSegment>> {
    records(content)
        .map(|(line, words)| {
            let [name, ra1, dec1, ra2, dec2] = words[..] else {
                return Err(PlanisphereError::data_format(
                    file,
                    line,
                    format!("expected 5 fields, found {}", words.len()),
                ));
            };
            Ok(ConstellationSegment {
                name: name.to_string(),
                ra1: number(file, line, ra1, "ra1")?,
                dec1: number(file, line, dec1, "dec1")?,
                ra2: number(file, line, ra2, "ra2")?,
                dec2: number(file, line, dec2, "dec2")?,
            })
        })
        .collect()
}

/// Parse the constellation name table; fields after the third are ignored
pub fn parse_constellation_names(file: &str, content: &str) -> Result<Vec<ConstellationLabel>> {
    records(content)
        .map(|(line, words)| {
            let [name, ra, dec, ..] = words[..] else {
                return Err(PlanisphereError::data_format(
                    file,
                    line,
                    format!("expected at least 3 fields, found {}", words.len()),
                ));
            };
            Ok(ConstellationLabel {
                name: name.to_string(),
                ra_hours: number(file, line, ra, "ra")?,
                dec: number(file, line, dec, "dec")?,
            })
        })
        .collect()
}

fn read_table(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| PlanisphereError::io(path, e))
}

/// Locations of the static input files
#[derive(Debug, Clone, PartialEq)]
pub struct DataFiles {
    pub stick_figures: PathBuf,
    pub constellation_names: PathBuf,
    /// Optional table of user objects; a missing file is fine
    pub custom_objects: Option<PathBuf>,
}

/// Everything drawn on one star wheel, read fresh for each render
#[derive(Debug, Clone, Default)]
pub struct SkyData {
    pub stick_figures: Vec<ConstellationSegment>,
    pub constellation_labels: Vec<ConstellationLabel>,
    pub stars: Vec<Star>,
    pub custom_objects: Vec<CustomObject>,
}

impl SkyData {
    /// Read every table.
    ///
    /// The constellation tables and the star catalog are required and any
    /// failure is returned. The custom object table only ever degrades to
    /// an empty list.
    pub fn load(files: &DataFiles, catalog: &dyn StarCatalog) -> Result<Self> {
        let stick_figures = parse_stick_figures(
            &files.stick_figures.display().to_string(),
            &read_table(&files.stick_figures)?,
        )?;
        let constellation_labels = parse_constellation_names(
            &files.constellation_names.display().to_string(),
            &read_table(&files.constellation_names)?,
        )?;
        let stars = catalog.stars()?;

        let custom_objects = match &files.custom_objects {
            Some(path) => custom_objects::load_custom_objects(path).into_objects(),
            None => Vec::new(),
        };

        tracing::debug!(
            "Sky data: {} stick segments, {} labels, {} stars, {} custom objects",
            stick_figures.len(),
            constellation_labels.len(),
            stars.len(),
            custom_objects.len()
        );

        Ok(Self {
            stick_figures,
            constellation_labels,
            stars,
            custom_objects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STICKS: &str = "\
# Stick figures
Ursa_Major 165.93 61.75 165.46 56.38

Ursa_Major 165.46 56.38 178.46 53.69
   # indented comment
Orion 88.79 7.41 81.28 6.35
";

    #[test]
    fn test_parse_stick_figures() {
        let segments = parse_stick_figures("sticks.dat", STICKS).unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].name, "Ursa_Major");
        assert_eq!(segments[0].ra1, 165.93);
        assert_eq!(segments[2].dec2, 6.35);
    }

    #[test]
    fn test_stick_figure_errors_carry_line() {
        let err = parse_stick_figures("sticks.dat", "# c\nOrion 1 2 3\n").unwrap_err();
        match err {
            PlanisphereError::DataFormat { file, line, .. } => {
                assert_eq!(file, "sticks.dat");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(parse_stick_figures("s", "Orion 1 2 x 4").is_err());
    }

    #[test]
    fn test_parse_constellation_names() {
        let labels =
            parse_constellation_names("names.dat", "# n\nUrsa_Major 11.0 58.0 extra\nOrion 5.5 3\n")
                .unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].ra_degrees(), 165.0);
        assert_eq!(labels[1].ra_degrees(), 82.5);
        assert!(parse_constellation_names("n", "Orion 5.5\n").is_err());
    }

    #[test]
    fn test_missing_required_table_is_fatal() {
        let files = DataFiles {
            stick_figures: PathBuf::from("no/such/sticks.dat"),
            constellation_names: PathBuf::from("no/such/names.dat"),
            custom_objects: None,
        };
        let catalog: Vec<Star> = Vec::new();
        assert!(matches!(
            SkyData::load(&files, &catalog),
            Err(PlanisphereError::Io { .. })
        ));
    }
}
