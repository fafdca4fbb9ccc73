//! User-supplied celestial objects
//!
//! Reads a CSV table with the header `id,ra,dec,mag`, where `ra` and `dec`
//! are sexagesimal strings (see [`crate::sexagesimal`]). Every row is parsed
//! on its own: a bad row is recorded and skipped, and the rest of the table
//! still loads. A missing table is not an error, it just contributes no
//! objects.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::catalog::Magnitude;
use crate::sexagesimal::{self, CoordinateError};

const REQUIRED_COLUMNS: [&str; 4] = ["id", "ra", "dec", "mag"];

/// An object from the custom table, positions in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct CustomObject {
    pub id: String,
    pub ra: f64,
    pub dec: f64,
    pub magnitude: Magnitude,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowErrorKind {
    #[error("missing required columns {missing:?}")]
    MissingColumns { missing: Vec<&'static str> },

    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("empty {0} field")]
    EmptyField(&'static str),

    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    #[error("invalid magnitude '{0}'")]
    Magnitude(String),

    #[error("unreadable record: {0}")]
    Csv(String),
}

/// Why one row of the table was skipped
#[derive(Debug, Clone, PartialEq, Error)]
#[error("row {line}{}: {kind}", id_suffix(.id))]
pub struct RowError {
    /// Line in the file, the header being line 1
    pub line: u64,
    pub id: Option<String>,
    pub kind: RowErrorKind,
}

fn id_suffix(id: &Option<String>) -> String {
    id.as_deref().map(|id| format!(" (ID: {})", id)).unwrap_or_default()
}

/// Result of reading a custom object table
#[derive(Debug, Clone, Default)]
pub struct CustomObjectLoad {
    /// Loaded objects keyed by identifier
    pub objects: BTreeMap<String, CustomObject>,
    /// Rows that were skipped, in file order
    pub errors: Vec<RowError>,
}

impl CustomObjectLoad {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn into_objects(self) -> Vec<CustomObject> {
        self.objects.into_values().collect()
    }
}

/// Load the custom object table at `path`.
///
/// Never fails: a missing or unreadable table gives an empty load, with a
/// log message saying why.
pub fn load_custom_objects(path: impl AsRef<Path>) -> CustomObjectLoad {
    let path = path.as_ref();

    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No custom object table at {}", path.display());
            return CustomObjectLoad::default();
        }
        Err(e) => {
            tracing::warn!("Failed to open custom object table {}: {}", path.display(), e);
            return CustomObjectLoad::default();
        }
    };

    match parse_custom_objects(file) {
        Ok(load) => {
            tracing::info!(
                "Successfully loaded {} custom objects from {} ({} rows skipped)",
                load.len(),
                path.display(),
                load.errors.len()
            );
            load
        }
        Err(e) => {
            tracing::warn!("Error reading custom object table {}: {}", path.display(), e);
            CustomObjectLoad::default()
        }
    }
}

/// Parse a custom object table from any reader.
///
/// Only an unreadable header fails the whole table; row problems are
/// collected in [`CustomObjectLoad::errors`].
pub fn parse_custom_objects<R: Read>(reader: R) -> Result<CustomObjectLoad, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers);

    let mut load = CustomObjectLoad::default();

    for (index, result) in reader.records().enumerate() {
        let fallback_line = index as u64 + 2;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                record_error(&mut load, line, None, RowErrorKind::Csv(e.to_string()));
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(fallback_line);

        match parse_row(&record, headers.len(), &columns) {
            Ok(object) => {
                if let Some(previous) = load.objects.insert(object.id.clone(), object) {
                    tracing::warn!(
                        "Duplicate custom object ID {} at row {}, replacing earlier entry",
                        previous.id,
                        line
                    );
                }
            }
            Err(kind) => {
                let id = columns
                    .id
                    .and_then(|i| record.get(i))
                    .filter(|id| !id.is_empty())
                    .map(str::to_string);
                record_error(&mut load, line, id, kind);
            }
        }
    }

    Ok(load)
}

fn record_error(load: &mut CustomObjectLoad, line: u64, id: Option<String>, kind: RowErrorKind) {
    let error = RowError { line, id, kind };
    tracing::warn!("Skipping custom object {}", error);
    load.errors.push(error);
}

/// Positions of the required columns in the header
struct ColumnIndex {
    id: Option<usize>,
    ra: Option<usize>,
    dec: Option<usize>,
    mag: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            id: find("id"),
            ra: find("ra"),
            dec: find("dec"),
            mag: find("mag"),
        }
    }

    fn missing(&self) -> Vec<&'static str> {
        let found = [self.id, self.ra, self.dec, self.mag];
        REQUIRED_COLUMNS
            .iter()
            .zip(found)
            .filter(|(_, index)| index.is_none())
            .map(|(name, _)| *name)
            .collect()
    }
}

fn parse_row(
    record: &csv::StringRecord,
    expected_fields: usize,
    columns: &ColumnIndex,
) -> Result<CustomObject, RowErrorKind> {
    let (Some(id), Some(ra), Some(dec), Some(mag)) =
        (columns.id, columns.ra, columns.dec, columns.mag)
    else {
        return Err(RowErrorKind::MissingColumns {
            missing: columns.missing(),
        });
    };

    if record.len() != expected_fields {
        return Err(RowErrorKind::FieldCount {
            expected: expected_fields,
            found: record.len(),
        });
    }

    let field = |index: usize, name: &'static str| match record.get(index) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RowErrorKind::EmptyField(name)),
    };
    let id = field(id, "id")?;
    let ra = field(ra, "ra")?;
    let dec = field(dec, "dec")?;
    let mag = record.get(mag).unwrap_or_default();

    let (ra, dec) = sexagesimal::parse_hms_dms(ra, dec)?;
    let magnitude = Magnitude::parse(mag).ok_or_else(|| RowErrorKind::Magnitude(mag.to_string()))?;

    Ok(CustomObject {
        id: id.to_string(),
        ra,
        dec,
        magnitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv: &str) -> CustomObjectLoad {
        parse_custom_objects(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_two_valid_one_malformed() {
        let load = parse(
            "id,ra,dec,mag\n\
             M31,00h42m44.3s,+41°16'09\",3.4\n\
             BAD,not-an-ra,+10°00'00\",2.0\n\
             M42,05h35m17.3s,-05°23′28″,4.0\n",
        );
        assert_eq!(load.len(), 2);
        assert_eq!(load.errors.len(), 1);

        let m31 = &load.objects["M31"];
        assert!((m31.ra - 10.684_583_333).abs() < 1e-6);
        assert!((m31.dec - 41.269_166_667).abs() < 1e-6);
        assert_eq!(m31.magnitude, Magnitude::Known(3.4));

        let m42 = &load.objects["M42"];
        assert!(m42.dec < 0.0);

        let err = &load.errors[0];
        assert_eq!(err.line, 3);
        assert_eq!(err.id.as_deref(), Some("BAD"));
        assert!(matches!(
            err.kind,
            RowErrorKind::Coordinate(CoordinateError::MalformedRa(_))
        ));
    }

    #[test]
    fn test_missing_table_is_empty() {
        let load = load_custom_objects("definitely/not/here/custom_objects.csv");
        assert!(load.is_empty());
        assert!(load.errors.is_empty());
    }

    #[test]
    fn test_empty_fields_are_skipped() {
        let load = parse(
            "id,ra,dec,mag\n\
             ,12h25m30s,+24°40'42\",3.0\n\
             A,,+24°40'42\",3.0\n\
             B,12h25m30s,,3.0\n\
             C,12h25m30s,+24°40'42\",3.0\n",
        );
        assert_eq!(load.len(), 1);
        let kinds: Vec<_> = load.errors.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                RowErrorKind::EmptyField("id"),
                RowErrorKind::EmptyField("ra"),
                RowErrorKind::EmptyField("dec"),
            ]
        );
        assert_eq!(load.errors[0].id, None);
        assert_eq!(load.errors[1].id.as_deref(), Some("A"));
    }

    #[test]
    fn test_wrong_field_count() {
        let load = parse(
            "id,ra,dec,mag\n\
             A,12h25m30s,+24°40'42\"\n\
             B,12h25m30s,+24°40'42\",3.0,extra\n\
             C,12h25m30s,+24°40'42\",3.0\n",
        );
        assert_eq!(load.len(), 1);
        assert!(load.objects.contains_key("C"));
        assert_eq!(
            load.errors[0].kind,
            RowErrorKind::FieldCount { expected: 4, found: 3 }
        );
        assert_eq!(
            load.errors[1].kind,
            RowErrorKind::FieldCount { expected: 4, found: 5 }
        );
    }

    #[test]
    fn test_missing_columns() {
        let load = parse("id,ra,dec\nA,12h25m30s,+24°40'42\"\n");
        assert!(load.is_empty());
        assert_eq!(
            load.errors[0].kind,
            RowErrorKind::MissingColumns { missing: vec!["mag"] }
        );
    }

    #[test]
    fn test_column_order_and_whitespace() {
        let load = parse("mag, dec, id, ra\n 2.5 , -10°00'00\" , X1 , 06h00m00s \n");
        let x1 = &load.objects["X1"];
        assert!((x1.ra - 90.0).abs() < 1e-9);
        assert!((x1.dec + 10.0).abs() < 1e-9);
        assert_eq!(x1.magnitude, Magnitude::Known(2.5));
    }

    #[test]
    fn test_magnitude_field() {
        let load = parse(
            "id,ra,dec,mag\n\
             A,12h25m30s,+24°40'42\",-\n\
             B,12h25m30s,+24°40'42\",bright\n\
             C,12h25m30s,+24°40'42\",\n",
        );
        assert_eq!(load.len(), 1);
        assert_eq!(load.objects["A"].magnitude, Magnitude::Unknown);
        assert_eq!(load.errors[0].kind, RowErrorKind::Magnitude("bright".to_string()));
        assert_eq!(load.errors[1].kind, RowErrorKind::Magnitude(String::new()));
    }

    #[test]
    fn test_duplicate_id_replaces() {
        let load = parse(
            "id,ra,dec,mag\n\
             A,01h00m00s,+10°00'00\",1.0\n\
             A,02h00m00s,+20°00'00\",2.0\n",
        );
        assert_eq!(load.len(), 1);
        assert!((load.objects["A"].ra - 30.0).abs() < 1e-9);
        assert!(load.errors.is_empty());
    }

    #[test]
    fn test_row_error_display() {
        let err = RowError {
            line: 7,
            id: Some("M1".to_string()),
            kind: RowErrorKind::EmptyField("ra"),
        };
        assert_eq!(err.to_string(), "row 7 (ID: M1): empty ra field");
    }
}
