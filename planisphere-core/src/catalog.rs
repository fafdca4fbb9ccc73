//! Star catalog supply
//!
//! The renderer only needs right ascension, declination and magnitude for
//! each catalog entry. [`StarCatalog`] is the seam; [`JsonStarCatalog`]
//! reads the bright star list exported as JSON, one array per star:
//!
//! ```json
//! { "stars": { "424": [37.95, 89.26, 2.02, "Polaris"], "9999": [1.0, 2.0, "-"] } }
//! ```
//!
//! A magnitude of `"-"` marks an unknown brightness.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{PlanisphereError, Result};

/// Faintest magnitude drawn on the wheel
pub const MAGNITUDE_LIMIT: f64 = 4.0;

/// Apparent magnitude, or the catalog's marker for an unknown one
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Magnitude {
    Known(f64),
    Unknown,
}

impl Magnitude {
    pub const UNKNOWN_MARKER: &'static str = "-";

    /// Parse a magnitude field; `-` is the unknown marker
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s == Self::UNKNOWN_MARKER {
            return Some(Self::Unknown);
        }
        s.parse::<f64>().ok().filter(|m| m.is_finite()).map(Self::Known)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Known(m) => Some(*m),
            Self::Unknown => None,
        }
    }

    /// Whether the object is bright enough to be drawn. Unknown magnitudes
    /// never are.
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Known(m) if *m <= MAGNITUDE_LIMIT)
    }
}

/// One catalog star, positions in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub id: String,
    pub ra: f64,
    pub dec: f64,
    pub magnitude: Magnitude,
}

/// Supplier of catalog stars
pub trait StarCatalog {
    /// All stars, in a stable order
    fn stars(&self) -> Result<Vec<Star>>;
}

/// An in-memory catalog
impl StarCatalog for Vec<Star> {
    fn stars(&self) -> Result<Vec<Star>> {
        Ok(self.clone())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    stars: BTreeMap<String, Vec<Value>>,
}

/// Bright star list stored as JSON on disk
#[derive(Debug, Clone)]
pub struct JsonStarCatalog {
    path: PathBuf,
}

impl JsonStarCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse catalog JSON text
    pub fn parse(json: &str) -> Result<Vec<Star>> {
        let file: CatalogFile = serde_json::from_str(json).map_err(|e| {
            PlanisphereError::catalog(format!("Failed to parse catalog JSON: {}", e))
        })?;

        file.stars
            .into_iter()
            .map(|(id, fields)| parse_record(id, &fields))
            .collect()
    }
}

impl StarCatalog for JsonStarCatalog {
    fn stars(&self) -> Result<Vec<Star>> {
        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| PlanisphereError::io(&self.path, e))?;
        let stars = Self::parse(&json)?;
        tracing::info!("Loaded {} stars from {}", stars.len(), self.path.display());
        Ok(stars)
    }
}

fn parse_record(id: String, fields: &[Value]) -> Result<Star> {
    if fields.len() < 3 {
        return Err(PlanisphereError::catalog(format!(
            "Star {} has {} fields, expected at least 3",
            id,
            fields.len()
        )));
    }

    let coordinate = |value: &Value, name: &str| {
        value.as_f64().ok_or_else(|| {
            PlanisphereError::catalog(format!("Star {} has a non-numeric {}: {}", id, name, value))
        })
    };
    let ra = coordinate(&fields[0], "right ascension")?;
    let dec = coordinate(&fields[1], "declination")?;

    let magnitude = match &fields[2] {
        Value::Number(n) => n.as_f64().map(Magnitude::Known),
        Value::String(s) => Magnitude::parse(s),
        _ => None,
    }
    .ok_or_else(|| {
        PlanisphereError::catalog(format!("Star {} has an invalid magnitude: {}", id, fields[2]))
    })?;

    Ok(Star {
        id,
        ra,
        dec,
        magnitude,
    })
}
