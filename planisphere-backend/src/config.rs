use anyhow::Context;
use planisphere_core::{ChartGeometry, DataFiles, Theme};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Image formats written for each star wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

/// Locations of the input tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_stick_figures")]
    pub stick_figures: PathBuf,

    #[serde(default = "default_constellation_names")]
    pub constellation_names: PathBuf,

    #[serde(default = "default_star_catalog")]
    pub star_catalog: PathBuf,

    #[serde(default = "default_custom_objects")]
    pub custom_objects: Option<PathBuf>,
}

fn default_stick_figures() -> PathBuf {
    PathBuf::from("data/constellation_stick_figures.dat")
}

fn default_constellation_names() -> PathBuf {
    PathBuf::from("data/constellation_names.dat")
}

fn default_star_catalog() -> PathBuf {
    PathBuf::from("data/bright_stars.json")
}

fn default_custom_objects() -> Option<PathBuf> {
    Some(PathBuf::from("data/custom_objects.csv"))
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            stick_figures: default_stick_figures(),
            constellation_names: default_constellation_names(),
            star_catalog: default_star_catalog(),
            custom_objects: default_custom_objects(),
        }
    }
}

impl DataConfig {
    pub fn data_files(&self) -> DataFiles {
        DataFiles {
            stick_figures: self.stick_figures.clone(),
            constellation_names: self.constellation_names.clone(),
            custom_objects: self.custom_objects.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_formats")]
    pub formats: Vec<OutputFormat>,

    /// Resolution of PNG output, pixels per inch
    #[serde(default = "default_png_dpi")]
    pub png_dpi: f64,

    #[serde(default = "default_fonts_dir")]
    pub fonts_dir: PathBuf,

    #[serde(default = "default_font_family")]
    pub font_family: String,

    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Explicit latitudes; the standard set is rendered when absent
    #[serde(default)]
    pub latitudes: Option<Vec<f64>>,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub geometry: ChartGeometry,

    /// Themes added to the built-in ones
    #[serde(default)]
    pub themes: BTreeMap<String, Theme>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_formats() -> Vec<OutputFormat> {
    vec![OutputFormat::Svg, OutputFormat::Png]
}

fn default_png_dpi() -> f64 {
    200.0
}

fn default_fonts_dir() -> PathBuf {
    PathBuf::from("fonts")
}

fn default_font_family() -> String {
    "Noto Sans".to_string()
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            output_dir: default_output_dir(),
            formats: default_formats(),
            png_dpi: default_png_dpi(),
            fonts_dir: default_fonts_dir(),
            font_family: default_font_family(),
            theme: default_theme(),
            languages: default_languages(),
            latitudes: None,
            data: DataConfig::default(),
            geometry: ChartGeometry::default(),
            themes: BTreeMap::new(),
        }
    }
}

impl BackendConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: BackendConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Read `path` if it exists, otherwise use the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn wants(&self, format: OutputFormat) -> bool {
        self.formats.contains(&format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: BackendConfig = toml::from_str("").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.formats, vec![OutputFormat::Svg, OutputFormat::Png]);
        assert_eq!(config.languages, vec!["en".to_string()]);
        assert!(config.latitudes.is_none());
        assert_eq!(config.geometry, ChartGeometry::default());
        assert_eq!(
            config.data.custom_objects,
            Some(PathBuf::from("data/custom_objects.csv"))
        );
    }

    #[test]
    fn test_parse_config() {
        let text = r#"
log_level = "debug"
formats = ["svg"]
theme = "sepia"
languages = ["en", "fr"]
latitudes = [52.0, -35.0]

[data]
star_catalog = "stars.json"

[geometry]
outer_radius = 120.0

[themes.sepia]
background = [1.0, 0.95, 0.85, 1.0]
date = [0.3, 0.2, 0.1, 1.0]
edge = [0.3, 0.2, 0.1, 1.0]
shading = [0.9, 0.85, 0.75, 1.0]
grid = [0.8, 0.7, 0.6, 1.0]
stick = [0.4, 0.3, 0.2, 1.0]
star = [0.2, 0.1, 0.0, 1.0]
constellation = [0.3, 0.2, 0.1, 1.0]
DSO = [0.5, 0.1, 0.1, 1.0]
"#;
        let config: BackendConfig = toml::from_str(text).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.wants(OutputFormat::Svg));
        assert!(!config.wants(OutputFormat::Png));
        assert_eq!(config.latitudes, Some(vec![52.0, -35.0]));
        assert_eq!(config.data.star_catalog, PathBuf::from("stars.json"));
        assert_eq!(
            config.data.stick_figures,
            PathBuf::from("data/constellation_stick_figures.dat")
        );
        assert_eq!(config.geometry.outer_radius, 120.0);
        assert_eq!(config.geometry.date_scale_width, 12.0);
        assert!(config.themes.contains_key("sepia"));
    }

    #[test]
    fn test_theme_missing_role_fails_config() {
        let text = "[themes.broken]\nbackground = [1.0, 1.0, 1.0, 1.0]\n";
        assert!(toml::from_str::<BackendConfig>(text).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(BackendConfig::from_file("no/such/config.toml").is_err());
        let config = BackendConfig::load_or_default("no/such/config.toml").unwrap();
        assert_eq!(config.theme, "default");
    }
}
