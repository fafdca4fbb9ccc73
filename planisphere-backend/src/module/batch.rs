//! Batch rendering of star wheels
//!
//! Plans one job per (latitude, language) pair and renders each on the
//! blocking pool. A failed job is logged and counted; the others carry on.

use super::renderer::{Rasterizer, StarWheelRenderer};
use crate::config::{BackendConfig, OutputFormat};
use anyhow::{Context, Result};
use planisphere_core::{
    DataFiles, Hemisphere, JsonStarCatalog, LanguageSet, Settings, SkyData, StarWheel, ThemeSet,
};
use std::sync::Arc;

/// One star wheel to render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub latitude: f64,
    pub language: String,
}

impl RenderJob {
    /// File name without extension, e.g. `starwheel_52N_en`
    pub fn file_stem(&self) -> String {
        format!(
            "starwheel_{:02}{}_{}",
            self.latitude.abs().round() as u32,
            Hemisphere::from_latitude(self.latitude).suffix(),
            self.language
        )
    }
}

/// Every 5 degrees from 80S to 85N plus 52N, leaving out the tropics
/// where a planisphere is of little use
pub fn standard_latitudes() -> Vec<f64> {
    (-80..=85)
        .step_by(5)
        .chain(std::iter::once(52))
        .filter(|lat| !(-10 < *lat && *lat < 10))
        .map(f64::from)
        .collect()
}

/// Jobs for every language at every latitude, language outermost
pub fn plan_jobs(latitudes: Option<&[f64]>, languages: &[String]) -> Vec<RenderJob> {
    let latitudes = match latitudes {
        Some(explicit) => explicit.to_vec(),
        None => standard_latitudes(),
    };
    languages
        .iter()
        .flat_map(|language| {
            latitudes.iter().map(move |&latitude| RenderJob {
                latitude,
                language: language.clone(),
            })
        })
        .collect()
}

/// Outcome of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub rendered: usize,
    pub failed: usize,
}

/// Everything shared by the jobs of one batch
struct BatchContext {
    config: BackendConfig,
    themes: ThemeSet,
    languages: LanguageSet,
    data_files: DataFiles,
    catalog: JsonStarCatalog,
    renderer: StarWheelRenderer,
}

impl BatchContext {
    fn new(config: BackendConfig) -> Result<Self> {
        let mut themes = ThemeSet::default();
        for (name, theme) in &config.themes {
            themes
                .insert(name.clone(), theme.clone())
                .with_context(|| format!("Failed to register theme '{}'", name))?;
        }
        themes.get(&config.theme).context("Failed to resolve configured theme")?;

        let languages = LanguageSet::default();
        for language in &config.languages {
            languages.get(language).context("Failed to resolve configured language")?;
        }

        let rasterizer = config
            .wants(OutputFormat::Png)
            .then(|| Rasterizer::new(&config.fonts_dir, &config.font_family, config.png_dpi));
        let renderer = StarWheelRenderer::new(&config.output_dir, &config.formats, rasterizer);

        Ok(Self {
            data_files: config.data.data_files(),
            catalog: JsonStarCatalog::new(&config.data.star_catalog),
            themes,
            languages,
            renderer,
            config,
        })
    }

    fn render(&self, job: &RenderJob) -> Result<()> {
        let settings = Settings::new(job.latitude, &job.language, &self.config.theme);
        let wheel = StarWheel::new(
            &self.config.geometry,
            &settings,
            &self.themes,
            &self.languages,
        )
        .context("Failed to set up star wheel")?;
        let sky = SkyData::load(&self.data_files, &self.catalog)
            .context("Failed to load sky data")?;

        let output = self.renderer.render(&wheel, &sky, &job.file_stem())?;
        tracing::info!(
            "{}: {} stars, {} stick segments, {} labels, {} custom objects",
            job.file_stem(),
            output.summary.stars.drawn,
            output.summary.stick_segments.drawn,
            output.summary.constellation_labels.drawn,
            output.summary.custom_objects.drawn
        );
        Ok(())
    }
}

/// Render every planned star wheel into the output directory
pub async fn run_batch(config: BackendConfig) -> Result<BatchReport> {
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .context("Failed to create output directory")?;

    let jobs = plan_jobs(config.latitudes.as_deref(), &config.languages);
    let context = Arc::new(BatchContext::new(config)?);
    tracing::info!("Rendering {} star wheels", jobs.len());

    let handles: Vec<_> = jobs
        .into_iter()
        .map(|job| {
            let context = context.clone();
            let task_job = job.clone();
            let handle = tokio::task::spawn_blocking(move || context.render(&task_job));
            (job, handle)
        })
        .collect();

    let mut report = BatchReport::default();
    for (job, handle) in handles {
        match handle.await {
            Ok(Ok(())) => report.rendered += 1,
            Ok(Err(e)) => {
                tracing::error!("Failed to render {}: {:#}", job.file_stem(), e);
                report.failed += 1;
            }
            Err(e) => {
                tracing::error!("Render task for {} panicked: {}", job.file_stem(), e);
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        "Batch finished: {} rendered, {} failed",
        report.rendered,
        report.failed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_standard_latitudes() {
        let latitudes = standard_latitudes();
        assert_eq!(latitudes.first(), Some(&-80.0));
        assert!(latitudes.contains(&85.0));
        assert!(latitudes.contains(&-10.0));
        assert!(latitudes.contains(&10.0));
        assert!(!latitudes.contains(&5.0));
        assert!(!latitudes.contains(&0.0));
        assert!(!latitudes.contains(&-5.0));
        assert_eq!(latitudes.last(), Some(&52.0));
        // 34 steps minus the three equatorial ones, plus 52
        assert_eq!(latitudes.len(), 32);
    }

    #[test]
    fn test_file_stem() {
        let job = |latitude: f64| RenderJob {
            latitude,
            language: "en".to_string(),
        };
        assert_eq!(job(52.0).file_stem(), "starwheel_52N_en");
        assert_eq!(job(-35.0).file_stem(), "starwheel_35S_en");
        assert_eq!(job(5.0).file_stem(), "starwheel_05N_en");
        assert_eq!(job(-80.0).file_stem(), "starwheel_80S_en");
    }

    #[test]
    fn test_plan_jobs() {
        let languages = vec!["en".to_string(), "fr".to_string()];
        let jobs = plan_jobs(Some(&[52.0, -35.0][..]), &languages);
        assert_eq!(jobs.len(), 4);
        assert_eq!(jobs[0].file_stem(), "starwheel_52N_en");
        assert_eq!(jobs[1].file_stem(), "starwheel_35S_en");
        assert_eq!(jobs[3].file_stem(), "starwheel_35S_fr");

        assert_eq!(plan_jobs(None, &languages).len(), 64);
    }

    #[test]
    fn test_context_rejects_unknown_theme() {
        let config = BackendConfig {
            theme: "neon".to_string(),
            formats: vec![OutputFormat::Svg],
            ..BackendConfig::default()
        };
        assert!(BatchContext::new(config).is_err());

        let config = BackendConfig {
            languages: vec!["de".to_string()],
            formats: vec![OutputFormat::Svg],
            ..BackendConfig::default()
        };
        assert!(BatchContext::new(config).is_err());
    }

    #[tokio::test]
    async fn test_failed_jobs_write_nothing() {
        let output_dir =
            std::env::temp_dir().join(format!("planisphere-batch-{}", std::process::id()));
        let mut config = BackendConfig {
            output_dir: output_dir.clone(),
            formats: vec![OutputFormat::Svg],
            latitudes: Some(vec![52.0, -35.0]),
            ..BackendConfig::default()
        };
        config.data.stick_figures = PathBuf::from("no/such/sticks.dat");

        let report = run_batch(config).await.unwrap();
        assert_eq!(report, BatchReport { rendered: 0, failed: 2 });
        assert_eq!(std::fs::read_dir(&output_dir).unwrap().count(), 0);

        std::fs::remove_dir_all(&output_dir).unwrap();
    }

    #[tokio::test]
    async fn test_renders_sample_data() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..");
        let output_dir =
            std::env::temp_dir().join(format!("planisphere-sample-{}", std::process::id()));
        let mut config = BackendConfig::from_file(root.join("config.toml")).unwrap();
        config.output_dir = output_dir.clone();
        config.formats = vec![OutputFormat::Svg];
        config.latitudes = Some(vec![52.0, -35.0]);
        config.languages = vec!["en".to_string()];
        config.data.stick_figures = root.join("data/constellation_stick_figures.dat");
        config.data.constellation_names = root.join("data/constellation_names.dat");
        config.data.star_catalog = root.join("data/bright_stars.json");
        config.data.custom_objects = Some(root.join("data/custom_objects.csv"));

        let report = run_batch(config).await.unwrap();
        assert_eq!(report, BatchReport { rendered: 2, failed: 0 });

        let north = std::fs::read_to_string(output_dir.join("starwheel_52N_en.svg")).unwrap();
        assert!(north.contains("Ursa Major"));
        assert!(!north.contains(">Crux<"));
        let south = std::fs::read_to_string(output_dir.join("starwheel_35S_en.svg")).unwrap();
        assert!(south.contains(">Crux<"));

        std::fs::remove_dir_all(&output_dir).unwrap();
    }
}
