//! Star wheel output
//!
//! Renders one wheel to SVG and optionally rasterises it to PNG. Every
//! output is produced in memory first; files are only written once all of
//! them have been produced.

use super::svg::SvgSurface;
use crate::config::OutputFormat;
use anyhow::{Context, Result};
use planisphere_core::{RenderSummary, SkyData, StarWheel};
use resvg::tiny_skia;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use usvg::{Options, Tree, fontdb::Database};

/// Resolution SVG lengths are resolved at
const SVG_DPI: f64 = 96.0;

/// SVG to PNG conversion with a shared font database
#[derive(Clone)]
pub struct Rasterizer {
    fontdb: Arc<Database>,
    font_family: String,
    dpi: f64,
}

impl Rasterizer {
    /// Load system fonts plus any found in `fonts_dir`
    pub fn new(fonts_dir: impl AsRef<Path>, font_family: &str, dpi: f64) -> Self {
        let mut fontdb = Database::new();
        fontdb.load_system_fonts();
        fontdb.load_fonts_dir(fonts_dir.as_ref());
        tracing::debug!(
            "Loaded {} font faces (including {})",
            fontdb.len(),
            fonts_dir.as_ref().display()
        );

        Self {
            fontdb: Arc::new(fontdb),
            font_family: font_family.to_string(),
            dpi,
        }
    }

    /// Render an SVG document to PNG bytes
    pub fn rasterize(&self, svg_content: &str) -> Result<Vec<u8>> {
        let mut options = Options::default();
        options.font_family = self.font_family.clone();
        options.fontdb = self.fontdb.clone();

        let tree = Tree::from_str(svg_content, &options).context("Failed to parse SVG")?;

        let scale = (self.dpi / SVG_DPI) as f32;
        let size = tree.size();
        let width = (size.width() * scale).ceil() as u32;
        let height = (size.height() * scale).ceil() as u32;

        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).context("Failed to create pixmap")?;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        pixmap.encode_png().context("Failed to encode PNG")
    }
}

/// Writes rendered star wheels into an output directory
pub struct StarWheelRenderer {
    output_dir: PathBuf,
    formats: Vec<OutputFormat>,
    rasterizer: Option<Rasterizer>,
}

/// Files written for one wheel, and what was drawn
#[derive(Debug)]
pub struct RenderOutput {
    pub files: Vec<PathBuf>,
    pub summary: RenderSummary,
}

impl StarWheelRenderer {
    /// PNG output needs a rasterizer; without one it is skipped with a warning
    pub fn new(
        output_dir: impl AsRef<Path>,
        formats: &[OutputFormat],
        rasterizer: Option<Rasterizer>,
    ) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            formats: formats.to_vec(),
            rasterizer,
        }
    }

    pub fn output_path(&self, stem: &str, format: OutputFormat) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", stem, format.extension()))
    }

    /// Draw `wheel` and write each configured format as `<stem>.<ext>`
    pub fn render(
        &self,
        wheel: &StarWheel<'_>,
        sky: &SkyData,
        stem: &str,
    ) -> Result<RenderOutput> {
        let mut surface = SvgSurface::new(wheel.geometry().bounding_box());
        let summary = wheel.render(sky, &mut surface);
        let svg = surface.finish();

        let mut outputs: Vec<(PathBuf, Vec<u8>)> = Vec::new();
        for &format in &self.formats {
            let bytes = match format {
                OutputFormat::Svg => svg.as_bytes().to_vec(),
                OutputFormat::Png => match &self.rasterizer {
                    Some(rasterizer) => rasterizer
                        .rasterize(&svg)
                        .with_context(|| format!("Failed to rasterise {}", stem))?,
                    None => {
                        tracing::warn!("No rasterizer configured, skipping PNG for {}", stem);
                        continue;
                    }
                },
            };
            outputs.push((self.output_path(stem, format), bytes));
        }

        let mut files = Vec::with_capacity(outputs.len());
        for (path, bytes) in outputs {
            if let Err(e) = std::fs::write(&path, bytes) {
                remove_written(&files);
                return Err(e).with_context(|| format!("Failed to write {}", path.display()));
            }
            files.push(path);
        }
        for path in &files {
            tracing::info!("Generated star wheel: {:?}", path);
        }

        Ok(RenderOutput { files, summary })
    }
}

/// Undo a partial write so a failed wheel leaves nothing behind
fn remove_written(files: &[PathBuf]) {
    for path in files {
        if let Err(e) = std::fs::remove_file(path) {
            tracing::warn!("Failed to remove partial output {}: {}", path.display(), e);
        }
    }
}
