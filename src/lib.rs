use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::info;

pub mod document;
pub mod font;
pub mod geometry;
pub mod job;
pub mod layout;
pub mod logging;
pub mod logo;
pub mod page;
pub mod render;
pub mod settings;
pub mod theme;

pub use document::{AssembledDocument, DocumentAssembler};
pub use font::FontMetrics;
pub use geometry::{Geometry, Orientation, PageSize};
pub use job::Job;
pub use layout::{DrawPlan, LayoutEngine, fit_text};
pub use page::{IconKind, PageSpec, StyleVariant};
pub use settings::Settings;
pub use theme::{Color, Theme};

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub job_path: Option<String>,
    pub size: Option<PageSize>,
    pub orientation: Option<Orientation>,
    pub out_dir: Option<String>,
    pub settings_path: Option<String>,
    pub preview: bool,
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub pdf_path: PathBuf,
    pub previews: Vec<PathBuf>,
    pub pages: usize,
}

/// Builds an assembler from loaded settings (theme, font, logo candidates).
pub fn assembler_from_settings(settings: &Settings) -> Result<DocumentAssembler> {
    let font = FontMetrics::resolve(settings.font_path.as_deref())?;
    let engine = LayoutEngine::new(settings.theme, font);
    Ok(DocumentAssembler::new(engine, settings.logo_paths.clone()))
}

pub fn run(config: Config, input: Option<String>) -> Result<RunOutput> {
    let settings_path = config.settings_path.as_deref().map(Path::new);
    let settings = settings::load_settings(settings_path)?;

    let job = match config.job_path.as_deref() {
        Some(path) => Job::from_path(Path::new(path))?,
        None => {
            let input = input.unwrap_or_default();
            let input = input.trim();
            if input.is_empty() {
                return Err(anyhow!("no job given (pass --job or pipe JSON on stdin)"));
            }
            Job::from_json(input)?
        }
    };
    job.ensure_pages()?;
    let geometry = job.geometry(config.size, config.orientation);

    let assembler = assembler_from_settings(&settings)?;
    let assembled = assembler.assemble(&job.pages, &geometry)?;

    let out_dir = PathBuf::from(config.out_dir.as_deref().unwrap_or("."));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let file_name = job::output_file_name(&geometry, now)?;
    let pdf_path = out_dir.join(&file_name);
    fs::write(&pdf_path, &assembled.pdf)
        .with_context(|| format!("failed to write pdf: {}", pdf_path.display()))?;
    info!(path = %pdf_path.display(), "pdf written");

    let previews = if config.preview {
        write_previews(&assembled, assembler.engine().font(), &pdf_path)?
    } else {
        Vec::new()
    };

    Ok(RunOutput {
        pdf_path,
        previews,
        pages: job.pages.len(),
    })
}

/// One `<stem>_pNN.png` per page, drawn from the plans and logo the PDF used.
fn write_previews(
    assembled: &AssembledDocument,
    font: &FontMetrics,
    pdf_path: &Path,
) -> Result<Vec<PathBuf>> {
    let stem = pdf_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("signage");
    let mut written = Vec::new();
    for (idx, plan) in assembled.plans.iter().enumerate() {
        let png = render::svg::render_page_png(plan, font, assembled.logo.as_ref())
            .with_context(|| format!("failed to render preview for page {}", idx + 1))?;
        let path = pdf_path.with_file_name(format!("{}_p{:02}.png", stem, idx + 1));
        fs::write(&path, png)
            .with_context(|| format!("failed to write preview: {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
