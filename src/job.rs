use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::geometry::{Geometry, Orientation, PageSize};
use crate::page::PageSpec;

/// A print job: page geometry plus the ordered pages to render.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub size: Option<PageSize>,
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub pages: Vec<PageSpec>,
}

impl Job {
    /// Reads a `.toml` job, or JSON for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read job: {}", path.display()))?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);
        if is_toml {
            toml::from_str(&content)
                .with_context(|| format!("failed to parse job: {}", path.display()))
        } else {
            Self::from_json(&content)
                .with_context(|| format!("failed to parse job: {}", path.display()))
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).with_context(|| "invalid job JSON")
    }

    /// CLI selectors win over the job file; A3 portrait otherwise.
    pub fn geometry(&self, size: Option<PageSize>, orientation: Option<Orientation>) -> Geometry {
        Geometry::new(
            size.or(self.size).unwrap_or(PageSize::A3),
            orientation
                .or(self.orientation)
                .unwrap_or(Orientation::Portrait),
        )
    }

    pub fn ensure_pages(&self) -> Result<()> {
        if self.pages.is_empty() {
            return Err(anyhow!("select at least one page"));
        }
        Ok(())
    }
}

/// `signage_<size>_<orientation>_<YYYY-MM-DD_HHMM>.pdf`, stamped in `at`'s own offset.
pub fn output_file_name(geometry: &Geometry, at: OffsetDateTime) -> Result<String> {
    let stamp = at
        .format(format_description!("[year]-[month]-[day]_[hour][minute]"))
        .with_context(|| "failed to format timestamp")?;
    Ok(format!("signage_{}_{}.pdf", geometry.label(), stamp))
}
