use anyhow::{Result, anyhow};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::geometry::Geometry;
use crate::layout::{DrawPlan, LayoutEngine};
use crate::logo::{LogoAsset, resolve_logo};
use crate::page::PageSpec;
use crate::render;

const DOCUMENT_TITLE: &str = "Signage";

/// Everything one assembly produced: the PDF plus the plans and logo it was drawn from.
pub struct AssembledDocument {
    pub plans: Vec<DrawPlan>,
    pub logo: Option<LogoAsset>,
    pub pdf: Vec<u8>,
}

/// Sequences page specs into one PDF.
pub struct DocumentAssembler {
    engine: LayoutEngine,
    logo_candidates: Vec<PathBuf>,
}

impl DocumentAssembler {
    pub fn new(engine: LayoutEngine, logo_candidates: Vec<PathBuf>) -> Self {
        Self {
            engine,
            logo_candidates,
        }
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Probes the logo candidates once; the result is shared by every page.
    pub fn resolve_logo(&self) -> Option<LogoAsset> {
        resolve_logo(&self.logo_candidates)
    }

    /// Lays out every page in input order.
    pub fn plan(
        &self,
        pages: &[PageSpec],
        geometry: &Geometry,
        logo: Option<&LogoAsset>,
    ) -> Vec<DrawPlan> {
        pages
            .iter()
            .enumerate()
            .map(|(idx, page)| {
                debug!(page = idx + 1, zone = %page.zone_title.trim(), "laying out page");
                self.engine.layout_page(page, geometry, logo.is_some())
            })
            .collect()
    }

    /// Resolves the logo once, lays out `pages`, and renders them into PDF bytes.
    pub fn assemble(&self, pages: &[PageSpec], geometry: &Geometry) -> Result<AssembledDocument> {
        if pages.is_empty() {
            return Err(anyhow!("select at least one page"));
        }
        let logo = self.resolve_logo();
        let plans = self.plan(pages, geometry, logo.as_ref());
        let pdf =
            render::pdf::render_document(DOCUMENT_TITLE, &plans, self.engine.font(), logo.as_ref())?;
        info!(
            pages = plans.len(),
            geometry = %geometry.label(),
            logo = logo.is_some(),
            bytes = pdf.len(),
            "document assembled"
        );
        Ok(AssembledDocument { plans, logo, pdf })
    }

    pub fn build(&self, pages: &[PageSpec], geometry: &Geometry) -> Result<Vec<u8>> {
        Ok(self.assemble(pages, geometry)?.pdf)
    }
}
