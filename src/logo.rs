use anyhow::{Context, Result, anyhow};
use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Decoded footer logo, shared by every page of a document.
#[derive(Clone)]
pub struct LogoAsset {
    pub mime: String,
    pub bytes: Vec<u8>,
    pub image: DynamicImage,
}

impl LogoAsset {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read logo: {}", path.display()))?;
        let mime = infer::get(&bytes)
            .map(|kind| kind.mime_type().to_string())
            .filter(|mime| mime.starts_with("image/"))
            .ok_or_else(|| anyhow!("logo is not a recognised image: {}", path.display()))?;
        let image = image_crate::load_from_memory(&bytes)
            .with_context(|| format!("failed to decode logo: {}", path.display()))?;
        Ok(Self {
            mime,
            bytes,
            image,
        })
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

/// First candidate that exists on disk.
pub fn find_logo<P: AsRef<Path>>(candidates: &[P]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|candidate| candidate.as_ref())
        .find(|candidate| candidate.is_file())
        .map(Path::to_path_buf)
}

/// Probes `candidates` and decodes the winner; every failure yields `None`.
pub fn resolve_logo<P: AsRef<Path>>(candidates: &[P]) -> Option<LogoAsset> {
    let Some(path) = find_logo(candidates) else {
        debug!("no logo found among {} candidates", candidates.len());
        return None;
    };
    match LogoAsset::load(&path) {
        Ok(logo) => {
            debug!(path = %path.display(), mime = %logo.mime, "logo loaded");
            Some(logo)
        }
        Err(err) => {
            warn!("skipping logo: {:#}", err);
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    pub(crate) fn write_png(path: &Path) {
        let image = image_crate::RgbaImage::from_pixel(8, 4, image_crate::Rgba([175, 0, 115, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image_crate::ImageOutputFormat::Png)
            .expect("encode png");
        std::fs::write(path, bytes).expect("write png");
    }

    #[test]
    fn first_existing_candidate_wins() {
        let dir = tempdir().expect("tempdir");
        let second = dir.path().join("LOGO_ROSE.png");
        let third = dir.path().join("logo.png");
        write_png(&second);
        write_png(&third);
        let candidates = [dir.path().join("logo_rose.png"), second.clone(), third];
        assert_eq!(find_logo(&candidates), Some(second));
    }

    #[test]
    fn absent_logo_is_not_an_error() {
        let dir = tempdir().expect("tempdir");
        let candidates = [dir.path().join("logo.png")];
        assert_eq!(find_logo(&candidates), None);
        assert!(resolve_logo(&candidates).is_none());
    }

    #[test]
    fn decodes_png_logo() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("logo.png");
        write_png(&path);
        let logo = resolve_logo(&[&path]).expect("logo");
        assert_eq!(logo.mime, "image/png");
        assert_eq!(logo.pixel_size(), (8, 4));
    }

    #[test]
    fn corrupt_logo_is_skipped() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nnot really").expect("write");
        assert!(LogoAsset::load(&path).is_err());
        assert!(resolve_logo(&[&path]).is_none());
    }
}
