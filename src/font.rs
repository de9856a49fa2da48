use anyhow::{Context, Result, anyhow};
use std::path::Path;
use std::sync::Arc;
use ttf_parser::Face;

const HELVETICA_BOLD_CAP_HEIGHT: f32 = 0.718;
const HELVETICA_BOLD_FALLBACK_WIDTH: u16 = 556;

/// Helvetica-Bold advance widths (1/1000 em) for U+0020..=U+007E.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

/// Glyph metrics used to measure single-line text.
#[derive(Clone)]
pub enum FontMetrics {
    /// The PDF base-14 Helvetica-Bold; needs no font file.
    HelveticaBold,
    External(ExternalFont),
}

#[derive(Clone)]
pub struct ExternalFont {
    data: Arc<Vec<u8>>,
    face_index: u32,
    units_per_em: u16,
    space_advance: u16,
    cap_height: f32,
    family: Option<String>,
}

impl ExternalFont {
    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }
}

impl FontMetrics {
    /// Loads a TrueType/OpenType font, or Helvetica-Bold when no path is given.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => load_external_font(path).map(FontMetrics::External),
            None => Ok(FontMetrics::HelveticaBold),
        }
    }

    /// Advance width of `text` set on one line at `font_size`, in points.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        match self {
            FontMetrics::HelveticaBold => {
                let units: u32 = text.chars().map(|ch| helvetica_bold_width(ch) as u32).sum();
                units as f32 * font_size / 1000.0
            }
            FontMetrics::External(font) => measure_external(font, text, font_size),
        }
    }

    /// Height of capital letters as a fraction of the em.
    pub fn cap_height(&self) -> f32 {
        match self {
            FontMetrics::HelveticaBold => HELVETICA_BOLD_CAP_HEIGHT,
            FontMetrics::External(font) => font.cap_height,
        }
    }

    pub fn family(&self) -> &str {
        match self {
            FontMetrics::HelveticaBold => "Helvetica",
            FontMetrics::External(font) => font.family().unwrap_or("sans-serif"),
        }
    }
}

fn helvetica_bold_width(ch: char) -> u16 {
    let base = fold_latin_accent(ch);
    match base as u32 {
        code @ 0x20..=0x7E => HELVETICA_BOLD_WIDTHS[(code - 0x20) as usize],
        _ => HELVETICA_BOLD_FALLBACK_WIDTH,
    }
}

/// Accented Latin letters share the advance width of their base letter.
fn fold_latin_accent(ch: char) -> char {
    match ch {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'Ç' => 'C',
        'ç' => 'c',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ñ' => 'N',
        'ñ' => 'n',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'Ý' | 'Ÿ' => 'Y',
        'ý' | 'ÿ' => 'y',
        '’' | '‘' => '\'',
        '—' | '–' => '-',
        '\u{a0}' => ' ',
        other => other,
    }
}

fn measure_external(font: &ExternalFont, text: &str, font_size: f32) -> f32 {
    let Ok(face) = Face::parse(&font.data, font.face_index) else {
        return FontMetrics::HelveticaBold.text_width(text, font_size);
    };
    let mut advance = 0u32;
    for ch in text.chars() {
        if ch == ' ' {
            advance = advance.saturating_add(font.space_advance as u32);
            continue;
        }
        let glyph_advance = face
            .glyph_index(ch)
            .and_then(|glyph| face.glyph_hor_advance(glyph))
            .unwrap_or(font.space_advance);
        advance = advance.saturating_add(glyph_advance as u32);
    }
    let units = font.units_per_em.max(1) as f32;
    advance as f32 * (font_size / units)
}

fn load_external_font(path: &Path) -> Result<ExternalFont> {
    let data =
        std::fs::read(path).with_context(|| format!("failed to read font: {}", path.display()))?;
    parse_external_font(data)
        .map_err(|err| anyhow!("failed to parse font: {} ({})", path.display(), err))
}

fn parse_external_font(data: Vec<u8>) -> Result<ExternalFont> {
    let face = Face::parse(&data, 0).map_err(|err| anyhow!("{}", err))?;
    let units_per_em = face.units_per_em().max(1);
    let space_advance = face
        .glyph_index(' ')
        .and_then(|id| face.glyph_hor_advance(id))
        .unwrap_or(units_per_em / 2);
    let cap_height = face
        .capital_height()
        .filter(|height| *height > 0)
        .map(|height| height as f32 / units_per_em as f32)
        .unwrap_or(HELVETICA_BOLD_CAP_HEIGHT);
    let family = extract_family_name(&face);
    Ok(ExternalFont {
        data: Arc::new(data),
        face_index: 0,
        units_per_em,
        space_advance,
        cap_height,
        family,
    })
}

fn extract_family_name(face: &Face<'_>) -> Option<String> {
    let mut fallback = None;
    for name in face.names() {
        if name.name_id == ttf_parser::name_id::TYPOGRAPHIC_FAMILY {
            if let Some(value) = name.to_string() {
                return Some(value);
            }
        } else if name.name_id == ttf_parser::name_id::FAMILY && fallback.is_none() {
            fallback = name.to_string();
        }
    }
    fallback
}
