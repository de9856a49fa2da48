use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Converts millimetres to PDF points.
pub fn mm(value: f32) -> f32 {
    value * POINTS_PER_MM
}

/// Converts PDF points back to millimetres.
pub fn to_mm(points: f32) -> f32 {
    points / POINTS_PER_MM
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PageSize {
    #[serde(alias = "a4")]
    A4,
    #[serde(alias = "a3")]
    A3,
}

impl PageSize {
    /// Portrait (width, height) in millimetres.
    fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::A3 => (297.0, 420.0),
        }
    }
}

impl FromStr for PageSize {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "a3" => Ok(PageSize::A3),
            other => Err(anyhow!("unsupported page size '{}' (expected A4 or A3)", other)),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::A4 => f.write_str("A4"),
            PageSize::A3 => f.write_str("A3"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[serde(alias = "Portrait")]
    Portrait,
    #[serde(alias = "Landscape", alias = "paysage", alias = "Paysage")]
    Landscape,
}

impl FromStr for Orientation {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" | "paysage" => Ok(Orientation::Landscape),
            other => Err(anyhow!(
                "unsupported orientation '{}' (expected portrait or landscape)",
                other
            )),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => f.write_str("portrait"),
            Orientation::Landscape => f.write_str("landscape"),
        }
    }
}

/// Resolved page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub size: PageSize,
    pub orientation: Orientation,
    pub width: f32,
    pub height: f32,
}

impl Geometry {
    pub fn new(size: PageSize, orientation: Orientation) -> Self {
        let (short, long) = size.dimensions_mm();
        let (width, height) = match orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        };
        Self {
            size,
            orientation,
            width: mm(width),
            height: mm(height),
        }
    }

    /// A3 pages get the larger type ceilings and icon sizes.
    pub fn is_large(&self) -> bool {
        self.size == PageSize::A3
    }

    pub fn label(&self) -> String {
        format!("{}_{}", self.size, self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_swaps_axes() {
        let portrait = Geometry::new(PageSize::A4, Orientation::Portrait);
        let landscape = Geometry::new(PageSize::A4, Orientation::Landscape);
        assert!(portrait.width > 0.0 && portrait.height > 0.0);
        assert!(portrait.height > portrait.width);
        assert_eq!(portrait.width, landscape.height);
        assert_eq!(portrait.height, landscape.width);
    }

    #[test]
    fn a4_matches_postscript_points() {
        let geometry = Geometry::new(PageSize::A4, Orientation::Portrait);
        assert!((geometry.width - 595.28).abs() < 0.01);
        assert!((geometry.height - 841.89).abs() < 0.01);
    }

    #[test]
    fn only_a3_is_large() {
        assert!(Geometry::new(PageSize::A3, Orientation::Portrait).is_large());
        assert!(Geometry::new(PageSize::A3, Orientation::Landscape).is_large());
        assert!(!Geometry::new(PageSize::A4, Orientation::Landscape).is_large());
    }

    #[test]
    fn parses_selectors_case_insensitively() {
        assert_eq!("a3".parse::<PageSize>().unwrap(), PageSize::A3);
        assert_eq!(" A4 ".parse::<PageSize>().unwrap(), PageSize::A4);
        assert_eq!(
            "Paysage".parse::<Orientation>().unwrap(),
            Orientation::Landscape
        );
        assert!("letter".parse::<PageSize>().is_err());
        assert!("diagonal".parse::<Orientation>().is_err());
    }

    #[test]
    fn label_joins_size_and_orientation() {
        let geometry = Geometry::new(PageSize::A3, Orientation::Landscape);
        assert_eq!(geometry.label(), "A3_landscape");
    }
}
