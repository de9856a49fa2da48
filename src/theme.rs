use anyhow::{Result, anyhow};

/// RGB colour with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb8(0xFF, 0xFF, 0xFF);

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub fn from_hex(value: &str) -> Result<Self> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(anyhow!("invalid colour '{}' (expected #RRGGBB)", value));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|err| anyhow!("invalid colour '{}': {}", value, err))
        };
        Ok(Color::rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(&self) -> String {
        let to_u8 = |channel: f32| (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            to_u8(self.r),
            to_u8(self.g),
            to_u8(self.b)
        )
    }
}

/// Palette shared by every page of a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub accent: Color,
    pub text: Color,
    pub background: Color,
    /// Text drawn on top of a solid accent fill.
    pub on_accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::rgb8(0xAF, 0x00, 0x73),
            text: Color::rgb8(0x41, 0x41, 0x41),
            background: Color::WHITE,
            on_accent: Color::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_or_without_hash() {
        let accent = Color::from_hex("#AF0073").expect("accent");
        assert_eq!(accent, Color::rgb8(0xAF, 0x00, 0x73));
        assert_eq!(Color::from_hex(" 414141 ").expect("grey").to_hex(), "#414141");
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#AF00").is_err());
        assert!(Color::from_hex("#GG0073").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn default_theme_is_brand_palette() {
        let theme = Theme::default();
        assert_eq!(theme.accent.to_hex(), "#AF0073");
        assert_eq!(theme.text.to_hex(), "#414141");
        assert_eq!(theme.on_accent, Color::WHITE);
    }
}
