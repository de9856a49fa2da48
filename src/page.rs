use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    #[default]
    None,
    #[serde(alias = "wc")]
    Restrooms,
    #[serde(alias = "coat")]
    Cloakroom,
    Info,
    Coffee,
    Exit,
    Auditorium,
    Room,
}

impl IconKind {
    pub const ALL: [IconKind; 8] = [
        IconKind::None,
        IconKind::Restrooms,
        IconKind::Cloakroom,
        IconKind::Info,
        IconKind::Coffee,
        IconKind::Exit,
        IconKind::Auditorium,
        IconKind::Room,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleVariant {
    /// Solid accent block with light text.
    #[default]
    Premium,
    /// Outlined block with a heavy top border; saves ink.
    Eco,
}

/// Content of one sign page, fully resolved by the caller.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PageSpec {
    #[serde(default)]
    pub event_title: String,
    #[serde(default)]
    pub event_subtitle: Option<String>,
    pub zone_title: String,
    #[serde(default)]
    pub zone_subtitle: Option<String>,
    #[serde(default)]
    pub icon_kind: IconKind,
    #[serde(default, alias = "theme_variant")]
    pub style_variant: StyleVariant,
}

impl PageSpec {
    pub fn new(event_title: impl Into<String>, zone_title: impl Into<String>) -> Self {
        Self {
            event_title: event_title.into(),
            zone_title: zone_title.into(),
            ..Self::default()
        }
    }

    pub fn with_event_subtitle(mut self, value: impl Into<String>) -> Self {
        self.event_subtitle = Some(value.into());
        self
    }

    pub fn with_zone_subtitle(mut self, value: impl Into<String>) -> Self {
        self.zone_subtitle = Some(value.into());
        self
    }

    pub fn with_icon(mut self, icon_kind: IconKind) -> Self {
        self.icon_kind = icon_kind;
        self
    }

    pub fn with_style(mut self, style_variant: StyleVariant) -> Self {
        self.style_variant = style_variant;
        self
    }

    /// Trims every text field; blank optional fields become `None`.
    pub fn normalized(&self) -> PageSpec {
        PageSpec {
            event_title: self.event_title.trim().to_string(),
            event_subtitle: trim_optional(self.event_subtitle.as_deref()),
            zone_title: self.zone_title.trim().to_string(),
            zone_subtitle: trim_optional(self.zone_subtitle.as_deref()),
            icon_kind: self.icon_kind,
            style_variant: self.style_variant,
        }
    }
}

fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
