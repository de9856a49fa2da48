mod fit;
mod icons;
mod plan;

use crate::font::FontMetrics;
use crate::geometry::{Geometry, mm};
use crate::page::{PageSpec, StyleVariant};
use crate::theme::{Color, Theme};

pub use fit::{FIT_STEP, fit_text};
pub use icons::draw_icon;
pub use plan::{Bounds, DrawPlan, Element, Point, Role, Shape, Stroke};

const MARGIN_MM: f32 = 16.0;
const HEADER_RULE_FROM_TOP_MM: f32 = 16.0;
const EVENT_TITLE_FROM_TOP_MM: f32 = 26.0;
const EVENT_SUBTITLE_GAP_MM: f32 = 10.0;
const EVENT_TITLE_MIN: f32 = 18.0;

const BLOCK_TOP_WITH_TITLE: f32 = 0.70;
const BLOCK_TOP_WITHOUT_TITLE: f32 = 0.78;
const BLOCK_RADIUS: f32 = 18.0;
const BLOCK_OUTLINE_WIDTH: f32 = 2.0;
const BLOCK_TOP_BORDER_WIDTH: f32 = 6.0;
const ZONE_TITLE_PADDING_MM: f32 = 24.0;
const ZONE_TITLE_MIN: f32 = 34.0;
/// Baseline drop, as a fraction of the cap height, that centres capitals optically.
const CAP_CENTERING: f32 = 0.5;

const BELOW_BLOCK_MM: f32 = 18.0;
const ICON_RAISE_MM: f32 = 10.0;
const ZONE_SUBTITLE_DROP_MM: f32 = 4.0;

const FOOTER_RULE_MM: f32 = 18.0;
const LOGO_WIDTH_MM: f32 = 44.0;
const LOGO_HEIGHT_MM: f32 = 18.0;
const LOGO_BOTTOM_MM: f32 = 24.0;

/// Size-dependent values; A3 pages get the larger column.
struct PageClass {
    event_title_max: f32,
    event_subtitle_size: f32,
    block_fraction: f32,
    zone_title_max: f32,
    icon_size: f32,
    zone_subtitle_size: f32,
}

impl PageClass {
    fn for_geometry(geometry: &Geometry) -> Self {
        if geometry.is_large() {
            Self {
                event_title_max: 54.0,
                event_subtitle_size: 16.0,
                block_fraction: 0.42,
                zone_title_max: 104.0,
                icon_size: 52.0,
                zone_subtitle_size: 20.0,
            }
        } else {
            Self {
                event_title_max: 40.0,
                event_subtitle_size: 14.0,
                block_fraction: 0.40,
                zone_title_max: 78.0,
                icon_size: 44.0,
                zone_subtitle_size: 16.0,
            }
        }
    }
}

/// Logo slot geometry in points.
pub fn logo_bounds(geometry: &Geometry) -> Bounds {
    let w = mm(LOGO_WIDTH_MM);
    Bounds::new(
        (geometry.width - w) / 2.0,
        mm(LOGO_BOTTOM_MM),
        w,
        mm(LOGO_HEIGHT_MM),
    )
}

/// Stateless sign layout for one theme and font.
#[derive(Clone)]
pub struct LayoutEngine {
    theme: Theme,
    font: FontMetrics,
}

impl LayoutEngine {
    pub fn new(theme: Theme, font: FontMetrics) -> Self {
        Self { theme, font }
    }

    pub fn font(&self) -> &FontMetrics {
        &self.font
    }

    /// Lays out one page. `with_logo` reserves the footer logo slot.
    pub fn layout_page(&self, spec: &PageSpec, geometry: &Geometry, with_logo: bool) -> DrawPlan {
        let spec = spec.normalized();
        let class = PageClass::for_geometry(geometry);
        let (w, h) = (geometry.width, geometry.height);
        let margin = mm(MARGIN_MM);
        let mut plan = DrawPlan::new(w, h);

        plan.push(
            Role::Background,
            Shape::Rect {
                bounds: Bounds::new(0.0, 0.0, w, h),
                radius: 0.0,
                fill: Some(self.theme.background),
                stroke: None,
            },
        );

        let header_rule_y = h - mm(HEADER_RULE_FROM_TOP_MM);
        plan.push(
            Role::HeaderRule,
            Shape::Line {
                from: Point::new(margin, header_rule_y),
                to: Point::new(w - margin, header_rule_y),
                stroke: Stroke {
                    color: self.theme.accent,
                    width: 2.0,
                },
            },
        );

        let has_event_title = !spec.event_title.is_empty();
        if has_event_title {
            let baseline = h - mm(EVENT_TITLE_FROM_TOP_MM);
            let size = fit_text(
                &spec.event_title,
                w - 2.0 * margin,
                &self.font,
                class.event_title_max,
                EVENT_TITLE_MIN,
            );
            plan.push(
                Role::EventTitle,
                self.centered_text(&spec.event_title, w / 2.0, baseline, size, self.theme.text),
            );
            if let Some(subtitle) = spec.event_subtitle.as_deref() {
                plan.push(
                    Role::EventSubtitle,
                    self.centered_text(
                        subtitle,
                        w / 2.0,
                        baseline - mm(EVENT_SUBTITLE_GAP_MM),
                        class.event_subtitle_size,
                        self.theme.accent,
                    ),
                );
            }
        }

        let block_top = h * if has_event_title {
            BLOCK_TOP_WITH_TITLE
        } else {
            BLOCK_TOP_WITHOUT_TITLE
        };
        let block_h = h * class.block_fraction;
        let block = Bounds::new(margin, block_top - block_h, w - 2.0 * margin, block_h);

        let (zone_title_color, zone_color) = match spec.style_variant {
            StyleVariant::Premium => {
                plan.push(
                    Role::Block,
                    Shape::Rect {
                        bounds: block,
                        radius: BLOCK_RADIUS,
                        fill: Some(self.theme.accent),
                        stroke: None,
                    },
                );
                (self.theme.on_accent, self.theme.accent)
            }
            StyleVariant::Eco => {
                plan.push(
                    Role::Block,
                    Shape::Rect {
                        bounds: block,
                        radius: BLOCK_RADIUS,
                        fill: None,
                        stroke: Some(Stroke {
                            color: self.theme.accent,
                            width: BLOCK_OUTLINE_WIDTH,
                        }),
                    },
                );
                plan.push(
                    Role::BlockBorder,
                    Shape::Line {
                        from: Point::new(block.x, block.top()),
                        to: Point::new(block.right(), block.top()),
                        stroke: Stroke {
                            color: self.theme.accent,
                            width: BLOCK_TOP_BORDER_WIDTH,
                        },
                    },
                );
                (self.theme.text, self.theme.text)
            }
        };

        let zone_title = spec.zone_title.to_uppercase();
        let zone_size = fit_text(
            &zone_title,
            block.w - mm(ZONE_TITLE_PADDING_MM),
            &self.font,
            class.zone_title_max,
            ZONE_TITLE_MIN,
        );
        let zone_baseline =
            block.center().y - zone_size * self.font.cap_height() * CAP_CENTERING;
        plan.push(
            Role::ZoneTitle,
            self.centered_text(&zone_title, w / 2.0, zone_baseline, zone_size, zone_title_color),
        );

        let below_y = block.y - mm(BELOW_BLOCK_MM);
        let icon_center = Point::new(w / 2.0, below_y + mm(ICON_RAISE_MM));
        for shape in draw_icon(
            spec.icon_kind,
            icon_center,
            class.icon_size,
            zone_color,
            &self.font,
        ) {
            plan.push(Role::Icon, shape);
        }

        if let Some(subtitle) = spec.zone_subtitle.as_deref() {
            plan.push(
                Role::ZoneSubtitle,
                self.centered_text(
                    subtitle,
                    w / 2.0,
                    below_y - mm(ZONE_SUBTITLE_DROP_MM),
                    class.zone_subtitle_size,
                    self.theme.text,
                ),
            );
        }

        let footer_y = mm(FOOTER_RULE_MM);
        plan.push(
            Role::FooterRule,
            Shape::Line {
                from: Point::new(margin, footer_y),
                to: Point::new(w - margin, footer_y),
                stroke: Stroke {
                    color: self.theme.accent,
                    width: 1.0,
                },
            },
        );

        if with_logo {
            plan.push(
                Role::Logo,
                Shape::Image {
                    bounds: logo_bounds(geometry),
                },
            );
        }

        plan
    }

    fn centered_text(&self, text: &str, center_x: f32, baseline: f32, size: f32, color: Color) -> Shape {
        Shape::Text {
            text: text.to_string(),
            center_x,
            baseline,
            size,
            width: self.font.text_width(text, size),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Orientation, PageSize};
    use crate::page::IconKind;

    fn engine() -> LayoutEngine {
        LayoutEngine::new(Theme::default(), FontMetrics::HelveticaBold)
    }

    fn a3_landscape() -> Geometry {
        Geometry::new(PageSize::A3, Orientation::Landscape)
    }

    fn block_of(plan: &DrawPlan) -> (Bounds, Option<Color>, Option<Stroke>) {
        plan.with_role(Role::Block)
            .find_map(|shape| match shape {
                Shape::Rect {
                    bounds, fill, stroke, ..
                } => Some((*bounds, *fill, *stroke)),
                _ => None,
            })
            .expect("block")
    }

    fn text_shape(plan: &DrawPlan, role: Role) -> (f32, f32, f32, f32, Color) {
        plan.with_role(role)
            .find_map(|shape| match shape {
                Shape::Text {
                    center_x,
                    baseline,
                    size,
                    width,
                    color,
                    ..
                } => Some((*center_x, *baseline, *size, *width, *color)),
                _ => None,
            })
            .expect("text element")
    }

    #[test]
    fn seminar_restrooms_scenario() {
        let theme = Theme::default();
        let spec = PageSpec::new("SEMINAR 2026", "restrooms")
            .with_icon(IconKind::Restrooms)
            .with_style(StyleVariant::Premium);
        let geometry = a3_landscape();
        let plan = engine().layout_page(&spec, &geometry, false);

        assert_eq!(plan.text_of(Role::EventTitle), Some("SEMINAR 2026"));
        assert_eq!(plan.text_of(Role::ZoneTitle), Some("RESTROOMS"));

        let (block, fill, stroke) = block_of(&plan);
        assert_eq!(fill, Some(theme.accent));
        assert!(stroke.is_none());

        let (center_x, baseline, size, width, color) = text_shape(&plan, Role::ZoneTitle);
        assert_eq!(color, theme.on_accent);
        assert_eq!(center_x, geometry.width / 2.0);
        assert_eq!(size, 104.0);
        assert!(width <= block.w - mm(ZONE_TITLE_PADDING_MM));
        let cap_mid = baseline + size * 0.718 / 2.0;
        assert!((cap_mid - block.center().y).abs() < 0.01);

        let icons: Vec<_> = plan.with_role(Role::Icon).collect();
        assert_eq!(icons.len(), 4);
        assert!(icons.iter().all(|shape| match shape {
            Shape::Circle { center, .. } => center.y < block.y,
            Shape::Rect { bounds, .. } => bounds.top() < block.y,
            _ => false,
        }));
    }

    #[test]
    fn premium_fills_and_eco_outlines() {
        let theme = Theme::default();
        let geometry = Geometry::new(PageSize::A4, Orientation::Portrait);
        let base = PageSpec::new("Forum", "Exit").with_icon(IconKind::Exit);

        let premium = engine().layout_page(&base.clone().with_style(StyleVariant::Premium), &geometry, false);
        let (_, fill, stroke) = block_of(&premium);
        assert!(fill.is_some() && stroke.is_none());
        assert!(!premium.has_role(Role::BlockBorder));

        let eco = engine().layout_page(&base.with_style(StyleVariant::Eco), &geometry, false);
        let (block, fill, stroke) = block_of(&eco);
        assert!(fill.is_none());
        assert_eq!(stroke.map(|s| s.color), Some(theme.accent));
        let border = eco.with_role(Role::BlockBorder).next().expect("top border");
        match border {
            Shape::Line { from, to, stroke } => {
                assert_eq!(from.y, block.top());
                assert_eq!(to.y, block.top());
                assert_eq!(stroke.width, BLOCK_TOP_BORDER_WIDTH);
            }
            other => panic!("unexpected border shape {:?}", other),
        }
        let (_, _, _, _, color) = text_shape(&eco, Role::ZoneTitle);
        assert_eq!(color, theme.text);
        for shape in eco.with_role(Role::Icon) {
            if let Shape::Line { stroke, .. } = shape {
                assert_eq!(stroke.color, theme.text);
            }
        }
    }

    #[test]
    fn icon_none_emits_no_glyph_shapes() {
        let spec = PageSpec::new("Forum", "Room 1");
        let plan = engine().layout_page(&spec, &a3_landscape(), false);
        assert!(!plan.has_role(Role::Icon));
    }

    #[test]
    fn missing_event_title_raises_block() {
        let geometry = Geometry::new(PageSize::A4, Orientation::Portrait);
        let with_title = engine().layout_page(&PageSpec::new("Forum", "Pause"), &geometry, false);
        let without = engine().layout_page(&PageSpec::new("   ", "Pause"), &geometry, false);

        assert!(!without.has_role(Role::EventTitle));
        let (high, _, _) = block_of(&without);
        let (low, _, _) = block_of(&with_title);
        assert!((high.top() - geometry.height * 0.78).abs() < 0.01);
        assert!((low.top() - geometry.height * 0.70).abs() < 0.01);
        assert_eq!(high.h, low.h);
    }

    #[test]
    fn event_subtitle_needs_event_title() {
        let geometry = a3_landscape();
        let orphan = PageSpec::new("", "Exit").with_event_subtitle("Level 0");
        assert!(!engine().layout_page(&orphan, &geometry, false).has_role(Role::EventSubtitle));

        let spec = PageSpec::new("Forum", "Exit").with_event_subtitle(" Level 0 ");
        let plan = engine().layout_page(&spec, &geometry, false);
        assert_eq!(plan.text_of(Role::EventSubtitle), Some("Level 0"));
        let (_, title_baseline, _, _, _) = text_shape(&plan, Role::EventTitle);
        let (_, baseline, size, _, color) = text_shape(&plan, Role::EventSubtitle);
        assert!((title_baseline - baseline - mm(10.0)).abs() < 0.01);
        assert_eq!(size, 16.0);
        assert_eq!(color, Theme::default().accent);
    }

    #[test]
    fn long_event_title_shrinks_within_margins() {
        let geometry = Geometry::new(PageSize::A4, Orientation::Portrait);
        let spec = PageSpec::new("International Seminar on Rare Genetic Diseases 2026", "Accueil");
        let plan = engine().layout_page(&spec, &geometry, false);
        let (_, _, size, width, _) = text_shape(&plan, Role::EventTitle);
        assert!(size < 40.0 && size >= 18.0);
        assert!(width <= geometry.width - 2.0 * mm(MARGIN_MM));
    }

    #[test]
    fn a4_uses_smaller_ceilings_than_a3() {
        let spec = PageSpec::new("Forum", "Exit")
            .with_icon(IconKind::Info)
            .with_zone_subtitle("Sortie");
        let small = engine().layout_page(&spec, &Geometry::new(PageSize::A4, Orientation::Landscape), false);
        let large = engine().layout_page(&spec, &a3_landscape(), false);
        assert_eq!(text_shape(&small, Role::ZoneTitle).2, 78.0);
        assert_eq!(text_shape(&large, Role::ZoneTitle).2, 104.0);
        assert_eq!(text_shape(&small, Role::ZoneSubtitle).2, 16.0);
        assert_eq!(text_shape(&large, Role::ZoneSubtitle).2, 20.0);
    }

    #[test]
    fn logo_slot_is_the_only_difference() {
        let spec = PageSpec::new("Forum", "Cloakroom").with_icon(IconKind::Cloakroom);
        let geometry = a3_landscape();
        let without = engine().layout_page(&spec, &geometry, false);
        let with = engine().layout_page(&spec, &geometry, true);

        assert_eq!(with.elements.len(), without.elements.len() + 1);
        assert_eq!(&with.elements[..without.elements.len()], &without.elements[..]);
        let last = with.elements.last().expect("logo element");
        assert_eq!(last.role, Role::Logo);
        assert_eq!(last.shape, Shape::Image { bounds: logo_bounds(&geometry) });
    }

    #[test]
    fn footer_rule_and_logo_sit_inside_page() {
        let geometry = Geometry::new(PageSize::A4, Orientation::Portrait);
        let plan = engine().layout_page(&PageSpec::new("Forum", "Exit"), &geometry, true);
        let bounds = logo_bounds(&geometry);
        assert!((bounds.x + bounds.w / 2.0 - geometry.width / 2.0).abs() < 0.01);
        assert!(bounds.y > mm(FOOTER_RULE_MM));
        assert!(plan.has_role(Role::FooterRule));
    }
}
