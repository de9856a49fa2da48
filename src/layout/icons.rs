//! Minimal vector pictograms, one drawing routine per [`IconKind`].
//!
//! Every routine draws inside a square of side `size` centred on the pen
//! origin, using strokes only so the glyphs survive eco printing.

use super::plan::{Bounds, Point, Shape, Stroke};
use crate::font::FontMetrics;
use crate::page::IconKind;
use crate::theme::Color;

const ICON_STROKE_WIDTH: f32 = 3.0;

type IconPainter = fn(&mut IconPen<'_>);

const ICON_PAINTERS: &[(IconKind, IconPainter)] = &[
    (IconKind::Restrooms, draw_restrooms),
    (IconKind::Cloakroom, draw_cloakroom),
    (IconKind::Info, draw_info),
    (IconKind::Coffee, draw_coffee),
    (IconKind::Exit, draw_exit),
    (IconKind::Auditorium, draw_auditorium),
    (IconKind::Room, draw_room),
];

pub(crate) struct IconPen<'a> {
    cx: f32,
    cy: f32,
    s: f32,
    color: Color,
    font: &'a FontMetrics,
    shapes: Vec<Shape>,
}

impl IconPen<'_> {
    fn stroke(&self) -> Stroke {
        Stroke {
            color: self.color,
            width: ICON_STROKE_WIDTH,
        }
    }

    /// Offsets are fractions of the icon size relative to the centre.
    fn at(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.cx + self.s * dx, self.cy + self.s * dy)
    }

    fn circle(&mut self, dx: f32, dy: f32, radius: f32) {
        let shape = Shape::Circle {
            center: self.at(dx, dy),
            radius: self.s * radius,
            stroke: self.stroke(),
        };
        self.shapes.push(shape);
    }

    fn rounded_rect(&mut self, dx: f32, dy: f32, w: f32, h: f32, radius: f32) {
        let origin = self.at(dx, dy);
        let shape = Shape::Rect {
            bounds: Bounds::new(origin.x, origin.y, self.s * w, self.s * h),
            radius,
            fill: None,
            stroke: Some(self.stroke()),
        };
        self.shapes.push(shape);
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32)) {
        let shape = Shape::Line {
            from: self.at(from.0, from.1),
            to: self.at(to.0, to.1),
            stroke: self.stroke(),
        };
        self.shapes.push(shape);
    }

    fn glyph(&mut self, text: &str, size: f32, dy: f32) {
        let shape = Shape::Text {
            text: text.to_string(),
            center_x: self.cx,
            baseline: self.cy + self.s * dy,
            size,
            width: self.font.text_width(text, size),
            color: self.color,
        };
        self.shapes.push(shape);
    }
}

fn painter_for(kind: IconKind) -> Option<IconPainter> {
    ICON_PAINTERS
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map(|(_, painter)| *painter)
}

/// Shapes for `kind` centred on `center`; empty for [`IconKind::None`].
pub fn draw_icon(
    kind: IconKind,
    center: Point,
    size: f32,
    color: Color,
    font: &FontMetrics,
) -> Vec<Shape> {
    let Some(painter) = painter_for(kind) else {
        return Vec::new();
    };
    let mut pen = IconPen {
        cx: center.x,
        cy: center.y,
        s: size,
        color,
        font,
        shapes: Vec::new(),
    };
    painter(&mut pen);
    pen.shapes
}

fn draw_restrooms(pen: &mut IconPen<'_>) {
    pen.circle(-0.18, 0.18, 0.12);
    pen.circle(0.18, 0.18, 0.12);
    pen.rounded_rect(-0.30, -0.25, 0.22, 0.35, 6.0);
    pen.rounded_rect(0.08, -0.25, 0.22, 0.35, 6.0);
}

// Coat hanger.
fn draw_cloakroom(pen: &mut IconPen<'_>) {
    pen.line((-0.30, 0.10), (0.0, -0.20));
    pen.line((0.30, 0.10), (0.0, -0.20));
    pen.line((-0.30, 0.10), (0.30, 0.10));
    pen.circle(0.0, -0.20, 0.05);
}

fn draw_info(pen: &mut IconPen<'_>) {
    pen.circle(0.0, 0.0, 0.30);
    let size = (pen.s * 0.45).trunc();
    pen.glyph("i", size, -0.17);
}

fn draw_coffee(pen: &mut IconPen<'_>) {
    pen.rounded_rect(-0.28, -0.10, 0.48, 0.24, 6.0);
    pen.circle(0.26, 0.02, 0.08);
    pen.line((-0.22, -0.18), (0.20, -0.18));
}

// Door and outgoing arrow.
fn draw_exit(pen: &mut IconPen<'_>) {
    pen.rounded_rect(-0.30, -0.20, 0.18, 0.40, 4.0);
    pen.line((-0.02, 0.0), (0.30, 0.0));
    pen.line((0.18, 0.12), (0.30, 0.0));
    pen.line((0.18, -0.12), (0.30, 0.0));
}

// Stage and two rows of seats.
fn draw_auditorium(pen: &mut IconPen<'_>) {
    pen.rounded_rect(-0.30, -0.18, 0.60, 0.10, 4.0);
    pen.line((-0.26, -0.02), (0.26, -0.02));
    pen.line((-0.22, 0.10), (0.22, 0.10));
}

fn draw_room(pen: &mut IconPen<'_>) {
    pen.rounded_rect(-0.30, -0.22, 0.60, 0.44, 8.0);
    pen.line((-0.30, 0.08), (0.30, 0.08));
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT: FontMetrics = FontMetrics::HelveticaBold;

    fn shapes(kind: IconKind) -> Vec<Shape> {
        draw_icon(kind, Point::new(100.0, 100.0), 52.0, Color::WHITE, &FONT)
    }

    #[test]
    fn none_draws_nothing() {
        assert!(shapes(IconKind::None).is_empty());
    }

    #[test]
    fn every_other_kind_has_a_painter() {
        for kind in IconKind::ALL {
            if kind == IconKind::None {
                assert!(painter_for(kind).is_none());
            } else {
                assert!(painter_for(kind).is_some(), "{:?} has no painter", kind);
                assert!(!shapes(kind).is_empty());
            }
        }
    }

    #[test]
    fn icons_stay_inside_their_square() {
        let half = 52.0 * 0.5;
        for kind in IconKind::ALL {
            for shape in shapes(kind) {
                match shape {
                    Shape::Circle { center, radius, .. } => {
                        assert!((center.x - 100.0).abs() + radius <= half);
                        assert!((center.y - 100.0).abs() + radius <= half);
                    }
                    Shape::Rect { bounds, .. } => {
                        assert!(bounds.x >= 100.0 - half && bounds.right() <= 100.0 + half);
                        assert!(bounds.y >= 100.0 - half && bounds.top() <= 100.0 + half);
                    }
                    Shape::Line { from, to, .. } => {
                        for point in [from, to] {
                            assert!((point.x - 100.0).abs() <= half);
                            assert!((point.y - 100.0).abs() <= half);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn info_letter_uses_truncated_size() {
        let glyph = shapes(IconKind::Info)
            .into_iter()
            .find_map(|shape| match shape {
                Shape::Text { text, size, .. } => Some((text, size)),
                _ => None,
            })
            .expect("info glyph");
        assert_eq!(glyph.0, "i");
        assert_eq!(glyph.1, 23.0);
    }

    #[test]
    fn strokes_use_requested_colour() {
        let accent = Color::rgb8(0xAF, 0x00, 0x73);
        let shapes = draw_icon(IconKind::Exit, Point::new(0.0, 0.0), 44.0, accent, &FONT);
        for shape in shapes {
            match shape {
                Shape::Line { stroke, .. } | Shape::Circle { stroke, .. } => {
                    assert_eq!(stroke.color, accent)
                }
                Shape::Rect { stroke, .. } => assert_eq!(stroke.map(|s| s.color), Some(accent)),
                _ => {}
            }
        }
    }
}
