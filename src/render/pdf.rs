use anyhow::{Result, anyhow};
use printpdf::image_crate::{self, DynamicImage, GenericImageView, Rgba};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Polygon, PolygonMode as PaintMode, Rgb, WindingOrder,
};
use std::io::{BufWriter, Cursor};

use crate::font::FontMetrics;
use crate::geometry::to_mm;
use crate::layout::{Bounds, DrawPlan, Point, Shape, Stroke};
use crate::logo::LogoAsset;
use crate::theme::Color;

const CORNER_SEGMENTS: usize = 8;
const CIRCLE_SEGMENTS: usize = 48;
const LOGO_DPI: f32 = 300.0;

/// Renders `plans` as consecutive pages of one PDF, in order.
pub fn render_document(
    title: &str,
    plans: &[DrawPlan],
    font: &FontMetrics,
    logo: Option<&LogoAsset>,
) -> Result<Vec<u8>> {
    let Some((first, rest)) = plans.split_first() else {
        return Err(anyhow!("no pages to render"));
    };

    let (doc, page, layer) = PdfDocument::new(
        title,
        Mm(to_mm(first.width)),
        Mm(to_mm(first.height)),
        "Layer 1",
    );
    let font_ref = register_font(&doc, font)?;
    let logo_image = logo.map(|logo| flatten_onto_white(&logo.image));

    let mut layers = vec![doc.get_page(page).get_layer(layer)];
    for (idx, plan) in rest.iter().enumerate() {
        let (page, layer) = doc.add_page(
            Mm(to_mm(plan.width)),
            Mm(to_mm(plan.height)),
            format!("Layer {}", idx + 2),
        );
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for (plan, layer) in plans.iter().zip(layers) {
        draw_plan(&layer, plan, &font_ref, logo_image.as_ref());
    }

    let mut buffer = Vec::new();
    {
        let mut writer = BufWriter::new(&mut buffer);
        doc.save(&mut writer)
            .map_err(|err| anyhow!("failed to write pdf: {}", err))?;
    }
    Ok(buffer)
}

fn register_font(doc: &PdfDocumentReference, font: &FontMetrics) -> Result<IndirectFontRef> {
    match font {
        FontMetrics::HelveticaBold => doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|err| anyhow!("failed to register Helvetica-Bold: {}", err)),
        FontMetrics::External(external) => doc
            .add_external_font(Cursor::new(external.data()))
            .map_err(|err| anyhow!("failed to embed font: {}", err)),
    }
}

fn draw_plan(
    layer: &PdfLayerReference,
    plan: &DrawPlan,
    font: &IndirectFontRef,
    logo: Option<&DynamicImage>,
) {
    for element in &plan.elements {
        match &element.shape {
            Shape::Rect {
                bounds,
                radius,
                fill,
                stroke,
            } => {
                let Some(mode) = paint_mode(fill.is_some(), stroke.is_some()) else {
                    continue;
                };
                apply_paint(layer, *fill, *stroke);
                add_polygon(layer, rounded_rect_path(*bounds, *radius), mode);
            }
            Shape::Line { from, to, stroke } => {
                apply_paint(layer, None, Some(*stroke));
                layer.add_line(Line {
                    points: vec![(to_pdf_point(*from), false), (to_pdf_point(*to), false)],
                    is_closed: false,
                });
            }
            Shape::Circle {
                center,
                radius,
                stroke,
            } => {
                apply_paint(layer, None, Some(*stroke));
                add_polygon(layer, circle_path(*center, *radius), PaintMode::Stroke);
            }
            Shape::Text {
                text,
                center_x,
                baseline,
                size,
                width,
                color,
            } => {
                layer.set_fill_color(pdf_color(*color));
                layer.use_text(
                    text.as_str(),
                    *size,
                    Mm(to_mm(center_x - width / 2.0)),
                    Mm(to_mm(*baseline)),
                    font,
                );
            }
            Shape::Image { bounds } => {
                if let Some(image) = logo {
                    add_logo(layer, image, *bounds);
                }
            }
        }
    }
}

fn paint_mode(fill: bool, stroke: bool) -> Option<PaintMode> {
    match (fill, stroke) {
        (true, true) => Some(PaintMode::FillStroke),
        (true, false) => Some(PaintMode::Fill),
        (false, true) => Some(PaintMode::Stroke),
        (false, false) => None,
    }
}

fn apply_paint(layer: &PdfLayerReference, fill: Option<Color>, stroke: Option<Stroke>) {
    if let Some(color) = fill {
        layer.set_fill_color(pdf_color(color));
    }
    if let Some(stroke) = stroke {
        layer.set_outline_color(pdf_color(stroke.color));
        layer.set_outline_thickness(stroke.width);
    }
}

fn add_polygon(layer: &PdfLayerReference, path: Vec<Point>, mode: PaintMode) {
    let ring = path.into_iter().map(|point| (to_pdf_point(point), false)).collect();
    layer.add_polygon(Polygon {
        rings: vec![ring],
        mode,
        winding_order: WindingOrder::NonZero,
    });
}

fn add_logo(layer: &PdfLayerReference, image: &DynamicImage, bounds: Bounds) {
    let (px_w, px_h) = (image.width().max(1), image.height().max(1));
    let natural_w = px_w as f32 / LOGO_DPI * 25.4;
    let natural_h = px_h as f32 / LOGO_DPI * 25.4;
    let transform = ImageTransform {
        translate_x: Some(Mm(to_mm(bounds.x))),
        translate_y: Some(Mm(to_mm(bounds.y))),
        rotate: None,
        scale_x: Some(to_mm(bounds.w) / natural_w),
        scale_y: Some(to_mm(bounds.h) / natural_h),
        dpi: Some(LOGO_DPI),
    };
    Image::from_dynamic_image(image).add_to_layer(layer.clone(), transform);
}

/// Composites transparent logo pixels over white so the PDF needs no soft mask.
fn flatten_onto_white(image: &DynamicImage) -> DynamicImage {
    let rgba = image.to_rgba8();
    let mut rgb = image_crate::RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let blend = |channel: u8| (channel as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        rgb.put_pixel(x, y, image_crate::Rgb([blend(r), blend(g), blend(b)]));
    }
    DynamicImage::ImageRgb8(rgb)
}

fn pdf_color(color: Color) -> printpdf::Color {
    printpdf::Color::Rgb(Rgb::new(color.r, color.g, color.b, None))
}

fn to_pdf_point(point: Point) -> printpdf::Point {
    printpdf::Point::new(Mm(to_mm(point.x)), Mm(to_mm(point.y)))
}

/// Closed outline of a rectangle whose corners are arcs of `radius`.
pub(crate) fn rounded_rect_path(bounds: Bounds, radius: f32) -> Vec<Point> {
    let r = radius.min(bounds.w / 2.0).min(bounds.h / 2.0).max(0.0);
    if r <= 0.0 {
        return vec![
            Point::new(bounds.x, bounds.y),
            Point::new(bounds.right(), bounds.y),
            Point::new(bounds.right(), bounds.top()),
            Point::new(bounds.x, bounds.top()),
        ];
    }
    let corners = [
        (bounds.right() - r, bounds.y + r, -90.0f32),
        (bounds.right() - r, bounds.top() - r, 0.0),
        (bounds.x + r, bounds.top() - r, 90.0),
        (bounds.x + r, bounds.y + r, 180.0),
    ];
    let mut path = Vec::with_capacity(corners.len() * (CORNER_SEGMENTS + 1));
    for (cx, cy, start) in corners {
        for step in 0..=CORNER_SEGMENTS {
            let angle = (start + 90.0 * step as f32 / CORNER_SEGMENTS as f32).to_radians();
            path.push(Point::new(cx + r * angle.cos(), cy + r * angle.sin()));
        }
    }
    path
}

pub(crate) fn circle_path(center: Point, radius: f32) -> Vec<Point> {
    (0..CIRCLE_SEGMENTS)
        .map(|step| {
            let angle = std::f32::consts::TAU * step as f32 / CIRCLE_SEGMENTS as f32;
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}
