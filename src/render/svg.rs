use anyhow::{Context, Result, anyhow};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::sync::Arc;
use tiny_skia::{Pixmap, Transform};
use usvg::{Options, Tree, fontdb};

use crate::font::FontMetrics;
use crate::layout::{DrawPlan, Shape};
use crate::logo::LogoAsset;

/// Renders one page plan as an SVG document (y axis flipped to point down).
pub fn render_svg(plan: &DrawPlan, font: &FontMetrics, logo: Option<&LogoAsset>) -> String {
    let height = plan.height;
    let family = escape_xml(font.family());
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = plan.width,
        h = height
    ));

    for element in &plan.elements {
        match &element.shape {
            Shape::Rect {
                bounds,
                radius,
                fill,
                stroke,
            } => {
                let fill = fill.map(|color| color.to_hex()).unwrap_or_else(|| "none".to_string());
                let (stroke_color, stroke_width) = stroke
                    .map(|stroke| (stroke.color.to_hex(), stroke.width))
                    .unwrap_or_else(|| ("none".to_string(), 0.0));
                svg.push_str(&format!(
                    r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" rx="{r}" fill="{fill}" stroke="{stroke}" stroke-width="{sw}"/>"#,
                    x = bounds.x,
                    y = height - bounds.top(),
                    w = bounds.w,
                    h = bounds.h,
                    r = radius,
                    fill = fill,
                    stroke = stroke_color,
                    sw = stroke_width
                ));
            }
            Shape::Line { from, to, stroke } => {
                svg.push_str(&format!(
                    r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{color}" stroke-width="{sw}"/>"#,
                    x1 = from.x,
                    y1 = height - from.y,
                    x2 = to.x,
                    y2 = height - to.y,
                    color = stroke.color.to_hex(),
                    sw = stroke.width
                ));
            }
            Shape::Circle {
                center,
                radius,
                stroke,
            } => {
                svg.push_str(&format!(
                    r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="none" stroke="{color}" stroke-width="{sw}"/>"#,
                    cx = center.x,
                    cy = height - center.y,
                    r = radius,
                    color = stroke.color.to_hex(),
                    sw = stroke.width
                ));
            }
            Shape::Text {
                text,
                center_x,
                baseline,
                size,
                color,
                ..
            } => {
                svg.push_str(&format!(
                    r#"<text x="{x}" y="{y}" font-size="{size}" font-weight="bold" font-family="{family}" text-anchor="middle" fill="{color}">{text}</text>"#,
                    x = center_x,
                    y = height - baseline,
                    size = size,
                    family = family,
                    color = color.to_hex(),
                    text = escape_xml(text)
                ));
            }
            Shape::Image { bounds } => {
                let Some(logo) = logo else {
                    continue;
                };
                let data_uri = format!("data:{};base64,{}", logo.mime, BASE64.encode(&logo.bytes));
                svg.push_str(&format!(
                    r#"<image href="{uri}" xlink:href="{uri}" x="{x}" y="{y}" width="{w}" height="{h}" preserveAspectRatio="none"/>"#,
                    uri = data_uri,
                    x = bounds.x,
                    y = height - bounds.top(),
                    w = bounds.w,
                    h = bounds.h
                ));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Renders one page plan straight to a PNG preview.
pub fn render_page_png(
    plan: &DrawPlan,
    font: &FontMetrics,
    logo: Option<&LogoAsset>,
) -> Result<Vec<u8>> {
    let svg = render_svg(plan, font, logo);
    let tree =
        Tree::from_str(&svg, &preview_options(font)).with_context(|| "failed to parse page SVG")?;
    let mut pixmap = Pixmap::new(plan.width.ceil() as u32, plan.height.ceil() as u32)
        .ok_or_else(|| anyhow!("page has no area: {}x{}", plan.width, plan.height))?;
    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .with_context(|| "failed to encode preview PNG")
}

fn preview_options(font: &FontMetrics) -> Options<'static> {
    let mut fonts = fontdb::Database::new();
    fonts.load_system_fonts();
    if let FontMetrics::External(external) = font {
        fonts.load_font_data(external.data().to_vec());
    }
    Options {
        fontdb: Arc::new(fonts),
        ..Options::default()
    }
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
