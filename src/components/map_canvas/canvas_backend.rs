use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;
use crate::render::{DrawCommand, Stroke};
use crate::viewport::SurfaceFit;

const PLACEHOLDER_COLOR: &str = "#4b5563";
const PLACEHOLDER_FONT: &str = "14px sans-serif";
const OVERLAY_FILL: &str = "rgba(255, 255, 255, 0.9)";
const OVERLAY_TEXT_COLOR: &str = "#b45309";
const OVERLAY_FONT: &str = "600 12px sans-serif";
const OVERLAY_SIZE: (f64, f64) = (220.0, 26.0);
const OVERLAY_TOP: f64 = 12.0;

/// Run a composed frame against a 2D context.
///
/// `Clear` paints the whole surface, then everything else is drawn in logical
/// units through the letter-box fit.
pub fn execute(ctx: &CanvasRenderingContext2d, commands: &[DrawCommand], surface: (f64, f64), fit: SurfaceFit) {
    let _ = ctx.reset_transform();

    for command in commands {
        match command {
            DrawCommand::Clear { width, height, color } => {
                clear(ctx, surface, *color);
                let _ = ctx.set_transform(fit.scale, 0.0, 0.0, fit.scale, fit.offset_x, fit.offset_y);
                ctx.begin_path();
                ctx.rect(0.0, 0.0, *width, *height);
                ctx.clip();
            }
            DrawCommand::Grid { width, height, spacing, color, line_width } => {
                draw_grid(ctx, (*width, *height), *spacing, color, *line_width);
            }
            DrawCommand::PushTransform { translate_x, translate_y, scale } => {
                ctx.save();
                let _ = ctx.translate(*translate_x, *translate_y);
                let _ = ctx.scale(*scale, *scale);
            }
            DrawCommand::PopTransform => ctx.restore(),
            DrawCommand::Line { from, to, stroke, alpha, dash } => {
                ctx.save();
                ctx.set_global_alpha(*alpha);
                apply_stroke(ctx, *stroke);
                if let Some([on, off]) = dash {
                    let pattern = js_sys::Array::of2(&JsValue::from_f64(*on), &JsValue::from_f64(*off));
                    let _ = ctx.set_line_dash(&pattern);
                }
                ctx.begin_path();
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
                ctx.stroke();
                ctx.restore();
            }
            DrawCommand::Circle { center, radius, fill, stroke, alpha } => {
                ctx.save();
                ctx.set_global_alpha(*alpha);
                ctx.begin_path();
                let _ = ctx.arc(center.x, center.y, *radius, 0.0, TAU);
                if let Some(color) = fill {
                    ctx.set_fill_style_str(color);
                    ctx.fill();
                }
                if let Some(stroke) = stroke {
                    apply_stroke(ctx, *stroke);
                    ctx.stroke();
                }
                ctx.restore();
            }
            DrawCommand::Text { position, text, font, color } => {
                ctx.set_font(font);
                ctx.set_fill_style_str(color);
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                let _ = ctx.fill_text(text, position.x, position.y);
            }
            DrawCommand::Placeholder { text } => {
                let (width, height) = logical_size(surface, fit);
                ctx.set_font(PLACEHOLDER_FONT);
                ctx.set_fill_style_str(PLACEHOLDER_COLOR);
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                let _ = ctx.fill_text(text, width / 2.0, height / 2.0);
            }
            DrawCommand::StatusOverlay { text } => {
                let (width, _) = logical_size(surface, fit);
                draw_status_overlay(ctx, text, width / 2.0);
            }
        }
    }

    let _ = ctx.reset_transform();
}

fn clear(ctx: &CanvasRenderingContext2d, (width, height): (f64, f64), color: &str) {
    let _ = ctx.reset_transform();
    ctx.set_fill_style_str(color);
    ctx.fill_rect(0.0, 0.0, width, height);
}

fn apply_stroke(ctx: &CanvasRenderingContext2d, stroke: Stroke) {
    ctx.set_stroke_style_str(stroke.color);
    ctx.set_line_width(stroke.width);
}

/// Logical extent visible through the fit, including the letter-box margins
fn logical_size(surface: (f64, f64), fit: SurfaceFit) -> (f64, f64) {
    let (right, bottom) = fit.to_logical(surface.0, surface.1);
    let (left, top) = fit.to_logical(0.0, 0.0);
    (right + left, bottom + top)
}

/// Banner centred horizontally near the top edge; the map stays visible around it
fn draw_status_overlay(ctx: &CanvasRenderingContext2d, text: &str, center_x: f64) {
    let (width, height) = OVERLAY_SIZE;
    ctx.save();
    ctx.set_fill_style_str(OVERLAY_FILL);
    ctx.fill_rect(center_x - width / 2.0, OVERLAY_TOP, width, height);
    ctx.set_font(OVERLAY_FONT);
    ctx.set_fill_style_str(OVERLAY_TEXT_COLOR);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(text, center_x, OVERLAY_TOP + height / 2.0);
    ctx.restore();
}

fn draw_grid(ctx: &CanvasRenderingContext2d, (width, height): (f64, f64), spacing: f64, color: &str, line_width: f64) {
    if spacing <= 0.0 {
        return;
    }

    ctx.save();
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(line_width);
    ctx.begin_path();

    let mut x = 0.0;
    while x <= width {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, height);
        x += spacing;
    }

    let mut y = 0.0;
    while y <= height {
        ctx.move_to(0.0, y);
        ctx.line_to(width, y);
        y += spacing;
    }

    ctx.stroke();
    ctx.restore();
}
