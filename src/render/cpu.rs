use vello_cpu::kurbo::Shape as _;

use crate::{
    compile::{DrawOp, FrameLabel, FramePlan},
    foundation::core::{Canvas, Point, Rect, Rgba8},
    foundation::error::{NetreelError, NetreelResult},
    render::{
        FrameRGBA,
        composite::{over_in_place, solid},
        text::{LabelFont, TextBrushRgba8, TextLayoutEngine},
    },
};

const CURVE_TOLERANCE: f64 = 0.1;

/// CPU rasterizer for [`FramePlan`]s, built on `vello_cpu`.
///
/// Each of the plan's three layers is rasterized into its own transparent surface and then
/// pasted, back to front, over a buffer filled with the plan's background.
pub struct CpuRasterizer {
    text: Option<LabelText>,
}

struct LabelText {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl CpuRasterizer {
    /// `font` is only needed for plans that carry a frame label.
    pub fn new(font: Option<&LabelFont>) -> NetreelResult<Self> {
        let text = font
            .map(|f| -> NetreelResult<LabelText> {
                Ok(LabelText {
                    engine: TextLayoutEngine::new(f)?,
                    font: vello_cpu::peniko::FontData::new(
                        vello_cpu::peniko::Blob::from(f.bytes().to_vec()),
                        0,
                    ),
                })
            })
            .transpose()?;
        Ok(Self { text })
    }

    pub fn render_plan(&mut self, plan: &FramePlan) -> NetreelResult<FrameRGBA> {
        let (width, height) = surface_size(plan.canvas)?;

        let mut out = solid(plan.background.to_premul(), plan.canvas.pixel_count());
        let connections = self.rasterize(width, height, &plan.connections, None)?;
        over_in_place(&mut out, &connections)?;
        let node_backs = self.rasterize(width, height, &plan.node_backs, None)?;
        over_in_place(&mut out, &node_backs)?;
        let nodes = self.rasterize(width, height, &plan.nodes, plan.label.as_ref())?;
        over_in_place(&mut out, &nodes)?;

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: out,
            premultiplied: true,
        })
    }

    fn rasterize(
        &mut self,
        width: u16,
        height: u16,
        ops: &[DrawOp],
        label: Option<&FrameLabel>,
    ) -> NetreelResult<Vec<u8>> {
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        for op in ops {
            draw_op(&mut ctx, op);
        }
        if let Some(label) = label {
            self.draw_label(&mut ctx, label)?;
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }

    fn draw_label(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        label: &FrameLabel,
    ) -> NetreelResult<()> {
        let Some(text) = self.text.as_mut() else {
            return Err(NetreelError::resource_unavailable(
                "frame label requested but no font was loaded",
            ));
        };

        let brush = TextBrushRgba8 {
            r: label.color.r,
            g: label.color.g,
            b: label.color.b,
            a: label.color.a,
        };
        let layout = text.engine.layout_plain(&label.text, label.size_px, brush)?;

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            label.origin.x,
            label.origin.y,
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&text.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

fn surface_size(canvas: Canvas) -> NetreelResult<(u16, u16)> {
    let width: u16 = canvas
        .width
        .try_into()
        .map_err(|_| NetreelError::render("surface width exceeds u16"))?;
    let height: u16 = canvas
        .height
        .try_into()
        .map_err(|_| NetreelError::render("surface height exceeds u16"))?;
    Ok((width, height))
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp) {
    match op {
        DrawOp::Disc {
            bounds,
            fill,
            outline,
        } => {
            let rect = rect_to_cpu(*bounds);
            if fill.a > 0 {
                ctx.set_paint(color_to_cpu(*fill));
                ctx.fill_path(&vello_cpu::kurbo::Ellipse::from_rect(rect).to_path(CURVE_TOLERANCE));
            }
            if let Some(outline) = outline {
                // Keep the stroke inside the node's bounding box.
                let half = (outline.width / 2.0).min(rect.width() / 2.0);
                let inner = rect.inset(-half);
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(outline.width));
                ctx.set_paint(color_to_cpu(outline.color));
                ctx.stroke_path(
                    &vello_cpu::kurbo::Ellipse::from_rect(inner).to_path(CURVE_TOLERANCE),
                );
            }
        }
        DrawOp::Line {
            from,
            to,
            width,
            color,
        } => {
            let mut path = vello_cpu::kurbo::BezPath::new();
            path.move_to(point_to_cpu(*from));
            path.line_to(point_to_cpu(*to));
            ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(f64::from(*width))
                    .with_caps(vello_cpu::kurbo::Cap::Butt),
            );
            ctx.set_paint(color_to_cpu(*color));
            ctx.stroke_path(&path);
        }
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
