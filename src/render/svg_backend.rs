use std::fmt::Write as _;

use crate::core::PathCommand;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    LayeredRenderFrame, LinePrimitive, PathPrimitive, Renderer, TextBaseline, TextHAlign,
    TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub layers_written: usize,
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub texts_drawn: usize,
}

/// Serializes layered frames into standalone SVG documents.
///
/// Every layer becomes a `<g>` carrying its opacity, so a host page can keep
/// animating opacities on the same elements.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The document produced by the last successful `render` call.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &LayeredRenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut stats = SvgRenderStats::default();
        let mut out = String::new();
        write_document(&mut out, frame, &mut stats)
            .map_err(|_| ChartError::InvalidData("failed to format svg document".to_owned()))?;
        self.document = out;
        self.last_stats = stats;
        Ok(())
    }
}

fn write_document(
    out: &mut String,
    frame: &LayeredRenderFrame,
    stats: &mut SvgRenderStats,
) -> std::fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = frame.viewport.width,
        h = frame.viewport.height,
    )?;
    writeln!(
        out,
        r#"  <g transform="translate({},{})">"#,
        num(frame.plot.left),
        num(frame.plot.top)
    )?;

    for layer in &frame.layers {
        stats.layers_written += 1;
        writeln!(
            out,
            r#"    <g class="layer-{name}" data-layer="{name}" opacity="{opacity}">"#,
            name = layer.layer,
            opacity = num(layer.opacity),
        )?;
        for line in &layer.lines {
            write_line(out, line)?;
            stats.lines_drawn += 1;
        }
        for path in &layer.paths {
            write_path(out, path)?;
            stats.paths_drawn += 1;
        }
        for text in &layer.texts {
            write_text(out, text)?;
            stats.texts_drawn += 1;
        }
        writeln!(out, "    </g>")?;
    }

    writeln!(out, "  </g>")?;
    writeln!(out, "</svg>")
}

fn write_line(out: &mut String, line: &LinePrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"      <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}""#,
        num(line.x1),
        num(line.y1),
        num(line.x2),
        num(line.y2),
        line.color.to_hex(),
        num(line.stroke_width),
    )?;
    if let Some((dash, gap)) = line.dash {
        write!(out, r#" stroke-dasharray="{},{}""#, num(dash), num(gap))?;
    }
    writeln!(out, "/>")
}

fn write_path(out: &mut String, path: &PathPrimitive) -> std::fmt::Result {
    write!(out, r#"      <path d="{}""#, path_data(&path.commands))?;
    match path.fill {
        Some(fill) => write!(
            out,
            r#" fill="{}" fill-opacity="{}""#,
            fill.color.to_hex(),
            num(fill.opacity)
        )?,
        None => write!(out, r#" fill="none""#)?,
    }
    if let Some(stroke) = path.stroke {
        write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            stroke.color.to_hex(),
            num(stroke.width)
        )?;
    }
    writeln!(out, "/>")
}

fn write_text(out: &mut String, text: &TextPrimitive) -> std::fmt::Result {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    write!(
        out,
        r#"      <text x="{}" y="{}" font-size="{}px" text-anchor="{}" fill="{}""#,
        num(text.x),
        num(text.y),
        num(text.font_size_px),
        anchor,
        text.color.to_hex(),
    )?;
    if text.baseline == TextBaseline::Middle {
        write!(out, r#" dy="0.35em""#)?;
    }
    if text.bold {
        write!(out, r#" font-weight="bold""#)?;
    }
    writeln!(out, ">{}</text>", escape_xml(&text.text))
}

/// Encodes commands as SVG path data (`M`, `L`, `C`, `Z`).
#[must_use]
pub fn path_data(commands: &[PathCommand]) -> String {
    let mut data = String::new();
    for command in commands {
        match *command {
            PathCommand::MoveTo { x, y } => {
                let _ = write!(data, "M{},{}", num(x), num(y));
            }
            PathCommand::LineTo { x, y } => {
                let _ = write!(data, "L{},{}", num(x), num(y));
            }
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let _ = write!(
                    data,
                    "C{},{},{},{},{},{}",
                    num(x1),
                    num(y1),
                    num(x2),
                    num(y2),
                    num(x),
                    num(y)
                );
            }
            PathCommand::Close => data.push('Z'),
        }
    }
    data
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
fn num(value: f64) -> String {
    let mut text = format!("{value:.3}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    if text == "-0" { "0".to_owned() } else { text }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
