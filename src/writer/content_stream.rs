//! Page content streams.
//!
//! Text and image placements are recorded as operators and serialized on
//! [`ContentStreamBuilder::build`]. Coordinates are PDF user space: points,
//! origin at the bottom-left.

use crate::error::Result;
use crate::layout::Color;
use std::io::Write;

/// One content stream operator with its operands.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// `q`
    SaveState,
    /// `Q`
    RestoreState,
    /// `cm`
    Transform([f32; 6]),
    /// `BT`
    BeginText,
    /// `ET`
    EndText,
    /// `Tf` with a font resource name and size
    SetFont(String, f32),
    /// `Tm`
    SetTextMatrix([f32; 6]),
    /// `Tj`, bytes already in the font's encoding
    ShowText(Vec<u8>),
    /// `rg`
    SetFillColor(Color),
    /// `Do` with an XObject resource name
    PaintXObject(String),
}

impl ContentStreamOp {
    fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match self {
            ContentStreamOp::SaveState => w.write_all(b"q"),
            ContentStreamOp::RestoreState => w.write_all(b"Q"),
            ContentStreamOp::Transform(m) => write!(w, "{} cm", matrix(m)),
            ContentStreamOp::BeginText => w.write_all(b"BT"),
            ContentStreamOp::EndText => w.write_all(b"ET"),
            ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, num(*size)),
            ContentStreamOp::SetTextMatrix(m) => write!(w, "{} Tm", matrix(m)),
            ContentStreamOp::ShowText(bytes) => {
                w.write_all(b"(")?;
                write_literal(w, bytes)?;
                w.write_all(b") Tj")
            },
            ContentStreamOp::SetFillColor(c) => {
                write!(w, "{} {} {} rg", num(c.r), num(c.g), num(c.b))
            },
            ContentStreamOp::PaintXObject(name) => write!(w, "/{} Do", name),
        }
    }
}

/// Records the operators of one page.
///
/// Font and fill color are tracked so repeated state changes are dropped.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    ops: Vec<ContentStreamOp>,
    font: Option<(String, f32)>,
    fill: Option<Color>,
    in_text: bool,
}

impl ContentStreamBuilder {
    /// Create an empty content stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw operator.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.ops.push(op);
        self
    }

    /// Number of operators recorded so far.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether nothing has been drawn yet.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Open a text object unless one is already open.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text {
            self.in_text = true;
            self.op(ContentStreamOp::BeginText);
        }
        self
    }

    /// Close the open text object, if any.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text {
            self.in_text = false;
            self.op(ContentStreamOp::EndText);
        }
        self
    }

    /// Select `resource_name` (a key under `/Font`) at `size` points.
    pub fn set_font(&mut self, resource_name: &str, size: f32) -> &mut Self {
        let unchanged = matches!(&self.font, Some((name, s)) if name == resource_name && *s == size);
        if !unchanged {
            self.font = Some((resource_name.to_string(), size));
            self.op(ContentStreamOp::SetFont(resource_name.to_string(), size));
        }
        self
    }

    /// Show already-encoded text with its baseline origin at `(x, y)`.
    pub fn text(&mut self, encoded: Vec<u8>, x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::SetTextMatrix([1.0, 0.0, 0.0, 1.0, x, y]));
        self.op(ContentStreamOp::ShowText(encoded))
    }

    /// Set the fill color used for text.
    pub fn fill_color(&mut self, color: Color) -> &mut Self {
        if self.fill != Some(color) {
            self.fill = Some(color);
            self.op(ContentStreamOp::SetFillColor(color));
        }
        self
    }

    /// Paint XObject `resource_name` scaled into the box with lower-left
    /// corner `(x, y)`.
    pub fn draw_image(
        &mut self,
        resource_name: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::SaveState)
            .op(ContentStreamOp::Transform([width, 0.0, 0.0, height, x, y]))
            .op(ContentStreamOp::PaintXObject(resource_name.to_string()))
            .op(ContentStreamOp::RestoreState)
    }

    /// Serialize the recorded operators, one per line.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        for op in &self.ops {
            op.write_to(&mut buf)?;
            buf.push(b'\n');
        }
        // A text object left open by the caller is closed in the output only.
        if self.in_text {
            buf.extend_from_slice(b"ET\n");
        }
        Ok(buf)
    }
}

/// Body of a literal string: delimiters escaped, non-ASCII as octal.
fn write_literal<W: Write>(w: &mut W, bytes: &[u8]) -> std::io::Result<()> {
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => w.write_all(&[b'\\', byte])?,
            b'\n' => w.write_all(b"\\n")?,
            b'\r' => w.write_all(b"\\r")?,
            b'\t' => w.write_all(b"\\t")?,
            0x20..=0x7E => w.write_all(&[byte])?,
            _ => write!(w, "\\{:03o}", byte)?,
        }
    }
    Ok(())
}

fn matrix(m: &[f32; 6]) -> String {
    m.iter().map(|v| num(*v)).collect::<Vec<_>>().join(" ")
}

/// Format a coordinate with at most three decimals.
fn num(value: f32) -> String {
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }
    let formatted = format!("{:.3}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
