//! Geometry table for the app icon
//!
//! Every coordinate is stored as an offset from the canvas center and
//! resolved into absolute pixel positions once, when the table is loaded.
//! Colors are CSS color strings so the palette reads the same way it does in
//! the design files.

use anyhow::{anyhow, Context, Result};
use image::Rgba;
use serde::Deserialize;
use std::str::FromStr;

const ICON_LAYOUT: &str = r##"
{
  "size": 1024,
  "palette": {
    "background": "#4A90E2",
    "foreground": "#FFFFFF",
    "accent": "#FFD700"
  },
  "checkmark": {
    "points": [[-192, 0], [-64, 128], [192, -128]],
    "bundle": { "spread": 40, "step": 4, "width": 8, "cap": "round" }
  },
  "list": {
    "width": 20,
    "cap": "flat",
    "lines": [
      { "from": [-192, -272], "to": [192, -272] },
      { "from": [-192, -192], "to": [0, -192] },
      { "from": [-192, -112], "to": [64, -112] }
    ]
  },
  "sparkles": [
    { "at": [288, -400], "radius": 24 },
    { "at": [320, -368], "radius": 16 },
    { "at": [256, -368], "radius": 16 }
  ]
}
"##;

/// Offset from the canvas center, `[dx, dy]` in the table
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
struct Offset(i32, i32);

#[derive(Deserialize, Debug)]
struct LayoutTable {
    size: u32,
    palette: PaletteTable,
    checkmark: CheckmarkTable,
    list: ListTable,
    sparkles: Vec<SparkleTable>,
}

#[derive(Deserialize, Debug)]
struct PaletteTable {
    background: String,
    foreground: String,
    accent: String,
}

#[derive(Deserialize, Debug)]
struct CheckmarkTable {
    points: Vec<Offset>,
    bundle: BundleTable,
}

/// Parallel strokes at x offsets `-spread..=spread`, `step` apart
#[derive(Deserialize, Debug)]
struct BundleTable {
    spread: i32,
    step: usize,
    width: u32,
    cap: LineCap,
}

#[derive(Deserialize, Debug)]
struct ListTable {
    width: u32,
    cap: LineCap,
    lines: Vec<LineTable>,
}

#[derive(Deserialize, Debug)]
struct LineTable {
    from: Offset,
    to: Offset,
}

#[derive(Deserialize, Debug)]
struct SparkleTable {
    at: Offset,
    radius: u32,
}

/// Absolute pixel coordinate on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// How a stroke ends past its end points
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Ends are cut square at the end points
    Flat,
    /// Ends are half-discs of the pen width
    Round,
}

/// A line segment painted with a pen of the given width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub from: Point,
    pub to: Point,
    pub width: u32,
    pub cap: LineCap,
    pub color: Rgba<u8>,
}

/// A filled decorative circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    pub center: Point,
    pub radius: u32,
    pub color: Rgba<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Rgba<u8>,
    pub foreground: Rgba<u8>,
    pub accent: Rgba<u8>,
}

/// The resolved icon geometry, ready to be drawn in order:
/// checkmark bundles, list lines, then sparkles.
#[derive(Debug, Clone)]
pub struct IconLayout {
    pub size: u32,
    pub palette: Palette,
    pub checkmark: Vec<Stroke>,
    pub list: Vec<Stroke>,
    pub sparkles: Vec<Sparkle>,
}

impl IconLayout {
    /// Load the built-in icon geometry.
    pub fn builtin() -> Result<Self> {
        let table: LayoutTable =
            serde_json::from_str(ICON_LAYOUT).context("Failed to parse icon layout table")?;
        Self::resolve(table)
    }

    fn resolve(table: LayoutTable) -> Result<Self> {
        if table.size == 0 {
            anyhow::bail!("Icon layout size must be non-zero");
        }

        let palette = Palette {
            background: parse_color(&table.palette.background)?,
            foreground: parse_color(&table.palette.foreground)?,
            accent: parse_color(&table.palette.accent)?,
        };

        let center = center_of(table.size);
        let at = |offset: Offset| Point::new(center.x + offset.0, center.y + offset.1);

        let bundle = &table.checkmark.bundle;
        if bundle.step == 0 {
            anyhow::bail!("Checkmark bundle step must be non-zero");
        }

        let mut checkmark = Vec::new();
        for segment in table.checkmark.points.windows(2) {
            let (from, to) = (at(segment[0]), at(segment[1]));
            for dx in (-bundle.spread..=bundle.spread).step_by(bundle.step) {
                checkmark.push(Stroke {
                    from: Point::new(from.x + dx, from.y),
                    to: Point::new(to.x + dx, to.y),
                    width: bundle.width,
                    cap: bundle.cap,
                    color: palette.foreground,
                });
            }
        }

        let list = table
            .list
            .lines
            .iter()
            .map(|line| Stroke {
                from: at(line.from),
                to: at(line.to),
                width: table.list.width,
                cap: table.list.cap,
                color: palette.foreground,
            })
            .collect();

        let sparkles = table
            .sparkles
            .iter()
            .map(|sparkle| Sparkle {
                center: at(sparkle.at),
                radius: sparkle.radius,
                color: palette.accent,
            })
            .collect();

        Ok(Self {
            size: table.size,
            palette,
            checkmark,
            list,
            sparkles,
        })
    }

    pub fn center(&self) -> Point {
        center_of(self.size)
    }

    /// All strokes in draw order
    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.checkmark.iter().chain(self.list.iter())
    }
}

fn center_of(size: u32) -> Point {
    Point::new((size / 2) as i32, (size / 2) as i32)
}

/// Parse a CSS color string into an RGBA pixel
pub fn parse_color(css: &str) -> Result<Rgba<u8>> {
    let color = css_color::Srgb::from_str(css).map_err(|_| anyhow!("Invalid CSS color: {css}"))?;
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;

    Ok(Rgba([
        channel(color.red),
        channel(color.green),
        channel(color.blue),
        channel(color.alpha),
    ]))
}
