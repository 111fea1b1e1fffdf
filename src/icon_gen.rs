use crate::{canvas::Canvas, layout::IconLayout};
use anyhow::{Context, Result};
use std::{
    fs::create_dir_all,
    io::{self, Write},
    path::{Path, PathBuf},
};

pub const ICON_FILE: &str = "app_icon.png";
pub const FOREGROUND_FILE: &str = "app_icon_foreground.png";

/// The two renderings of the icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconVariant {
    /// Full icon on the solid background color, written as RGB
    Opaque,
    /// Shapes only on a transparent background, for adaptive icon masks
    Foreground,
}

impl IconVariant {
    pub const ALL: [IconVariant; 2] = [IconVariant::Opaque, IconVariant::Foreground];

    pub fn file_name(self) -> &'static str {
        match self {
            IconVariant::Opaque => ICON_FILE,
            IconVariant::Foreground => FOREGROUND_FILE,
        }
    }

    fn label(self) -> &'static str {
        match self {
            IconVariant::Opaque => "Icon",
            IconVariant::Foreground => "Foreground icon",
        }
    }
}

/// Directory the icons are written to: `assets/icons` next to the crate sources
pub fn default_output_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("icons")
}

/// Draw the icon shapes onto a fresh canvas for the given variant
pub fn render(layout: &IconLayout, variant: IconVariant) -> Canvas {
    let mut canvas = match variant {
        IconVariant::Opaque => Canvas::opaque(layout.size, layout.palette.background),
        IconVariant::Foreground => Canvas::transparent(layout.size),
    };

    for stroke in layout.strokes() {
        canvas.draw_stroke(stroke);
    }

    for sparkle in &layout.sparkles {
        canvas.fill_circle(sparkle);
    }

    canvas
}

/// Render both variants into `out_dir` and return the written paths in order.
///
/// The first failing write aborts the run; a file written before it is left
/// in place.
pub fn generate_app_icons(out_dir: &Path) -> Result<Vec<PathBuf>> {
    generate_app_icons_with_report(out_dir, &mut io::stdout().lock())
}

/// Same as [`generate_app_icons`], writing the confirmation lines to `report`.
/// A line is only written once its file has been saved.
pub fn generate_app_icons_with_report<W: Write>(
    out_dir: &Path,
    report: &mut W,
) -> Result<Vec<PathBuf>> {
    let layout = IconLayout::builtin()?;

    // Ensure the output directory exists
    create_dir_all(out_dir).context("Can't create output directory")?;
    let out_dir = out_dir
        .canonicalize()
        .with_context(|| format!("Can't resolve output directory {}", out_dir.display()))?;

    let mut written = Vec::new();
    for variant in IconVariant::ALL {
        let output_path = out_dir.join(variant.file_name());
        render(&layout, variant)
            .save_png(&output_path)
            .with_context(|| format!("Failed to save {}", variant.file_name()))?;

        writeln!(report, "{} created: {}", variant.label(), output_path.display())
            .context("Failed to report output path")?;
        written.push(output_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const GOLD: Rgba<u8> = Rgba([255, 215, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([74, 144, 226, 255]);

    #[test]
    fn test_opaque_render() {
        let layout = IconLayout::builtin().unwrap();
        let canvas = render(&layout, IconVariant::Opaque);

        assert!(canvas.is_opaque());
        assert_eq!(canvas.size(), 1024);

        // Background corners
        assert_eq!(canvas.pixel(0, 0), BLUE);
        assert_eq!(canvas.pixel(1023, 1023), BLUE);
        assert_eq!(canvas.pixel(512, 900), BLUE);

        // Checkmark: on the middle stroke of each segment and at the joint
        assert_eq!(canvas.pixel(384, 576), WHITE);
        assert_eq!(canvas.pixel(448, 636), WHITE);
        assert_eq!(canvas.pixel(576, 512), WHITE);

        // List lines
        assert_eq!(canvas.pixel(512, 240), WHITE);
        assert_eq!(canvas.pixel(416, 320), WHITE);
        assert_eq!(canvas.pixel(448, 400), WHITE);
        // Between the list lines
        assert_eq!(canvas.pixel(416, 280), BLUE);

        // Sparkles
        assert_eq!(canvas.pixel(800, 112), GOLD);
        assert_eq!(canvas.pixel(832, 144), GOLD);
        assert_eq!(canvas.pixel(768, 144), GOLD);
    }

    #[test]
    fn test_foreground_render() {
        let layout = IconLayout::builtin().unwrap();
        let canvas = render(&layout, IconVariant::Foreground);

        assert!(!canvas.is_opaque());
        assert_eq!(canvas.pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(512, 900)[3], 0);
        assert_eq!(canvas.pixel(416, 280)[3], 0);

        assert_eq!(canvas.pixel(384, 576), WHITE);
        assert_eq!(canvas.pixel(512, 240), WHITE);
        assert_eq!(canvas.pixel(800, 112), GOLD);
    }

    #[test]
    fn test_list_lines_have_flat_ends() {
        let layout = IconLayout::builtin().unwrap();
        let canvas = render(&layout, IconVariant::Foreground);

        // First list line runs from x=320 to x=704 at y=240
        assert_eq!(canvas.pixel(320, 240), WHITE);
        assert_eq!(canvas.pixel(704, 240), WHITE);
        assert_eq!(canvas.pixel(319, 240)[3], 0);
        assert_eq!(canvas.pixel(312, 240)[3], 0);
        assert_eq!(canvas.pixel(705, 240)[3], 0);
        assert_eq!(canvas.pixel(714, 240)[3], 0);
    }

    #[test]
    fn test_report_lines_follow_saved_files() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut report = Vec::new();

        let written = generate_app_icons_with_report(temp_dir.path(), &mut report).unwrap();

        let report = String::from_utf8(report).unwrap();
        let expected = format!(
            "Icon created: {}\nForeground icon created: {}\n",
            written[0].display(),
            written[1].display()
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_variants_share_geometry() {
        let layout = IconLayout::builtin().unwrap();
        let opaque = render(&layout, IconVariant::Opaque);
        let foreground = render(&layout, IconVariant::Foreground);

        for y in (0..1024).step_by(7) {
            for x in (0..1024).step_by(7) {
                let fg = foreground.pixel(x, y);
                if fg[3] == 0 {
                    assert_eq!(opaque.pixel(x, y), BLUE, "pixel ({x}, {y})");
                } else {
                    assert_eq!(fg[3], 255, "partial alpha at ({x}, {y})");
                    assert_eq!(opaque.pixel(x, y), fg, "pixel ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_variant_file_names() {
        assert_eq!(IconVariant::Opaque.file_name(), "app_icon.png");
        assert_eq!(IconVariant::Foreground.file_name(), "app_icon_foreground.png");
        assert!(default_output_dir().ends_with("assets/icons"));
    }
}
