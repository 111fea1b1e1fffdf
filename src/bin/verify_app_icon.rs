use anyhow::{Context, Result};
use app_icon::{
    icon_gen::{self, FOREGROUND_FILE, ICON_FILE},
    layout::IconLayout,
};
use image::{io::Reader as ImageReader, ColorType, DynamicImage};
use std::path::{Path, PathBuf};

fn open(path: &Path) -> Result<DynamicImage> {
    ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))
}

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(icon_gen::default_output_dir);

    let layout = IconLayout::builtin()?;
    let icon_path = dir.join(ICON_FILE);
    let foreground_path = dir.join(FOREGROUND_FILE);

    let icon = open(&icon_path)?;
    let foreground = open(&foreground_path)?;

    println!("Checking icons in: {}", dir.display());
    println!("  {}: {}x{} {:?}", ICON_FILE, icon.width(), icon.height(), icon.color());
    println!(
        "  {}: {}x{} {:?}",
        FOREGROUND_FILE,
        foreground.width(),
        foreground.height(),
        foreground.color()
    );

    let mut problems = 0;

    for (name, img) in [(ICON_FILE, &icon), (FOREGROUND_FILE, &foreground)] {
        if img.width() != layout.size || img.height() != layout.size {
            println!("⚠ {name} should be {0}x{0}", layout.size);
            problems += 1;
        }
    }

    if icon.color() != ColorType::Rgb8 {
        println!("⚠ {ICON_FILE} should have no alpha channel");
        problems += 1;
    }

    let icon_rgba = icon.to_rgba8();
    let foreground_rgba = foreground.to_rgba8();

    // The top-left corner is never covered by a shape
    let corner = icon_rgba.get_pixel(0, 0);
    println!("\nBackground sample (0, 0): {:?}", corner.0);
    if *corner != layout.palette.background {
        println!("⚠ Background should be {:?}", layout.palette.background.0);
        problems += 1;
    }

    let clear = foreground_rgba.get_pixel(0, 0);
    println!("Foreground sample (0, 0): {:?}", clear.0);
    if clear[3] != 0 {
        println!("⚠ Foreground background should be fully transparent");
        problems += 1;
    }

    // Shape interiors: midpoint of each list line and each sparkle center
    let mut interiors: Vec<_> = layout
        .list
        .iter()
        .map(|s| ((s.from.x + s.to.x) / 2, (s.from.y + s.to.y) / 2, s.color))
        .collect();
    interiors.extend(
        layout
            .sparkles
            .iter()
            .map(|s| (s.center.x, s.center.y, s.color)),
    );

    let mut covered = 0;
    for &(x, y, color) in &interiors {
        let (x, y) = (x as u32, y as u32);
        if x >= foreground.width() || y >= foreground.height() {
            continue;
        }
        if *foreground_rgba.get_pixel(x, y) == color && *icon_rgba.get_pixel(x, y) == color {
            covered += 1;
        }
    }

    println!("\nShape analysis:");
    println!("  {} out of {} interior samples match", covered, interiors.len());
    if covered != interiors.len() {
        problems += 1;
    }

    if problems == 0 {
        println!("✓ App icons look correct!");
    } else {
        anyhow::bail!("{problems} check(s) failed");
    }

    Ok(())
}
