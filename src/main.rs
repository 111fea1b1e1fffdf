use anyhow::Result;
use app_icon::icon_gen;
use clap::Parser;

#[derive(Debug, Parser)]
#[clap(
    name = "app-icon",
    version,
    about = "Render app_icon.png and app_icon_foreground.png into assets/icons"
)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    icon_gen::generate_app_icons(&icon_gen::default_output_dir())?;
    Ok(())
}
