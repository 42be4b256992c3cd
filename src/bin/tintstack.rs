use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tintstack", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tint and stack the layers of a generator config, writing one image.
    Render(RenderArgs),
    /// Resolve a color specification and print it as hex and as channels.
    Color(ColorArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Generator config JSON (layers, output filename and format).
    #[arg(long)]
    config: PathBuf,

    /// Color map JSON: an object of `"name": "color"` pairs.
    #[arg(long)]
    colors: PathBuf,

    /// Directory the layer images are read from (overrides the config).
    #[arg(long)]
    source: Option<PathBuf>,

    /// Directory the output image is written to (overrides the config).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ColorArgs {
    /// `#RRGGBB`, `#RGB`, `rgb(r, g, b)`, `rgb(r%, g%, b%)` or a CSS color name.
    spec: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Color(args) => cmd_color(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = tintstack::GeneratorConfig::from_json_file(&args.config)?;
    if let Some(source) = args.source {
        config = config.with_source_path(source);
    }
    if let Some(out) = args.out {
        config = config.with_output_path(out);
    }

    let colors = tintstack::load_color_map(&args.colors)?;
    let generator = tintstack::ImageGenerator::new(config, &colors)?;

    let out_dir = generator.output_path();
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    // Alpha-less layers are already reported through `tracing::warn!`.
    let report = generator.render()?;
    eprintln!("wrote {}", report.output.display());
    Ok(())
}

fn cmd_color(args: ColorArgs) -> anyhow::Result<()> {
    let rgb = tintstack::resolve(&args.spec)?;
    println!("{rgb} {},{},{}", rgb.r, rgb.g, rgb.b);
    Ok(())
}
