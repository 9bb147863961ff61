use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "netreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every frame as `{index}.png`, optionally followed by a GIF.
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Weights JSON: an array of frames, each `[conn_0, node_1, conn_1, ..., node_L]`.
    #[arg(long)]
    weights: PathBuf,

    /// Model input dimension; repeat for multi-dimensional inputs (`--input-size 28 --input-size 28`).
    #[arg(long = "input-size")]
    input_size: Vec<u64>,

    /// Render options JSON (flat object, every key optional).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output directory; overrides `out_dir` from the config.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Assemble an animation after the stills; same as `"gif": true` in the config.
    #[arg(long)]
    gif: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn read_weights_json(path: &Path) -> anyhow::Result<Vec<netreel::WeightSnapshot>> {
    let f = File::open(path).with_context(|| format!("open weights '{}'", path.display()))?;
    let frames: Vec<netreel::WeightSnapshot> = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse weights JSON '{}'", path.display()))?;
    Ok(frames)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<netreel::RenderConfig> {
    match path {
        Some(p) => netreel::RenderConfig::from_path(p)
            .with_context(|| format!("load render config '{}'", p.display())),
        None => Ok(netreel::RenderConfig::default()),
    }
}

fn input_dims(args: &InputArgs) -> Vec<netreel::InputDim> {
    args.input_size
        .iter()
        .copied()
        .map(netreel::InputDim::from)
        .collect()
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let frames = read_weights_json(&args.input.weights)?;
    let mut cfg = load_config(args.input.config.as_deref())?;
    if let Some(dir) = args.out_dir {
        cfg.out_dir = dir;
    }
    if args.gif {
        cfg.animation.enabled = true;
    }

    let outcome = netreel::create_animation(&frames, &input_dims(&args.input), &cfg)?;

    eprintln!(
        "wrote {} frames to {}",
        outcome.stills.len(),
        cfg.out_dir.display()
    );
    if let Some(path) = outcome.animation {
        eprintln!("animation saved to {}", path.display());
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let frames = read_weights_json(&args.input.weights)?;
    let cfg = load_config(args.input.config.as_deref())?;

    let mut session = netreel::RenderSession::new(&frames, &input_dims(&args.input), &cfg)?;
    let frame = session.render_frame(netreel::FrameIndex(args.frame))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    netreel::write_png(&frame, &args.out, cfg.style.background_rgba.rgb())?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
