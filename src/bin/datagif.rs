use std::io;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use datagif::{AnimationRequest, AnimationReport, Dataset, OneOrMany, PlotKind};

#[derive(Parser, Debug)]
#[command(name = "datagif", version, about = "Animate per-time-step plots of a table into a GIF")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build an animation from a JSON request file.
    Render(RenderArgs),
    /// Build an animation from command-line flags only.
    Gif(GifArgs),
    /// Print the ordered distinct values of the time column.
    Frames(FramesArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input dataset (.csv or .json records).
    #[arg(long)]
    data: PathBuf,

    /// Animation request JSON.
    #[arg(long)]
    request: PathBuf,

    /// Override the request's output directory.
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Override the request's output name.
    #[arg(long)]
    name: Option<String>,

    /// Keep the per-frame PNGs.
    #[arg(long)]
    save_frames: bool,
}

#[derive(Parser, Debug)]
struct GifArgs {
    /// Input dataset (.csv or .json records).
    #[arg(long)]
    data: PathBuf,

    /// Existing output directory.
    #[arg(long)]
    save_dir: PathBuf,

    /// Base name of the output files.
    #[arg(long)]
    name: String,

    /// Plot kind; repeat to layer several plots.
    #[arg(long = "plot", required = true)]
    plots: Vec<PlotKind>,

    /// x column(s).
    #[arg(long, required = true, num_args = 1..)]
    x: Vec<String>,

    /// y column(s).
    #[arg(long, required = true, num_args = 1..)]
    y: Vec<String>,

    /// Time column.
    #[arg(long)]
    t: String,

    /// Hold the x range at the dataset-wide min/max.
    #[arg(long)]
    fix_x: bool,

    /// Hold the y range at the dataset-wide min/max.
    #[arg(long)]
    fix_y: bool,

    /// Keep the per-frame PNGs.
    #[arg(long)]
    save_frames: bool,

    /// Seconds per frame.
    #[arg(long)]
    duration: Option<f64>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input dataset (.csv or .json records).
    #[arg(long)]
    data: PathBuf,

    /// Time column.
    #[arg(long)]
    t: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Gif(args) => cmd_gif(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn load_data(path: &std::path::Path) -> anyhow::Result<Dataset> {
    Dataset::load(path).with_context(|| format!("load dataset '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let data = load_data(&args.data)?;
    let mut request = AnimationRequest::from_json_path(&args.request)
        .with_context(|| format!("load request '{}'", args.request.display()))?;
    if let Some(dir) = args.save_dir {
        request.save_dir = dir;
    }
    if let Some(name) = args.name {
        request.name = name;
    }
    if args.save_frames {
        request.save_frames = true;
    }
    finish(datagif::build_gif(&data, &request)?)
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    let data = load_data(&args.data)?;
    let mut request = AnimationRequest::new(
        one_or_many(args.plots),
        args.save_dir,
        args.name,
        one_or_many(args.x),
        one_or_many(args.y),
        args.t,
    )
    .with_fixed_axes(args.fix_x, args.fix_y)
    .with_save_frames(args.save_frames);
    if let Some(d) = args.duration {
        request = request.with_encoder_option("duration", serde_json::json!(d));
    }
    finish(datagif::build_gif(&data, &request)?)
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let data = load_data(&args.data)?;
    for t in datagif::distinct_times(&data, &args.t)? {
        println!("{t}");
    }
    Ok(())
}

fn one_or_many<T>(mut v: Vec<T>) -> OneOrMany<T> {
    if v.len() == 1
        && let Some(only) = v.pop()
    {
        return OneOrMany::One(only);
    }
    OneOrMany::Many(v)
}

fn finish(report: AnimationReport) -> anyhow::Result<()> {
    for p in &report.retained_frames {
        tracing::info!(path = %p.display(), "kept frame");
    }
    Ok(())
}
