use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use wobble::{
    Animator, Drawing as _, RandomSource, RealtimeClock, Rng64, Scheduler, StylePatch,
    SvgDocument, TaskId, ThreadRandom, TickMode, VirtualClock, WobbleConfig,
};

#[derive(Parser, Debug)]
#[command(name = "wobble", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a fixed number of ticks and write one SVG.
    Frame(FrameArgs),
    /// Run the timers on a virtual clock and write one SVG per fired task.
    Frames(FramesArgs),
    /// Run the timers in real time, rewriting the output after every fired task.
    Live(LiveArgs),
}

#[derive(clap::Args, Debug)]
struct CommonArgs {
    /// Input SVG (or HTML) document.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON wobble config; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config's tick mode.
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Override the config's amplitude.
    #[arg(long)]
    amplitude: Option<f64>,

    /// Seed for reproducible output. Without it, thread-local randomness is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Apply the article stylesheet patch to the first <style> element.
    #[arg(long)]
    style: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of ticks to apply.
    #[arg(long, default_value_t = 1)]
    ticks: u32,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Virtual time to run for, in milliseconds.
    #[arg(long)]
    until_ms: u64,

    /// Output directory for `frame_NNNNN.svg` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct LiveArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Wall-clock time to run for, in milliseconds.
    #[arg(long)]
    duration_ms: u64,

    /// Output SVG path, rewritten in place.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Synchronized,
    Independent,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Live(args) => cmd_live(args),
    }
}

fn load_config(common: &CommonArgs) -> anyhow::Result<WobbleConfig> {
    let mut cfg = match &common.config {
        Some(path) => WobbleConfig::from_json_path(path)?,
        None => WobbleConfig::default(),
    };
    if let Some(mode) = common.mode {
        cfg.mode = match mode {
            ModeChoice::Synchronized => TickMode::Synchronized,
            ModeChoice::Independent => TickMode::Independent,
        };
    }
    if let Some(amplitude) = common.amplitude {
        cfg.amplitude = amplitude;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn make_rng(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(Rng64::new(seed)),
        None => Box::new(ThreadRandom::new()),
    }
}

fn load_document(common: &CommonArgs) -> anyhow::Result<SvgDocument> {
    let mut doc = SvgDocument::from_path(&common.in_path)?;
    if common.style {
        doc.apply_style(&StylePatch::article());
    }
    if doc.shape_count() == 0 {
        tracing::warn!(input = %common.in_path.display(), "no <path d=...> elements found");
    }
    Ok(doc)
}

fn build<S: Scheduler<TaskId>>(
    common: &CommonArgs,
    scheduler: S,
) -> anyhow::Result<Animator<Box<dyn RandomSource>, S, SvgDocument>> {
    let cfg = load_config(common)?;
    let doc = load_document(common)?;
    Ok(Animator::new(doc, cfg, make_rng(common.seed), scheduler)?)
}

fn write_doc(doc: &SvgDocument, out: &Path) -> anyhow::Result<()> {
    doc.write_to(out)
        .with_context(|| format!("write svg '{}'", out.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut animator = build(&args.common, VirtualClock::new())?;
    for _ in 0..args.ticks {
        animator.step_all()?;
    }
    write_doc(animator.drawing(), &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut animator = build(&args.common, VirtualClock::new())?;
    animator.start()?;

    let frame_path = |i: u64| args.out_dir.join(format!("frame_{i:05}.svg"));
    write_doc(animator.drawing(), &frame_path(0))?;

    let mut written = 1u64;
    animator.run_until(Duration::from_millis(args.until_ms), |_, doc| {
        write_doc(doc, &frame_path(written))?;
        written += 1;
        Ok(())
    })?;

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_live(args: LiveArgs) -> anyhow::Result<()> {
    let mut animator = build(&args.common, RealtimeClock::new())?;
    animator.start()?;
    write_doc(animator.drawing(), &args.out)?;

    let fired = animator.run_for(Duration::from_millis(args.duration_ms), |_, doc| {
        write_doc(doc, &args.out)?;
        Ok(())
    })?;

    eprintln!("ran {fired} ticks into {}", args.out.display());
    Ok(())
}
