use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "courtintro", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the frame visible at a given time as a PNG.
    Frame(FrameArgs),
    /// Render the whole intro to a PNG directory or an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Intro configuration JSON. Defaults apply to omitted fields.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Seed for the decorative texture overlay (reproducible output).
    #[arg(long)]
    seed: Option<u64>,

    /// Log level: error, warn, info, debug or trace.
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Time in milliseconds since the intro started.
    #[arg(long, default_value_t = 0.0)]
    at_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output directory for a PNG sequence, or a `.mp4` file.
    #[arg(long)]
    out: PathBuf,

    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<u64>,

    /// Fail instead of overwriting an existing MP4.
    #[arg(long)]
    no_overwrite: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match &cli.cmd {
        Command::Frame(args) => args.common.log_level,
        Command::Render(args) => args.common.log_level,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load_config(common: &CommonArgs) -> anyhow::Result<courtintro::IntroConfig> {
    let mut config = match &common.config {
        Some(path) => courtintro::IntroConfig::from_json_path(path)?,
        None => courtintro::IntroConfig::default(),
    };
    if let Some(seed) = common.seed {
        config.overlay_seed = Some(seed);
    }
    config.validate().context("invalid intro configuration")?;
    Ok(config)
}

fn prepare(
    common: &CommonArgs,
) -> anyhow::Result<(courtintro::IntroSession, courtintro::CpuSurface)> {
    let config = load_config(common)?;
    let viewport = courtintro::Viewport::new(common.width, common.height);
    let surface = courtintro::CpuSurface::new(viewport)
        .with_context(|| format!("create {}x{} surface", common.width, common.height))?;
    let mut session = courtintro::IntroSession::new(config, viewport)?;
    // Offline output should not depend on how fast the logo decodes.
    session.wait_for_assets();
    Ok((session, surface))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (mut session, mut surface) = prepare(&args.common)?;
    let frame = courtintro::render_still(&mut session, &mut surface, args.at_ms)?;
    courtintro::write_png(&args.out, &frame)?;
    tracing::info!(out = %args.out.display(), at_ms = args.at_ms, "wrote frame");
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let fps = courtintro::Fps::new(args.common.fps, 1)?;
    let (mut session, mut surface) = prepare(&args.common)?;
    let mut clock = courtintro::FrameClock::new(fps);
    let opts = courtintro::RenderOptions {
        max_frames: args.max_frames,
    };

    let result = if is_mp4(&args.out) {
        let mut sink = courtintro::FfmpegSink::new(courtintro::FfmpegSinkOpts {
            overwrite: !args.no_overwrite,
            background: session.config().palette.frame_black,
            ..courtintro::FfmpegSinkOpts::new(&args.out)
        });
        courtintro::render_intro(&mut session, &mut surface, &mut clock, &mut sink, opts)
    } else {
        let mut sink = courtintro::PngSequenceSink::new(&args.out);
        courtintro::render_intro(&mut session, &mut surface, &mut clock, &mut sink, opts)
    };
    let report = result.with_context(|| format!("render intro to '{}'", args.out.display()))?;

    tracing::info!(
        out = %args.out.display(),
        frames = report.frames,
        painted = report.painted,
        "render finished"
    );
    Ok(())
}

fn is_mp4(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
}
