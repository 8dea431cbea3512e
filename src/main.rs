use anyhow::Context;
use clap::Parser;
use fbdraw::gfx::Surface;
use fbdraw::program::{Program, ThreadPacer};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the drawing program (a JSON list of commands) to run
    #[arg(short, long)]
    program: PathBuf,

    /// Framebuffer device to draw on
    #[arg(long, default_value = "/dev/fb0")]
    device: PathBuf,

    /// Leave the current screen contents in place instead of clearing first
    #[arg(long)]
    no_clear: bool,

    /// Whether or not to turn on debug logging
    #[arg(short, long)]
    debug: bool,
}

fn setup_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .compact()
        .finish()
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(args.debug);

    let program = Program::load(&args.program)
        .with_context(|| format!("could not load {}", args.program.display()))?;
    let mut surface = Surface::bind(&args.device).context("could not initialize the framebuffer")?;

    if !args.no_clear {
        surface.clear();
    }
    program.run(&mut surface, &mut ThreadPacer);
    info!("finished {} commands", program.commands.len());

    surface.unbind();
    Ok(())
}
