//! Terminal preview of the GiftSwap landing page.
//!
//! Logs go to a file; the terminal belongs to the preview.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal;
use spark_signals::flush_sync;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use giftswap_landing::renderer::{
    key_action, mouse_action, Control, LineRenderer, PreviewApp, TerminalSession,
};
use giftswap_landing::{LocalWaitlist, PageConfig};

/// One animation frame at ~60fps.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "giftswap-preview", version, about = "Preview the GiftSwap landing page in a terminal")]
struct Args {
    /// Page config (JSON). Defaults apply when the file is missing.
    #[arg(short, long, default_value = "giftswap.json")]
    config: PathBuf,

    /// Where to write logs
    #[arg(long, default_value = "giftswap-preview.log")]
    log_file: PathBuf,

    /// Override the config's log level
    #[arg(long)]
    log_level: Option<Level>,

    /// Apply scroll offsets once per animation frame
    #[arg(long)]
    coalesce: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Loaded before the subscriber exists; the source is logged below
    let (mut config, source) = PageConfig::load_with_source(&args.config)?;
    if args.coalesce {
        config.scroll.coalesce_per_frame = true;
    }

    let level = args
        .log_level
        .unwrap_or_else(|| parse_level(&config.log_level));
    init_logging(&args.log_file, level)?;
    info!("config {}", source);
    info!("config={:?}", config);

    let (cols, rows) = terminal::size().context("failed to read terminal size")?;
    let waitlist = LocalWaitlist::new();
    let mut app = PreviewApp::new(config, Box::new(waitlist.clone()), cols, rows)?;

    let session = TerminalSession::enter().context("failed to enter alternate screen")?;
    let result = run(&mut app);
    session.leave().context("failed to restore terminal")?;

    app.shutdown();
    result?;

    let captured = waitlist.entries();
    info!("exiting with {} waitlist entries", captured.len());
    for email in captured {
        println!("waitlist: {}", email);
    }
    Ok(())
}

fn run(app: &mut PreviewApp) -> Result<()> {
    let mut renderer = LineRenderer::new();

    loop {
        flush_sync();
        if app.take_needs_paint() {
            renderer.render(&app.frame(), app.cols())?;
        }

        if !event::poll(FRAME)? {
            app.tick();
            continue;
        }

        let control = match event::read()? {
            Event::Key(key) => app.apply(key_action(key, app.is_editing(), app.is_menu_open())),
            Event::Mouse(mouse) => app.apply(mouse_action(mouse)),
            Event::Resize(cols, rows) => {
                app.resize(cols, rows)?;
                renderer.invalidate();
                Control::Continue
            }
            _ => Control::Continue,
        };

        if control == Control::Quit {
            info!("quit requested");
            return Ok(());
        }
    }
}

fn parse_level(value: &str) -> Level {
    match value.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn init_logging(path: &Path, level: Level) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create log file {:?}", path))?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
