mod app;
mod event;
mod headless;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use jogdial::config::{self, Overrides};
use jogdial::dial::color::ColorMode;
use jogdial::{Config, DialError};

use crate::app::App;
use crate::event::EventHandler;

/// jogdial: cook-timer jog dial in the terminal
#[derive(Parser, Debug)]
#[command(name = "jogdial", version, about, long_about = None)]
struct Cli {
    /// Path to a custom config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file path (logging disabled if not specified)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Log level filter (overrides config file)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Target FPS for the animation loop (overrides config file)
    #[arg(long)]
    fps: Option<u16>,

    /// Skip the preheat phase (overrides config file)
    #[arg(long)]
    no_preheat: bool,

    /// Tick colouring: flat, conic, seamless or animated (overrides config file)
    #[arg(long)]
    color_mode: Option<ColorMode>,

    /// Read commands from stdin and print JSON frames instead of drawing
    #[arg(long)]
    headless: bool,

    /// Print the default config to stdout and exit
    #[arg(long)]
    print_default_config: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            log_level: self.log_level.clone(),
            fps: self.fps,
            no_preheat: self.no_preheat,
            color_mode: self.color_mode,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", config::default_config_toml());
        return Ok(());
    }

    // Initialize color-eyre with custom panic hook that restores terminal
    install_panic_hook(!cli.headless);

    let config = config::load(&cli.overrides())?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.log.as_deref(), &config.general.log_level)?;

    info!(
        fps = config.general.fps,
        mode = ?config.trail.mode,
        headless = cli.headless,
        "jogdial starting"
    );

    if cli.headless {
        return headless::run(config).await;
    }

    run_terminal(&config).await?;
    info!("jogdial exiting");
    Ok(())
}

async fn run_terminal(config: &Config) -> Result<()> {
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| DialError::Terminal(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut events = EventHandler::new(config.frame_interval(), config.housekeeping_interval());

    // ── Main event loop ───────────────────────────────────────────────
    let result = async {
        loop {
            if app.dirty {
                let now = Instant::now();
                terminal.draw(|f| ui::draw(f, &app, now))?;
                app.dirty = false;
            }

            let Some(event) = events.next().await else {
                break;
            };
            app.handle_event(event, Instant::now());

            if app.should_quit {
                break;
            }
        }
        Ok::<(), color_eyre::Report>(())
    }
    .await;

    events.stop();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Install a panic hook that restores the terminal before printing the panic
fn install_panic_hook(restore_terminal: bool) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if restore_terminal {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
        default_hook(panic_info);
    }));
    color_eyre::install().ok();
}

/// Initialize tracing to a log file; `RUST_LOG` wins over the configured level
fn init_logging(log_path: Option<&Path>, level: &str) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::EnvFilter;

    let Some(path) = log_path else {
        // No logging if no log path specified (can't log to stdout in a TUI)
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("off"))
            .with_writer(io::sink)
            .init();
        return Ok(None);
    };

    let file = std::fs::File::create(path)
        .wrap_err_with(|| format!("Failed to create log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}
